//! SQL rewrite tokens.
//!
//! Generators inspect an already parsed statement together with the active rule
//! and produce positioned tokens. Splicing tokens into the SQL text is up to the caller.

use std::fmt::Display;

use crate::rule::Rule;
use crate::statement::Statement;
use crate::Error;

pub mod append_columns;
pub mod insert_columns;

pub use append_columns::{InsertAppendColumnsToken, InsertAppendColumnsTokenGenerator};
pub use insert_columns::{InsertColumnsToken, InsertColumnsTokenGenerator};

/// Input shared by all token generators.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    /// The statement being rewritten.
    pub statement: &'a Statement,
    /// Rule in effect for the statement.
    pub rule: &'a Rule,
    /// Reads use the cipher column of encrypted columns.
    pub query_with_cipher_column: bool,
}

impl<'a> TokenContext<'a> {
    pub fn new(statement: &'a Statement, rule: &'a Rule) -> Self {
        Self {
            statement,
            rule,
            query_with_cipher_column: true,
        }
    }

    pub fn query_with_cipher_column(mut self, query_with_cipher_column: bool) -> Self {
        self.query_with_cipher_column = query_with_cipher_column;
        self
    }
}

/// Token positioned in the original SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlToken {
    InsertColumns(InsertColumnsToken),
    InsertAppendColumns(InsertAppendColumnsToken),
}

impl SqlToken {
    /// Offset in the original SQL, `None` if the statement has no column list.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InsertColumns(token) => token.position(),
            Self::InsertAppendColumns(token) => token.position(),
        }
    }
}

impl Display for SqlToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsertColumns(token) => Display::fmt(token, f),
            Self::InsertAppendColumns(token) => Display::fmt(token, f),
        }
    }
}

/// Generates a token only when the statement needs one.
pub trait OptionalTokenGenerator {
    fn generate(&self, context: &TokenContext<'_>) -> Result<Option<SqlToken>, Error>;
}

/// Token generators, run in registration order.
pub struct TokenGenerators {
    generators: Vec<Box<dyn OptionalTokenGenerator + Send + Sync>>,
}

impl TokenGenerators {
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    pub fn add_generator(&mut self, generator: Box<dyn OptionalTokenGenerator + Send + Sync>) {
        self.generators.push(generator);
    }

    /// Generate tokens, ordered by position. Tokens at the same position
    /// stay in registration order.
    pub fn generate(&self, context: &TokenContext<'_>) -> Result<Vec<SqlToken>, Error> {
        let mut tokens = vec![];

        for generator in &self.generators {
            if let Some(token) = generator.generate(context)? {
                tokens.push(token);
            }
        }

        tokens.sort_by_key(|token| token.position());

        Ok(tokens)
    }
}

impl Default for TokenGenerators {
    fn default() -> Self {
        let mut generators = Self::new();
        generators.add_generator(Box::new(InsertColumnsTokenGenerator));
        generators.add_generator(Box::new(InsertAppendColumnsTokenGenerator));
        generators
    }
}
