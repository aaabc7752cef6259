//! Columns added by the proxy to a rewritten `INSERT` column list.

use std::fmt::Display;

use tracing::debug;

use super::insert_columns::{missing_generate_key_column, needs_append, rewritable_insert};
use super::{OptionalTokenGenerator, SqlToken, TokenContext};
use crate::rule::Rule;
use crate::Error;

/// Columns written after the regular columns, closing the column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAppendColumnsToken {
    position: Option<usize>,
    columns: Vec<String>,
    after_columns: bool,
}

impl InsertAppendColumnsToken {
    pub fn new(position: Option<usize>, columns: Vec<String>, after_columns: bool) -> Self {
        Self {
            position,
            columns,
            after_columns,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Display for InsertAppendColumnsToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.after_columns && !self.columns.is_empty() {
            write!(f, ", ")?;
        }

        write!(f, "{})", self.columns.join(", "))
    }
}

/// Generates [`InsertAppendColumnsToken`] whenever the column list
/// isn't complete without it.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertAppendColumnsTokenGenerator;

impl InsertAppendColumnsTokenGenerator {
    pub fn generate_token(
        &self,
        context: &TokenContext<'_>,
    ) -> Result<Option<InsertAppendColumnsToken>, Error> {
        let rule = context.rule;
        let Some(insert) = rewritable_insert(context.statement, rule)? else {
            return Ok(None);
        };

        if !needs_append(insert, rule) {
            return Ok(None);
        }

        let mut columns = vec![];

        if let Rule::Sharding(sharding) = rule {
            if let Some(column) = missing_generate_key_column(insert, sharding) {
                columns.push(column.to_string());
            }
        }

        if let Some(encrypt) = rule.encrypt_rule() {
            for column in insert.regular_columns() {
                columns.extend(
                    encrypt
                        .assisted_query_and_plain_columns(insert.table(), column)
                        .into_iter()
                        .map(String::from),
                );
            }
        }

        debug!(
            "appending columns {:?} to \"{}\" [{}]",
            columns,
            insert.table(),
            rule
        );

        Ok(Some(InsertAppendColumnsToken::new(
            insert.columns_clause().map(|clause| clause.stop_index()),
            columns,
            !insert.regular_columns().is_empty(),
        )))
    }
}

impl OptionalTokenGenerator for InsertAppendColumnsTokenGenerator {
    fn generate(&self, context: &TokenContext<'_>) -> Result<Option<SqlToken>, Error> {
        Ok(self
            .generate_token(context)?
            .map(SqlToken::InsertAppendColumns))
    }
}
