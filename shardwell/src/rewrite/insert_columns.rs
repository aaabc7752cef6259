//! Rewrite the column list of `INSERT` statements.
//!
//! Encrypted columns are written to their cipher column, and columns the
//! proxy adds (generated keys, assisted query and plain columns) are appended
//! after the client's columns by [`InsertAppendColumnsTokenGenerator`].
//!
//! [`InsertAppendColumnsTokenGenerator`]: super::InsertAppendColumnsTokenGenerator

use std::fmt::Display;

use tracing::{debug, trace};

use super::{OptionalTokenGenerator, SqlToken, TokenContext};
use crate::rule::{Rule, ShardingRule};
use crate::statement::{InsertStatement, Statement};
use crate::Error;

/// Column list to write in place of the statement's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertColumnsToken {
    position: Option<usize>,
    columns: Vec<String>,
    complete: bool,
}

impl InsertColumnsToken {
    pub fn new(position: Option<usize>, columns: Vec<String>, complete: bool) -> Self {
        Self {
            position,
            columns,
            complete,
        }
    }

    /// Stop index of the original column list, if the statement had one.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// No columns will be appended after this list, so it closes the parenthesis.
    pub fn complete(&self) -> bool {
        self.complete
    }
}

impl Display for InsertColumnsToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.columns.is_empty() && self.complete {
            return Ok(());
        }

        write!(f, "({}", self.columns.join(", "))?;

        if self.complete {
            write!(f, ")")?;
        }

        Ok(())
    }
}

/// Generates [`InsertColumnsToken`].
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertColumnsTokenGenerator;

impl InsertColumnsTokenGenerator {
    /// Decide if the column list of the statement needs to be rewritten, and to what.
    pub fn generate_token(
        &self,
        statement: &Statement,
        rule: &Rule,
    ) -> Result<Option<InsertColumnsToken>, Error> {
        let Some(insert) = rewritable_insert(statement, rule)? else {
            return Ok(None);
        };

        let columns = actual_insert_columns(insert, rule);
        let needs_append = needs_append(insert, rule);

        debug!(
            "rewriting columns of \"{}\" to {:?} [{}, append: {}]",
            insert.table(),
            columns,
            rule,
            needs_append,
        );

        Ok(Some(InsertColumnsToken::new(
            insert.columns_clause().map(|clause| clause.stop_index()),
            columns,
            !needs_append,
        )))
    }
}

impl OptionalTokenGenerator for InsertColumnsTokenGenerator {
    fn generate(&self, context: &TokenContext<'_>) -> Result<Option<SqlToken>, Error> {
        Ok(self
            .generate_token(context.statement, context.rule)?
            .map(SqlToken::InsertColumns))
    }
}

/// Get the `INSERT` whose column list this rule needs to synthesize.
pub(super) fn rewritable_insert<'a>(
    statement: &'a Statement,
    rule: &Rule,
) -> Result<Option<&'a InsertStatement>, Error> {
    let Some(insert) = statement.insert() else {
        trace!("not an insert, skipping column rewrite");
        return Ok(None);
    };

    // Read/write split doesn't rewrite columns of its own.
    if matches!(rule, Rule::ReadWriteSplit(_)) && insert.columns_clause().is_none() {
        trace!("no column list with read/write split, skipping column rewrite");
        return Ok(None);
    }

    // Columns written by the client are never overwritten.
    if let Some(clause) = insert.columns_clause() {
        if !clause.columns().is_empty() {
            trace!("insert names its columns, skipping column rewrite");
            return Ok(None);
        }
    }

    if insert.table().is_empty() {
        return Err(Error::NoTable);
    }

    Ok(Some(insert))
}

/// Regular columns with encrypted columns replaced by their cipher column.
pub(super) fn actual_insert_columns(insert: &InsertStatement, rule: &Rule) -> Vec<String> {
    let logic_and_cipher_columns = rule
        .encrypt_rule()
        .map(|encrypt| encrypt.logic_and_cipher_columns(insert.table()))
        .unwrap_or_default();

    insert
        .regular_columns()
        .iter()
        .map(|column| {
            logic_and_cipher_columns
                .get(column.as_str())
                .map(|cipher| cipher.to_string())
                .unwrap_or_else(|| column.clone())
        })
        .collect()
}

/// Generated key column the client didn't supply.
pub(super) fn missing_generate_key_column<'a>(
    insert: &InsertStatement,
    sharding: &'a ShardingRule,
) -> Option<&'a str> {
    sharding
        .find_generate_key_column_name(insert.table())
        .filter(|column| {
            !insert
                .regular_columns()
                .iter()
                .any(|regular| regular == column)
        })
}

/// Columns will be appended after the regular ones.
pub(super) fn needs_append(insert: &InsertStatement, rule: &Rule) -> bool {
    match rule {
        Rule::Sharding(sharding) => {
            missing_generate_key_column(insert, sharding).is_some()
                || sharding
                    .encrypt_rule()
                    .assisted_query_and_plain_column_count(insert.table())
                    > 0
        }
        Rule::Encrypt(encrypt) => encrypt.assisted_query_and_plain_column_count(insert.table()) > 0,
        Rule::ReadWriteSplit(_) => false,
    }
}
