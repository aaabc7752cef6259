//! Parsed statement metadata consumed by the token generators.

use crate::schema::Schema;
use crate::Error;

/// Column list of an `INSERT`, e.g. `(id, name)` or `()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertColumnsClause {
    stop_index: usize,
    columns: Vec<String>,
}

impl InsertColumnsClause {
    pub fn new(stop_index: usize, columns: &[&str]) -> Self {
        Self {
            stop_index,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Offset of the clause's last character in the original SQL.
    pub fn stop_index(&self) -> usize {
        self.stop_index
    }

    /// Columns written by the client.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: String,
    regular_columns: Vec<String>,
    columns_clause: Option<InsertColumnsClause>,
}

impl InsertStatement {
    pub fn new(
        table: impl ToString,
        regular_columns: &[&str],
        columns_clause: Option<InsertColumnsClause>,
    ) -> Self {
        Self {
            table: table.to_string(),
            regular_columns: regular_columns.iter().map(|c| c.to_string()).collect(),
            columns_clause,
        }
    }

    /// Build the statement, taking regular columns from the clause or,
    /// if it doesn't name any, from the table's metadata.
    pub fn resolve(
        table: &str,
        columns_clause: Option<InsertColumnsClause>,
        schema: &Schema,
    ) -> Result<Self, Error> {
        if table.is_empty() {
            return Err(Error::NoTable);
        }

        let regular_columns = match columns_clause {
            Some(ref clause) if !clause.columns.is_empty() => clause.columns.clone(),
            _ => schema
                .table(table)
                .ok_or_else(|| Error::UnknownTable(table.to_string()))?
                .columns
                .clone(),
        };

        Ok(Self {
            table: table.to_string(),
            regular_columns,
            columns_clause,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns values are supplied for, excluding generated ones.
    pub fn regular_columns(&self) -> &[String] {
        &self.regular_columns
    }

    pub fn columns_clause(&self) -> Option<&InsertColumnsClause> {
        self.columns_clause.as_ref()
    }
}

/// Parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(InsertStatement),
    Select,
    Update,
    Delete,
    Other,
}

impl Statement {
    pub fn insert(&self) -> Option<&InsertStatement> {
        match self {
            Self::Insert(insert) => Some(insert),
            _ => None,
        }
    }
}

impl From<InsertStatement> for Statement {
    fn from(value: InsertStatement) -> Self {
        Self::Insert(value)
    }
}
