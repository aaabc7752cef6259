//! Table metadata.

use std::collections::HashMap;

/// Columns of one table, in ordinal position order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableMetadata {
    pub fn new(name: impl ToString, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Tables known to the rewriter, looked up case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: HashMap<String, TableMetadata>,
}

impl Schema {
    pub fn from_tables(tables: impl IntoIterator<Item = TableMetadata>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|table| (table.name.to_lowercase(), table))
                .collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
