//! Column encryption rule.

use std::collections::HashMap;

use indexmap::IndexMap;
use shardwell_config::Encrypt;
use tracing::debug;

/// Physical columns backing one logical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptColumn {
    cipher: String,
    assisted_query: Option<String>,
    plain: Option<String>,
    encryptor: String,
}

impl EncryptColumn {
    pub fn cipher(&self) -> &str {
        &self.cipher
    }

    pub fn assisted_query(&self) -> Option<&str> {
        self.assisted_query.as_deref()
    }

    pub fn plain(&self) -> Option<&str> {
        self.plain.as_deref()
    }

    pub fn encryptor(&self) -> &str {
        &self.encryptor
    }

    /// Assisted query and plain columns, in that order.
    fn shadow_columns(&self) -> impl Iterator<Item = &str> {
        self.assisted_query().into_iter().chain(self.plain())
    }
}

/// Encrypted columns of one table, by logical name, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptTable {
    columns: IndexMap<String, EncryptColumn>,
}

impl EncryptTable {
    pub fn column(&self, logic: &str) -> Option<&EncryptColumn> {
        self.columns.get(logic)
    }
}

/// Encryption rule, keyed by lowercase table name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptRule {
    tables: HashMap<String, EncryptTable>,
}

impl EncryptRule {
    pub fn new(config: &Encrypt) -> Self {
        let tables = config
            .tables
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .map(|column| {
                        (
                            column.logic.clone(),
                            EncryptColumn {
                                cipher: column.cipher.clone(),
                                assisted_query: column.assisted_query.clone(),
                                plain: column.plain.clone(),
                                encryptor: column.encryptor.clone(),
                            },
                        )
                    })
                    .collect();

                (table.name.to_lowercase(), EncryptTable { columns })
            })
            .collect::<HashMap<_, _>>();

        debug!("encrypt rule loaded with {} tables", tables.len());

        Self { tables }
    }

    /// No table has encrypted columns.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, table: &str) -> Option<&EncryptTable> {
        self.tables.get(&table.to_lowercase())
    }

    /// Logical column name to cipher column name, in configuration order.
    pub fn logic_and_cipher_columns(&self, table: &str) -> IndexMap<&str, &str> {
        self.table(table)
            .map(|table| {
                table
                    .columns
                    .iter()
                    .map(|(logic, column)| (logic.as_str(), column.cipher()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn cipher_column(&self, table: &str, logic: &str) -> Option<&str> {
        self.table(table)?.column(logic).map(|column| column.cipher())
    }

    /// Total number of assisted query and plain columns configured for the table.
    pub fn assisted_query_and_plain_column_count(&self, table: &str) -> usize {
        self.table(table)
            .map(|table| {
                table
                    .columns
                    .values()
                    .map(|column| column.shadow_columns().count())
                    .sum()
            })
            .unwrap_or_default()
    }

    /// Assisted query and plain columns backing a logical column.
    pub fn assisted_query_and_plain_columns(&self, table: &str, logic: &str) -> Vec<&str> {
        self.table(table)
            .and_then(|table| table.column(logic))
            .map(|column| column.shadow_columns().collect())
            .unwrap_or_default()
    }
}
