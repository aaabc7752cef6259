use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::encrypt::Encrypt;
use super::error::Error;

/// Sharded table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ShardedTable {
    /// Logical table name, matched case-insensitively.
    pub name: String,
    /// Column whose value is generated by the proxy (e.g. a distributed
    /// sequence) when the client doesn't supply it.
    #[serde(default)]
    pub key_generator_column: Option<String>,
}

/// Sharding rule. Sharded tables can also have encrypted columns,
/// configured in `[sharding.encrypt]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Sharding {
    /// List of sharded tables.
    #[serde(default)]
    pub tables: Vec<ShardedTable>,

    /// Encryption for sharded tables.
    #[serde(default)]
    pub encrypt: Encrypt,
}

impl Sharding {
    pub fn check(&self) -> Result<(), Error> {
        let mut tables = HashSet::new();

        for table in &self.tables {
            if !tables.insert(table.name.to_lowercase()) {
                return Err(Error::DuplicateTable(table.name.clone()));
            }

            if let Some(column) = &table.key_generator_column {
                if column.trim().is_empty() {
                    warn!(
                        "table \"{}\" has an empty key generator column, ignoring",
                        table.name
                    );
                }
            }
        }

        self.encrypt.check()
    }
}
