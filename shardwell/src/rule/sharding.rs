//! Sharding rule.

use std::collections::HashMap;

use shardwell_config::Sharding;
use tracing::debug;

use super::EncryptRule;

/// Sharded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRule {
    logic_table: String,
    generate_key_column: Option<String>,
}

impl TableRule {
    pub fn logic_table(&self) -> &str {
        &self.logic_table
    }

    pub fn generate_key_column(&self) -> Option<&str> {
        self.generate_key_column.as_deref()
    }
}

/// Sharding rule with the encryption rule for sharded tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardingRule {
    tables: HashMap<String, TableRule>,
    encrypt_rule: EncryptRule,
}

impl ShardingRule {
    pub fn new(config: &Sharding) -> Self {
        let tables = config
            .tables
            .iter()
            .map(|table| {
                let generate_key_column = table
                    .key_generator_column
                    .as_ref()
                    .filter(|column| !column.trim().is_empty())
                    .cloned();

                (
                    table.name.to_lowercase(),
                    TableRule {
                        logic_table: table.name.clone(),
                        generate_key_column,
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        debug!("sharding rule loaded with {} tables", tables.len());

        Self {
            tables,
            encrypt_rule: EncryptRule::new(&config.encrypt),
        }
    }

    pub fn table_rule(&self, table: &str) -> Option<&TableRule> {
        self.tables.get(&table.to_lowercase())
    }

    /// Column the sharding layer generates values for, if any.
    pub fn find_generate_key_column_name(&self, table: &str) -> Option<&str> {
        self.table_rule(table)?.generate_key_column()
    }

    pub fn encrypt_rule(&self) -> &EncryptRule {
        &self.encrypt_rule
    }
}
