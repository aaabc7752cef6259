//! Rewrite error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("insert statement has no table")]
    NoTable,

    #[error("table \"{0}\" not found in schema")]
    UnknownTable(String),

    #[error("config error: {0}")]
    Config(#[from] shardwell_config::Error),
}
