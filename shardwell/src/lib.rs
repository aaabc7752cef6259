//! Rewrite the column list of `INSERT` statements for encrypted and sharded tables.

pub mod error;
pub mod logger;
pub mod rewrite;
pub mod rule;
pub mod schema;
pub mod statement;

pub use error::Error;
pub use rewrite::{
    InsertAppendColumnsToken, InsertAppendColumnsTokenGenerator, InsertColumnsToken,
    InsertColumnsTokenGenerator, OptionalTokenGenerator, SqlToken, TokenContext,
    TokenGenerators,
};
pub use rule::{EncryptRule, ReadWriteSplitRule, Rule, ShardingRule};
pub use schema::{Schema, TableMetadata};
pub use statement::{InsertColumnsClause, InsertStatement, Statement};
