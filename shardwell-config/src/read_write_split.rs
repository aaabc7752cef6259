use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Strategy for routing read queries between the primary and its replicas.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ReadWriteStrategy {
    /// Uses the primary database as well as the replicas to serve read queries (default).
    #[default]
    IncludePrimary,
    /// Sends all read queries to replicas, leaving the primary to serve only writes.
    ExcludePrimary,
    /// Sends reads to the primary only if one or more replicas have been banned.
    IncludePrimaryIfReplicaBanned,
}

impl FromStr for ReadWriteStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "includeprimary" => Ok(Self::IncludePrimary),
            "excludeprimary" => Ok(Self::ExcludePrimary),
            "includeprimaryifreplicabanned" => Ok(Self::IncludePrimaryIfReplicaBanned),
            _ => Err(format!("Invalid read-write split: {}", s)),
        }
    }
}

impl Display for ReadWriteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::ExcludePrimary => "exclude_primary",
            Self::IncludePrimary => "include_primary",
            Self::IncludePrimaryIfReplicaBanned => "include_primary_if_replica_banned",
        };

        write!(f, "{}", display)
    }
}

/// Read/write split rule. Routes statements between a primary and its replicas;
/// it never changes the statement itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReadWriteSplit {
    /// Name of the logical data source.
    pub name: String,
    /// Data source serving writes.
    pub primary: String,
    /// Data sources serving reads.
    #[serde(default)]
    pub replicas: Vec<String>,
    /// Read routing strategy.
    #[serde(default)]
    pub strategy: ReadWriteStrategy,
}
