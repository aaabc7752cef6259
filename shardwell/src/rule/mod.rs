//! Rules statements are rewritten with.

use std::fmt::Display;

use shardwell_config::{Config, RuleConfig};

pub mod encrypt;
pub mod read_write_split;
pub mod sharding;

pub use encrypt::{EncryptColumn, EncryptRule, EncryptTable};
pub use read_write_split::ReadWriteSplitRule;
pub use sharding::{ShardingRule, TableRule};

use crate::Error;

/// Active rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Sharding(ShardingRule),
    Encrypt(EncryptRule),
    ReadWriteSplit(ReadWriteSplitRule),
}

impl Rule {
    /// Build the rule selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(match config.rule()? {
            RuleConfig::Sharding(sharding) => Self::Sharding(ShardingRule::new(sharding)),
            RuleConfig::Encrypt(encrypt) => Self::Encrypt(EncryptRule::new(encrypt)),
            RuleConfig::ReadWriteSplit(split) => {
                Self::ReadWriteSplit(ReadWriteSplitRule::new(split))
            }
        })
    }

    /// Encryption rule in effect, if this rule encrypts anything.
    pub fn encrypt_rule(&self) -> Option<&EncryptRule> {
        match self {
            Self::Sharding(sharding) => Some(sharding.encrypt_rule()),
            Self::Encrypt(encrypt) => Some(encrypt),
            Self::ReadWriteSplit(_) => None,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Sharding(_) => "sharding",
            Self::Encrypt(_) => "encrypt",
            Self::ReadWriteSplit(_) => "read_write_split",
        };

        write!(f, "{}", display)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = Config::from_toml(
            r#"
[read_write_split]
name = "ds"
primary = "primary_ds"
replicas = ["replica_ds"]
strategy = "exclude_primary"
"#,
        )
        .unwrap();

        let rule = Rule::from_config(&config).unwrap();
        assert_eq!(rule.to_string(), "read_write_split");
        assert!(rule.encrypt_rule().is_none());

        let Rule::ReadWriteSplit(split) = rule else {
            panic!("expected read/write split rule");
        };
        assert_eq!(split.name(), "ds");
        assert_eq!(split.primary(), "primary_ds");
        assert_eq!(split.replicas(), &["replica_ds".to_string()]);
        assert_eq!(
            split.strategy(),
            shardwell_config::ReadWriteStrategy::ExcludePrimary
        );
    }

    #[test]
    fn test_from_config_without_rule() {
        let err = Rule::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(shardwell_config::Error::NoRule)));
    }

    #[test]
    fn test_sharding_exposes_embedded_encrypt_rule() {
        let rule = Rule::Sharding(ShardingRule::default());
        assert_eq!(rule.encrypt_rule(), Some(&EncryptRule::default()));
    }
}
