use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use super::encrypt::Encrypt;
use super::error::Error;
use super::general::General;
use super::read_write_split::ReadWriteSplit;
use super::sharding::Sharding;

/// Configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General configuration.
    #[serde(default)]
    pub general: General,

    /// Sharding rule.
    #[serde(default)]
    pub sharding: Option<Sharding>,

    /// Encryption rule.
    #[serde(default)]
    pub encrypt: Option<Encrypt>,

    /// Read/write split rule.
    #[serde(default)]
    pub read_write_split: Option<ReadWriteSplit>,
}

/// The single rule selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleConfig<'a> {
    Sharding(&'a Sharding),
    Encrypt(&'a Encrypt),
    ReadWriteSplit(&'a ReadWriteSplit),
}

impl Config {
    /// Load configuration from disk or use defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let config: Config = match read_to_string(path) {
            Ok(source) => {
                let config: Config = match toml::from_str(&source) {
                    Ok(config) => config,
                    Err(err) => return Err(Error::config(&source, err)),
                };
                info!("loaded \"{}\"", path.display());
                config
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "\"{}\" doesn't exist, loading defaults instead",
                    path.display()
                );
                Config::default()
            }
            Err(err) => return Err(err.into()),
        };

        config.check()?;

        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(source).map_err(|err| Error::config(source, err))?;
        config.check()?;
        Ok(config)
    }

    /// Validate every configured rule.
    pub fn check(&self) -> Result<(), Error> {
        if let Some(ref sharding) = self.sharding {
            sharding.check()?;
        }

        if let Some(ref encrypt) = self.encrypt {
            encrypt.check()?;
        }

        if let Some(ref read_write_split) = self.read_write_split {
            if read_write_split.replicas.is_empty() {
                warn!(
                    "read/write split \"{}\" has no replicas, all reads go to \"{}\"",
                    read_write_split.name, read_write_split.primary
                );
            }
        }

        Ok(())
    }

    /// Get the rule statements are rewritten with.
    pub fn rule(&self) -> Result<RuleConfig<'_>, Error> {
        let mut rules = vec![];

        if let Some(ref sharding) = self.sharding {
            rules.push(("sharding", RuleConfig::Sharding(sharding)));
        }

        if let Some(ref encrypt) = self.encrypt {
            rules.push(("encrypt", RuleConfig::Encrypt(encrypt)));
        }

        if let Some(ref read_write_split) = self.read_write_split {
            rules.push((
                "read_write_split",
                RuleConfig::ReadWriteSplit(read_write_split),
            ));
        }

        match rules.len() {
            0 => Err(Error::NoRule),
            1 => Ok(rules.remove(0).1),
            _ => Err(Error::MultipleRules(
                rules
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }

    /// JSON schema of the configuration file.
    pub fn schema() -> Result<String, Error> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncryptorKind, ReadWriteStrategy};
    use std::io::Write;

    const ENCRYPT: &str = r#"
[general]
query_with_cipher_column = false

[encrypt.encryptors.aes]
kind = "aes"
props = { "aes.key.value" = "123456" }

[[encrypt.tables]]
name = "users"

[[encrypt.tables.columns]]
logic = "ssn"
cipher = "ssn_cipher"
assisted_query = "ssn_assisted"
plain = "ssn_plain"
encryptor = "aes"
"#;

    #[test]
    fn test_encrypt() {
        let config = Config::from_toml(ENCRYPT).unwrap();
        assert!(!config.general.query_with_cipher_column);

        let RuleConfig::Encrypt(encrypt) = config.rule().unwrap() else {
            panic!("expected encrypt rule");
        };
        assert_eq!(encrypt.encryptors["aes"].kind, EncryptorKind::Aes);
        let column = &encrypt.tables[0].columns[0];
        assert_eq!(column.cipher, "ssn_cipher");
        assert_eq!(column.assisted_query.as_deref(), Some("ssn_assisted"));
        assert_eq!(column.plain.as_deref(), Some("ssn_plain"));
    }

    #[test]
    fn test_sharding_with_encrypt() {
        let source = r#"
[[sharding.tables]]
name = "orders"
key_generator_column = "order_id"

[sharding.encrypt.encryptors.md5]
kind = "md5"

[[sharding.encrypt.tables]]
name = "orders"
columns = [{ logic = "card", cipher = "card_cipher", encryptor = "md5" }]
"#;
        let config = Config::from_toml(source).unwrap();
        assert!(config.general.query_with_cipher_column);

        let RuleConfig::Sharding(sharding) = config.rule().unwrap() else {
            panic!("expected sharding rule");
        };
        assert_eq!(
            sharding.tables[0].key_generator_column.as_deref(),
            Some("order_id")
        );
        assert_eq!(sharding.encrypt.tables[0].columns[0].cipher, "card_cipher");
    }

    #[test]
    fn test_read_write_split() {
        let source = r#"
[read_write_split]
name = "ds"
primary = "primary_ds"
replicas = ["replica_ds_0", "replica_ds_1"]
strategy = "exclude_primary"
"#;
        let config = Config::from_toml(source).unwrap();
        let RuleConfig::ReadWriteSplit(split) = config.rule().unwrap() else {
            panic!("expected read/write split rule");
        };
        assert_eq!(split.strategy, ReadWriteStrategy::ExcludePrimary);
        assert_eq!(split.replicas.len(), 2);
    }

    #[test]
    fn test_no_rule() {
        let config = Config::default();
        assert!(matches!(config.rule(), Err(Error::NoRule)));
    }

    #[test]
    fn test_multiple_rules() {
        let source = format!(
            "{}\n[read_write_split]\nname = \"ds\"\nprimary = \"primary_ds\"\n",
            ENCRYPT
        );
        let config = Config::from_toml(&source).unwrap();
        let err = config.rule().unwrap_err();
        assert_eq!(
            err.to_string(),
            "more than one rule configured: encrypt, read_write_split"
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = Config::from_toml("[general]\nport = 6432\n").unwrap_err();
        assert!(err.to_string().contains("unknown field `port`"), "{}", err);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENCRYPT.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.encrypt.is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("shardwell.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{:?}", err);
    }

    #[test]
    fn test_load_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{:?}", err);
    }

    #[test]
    fn test_load_rejects_invalid_rule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENCRYPT.replace("encryptor = \"aes\"", "encryptor = \"des\"").as_bytes())
            .unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::UnknownEncryptor { .. }));
    }

    #[test]
    fn test_schema() {
        let schema = Config::schema().unwrap();
        assert!(schema.contains("query_with_cipher_column"));
        assert!(schema.contains("key_generator_column"));
    }
}
