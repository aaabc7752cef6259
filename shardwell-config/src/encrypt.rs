use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::str::FromStr;

use super::error::Error;

/// Algorithm used to produce cipher values.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EncryptorKind {
    /// Reversible AES encryption.
    #[default]
    Aes,
    /// One-way MD5 digest.
    Md5,
}

impl FromStr for EncryptorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aes" => Ok(Self::Aes),
            "md5" => Ok(Self::Md5),
            _ => Err(format!("Invalid encryptor: {}", s)),
        }
    }
}

impl Display for EncryptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Aes => "aes",
            Self::Md5 => "md5",
        };

        write!(f, "{}", display)
    }
}

/// Named encryptor referenced by encrypted columns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Encryptor {
    /// Encryption algorithm.
    pub kind: EncryptorKind,
    /// Algorithm properties, e.g. `aes.key.value`.
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

/// One encrypted column. Clients read and write `logic`; the database stores `cipher`
/// and, optionally, the assisted query and plain shadow columns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EncryptColumn {
    /// Column name used by clients.
    pub logic: String,
    /// Physical column holding the encrypted value.
    pub cipher: String,
    /// Physical column holding a searchable digest of the value.
    #[serde(default)]
    pub assisted_query: Option<String>,
    /// Physical column holding an unencrypted copy of the value.
    #[serde(default)]
    pub plain: Option<String>,
    /// Name of the encryptor in `[encrypt.encryptors]`.
    pub encryptor: String,
}

/// Table with encrypted columns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EncryptTable {
    /// Table name, matched case-insensitively.
    pub name: String,
    /// Encrypted columns, in the order they were configured.
    #[serde(default)]
    pub columns: Vec<EncryptColumn>,
}

/// Column encryption rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Encrypt {
    /// Encryptors by name.
    #[serde(default)]
    pub encryptors: BTreeMap<String, Encryptor>,
    /// Tables with encrypted columns.
    #[serde(default)]
    pub tables: Vec<EncryptTable>,
}

impl Encrypt {
    /// Validate table and column definitions.
    pub fn check(&self) -> Result<(), Error> {
        let mut tables = HashSet::new();

        for table in &self.tables {
            if !tables.insert(table.name.to_lowercase()) {
                return Err(Error::DuplicateTable(table.name.clone()));
            }

            let mut columns = HashSet::new();
            for column in &table.columns {
                if !columns.insert(column.logic.as_str()) {
                    return Err(Error::DuplicateColumn {
                        table: table.name.clone(),
                        column: column.logic.clone(),
                    });
                }

                if column.cipher.trim().is_empty() {
                    return Err(Error::EmptyCipherColumn {
                        table: table.name.clone(),
                        column: column.logic.clone(),
                    });
                }

                if !self.encryptors.contains_key(&column.encryptor) {
                    return Err(Error::UnknownEncryptor {
                        table: table.name.clone(),
                        column: column.logic.clone(),
                        encryptor: column.encryptor.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
