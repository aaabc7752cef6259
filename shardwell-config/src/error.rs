//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("config syntax error on line {line}: {message}\n    {snippet}")]
    Syntax {
        line: usize,
        message: String,
        snippet: String,
    },

    #[error("no rule configured, expected one of [sharding], [encrypt] or [read_write_split]")]
    NoRule,

    #[error("more than one rule configured: {0}")]
    MultipleRules(String),

    #[error("table \"{0}\" is configured more than once")]
    DuplicateTable(String),

    #[error("column \"{column}\" of table \"{table}\" is configured more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("column \"{column}\" of table \"{table}\" has an empty cipher column")]
    EmptyCipherColumn { table: String, column: String },

    #[error("column \"{column}\" of table \"{table}\" uses unknown encryptor \"{encryptor}\"")]
    UnknownEncryptor {
        table: String,
        column: String,
        encryptor: String,
    },
}

impl Error {
    /// Point at the line in the source that failed to deserialize.
    pub fn config(source: &str, err: toml::de::Error) -> Self {
        let Some(span) = err.span() else {
            return Self::Toml(err);
        };

        let line = source[..span.start.min(source.len())]
            .chars()
            .filter(|c| *c == '\n')
            .count()
            + 1;
        let snippet = source
            .lines()
            .nth(line - 1)
            .unwrap_or_default()
            .trim()
            .to_string();

        Self::Syntax {
            line,
            message: err.message().to_string(),
            snippet,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_error_points_at_line() {
        let source = "[general]\nquery_with_cipher_column = \"yes\"\n";
        let err = toml::from_str::<crate::Config>(source).unwrap_err();
        let err = Error::config(source, err);
        match err {
            Error::Syntax { line, snippet, .. } => {
                assert_eq!(line, 2);
                assert_eq!(snippet, "query_with_cipher_column = \"yes\"");
            }
            _ => panic!("expected syntax error, got {:?}", err),
        }
    }
}
