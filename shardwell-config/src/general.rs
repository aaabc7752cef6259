use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General settings that apply to every rewrite, regardless of the configured rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Read encrypted columns through their cipher column. When disabled, reads use the
    /// plain column if one is configured.
    ///
    /// _Default:_ `true`
    #[serde(default = "General::query_with_cipher_column")]
    pub query_with_cipher_column: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            query_with_cipher_column: Self::query_with_cipher_column(),
        }
    }
}

impl General {
    const fn query_with_cipher_column() -> bool {
        true
    }
}
