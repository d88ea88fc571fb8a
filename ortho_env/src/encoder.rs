//! Serialization of merged trees into change set payloads.

use serde_json::Value;

use crate::error::{EnvError, EnvResult};

/// Serializes a configuration tree into bytes of a particular format.
pub trait Encoder: Send + Sync {
    /// Encode `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Encoding`] when the tree cannot be represented in
    /// this format.
    fn encode(&self, tree: &Value) -> EnvResult<Vec<u8>>;

    /// Format tag recorded in the change set.
    fn format(&self) -> &'static str;
}

/// Compact JSON encoder; the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, tree: &Value) -> EnvResult<Vec<u8>> {
        serde_json::to_vec(tree).map_err(|e| EnvError::encoding(self.format(), e))
    }

    fn format(&self) -> &'static str {
        "json"
    }
}

/// TOML encoder.
///
/// TOML has no null, so trees holding `null` inside decoded JSON literals
/// fail to encode.
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlEncoder;

#[cfg(feature = "toml")]
impl Encoder for TomlEncoder {
    fn encode(&self, tree: &Value) -> EnvResult<Vec<u8>> {
        toml::to_string(tree)
            .map(String::into_bytes)
            .map_err(|e| EnvError::encoding(self.format(), e))
    }

    fn format(&self) -> &'static str {
        "toml"
    }
}
