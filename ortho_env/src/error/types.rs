//! Primary error enum for environment read cycles.

use thiserror::Error;

use crate::schema::ResolvedKind;

/// Result alias used throughout the crate.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that abort a read cycle.
///
/// A read either produces a complete change set or fails with the first error
/// encountered; no partially merged tree is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    /// A value looked like a JSON object or array but could not be decoded.
    #[error("environment key '{key}' holds malformed structured data: {source}")]
    StructuredDecode {
        /// Environment key of the offending entry.
        key: String,
        /// Underlying JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// A schema-directed coercion could not parse the value.
    #[error("environment key '{key}' expects a {kind} value, got '{value}'")]
    TypeCoercion {
        /// Environment key of the offending entry.
        key: String,
        /// Raw value that failed to parse.
        value: String,
        /// Kind the schema declared for this key.
        kind: ResolvedKind,
    },

    /// Two entries disagree on whether a path holds a table or a leaf.
    #[error("environment keys disagree on the shape of '{path}': table and value collide")]
    MergeConflict {
        /// Dotted, lowercased path of the collision.
        path: String,
    },

    /// The encoder failed to serialize the merged tree.
    #[error("failed to encode configuration as {format}: {source}")]
    Encoding {
        /// Format tag of the encoder that failed.
        format: &'static str,
        /// Underlying encoder failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The watcher was stopped while a caller waited for changes.
    #[error("watcher stopped")]
    WatcherStopped,
}

impl EnvError {
    /// Construct an encoding error for `format`.
    #[must_use]
    pub fn encoding(
        format: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Encoding {
            format,
            source: source.into(),
        }
    }
}
