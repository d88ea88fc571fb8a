//! Error types for `ortho-env-dump`.

use thiserror::Error;

/// Errors surfaced by the dump pipeline.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("failed to read environment: {0}")]
    Read(#[from] ortho_env::EnvError),

    #[error("failed to render metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
