//! CLI error type.

use kitab_store::{ConfigError, StoreError};

/// Errors surfaced to the CLI user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// A store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),
    /// Writing output failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Index serialization failed.
    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}
