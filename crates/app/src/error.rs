//! Application error type.

use rocketsci_core::DesignError;
use rocketsci_storage::StorageError;

/// Error type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the application layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Storage backend failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error outside the storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Launch design outside the allowed ranges
    #[error("invalid design: {0}")]
    Design(#[from] DesignError),
}
