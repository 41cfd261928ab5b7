use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that can occur while loading or applying a deck config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Registry rejected the configuration: {0}")]
    Registry(#[from] RegistryError),

    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to parse deck config from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "serde")]
    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
