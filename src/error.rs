//! Error types shared across the crate.

use thiserror::Error;

/// Result type alias used throughout Kosha.
pub type Result<T> = std::result::Result<T, KoshaError>;

/// Errors produced by Kosha.
///
/// Loading, reloading and lookup never surface these for missing or
/// malformed data; they are reserved for invalid configuration and
/// failures of the runtime itself.
#[derive(Debug, Error)]
pub enum KoshaError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KoshaError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        KoshaError::InvalidConfig(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        KoshaError::Internal(msg.into())
    }
}
