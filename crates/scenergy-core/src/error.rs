//! Error types for scenergy-core
//!
//! Only boundary operations fail: loading configuration, hydrating persisted
//! records and constructing validated keys. Store transitions never return
//! errors; out-of-range indices and unknown targets surface as
//! [`ActionOutcome`](crate::store::ActionOutcome) values instead.

use thiserror::Error;

/// Core error type for scenergy operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Configuration value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input could not be parsed (JSON, TOML, labels)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data violates a model invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// Filesystem errors while reading configuration
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a validation error.
    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an IO error.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Well-formed JSON that violates a type or key constraint is a validation
/// failure; anything else is a parse failure.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::validation_error(err.to_string()),
            _ => Self::parse_error(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::parse_error(format!("Failed to parse config: {err}"))
    }
}

impl From<crate::state::KeyError> for Error {
    fn from(err: crate::state::KeyError) -> Self {
        Self::validation_error(err.to_string())
    }
}

impl From<crate::output::OutputError> for Error {
    fn from(err: crate::output::OutputError) -> Self {
        Self::validation_error(err.to_string())
    }
}

/// Result type alias for scenergy-core operations
pub type Result<T> = std::result::Result<T, Error>;
