//! Error types shared across ampfeed components

use thiserror::Error;

/// Result type alias for ampfeed operations
pub type Result<T> = std::result::Result<T, AmpError>;

/// Main error type for cross-cutting ampfeed operations
#[derive(Error, Debug)]
pub enum AmpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid advertiser name: {0}")]
    InvalidAdvertiser(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl AmpError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
