//! Error types for codebox

use thiserror::Error;

/// Result type alias for codebox operations
pub type Result<T> = std::result::Result<T, CodeBoxError>;

/// Codebox error types
#[derive(Error, Debug)]
pub enum CodeBoxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern for classifier '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
