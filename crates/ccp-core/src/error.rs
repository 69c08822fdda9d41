// crates/ccp-core/src/error.rs

use thiserror::Error;

/// Protocol-wide error types for the Commitment Conservation Protocol.
#[derive(Debug, Error)]
pub enum CcpError {
    /// Transformation oracle failure (compression or paraphrase call).
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error (receipt writing, corpus loading).
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration error (unknown oracle, bad extraction mode).
    #[error("Config error: {0}")]
    Config(String),

    /// Canonical corpus error (missing file, too few signals).
    #[error("Corpus error: {0}")]
    Corpus(String),
}

impl From<serde_json::Error> for CcpError {
    fn from(e: serde_json::Error) -> Self {
        CcpError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CcpError {
    fn from(e: std::io::Error) -> Self {
        CcpError::Io(e.to_string())
    }
}
