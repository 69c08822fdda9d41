// crates/ccp-core/src/signal.rs

use serde::{Deserialize, Serialize};

use crate::commitment::short_digest;

/// An immutable input text under evaluation.
///
/// Supplied by the caller and never mutated; every protocol run works on
/// transformed copies, leaving the signal itself untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    text: String,
}

impl Signal {
    /// Create a signal from any string-like input.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw signal text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Content-derived identifier: first 12 hex chars of the SHA-256 of the
    /// text. Used for receipt file names so identical signals always map to
    /// identical files, independent of object identity or call order.
    pub fn content_digest(&self) -> String {
        short_digest(&self.text)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
