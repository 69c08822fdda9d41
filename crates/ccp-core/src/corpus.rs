// crates/ccp-core/src/corpus.rs
//
// Canonical corpus format: a named list of signal strings consumed by batch
// tooling and integration tests, never by the core protocols themselves.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CcpError;

/// Minimum number of signals a canonical corpus must carry.
pub const MIN_CORPUS_SIGNALS: usize = 20;

/// A named list of canonical evaluation signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalCorpus {
    /// Corpus name, for receipts and logging.
    pub name: String,
    /// The signal strings.
    pub canonical_signals: Vec<String>,
}

impl CanonicalCorpus {
    /// Load a corpus from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CcpError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CcpError::Corpus(format!("{}: {}", path.display(), e)))?;
        let corpus: CanonicalCorpus = serde_json::from_str(&contents)?;
        Ok(corpus)
    }

    /// Validate the corpus: at least `MIN_CORPUS_SIGNALS` non-empty signals.
    pub fn validate(&self) -> Result<(), CcpError> {
        if self.canonical_signals.len() < MIN_CORPUS_SIGNALS {
            return Err(CcpError::Corpus(format!(
                "corpus '{}' has {} signals, need at least {}",
                self.name,
                self.canonical_signals.len(),
                MIN_CORPUS_SIGNALS
            )));
        }
        if let Some(idx) = self
            .canonical_signals
            .iter()
            .position(|s| s.trim().is_empty())
        {
            return Err(CcpError::Corpus(format!(
                "corpus '{}' has an empty signal at index {}",
                self.name, idx
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_with(n: usize) -> CanonicalCorpus {
        CanonicalCorpus {
            name: "test".to_string(),
            canonical_signals: (0..n).map(|i| format!("You must do task {}.", i)).collect(),
        }
    }

    #[test]
    fn test_validate_accepts_twenty_signals() {
        assert!(corpus_with(MIN_CORPUS_SIGNALS).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_corpus() {
        assert!(corpus_with(MIN_CORPUS_SIGNALS - 1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_signal() {
        let mut corpus = corpus_with(MIN_CORPUS_SIGNALS);
        corpus.canonical_signals[3] = "   ".to_string();
        assert!(corpus.validate().is_err());
    }
}
