// crates/ccp-oracle/src/lib.rs
//
// ccp-oracle: deterministic reference implementations of the transformation
// oracle interface.
//
// These oracles play the role an external summarizer or back-translation
// pipeline plays in a full deployment, without loading any model: identical
// input always yields identical output, so every protocol run against them
// is exactly reproducible. Callers with a real summarizer implement
// `TransformationOracle` themselves and plug it in the same way.

use ccp_core::budget::truncate_at_word_boundary;
use ccp_core::{CcpError, TransformationOracle};

// Budget constants shared with enforcement repair.
pub use ccp_core::{DEFAULT_CHARS_PER_UNIT, ELLIPSIS};

/// Oracle whose transformations return the input unchanged.
///
/// Fidelity is 1.0 at every grid point by construction; the baseline for
/// protocol self-checks.
#[derive(Debug, Clone, Default)]
pub struct IdentityOracle;

impl IdentityOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TransformationOracle for IdentityOracle {
    fn compress(&self, text: &str, _budget: u32) -> Result<String, CcpError> {
        Ok(text.to_string())
    }

    fn paraphrase(&self, text: &str) -> Result<String, CcpError> {
        Ok(text.to_string())
    }
}

/// Oracle that compresses by truncating at a word boundary.
///
/// `budget * chars_per_unit` characters survive; smaller budgets cut more.
/// Paraphrase is the identity.
#[derive(Debug, Clone)]
pub struct TruncationOracle {
    pub chars_per_unit: u32,
}

impl TruncationOracle {
    pub fn new(chars_per_unit: u32) -> Self {
        Self { chars_per_unit }
    }
}

impl Default for TruncationOracle {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_UNIT)
    }
}

impl TransformationOracle for TruncationOracle {
    fn compress(&self, text: &str, budget: u32) -> Result<String, CcpError> {
        let max_chars = budget.saturating_mul(self.chars_per_unit) as usize;
        Ok(truncate_at_word_boundary(text, max_chars))
    }

    fn paraphrase(&self, text: &str) -> Result<String, CcpError> {
        Ok(text.to_string())
    }
}

/// Oracle whose paraphrase drops the final clause each call.
///
/// Simulates the progressive commitment loss of a lossy paraphraser for
/// drift demonstrations; compression truncates like `TruncationOracle`.
#[derive(Debug, Clone)]
pub struct ClauseDropOracle {
    pub chars_per_unit: u32,
}

impl ClauseDropOracle {
    pub fn new(chars_per_unit: u32) -> Self {
        Self { chars_per_unit }
    }
}

impl Default for ClauseDropOracle {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_UNIT)
    }
}

impl TransformationOracle for ClauseDropOracle {
    fn compress(&self, text: &str, budget: u32) -> Result<String, CcpError> {
        let max_chars = budget.saturating_mul(self.chars_per_unit) as usize;
        Ok(truncate_at_word_boundary(text, max_chars))
    }

    fn paraphrase(&self, text: &str) -> Result<String, CcpError> {
        // Last clause boundary: the final ';' or sentence terminator that
        // still has content after it.
        let trimmed = text.trim_end();
        let without_terminal = trimmed.trim_end_matches(['.', '!', '?', ';']);
        let cut = without_terminal
            .rfind([';', '.', '!', '?'])
            .map(|pos| without_terminal[..=pos].trim_end().to_string())
            .unwrap_or_default();
        Ok(cut)
    }
}

/// Oracle that always fails. Exported for partial-result tests.
#[derive(Debug, Clone, Default)]
pub struct FailingOracle;

impl FailingOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TransformationOracle for FailingOracle {
    fn compress(&self, _text: &str, _budget: u32) -> Result<String, CcpError> {
        Err(CcpError::Transformation("oracle unavailable".to_string()))
    }

    fn paraphrase(&self, _text: &str) -> Result<String, CcpError> {
        Err(CcpError::Transformation("oracle unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_oracle_preserves_text() {
        let oracle = IdentityOracle::new();
        let text = "You must pay $100 by Friday.";
        assert_eq!(oracle.compress(text, 5).unwrap(), text);
        assert_eq!(oracle.paraphrase(text).unwrap(), text);
    }

    #[test]
    fn test_truncation_respects_budget() {
        let oracle = TruncationOracle::default();
        let text = "You must pay the invoice before the end of the month without fail.";
        let compressed = oracle.compress(text, 5).unwrap();
        // 5 units * 4 chars + ellipsis marker.
        assert!(compressed.chars().count() <= 20 + ELLIPSIS.len());
        assert!(compressed.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncation_is_monotone_in_budget() {
        let oracle = TruncationOracle::default();
        let text = "You must pay the invoice before the end of the month without fail.";
        let tight = oracle.compress(text, 3).unwrap();
        let loose = oracle.compress(text, 10).unwrap();
        assert!(tight.len() <= loose.len());
    }

    #[test]
    fn test_truncation_noop_under_large_budget() {
        let oracle = TruncationOracle::default();
        let text = "You must pay.";
        assert_eq!(oracle.compress(text, 100).unwrap(), text);
    }

    #[test]
    fn test_truncation_survives_extreme_budget() {
        let oracle = TruncationOracle::default();
        let text = "You must pay.";
        // budget * chars_per_unit saturates instead of overflowing.
        assert_eq!(oracle.compress(text, u32::MAX).unwrap(), text);
    }

    #[test]
    fn test_clause_drop_removes_last_sentence() {
        let oracle = ClauseDropOracle::default();
        let text = "You must pay the fee. You must not share the key.";
        let once = oracle.paraphrase(text).unwrap();
        assert_eq!(once, "You must pay the fee.");
        let twice = oracle.paraphrase(&once).unwrap();
        assert_eq!(twice, "");
    }

    #[test]
    fn test_failing_oracle_errors() {
        let oracle = FailingOracle::new();
        assert!(oracle.compress("x", 1).is_err());
        assert!(oracle.paraphrase("x").is_err());
    }
}
