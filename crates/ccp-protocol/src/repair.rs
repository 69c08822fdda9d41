// crates/ccp-protocol/src/repair.rs
//
// Enforcement repair: detect commitments a transformation dropped and put
// them back.
//
// The primary strategy re-appends the missing clauses verbatim so the same
// extractor recognizes them again. Under a length budget the transformed
// body is truncated to make room, never the appended commitments; when even
// an empty body cannot fit them, they are appended anyway — conservation
// outranks budget compliance.

use ccp_core::budget::{estimate_units, truncate_at_word_boundary};
use ccp_core::commitment::short_digest;
use ccp_core::CommitmentSet;
use ccp_extract::CommitmentExtractor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two named enforcement strategies. Never mixed within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairStrategy {
    /// Re-append dropped clauses verbatim (the primary contract).
    Append,
    /// Prefix a commitment-digest marker to prime the next transformation.
    /// Does not guarantee re-extractability; offered as an alternate only.
    Prime,
}

impl RepairStrategy {
    /// Apply this strategy to one transformation output.
    pub fn apply(
        &self,
        base: &CommitmentSet,
        transformed: &str,
        extractor: &CommitmentExtractor,
        length_budget: Option<u32>,
        chars_per_unit: u32,
    ) -> String {
        match self {
            RepairStrategy::Append => {
                repair_append(base, transformed, extractor, length_budget, chars_per_unit)
            }
            RepairStrategy::Prime => repair_prime(base, transformed),
        }
    }
}

/// Re-extract from `transformed`, find the base commitments it dropped, and
/// append their original clause texts. Returns the input unchanged when
/// nothing is missing. Never removes commitments already present.
pub fn repair_append(
    base: &CommitmentSet,
    transformed: &str,
    extractor: &CommitmentExtractor,
    length_budget: Option<u32>,
    chars_per_unit: u32,
) -> String {
    let extracted = extractor.extract(transformed);
    let missing = base.difference(&extracted);
    if missing.is_empty() {
        return transformed.to_string();
    }
    debug!(missing = missing.len(), "repairing dropped commitments");

    // Original clause texts, each closed as its own sentence so the
    // extractor sees them as separate clauses, except the last.
    let appendix = {
        let mut parts: Vec<String> = Vec::with_capacity(missing.len());
        for (i, commitment) in missing.iter().enumerate() {
            let text = commitment.text.trim();
            if i + 1 < missing.len() && !ends_with_terminator(text) {
                parts.push(format!("{}.", text));
            } else {
                parts.push(text.to_string());
            }
        }
        parts.join(" ")
    };

    let mut body = transformed.trim_end().to_string();

    if let Some(budget) = length_budget {
        let separator = if body.is_empty() { 0 } else { 1 };
        let combined = body.chars().count() + separator + appendix.chars().count();
        if estimate_units(combined, chars_per_unit) > budget {
            // Truncate the body, never the appendix.
            let budget_chars = budget.saturating_mul(chars_per_unit) as usize;
            let allowance = budget_chars.saturating_sub(appendix.chars().count() + separator);
            body = if allowance == 0 {
                String::new()
            } else {
                truncate_at_word_boundary(&body, allowance)
            };
        }
    }

    if body.is_empty() {
        return appendix;
    }
    // Close the body so the first appended clause starts its own sentence.
    if !ends_with_terminator(&body) {
        body.push('.');
    }
    format!("{} {}", body, appendix)
}

/// Alternate strategy: prefix a deterministic marker derived from the
/// sorted base keys, priming downstream transformations to keep them.
pub fn repair_prime(base: &CommitmentSet, transformed: &str) -> String {
    let joined: String = base.keys().collect::<Vec<&str>>().join("|");
    format!("COMMITMENT:{} {}", short_digest(&joined), transformed)
}

/// Whether the text already ends in a sentence terminator.
fn ends_with_terminator(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccp_core::Commitment;
    use ccp_extract::ExtractionMode;

    fn extractor() -> CommitmentExtractor {
        CommitmentExtractor::with_rule_segmenter(ExtractionMode::Simple)
    }

    fn base_of(clauses: &[&str]) -> CommitmentSet {
        clauses
            .iter()
            .map(|c| Commitment::from_clause(*c))
            .collect()
    }

    #[test]
    fn test_nothing_missing_returns_input_unchanged() {
        let ex = extractor();
        let base = ex.extract("You must pay $100.");
        let text = "You must pay $100.";
        assert_eq!(repair_append(&base, text, &ex, None, 4), text);
    }

    #[test]
    fn test_missing_commitment_appended_to_empty_body() {
        let ex = extractor();
        let base = base_of(&["must pay $100"]);
        let repaired = repair_append(&base, "", &ex, None, 4);
        assert_eq!(repaired, "must pay $100");
        // Re-extraction recovers the commitment.
        let recovered = ex.extract(&repaired);
        assert!(recovered.contains_key("must pay $100"));
    }

    #[test]
    fn test_appended_commitments_are_reextractable() {
        let ex = extractor();
        let base = ex.extract("You must pay the fee. You must not share the key.");
        let repaired = repair_append(&base, "Something unrelated happened", &ex, None, 4);
        let recovered = ex.extract(&repaired);
        for key in base.keys() {
            assert!(recovered.contains_key(key), "lost commitment: {}", key);
        }
    }

    #[test]
    fn test_budget_truncates_body_not_appendix() {
        let ex = extractor();
        let base = base_of(&["you must pay the invoice"]);
        let body = "a long transformed body that says nothing about obligations at all";
        // 10 units * 4 chars: far too small for body + appendix.
        let repaired = repair_append(&base, body, &ex, Some(10), 4);
        assert!(repaired.contains("you must pay the invoice"));
        assert!(!repaired.contains("obligations at all"));
    }

    #[test]
    fn test_overflowing_appendix_is_kept_anyway() {
        let ex = extractor();
        let base = base_of(&["you must pay the invoice before the end of the month"]);
        // Budget of 1 unit cannot fit the appendix even with an empty body;
        // conservation wins over budget compliance.
        let repaired = repair_append(&base, "ignored body", &ex, Some(1), 4);
        assert!(repaired.contains("you must pay the invoice before the end of the month"));
    }

    #[test]
    fn test_repair_never_removes_present_commitments() {
        let ex = extractor();
        let base = ex.extract("You must pay the fee. You must not share the key.");
        let text = "You must pay the fee.";
        let repaired = repair_append(&base, text, &ex, None, 4);
        let recovered = ex.extract(&repaired);
        assert!(recovered.contains_key("You must pay the fee"));
        assert!(recovered.contains_key("You must not share the key"));
    }

    #[test]
    fn test_strategy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RepairStrategy::Append).unwrap(),
            "\"append\""
        );
        assert_eq!(
            serde_json::from_str::<RepairStrategy>("\"prime\"").unwrap(),
            RepairStrategy::Prime
        );
    }

    #[test]
    fn test_prime_prefixes_deterministic_marker() {
        let base = base_of(&["you must pay"]);
        let a = repair_prime(&base, "text");
        let b = repair_prime(&base, "text");
        assert_eq!(a, b);
        assert!(a.starts_with("COMMITMENT:"));
        assert!(a.ends_with(" text"));
    }
}
