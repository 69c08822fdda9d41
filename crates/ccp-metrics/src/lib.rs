// crates/ccp-metrics/src/lib.rs
//
// ccp-metrics: set-based fidelity and drift scoring between commitment sets.
//
// All metrics are pure functions over canonical keys. Jaccard handles the
// empty-set corners explicitly; hybrid fidelity falls back to a soft
// word-overlap score so near-misses stay numerically distinguishable from
// exact survivals.

use std::collections::BTreeSet;

use ccp_core::CommitmentSet;

/// Weight applied to the soft word-overlap fallback, keeping soft matches
/// strictly below the range of any exact key match.
pub const SOFT_MATCH_WEIGHT: f64 = 0.5;

/// Jaccard index over canonical keys.
///
/// Both sets empty -> 1.0; exactly one empty -> 0.0; otherwise
/// |A ∩ B| / |A ∪ B|. Symmetric; `jaccard(x, x) == 1.0` for any x.
pub fn jaccard(a: &CommitmentSet, b: &CommitmentSet) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection_len(b) as f64;
    let union = a.union_len(b) as f64;
    intersection / union
}

/// Hybrid fidelity of a comparison set against a base set.
///
/// Empty base -> 0.0. Nonzero Jaccard is returned as-is. When Jaccard is
/// zero and the comparison set is nonempty, falls back to word-bag Jaccard
/// scaled by `SOFT_MATCH_WEIGHT`; when the comparison set is also empty,
/// returns 0.0. Not symmetric: the base set anchors the score.
pub fn hybrid_fidelity(base: &CommitmentSet, comp: &CommitmentSet) -> f64 {
    if base.is_empty() {
        return 0.0;
    }
    let exact = jaccard(base, comp);
    if exact > 0.0 {
        return exact;
    }
    if comp.is_empty() {
        return 0.0;
    }

    let base_words = word_bag(base);
    let comp_words = word_bag(comp);
    let intersection = base_words.intersection(&comp_words).count() as f64;
    let union = base_words.union(&comp_words).count() as f64;
    if union == 0.0 {
        return 0.0;
    }
    (intersection / union) * SOFT_MATCH_WEIGHT
}

/// Drift of a current set away from the base: `1 - jaccard(base, current)`.
pub fn drift(base: &CommitmentSet, current: &CommitmentSet) -> f64 {
    1.0 - jaccard(base, current)
}

/// Lower-cased word set over every key in the set.
fn word_bag(set: &CommitmentSet) -> BTreeSet<String> {
    set.keys()
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccp_core::Commitment;

    fn make_set(clauses: &[&str]) -> CommitmentSet {
        clauses
            .iter()
            .map(|c| Commitment::from_clause(*c))
            .collect()
    }

    #[test]
    fn test_jaccard_identity() {
        let a = make_set(&["you must pay $100"]);
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn test_jaccard_both_empty() {
        let empty = CommitmentSet::new();
        assert_eq!(jaccard(&empty, &empty), 1.0);
    }

    #[test]
    fn test_jaccard_one_empty() {
        let a = make_set(&["you must pay"]);
        let empty = CommitmentSet::new();
        assert_eq!(jaccard(&a, &empty), 0.0);
        assert_eq!(jaccard(&empty, &a), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = make_set(&["x", "y"]);
        let b = make_set(&["y", "z"]);
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_is_symmetric() {
        let a = make_set(&["x", "y"]);
        let b = make_set(&["y", "z", "w"]);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn test_hybrid_empty_base_is_zero() {
        let empty = CommitmentSet::new();
        let b = make_set(&["anything at all"]);
        assert_eq!(hybrid_fidelity(&empty, &b), 0.0);
        assert_eq!(hybrid_fidelity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_hybrid_exact_match_passes_through() {
        let a = make_set(&["you must pay $100"]);
        assert_eq!(hybrid_fidelity(&a, &a), 1.0);
    }

    #[test]
    fn test_hybrid_soft_fallback_is_capped() {
        let base = make_set(&["you must pay the invoice"]);
        // Shares words but no exact key.
        let comp = make_set(&["you must pay the invoice today"]);
        let score = hybrid_fidelity(&base, &comp);
        assert!(score > 0.0);
        assert!(score <= SOFT_MATCH_WEIGHT);
    }

    #[test]
    fn test_hybrid_zero_jaccard_empty_comp() {
        let base = make_set(&["you must pay"]);
        let empty = CommitmentSet::new();
        assert_eq!(hybrid_fidelity(&base, &empty), 0.0);
    }

    #[test]
    fn test_drift_complements_jaccard() {
        let a = make_set(&["x", "y"]);
        let b = make_set(&["y", "z"]);
        assert!((drift(&a, &b) - (1.0 - jaccard(&a, &b))).abs() < 1e-12);
        assert_eq!(drift(&a, &a), 0.0);
    }
}
