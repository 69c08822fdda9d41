// crates/ccp-extract/src/lexicon.rs
//
// Modal cue lexicon: maps cue phrases to modalities and flags commitment
// candidates that carry a modal keyword without a resolving lexicon entry.
//
// Lookup picks the earliest positional match in the clause; when two cues
// start at the same position the longer one wins ("must not" over "must").
// Matches are word-bounded, so the "may" in "maybe" never fires.

use ccp_core::Modality;

/// A resolved cue match inside one clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueMatch {
    /// The matched cue phrase, lower-cased.
    pub cue: String,
    /// Byte position of the match in the lower-cased clause.
    pub position: usize,
    /// Modality the cue resolves to.
    pub modality: Modality,
}

/// Cue phrase to modality mapping plus the candidate keyword list.
#[derive(Debug, Clone)]
pub struct ModalLexicon {
    cues: Vec<(String, Modality)>,
    candidates: Vec<String>,
}

impl ModalLexicon {
    /// Build a lexicon from explicit entries.
    pub fn new(cues: Vec<(String, Modality)>, candidates: Vec<String>) -> Self {
        Self { cues, candidates }
    }

    /// Look up the governing cue of a clause.
    ///
    /// Returns `None` when the clause is not a commitment: no lexicon cue
    /// and no candidate keyword matches. Candidate keywords resolve to
    /// `Modality::Unmarked`.
    pub fn lookup(&self, clause: &str) -> Option<CueMatch> {
        let lower = clause.to_lowercase();

        let mut best: Option<CueMatch> = None;
        for (cue, modality) in &self.cues {
            if let Some(position) = find_word_bounded(&lower, cue) {
                let better = match &best {
                    None => true,
                    Some(b) => {
                        position < b.position
                            || (position == b.position && cue.len() > b.cue.len())
                    }
                };
                if better {
                    best = Some(CueMatch {
                        cue: cue.clone(),
                        position,
                        modality: *modality,
                    });
                }
            }
        }
        if best.is_some() {
            return best;
        }

        // No lexicon entry resolved; a bare modal keyword still flags the
        // clause as a commitment candidate with Unmarked modality.
        let mut fallback: Option<CueMatch> = None;
        for keyword in &self.candidates {
            if let Some(position) = find_word_bounded(&lower, keyword) {
                let better = match &fallback {
                    None => true,
                    Some(b) => position < b.position,
                };
                if better {
                    fallback = Some(CueMatch {
                        cue: keyword.clone(),
                        position,
                        modality: Modality::Unmarked,
                    });
                }
            }
        }
        fallback
    }
}

impl Default for ModalLexicon {
    fn default() -> Self {
        let cues = [
            ("must not", Modality::Prohibition),
            ("shall not", Modality::Prohibition),
            ("may not", Modality::Prohibition),
            ("cannot", Modality::Prohibition),
            ("must", Modality::Obligation),
            ("shall", Modality::Obligation),
            ("required", Modality::Obligation),
            ("ought", Modality::Obligation),
            ("may", Modality::Permission),
            ("is defined as", Modality::Definition),
            ("means", Modality::Definition),
        ]
        .into_iter()
        .map(|(cue, modality)| (cue.to_string(), modality))
        .collect();

        let candidates = ["will", "should", "need", "have to", "always", "never"]
            .into_iter()
            .map(str::to_string)
            .collect();

        Self { cues, candidates }
    }
}

/// First word-bounded occurrence of `needle` in `haystack`, or `None`.
///
/// A match is word-bounded when the characters immediately before and after
/// it are absent or non-alphanumeric.
fn find_word_bounded(haystack: &str, needle: &str) -> Option<usize> {
    for (position, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..position]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[position + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(position);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_cue_wins_at_same_position() {
        let lex = ModalLexicon::default();
        let m = lex.lookup("You must not share the key").unwrap();
        assert_eq!(m.cue, "must not");
        assert_eq!(m.modality, Modality::Prohibition);
    }

    #[test]
    fn test_plain_obligation() {
        let lex = ModalLexicon::default();
        let m = lex.lookup("You must pay $100 by Friday").unwrap();
        assert_eq!(m.cue, "must");
        assert_eq!(m.modality, Modality::Obligation);
    }

    #[test]
    fn test_earliest_cue_governs() {
        let lex = ModalLexicon::default();
        // "may" appears before "must"; first positional match wins.
        let m = lex.lookup("You may delegate, but you must sign").unwrap();
        assert_eq!(m.cue, "may");
        assert_eq!(m.modality, Modality::Permission);
    }

    #[test]
    fn test_word_boundary_blocks_maybe() {
        let lex = ModalLexicon::default();
        assert!(lex.lookup("Maybe it rains tomorrow").is_none());
    }

    #[test]
    fn test_candidate_keyword_yields_unmarked() {
        let lex = ModalLexicon::default();
        let m = lex.lookup("You should review the draft").unwrap();
        assert_eq!(m.modality, Modality::Unmarked);
    }

    #[test]
    fn test_no_cue_is_not_a_commitment() {
        let lex = ModalLexicon::default();
        assert!(lex.lookup("It's likely rainy").is_none());
    }

    #[test]
    fn test_definition_cue() {
        let lex = ModalLexicon::default();
        let m = lex.lookup("A quorum means two thirds of members").unwrap();
        assert_eq!(m.modality, Modality::Definition);
    }
}
