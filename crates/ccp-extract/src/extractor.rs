// crates/ccp-extract/src/extractor.rs
//
// Rule-based commitment extraction.
//
// Two extraction strategies exist and are selected at construction time:
// simple mode keys a commitment by its normalized clause text, structured
// mode by a canonical actor/modality/action/object/condition tuple. The two
// key spaces are not interchangeable; a protocol run uses exactly one mode
// for the base extraction and every re-extraction.

use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use ccp_core::{CcpError, Commitment, CommitmentSet, CommitmentTuple, SentenceSegmenter};

use crate::canonical::{canonicalize_token, normalize, strip_terminal_punctuation};
use crate::lexicon::{CueMatch, ModalLexicon};
use crate::segment::RuleSegmenter;

/// Conditional-cue capture: a non-empty prefix, the cue, the remainder.
fn conditional_pattern() -> &'static Regex {
    static COND_RE: OnceLock<Regex> = OnceLock::new();
    COND_RE.get_or_init(|| {
        Regex::new(r"(?s).+?\b(if|when|unless|provided that|in the event that)\b\s*(.+)$")
            .expect("static regex")
    })
}

/// Punctuation trimmed from individual tokens before canonicalization.
const TOKEN_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?', '"', '(', ')'];

/// Which canonical key form extraction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Key = the normalized clause, stripped of terminal punctuation.
    Simple,
    /// Key = the canonical serialization of the structured tuple.
    Structured,
}

impl FromStr for ExtractionMode {
    type Err = CcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(ExtractionMode::Simple),
            "structured" => Ok(ExtractionMode::Structured),
            other => Err(CcpError::Config(format!(
                "unknown extraction mode '{}', expected 'simple' or 'structured'",
                other
            ))),
        }
    }
}

/// Rule-based commitment extractor.
///
/// Extraction is a pure function of the text and the configured mode: the
/// segmenter is injected at construction and treated as stateless, and no
/// call depends on any prior call.
#[derive(Clone)]
pub struct CommitmentExtractor {
    segmenter: Arc<dyn SentenceSegmenter>,
    lexicon: ModalLexicon,
    mode: ExtractionMode,
}

impl CommitmentExtractor {
    /// Create an extractor with an injected segmenter and the default lexicon.
    pub fn new(segmenter: Arc<dyn SentenceSegmenter>, mode: ExtractionMode) -> Self {
        Self {
            segmenter,
            lexicon: ModalLexicon::default(),
            mode,
        }
    }

    /// Convenience constructor using the built-in rule segmenter.
    pub fn with_rule_segmenter(mode: ExtractionMode) -> Self {
        Self::new(Arc::new(RuleSegmenter::new()), mode)
    }

    /// Replace the default lexicon.
    pub fn with_lexicon(mut self, lexicon: ModalLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// The configured extraction mode.
    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Extract the commitment set of `text`.
    ///
    /// Empty input or input without any modal cue yields the empty set,
    /// never an error. Duplicate clauses collapse.
    pub fn extract(&self, text: &str) -> CommitmentSet {
        let normalized = normalize(text);
        let mut set = CommitmentSet::new();
        if normalized.is_empty() {
            return set;
        }

        for sentence in self.segmenter.segment(&normalized) {
            // Semicolons separate independent commitments inside a sentence.
            for clause in sentence.split(';') {
                let clause = clause.trim();
                if clause.is_empty() {
                    continue;
                }
                let Some(cue) = self.lexicon.lookup(clause) else {
                    continue;
                };
                let stripped = strip_terminal_punctuation(clause);
                match self.mode {
                    ExtractionMode::Simple => {
                        set.insert(Commitment::from_clause(stripped));
                    }
                    ExtractionMode::Structured => {
                        let tuple = build_tuple(&stripped, &cue);
                        set.insert(Commitment::new(tuple.canonical_key(), stripped));
                    }
                }
            }
        }
        set
    }
}

/// Build the structured tuple for one clause given its governing cue.
fn build_tuple(clause: &str, cue: &CueMatch) -> CommitmentTuple {
    let lower = clause.to_lowercase();

    // Condition: remainder after a conditional cue that is not clause-initial.
    let (condition, condition_cue_start) = match conditional_pattern().captures(&lower) {
        Some(caps) => {
            let remainder = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            let start = caps.get(1).map(|m| m.start());
            (strip_terminal_punctuation(remainder), start)
        }
        None => (String::new(), None),
    };

    let actor = {
        let head = lower[..cue.position].trim();
        let head = head.trim_matches(TOKEN_PUNCTUATION).trim();
        if head.is_empty() {
            "unknown".to_string()
        } else {
            head.to_string()
        }
    };

    // Text after the cue, cut before the conditional cue when one follows it.
    let after_cue_start = cue.position + cue.cue.len();
    let after_cue_end = match condition_cue_start {
        Some(start) if start >= after_cue_start => start,
        _ => lower.len(),
    };
    let after_cue = lower[after_cue_start..after_cue_end].trim();

    let mut tokens = after_cue.split_whitespace();
    let action = tokens
        .next()
        .map(|t| t.trim_matches(TOKEN_PUNCTUATION).to_string())
        .unwrap_or_default();
    let object = tokens
        .map(|t| t.trim_matches(TOKEN_PUNCTUATION))
        .filter(|t| !t.is_empty())
        .map(canonicalize_token)
        .collect::<Vec<String>>()
        .join(" ");

    CommitmentTuple {
        actor,
        modality: cue.modality,
        action,
        object,
        condition,
    }
}
