// crates/ccp-extract/src/segment.rs
//
// Deterministic rule-based sentence segmentation. Plays the role of the
// external NLP sentence splitter without loading any model: splitting on
// sentence terminators with abbreviation and decimal guards is enough for
// the short evaluation signals this protocol works on.

use ccp_core::SentenceSegmenter;

/// Abbreviations whose trailing period is not a sentence boundary.
const ABBREVIATIONS: [&str; 7] = ["e.g.", "i.e.", "etc.", "mr.", "mrs.", "dr.", "vs."];

/// Rule-based implementation of `SentenceSegmenter`.
///
/// Stateless after construction; the same text always yields the same
/// sentence sequence.
#[derive(Debug, Clone, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Whether the terminator at byte `index` ends a sentence.
    fn is_boundary(&self, text: &str, index: usize, terminator: char) -> bool {
        let after = text[index + terminator.len_utf8()..].chars().next();
        // A terminator only closes a sentence before whitespace or EOF.
        if let Some(c) = after {
            if !c.is_whitespace() {
                return false;
            }
        }

        if terminator == '.' {
            // Trailing word including the period, e.g. "e.g." or "etc.".
            let head = &text[..index + 1];
            let word_start = head
                .rfind(char::is_whitespace)
                .map(|p| p + 1)
                .unwrap_or(0);
            let word = head[word_start..].to_lowercase();
            if ABBREVIATIONS.contains(&word.as_str()) {
                return false;
            }
        }
        true
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (index, c) in text.char_indices() {
            if matches!(c, '.' | '!' | '?') && self.is_boundary(text, index, c) {
                let sentence = text[start..=index].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = index + c.len_utf8();
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }
}
