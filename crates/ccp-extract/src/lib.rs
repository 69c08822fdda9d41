// crates/ccp-extract/src/lib.rs
//
// ccp-extract: Canonicalization, sentence segmentation, and rule-based
// commitment extraction for the Commitment Conservation Protocol.
//
// Extraction is a pure function of the input text and the configured mode:
// no model loading, no process-wide mutable state, no dependence on prior
// calls. The same text always yields the same commitment set.

pub mod canonical;
pub mod extractor;
pub mod lexicon;
pub mod segment;

pub use canonical::{canonicalize_token, normalize, strip_terminal_punctuation};
pub use extractor::{CommitmentExtractor, ExtractionMode};
pub use lexicon::{CueMatch, ModalLexicon};
pub use segment::RuleSegmenter;
