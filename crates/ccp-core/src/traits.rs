// crates/ccp-core/src/traits.rs

use crate::error::CcpError;

/// Trait for the external transformation oracle.
///
/// Implemented by ccp-oracle (deterministic reference oracles) or by callers
/// wrapping an external summarizer/paraphraser. The protocols treat every
/// call as a blocking black-box unit of work; reproducibility guarantees
/// hold only when the implementation is deterministic.
pub trait TransformationOracle: Send + Sync {
    /// Compress `text` under `budget`. Budget units are oracle-defined, but
    /// a smaller budget must mean more aggressive compression.
    fn compress(&self, text: &str, budget: u32) -> Result<String, CcpError>;

    /// Produce an approximately meaning-preserving paraphrase of `text`.
    fn paraphrase(&self, text: &str) -> Result<String, CcpError>;
}

/// Trait for sentence segmentation.
///
/// Implemented by ccp-extract (rule-based segmenter). Used only by the
/// commitment extractor. Implementations must be stateless after
/// construction so extraction stays a pure function of its input.
pub trait SentenceSegmenter: Send + Sync {
    /// Split `text` into sentence units, in order of appearance.
    fn segment(&self, text: &str) -> Vec<String>;
}
