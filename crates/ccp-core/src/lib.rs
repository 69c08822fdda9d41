// crates/ccp-core/src/lib.rs
//
// ccp-core: Core types, traits, and error definitions for the
// Commitment Conservation Protocol.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the canonical data structures (signals, commitments, results,
// receipts, the corpus format), the protocol-wide error type, and the trait
// interfaces for the external collaborators the protocol consumes.

pub mod budget;
pub mod commitment;
pub mod corpus;
pub mod error;
pub mod receipt;
pub mod result;
pub mod signal;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use ccp_core::Commitment;`

// Commitment types
pub use commitment::{Commitment, CommitmentSet, CommitmentTuple, Modality};

// Signal type
pub use signal::Signal;

// Result types
pub use result::{DriftResult, SweepResult};

// Receipt types
pub use receipt::{Receipt, ReceiptOutcome};

// Corpus types
pub use corpus::{CanonicalCorpus, MIN_CORPUS_SIGNALS};

// Budget helpers
pub use budget::{DEFAULT_CHARS_PER_UNIT, ELLIPSIS};

// Error type
pub use error::CcpError;

// Traits
pub use traits::{SentenceSegmenter, TransformationOracle};
