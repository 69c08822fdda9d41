// crates/ccp-protocol/src/lib.rs
//
// ccp-protocol: the two evaluation procedures of the Commitment
// Conservation Protocol and the enforcement repair that tries to force
// conservation through a transformation.
//
// A protocol run owns its working state (current text, accumulated result
// sequence) and advances strictly sequentially: each step's input is the
// previous step's output, or depends on the shared immutable base set.
// Independent signals have no data dependency and may be run in parallel by
// the caller.

pub mod repair;
pub mod sweep;
pub mod walk;

pub use repair::{repair_append, repair_prime, RepairStrategy};
pub use sweep::{ConservationProtocol, SweepConfig, DEFAULT_SIGMA_GRID};
pub use walk::{DriftConfig, DriftProtocol, DEFAULT_RECURSION_DEPTH};
