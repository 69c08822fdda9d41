// crates/ccp-core/src/result.rs
//
// Result sequences produced by the two evaluation protocols.
//
// Both carry an optional `failure` field: an oracle error aborts the
// remaining steps but everything computed up to that point is preserved and
// returned. Partial results are never discarded.

use serde::{Deserialize, Serialize};

/// Result of a compression sweep: the budget grid echoed back alongside the
/// parallel fidelity sequence, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    /// Budget grid points, in the order they were supplied.
    pub budgets: Vec<u32>,
    /// Fidelity per grid point, parallel to `budgets`.
    pub fidelities: Vec<f64>,
    /// Oracle error that aborted the remaining grid points, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SweepResult {
    /// (budget, fidelity) pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.budgets
            .iter()
            .copied()
            .zip(self.fidelities.iter().copied())
    }

    /// Whether the sweep was cut short by an oracle failure.
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }
}

/// Result of a recursive drift walk: one drift value per step 0..=depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftResult {
    /// Requested recursion depth; a completed walk holds depth + 1 values.
    pub depth: u32,
    /// Whether enforcement repair wrapped each paraphrase step.
    pub enforced: bool,
    /// Drift at each step, indexed by step number.
    pub drift_values: Vec<f64>,
    /// Oracle error that aborted the remaining steps, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl DriftResult {
    /// Whether the walk was cut short by an oracle failure.
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }

    /// Drift recorded at the final completed step.
    pub fn final_drift(&self) -> Option<f64> {
        self.drift_values.last().copied()
    }
}
