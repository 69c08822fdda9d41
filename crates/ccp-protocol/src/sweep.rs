// crates/ccp-protocol/src/sweep.rs
//
// ConservationProtocol: the compression sweep.
//
// Walks a monotonically meaningful budget grid (conventionally descending),
// compresses the signal at each budget, re-extracts, and scores hybrid
// fidelity against the base commitment set. A failing oracle call aborts
// the remaining grid points; everything computed so far is returned.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ccp_core::{Signal, SweepResult, TransformationOracle, DEFAULT_CHARS_PER_UNIT};
use ccp_extract::CommitmentExtractor;
use ccp_metrics::hybrid_fidelity;

use crate::repair::RepairStrategy;

/// The conventional descending budget grid.
pub const DEFAULT_SIGMA_GRID: [u32; 6] = [120, 80, 40, 20, 10, 5];

/// Configuration of one compression sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Budget grid, walked in the order supplied.
    pub grid: Vec<u32>,
    /// Whether each compression is wrapped in enforcement repair.
    pub enforcement: bool,
    /// Which repair strategy enforcement uses.
    pub strategy: RepairStrategy,
    /// Character-per-budget-unit ratio for the repair length estimate.
    pub chars_per_unit: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_SIGMA_GRID.to_vec(),
            enforcement: false,
            strategy: RepairStrategy::Append,
            chars_per_unit: DEFAULT_CHARS_PER_UNIT,
        }
    }
}

/// Orchestrates extractor, oracle, and fidelity metric across a budget grid.
///
/// Each run owns its working state; there is no shared mutable state across
/// runs, so independent signals may be swept in parallel by the caller.
pub struct ConservationProtocol {
    extractor: CommitmentExtractor,
    oracle: Arc<dyn TransformationOracle>,
    config: SweepConfig,
}

impl ConservationProtocol {
    pub fn new(
        extractor: CommitmentExtractor,
        oracle: Arc<dyn TransformationOracle>,
        config: SweepConfig,
    ) -> Self {
        Self {
            extractor,
            oracle,
            config,
        }
    }

    /// Run the sweep. An empty grid yields empty parallel sequences, not an
    /// error; an oracle failure yields the partial result computed so far.
    pub fn run(&self, signal: &Signal) -> SweepResult {
        let base = self.extractor.extract(signal.text());
        info!(
            signal = %signal.content_digest(),
            base_commitments = base.len(),
            enforcement = self.config.enforcement,
            "starting compression sweep"
        );

        let mut budgets = Vec::with_capacity(self.config.grid.len());
        let mut fidelities = Vec::with_capacity(self.config.grid.len());
        let mut failure = None;

        for &sigma in &self.config.grid {
            let compressed = match self.oracle.compress(signal.text(), sigma) {
                Ok(text) => text,
                Err(e) => {
                    warn!(budget = sigma, error = %e, "oracle failed, aborting sweep");
                    failure = Some(e.to_string());
                    break;
                }
            };
            let compressed = if self.config.enforcement {
                self.config.strategy.apply(
                    &base,
                    &compressed,
                    &self.extractor,
                    Some(sigma),
                    self.config.chars_per_unit,
                )
            } else {
                compressed
            };
            let extracted = self.extractor.extract(&compressed);
            let fidelity = hybrid_fidelity(&base, &extracted);
            debug!(
                budget = sigma,
                extracted = extracted.len(),
                fidelity,
                "sweep step"
            );
            budgets.push(sigma);
            fidelities.push(fidelity);
        }

        SweepResult {
            budgets,
            fidelities,
            failure,
        }
    }
}
