// crates/ccp-protocol/src/walk.rs
//
// DriftProtocol: the recursive drift walk.
//
// Applies one paraphrase transformation repeatedly and records the drift of
// the current commitment set away from the base at every step. Step 0 reads
// the original signal before any oracle call, so its drift is 0 under a
// deterministic extractor.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ccp_core::{DriftResult, Signal, TransformationOracle, DEFAULT_CHARS_PER_UNIT};
use ccp_extract::CommitmentExtractor;
use ccp_metrics::drift;

use crate::repair::RepairStrategy;

/// Default number of recursion steps after step 0.
pub const DEFAULT_RECURSION_DEPTH: u32 = 8;

/// Configuration of one drift walk.
#[derive(Debug, Clone)]
pub struct DriftConfig {
    /// Number of paraphrase steps; the walk records depth + 1 drift values.
    pub depth: u32,
    /// Whether each paraphrase is wrapped in enforcement repair.
    pub enforcement: bool,
    /// Which repair strategy enforcement uses.
    pub strategy: RepairStrategy,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_RECURSION_DEPTH,
            enforcement: false,
            strategy: RepairStrategy::Append,
        }
    }
}

/// Orchestrates repeated paraphrase application with per-step drift scoring.
pub struct DriftProtocol {
    extractor: CommitmentExtractor,
    oracle: Arc<dyn TransformationOracle>,
    config: DriftConfig,
}

impl DriftProtocol {
    pub fn new(
        extractor: CommitmentExtractor,
        oracle: Arc<dyn TransformationOracle>,
        config: DriftConfig,
    ) -> Self {
        Self {
            extractor,
            oracle,
            config,
        }
    }

    /// Run the walk. A completed walk returns exactly depth + 1 drift
    /// values; an oracle failure returns the values collected so far.
    pub fn run(&self, signal: &Signal) -> DriftResult {
        let base = self.extractor.extract(signal.text());
        info!(
            signal = %signal.content_digest(),
            base_commitments = base.len(),
            depth = self.config.depth,
            enforcement = self.config.enforcement,
            "starting drift walk"
        );

        let mut drift_values = Vec::with_capacity(self.config.depth as usize + 1);
        let mut failure = None;
        let mut current = signal.text().to_string();

        for step in 0..=self.config.depth {
            let current_set = self.extractor.extract(&current);
            let value = drift(&base, &current_set);
            debug!(step, commitments = current_set.len(), drift = value, "drift step");
            drift_values.push(value);

            if step == self.config.depth {
                break;
            }
            let next = match self.oracle.paraphrase(&current) {
                Ok(text) => text,
                Err(e) => {
                    warn!(step, error = %e, "oracle failed, aborting walk");
                    failure = Some(e.to_string());
                    break;
                }
            };
            current = if self.config.enforcement {
                // Paraphrase repair runs without a length budget: append
                // without truncation.
                self.config.strategy.apply(
                    &base,
                    &next,
                    &self.extractor,
                    None,
                    DEFAULT_CHARS_PER_UNIT,
                )
            } else {
                next
            };
        }

        DriftResult {
            depth: self.config.depth,
            enforced: self.config.enforcement,
            drift_values,
            failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccp_extract::ExtractionMode;
    use ccp_oracle::{ClauseDropOracle, FailingOracle, IdentityOracle};

    fn protocol(config: DriftConfig, oracle: Arc<dyn TransformationOracle>) -> DriftProtocol {
        let extractor = CommitmentExtractor::with_rule_segmenter(ExtractionMode::Simple);
        DriftProtocol::new(extractor, oracle, config)
    }

    #[test]
    fn test_step_zero_drift_is_zero() {
        let config = DriftConfig {
            depth: 3,
            ..DriftConfig::default()
        };
        let protocol = protocol(config, Arc::new(IdentityOracle::new()));
        let result = protocol.run(&Signal::new("You must pay $100."));
        assert_eq!(result.drift_values[0], 0.0);
    }

    #[test]
    fn test_depth_three_yields_four_values() {
        let config = DriftConfig {
            depth: 3,
            ..DriftConfig::default()
        };
        let protocol = protocol(config, Arc::new(IdentityOracle::new()));
        // Regardless of signal content.
        for signal in ["You must pay $100.", "It's likely rainy.", ""] {
            let result = protocol.run(&Signal::new(signal));
            assert_eq!(result.drift_values.len(), 4);
        }
    }

    #[test]
    fn test_identity_oracle_never_drifts() {
        let protocol = protocol(DriftConfig::default(), Arc::new(IdentityOracle::new()));
        let result = protocol.run(&Signal::new("You must pay $100."));
        assert!(result.drift_values.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_lossy_paraphrase_drift_is_monotone() {
        let config = DriftConfig {
            depth: 3,
            ..DriftConfig::default()
        };
        let protocol = protocol(config, Arc::new(ClauseDropOracle::default()));
        let signal = Signal::new("You must pay the fee. You must not share the key.");
        let result = protocol.run(&signal);
        assert_eq!(result.drift_values[0], 0.0);
        for pair in result.drift_values.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(result.drift_values[3], 1.0);
    }

    #[test]
    fn test_enforcement_holds_drift_at_zero() {
        let config = DriftConfig {
            depth: 3,
            enforcement: true,
            ..DriftConfig::default()
        };
        let protocol = protocol(config, Arc::new(ClauseDropOracle::default()));
        let signal = Signal::new("You must pay the fee. You must not share the key.");
        let result = protocol.run(&signal);
        assert!(result.drift_values.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_failing_oracle_preserves_step_zero() {
        let config = DriftConfig {
            depth: 3,
            ..DriftConfig::default()
        };
        let protocol = protocol(config, Arc::new(FailingOracle::new()));
        let result = protocol.run(&Signal::new("You must pay."));
        assert_eq!(result.drift_values, vec![0.0]);
        assert!(result.is_partial());
    }
}
