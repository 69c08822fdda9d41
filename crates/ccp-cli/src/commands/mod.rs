// crates/ccp-cli/src/commands/mod.rs
//
// Subcommand implementations plus the shared extractor/oracle builders.

pub mod batch;
pub mod drift;
pub mod extract;
pub mod sweep;

use std::sync::Arc;

use ccp_core::{CcpError, TransformationOracle};
use ccp_extract::{CommitmentExtractor, ExtractionMode};
use ccp_oracle::{ClauseDropOracle, IdentityOracle, TruncationOracle};

use crate::config::HarnessConfig;

/// Build the extractor from a mode name, falling back to the config value.
pub fn build_extractor(
    mode_flag: Option<&str>,
    config: &HarnessConfig,
) -> Result<CommitmentExtractor, CcpError> {
    let mode: ExtractionMode = mode_flag
        .unwrap_or(&config.extraction_mode)
        .parse()?;
    Ok(CommitmentExtractor::with_rule_segmenter(mode))
}

/// Build a reference oracle from its name, falling back to the config value.
pub fn build_oracle(
    oracle_flag: Option<&str>,
    config: &HarnessConfig,
) -> Result<Arc<dyn TransformationOracle>, CcpError> {
    let name = oracle_flag.unwrap_or(&config.oracle);
    match name {
        "identity" => Ok(Arc::new(IdentityOracle::new())),
        "truncation" => Ok(Arc::new(TruncationOracle::new(config.chars_per_unit))),
        "clause-drop" => Ok(Arc::new(ClauseDropOracle::new(config.chars_per_unit))),
        other => Err(CcpError::Config(format!(
            "unknown oracle '{}', expected 'identity', 'truncation', or 'clause-drop'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_oracle_known_names() {
        let config = HarnessConfig::default();
        for name in ["identity", "truncation", "clause-drop"] {
            assert!(build_oracle(Some(name), &config).is_ok());
        }
    }

    #[test]
    fn test_build_oracle_unknown_name() {
        let config = HarnessConfig::default();
        assert!(build_oracle(Some("bart-large"), &config).is_err());
    }

    #[test]
    fn test_build_extractor_falls_back_to_config() {
        let config = HarnessConfig::default();
        let extractor = build_extractor(None, &config).unwrap();
        assert_eq!(extractor.mode(), ccp_extract::ExtractionMode::Simple);
    }
}
