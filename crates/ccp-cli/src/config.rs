// crates/ccp-cli/src/config.rs
//
// Runtime configuration for the ccp CLI.
// Loaded from a TOML file or populated with sensible defaults; per-command
// flags override individual values.

use serde::Deserialize;
use std::fs;

use ccp_core::DEFAULT_CHARS_PER_UNIT;
use ccp_protocol::{DEFAULT_RECURSION_DEPTH, DEFAULT_SIGMA_GRID};

/// Runtime configuration for the harness CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    /// Compression budget grid, conventionally descending.
    #[serde(default = "default_sigma_grid")]
    pub sigma_grid: Vec<u32>,

    /// Recursion depth for drift walks.
    #[serde(default = "default_recursion_depth")]
    pub recursion_depth: u32,

    /// Character-per-budget-unit ratio for repair length estimates.
    #[serde(default = "default_chars_per_unit")]
    pub chars_per_unit: u32,

    /// Extraction mode: "simple" or "structured".
    #[serde(default = "default_extraction_mode")]
    pub extraction_mode: String,

    /// Reference oracle: "identity", "truncation", or "clause-drop".
    #[serde(default = "default_oracle")]
    pub oracle: String,

    /// Directory receipts are written into.
    #[serde(default = "default_receipt_dir")]
    pub receipt_dir: String,

    /// Canonical corpus path for batch runs.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// Bounded worker count for batch runs.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_sigma_grid() -> Vec<u32> {
    DEFAULT_SIGMA_GRID.to_vec()
}

fn default_recursion_depth() -> u32 {
    DEFAULT_RECURSION_DEPTH
}

fn default_chars_per_unit() -> u32 {
    DEFAULT_CHARS_PER_UNIT
}

fn default_extraction_mode() -> String {
    "simple".to_string()
}

fn default_oracle() -> String {
    "truncation".to_string()
}

fn default_receipt_dir() -> String {
    "receipts".to_string()
}

fn default_corpus_path() -> String {
    "corpus/canonical_corpus.json".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sigma_grid: default_sigma_grid(),
            recursion_depth: default_recursion_depth(),
            chars_per_unit: default_chars_per_unit(),
            extraction_mode: default_extraction_mode(),
            oracle: default_oracle(),
            receipt_dir: default_receipt_dir(),
            corpus_path: default_corpus_path(),
            workers: default_workers(),
            log_level: default_log_level(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: HarnessConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_protocol_constants() {
        let config = HarnessConfig::default();
        assert_eq!(config.sigma_grid, vec![120, 80, 40, 20, 10, 5]);
        assert_eq!(config.recursion_depth, 8);
        assert_eq!(config.chars_per_unit, 4);
        assert_eq!(config.extraction_mode, "simple");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: HarnessConfig = toml::from_str("recursion_depth = 3").unwrap();
        assert_eq!(config.recursion_depth, 3);
        assert_eq!(config.oracle, "truncation");
    }
}
