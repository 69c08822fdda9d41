// crates/ccp-core/src/receipt.rs
//
// Receipt records written after each protocol run: timestamp, operation
// name, input signal, and the operation-specific result arrays.
//
// File names are derived from the signal content digest, never from set
// iteration order or object identity, so re-running the same signal
// overwrites its own receipt.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CcpError;
use crate::result::{DriftResult, SweepResult};
use crate::signal::Signal;

/// Operation-specific receipt payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReceiptOutcome {
    /// Compression sweep: parallel `budgets` and `fidelities` arrays.
    Sweep(SweepResult),
    /// Recursive drift walk: depth, enforced flag, and `drift_values`.
    Drift(DriftResult),
}

/// A persisted record of one protocol run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
    /// Operation name: "sweep" or "drift".
    pub operation: String,
    /// The input signal text.
    pub signal: String,
    /// Operation-specific result fields.
    #[serde(flatten)]
    pub outcome: ReceiptOutcome,
}

impl Receipt {
    /// Build a receipt for a completed compression sweep.
    pub fn for_sweep(signal: &Signal, result: SweepResult) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            timestamp: Utc::now(),
            operation: "sweep".to_string(),
            signal: signal.text().to_string(),
            outcome: ReceiptOutcome::Sweep(result),
        }
    }

    /// Build a receipt for a completed drift walk.
    pub fn for_drift(signal: &Signal, result: DriftResult) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            timestamp: Utc::now(),
            operation: "drift".to_string(),
            signal: signal.text().to_string(),
            outcome: ReceiptOutcome::Drift(result),
        }
    }

    /// Content-derived file name: `{operation}_{signal digest}.json`.
    pub fn file_name(&self) -> String {
        let digest = Signal::new(self.signal.clone()).content_digest();
        format!("{}_{}.json", self.operation, digest)
    }

    /// Pretty-print the receipt as JSON into `dir`, creating the directory
    /// if needed. Returns the written path.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf, CcpError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sweep() -> SweepResult {
        SweepResult {
            budgets: vec![120, 80, 40],
            fidelities: vec![1.0, 0.5, 0.0],
            failure: None,
        }
    }

    #[test]
    fn test_file_name_is_content_derived() {
        let signal = Signal::new("You must pay $100 by Friday.");
        let r1 = Receipt::for_sweep(&signal, sample_sweep());
        let r2 = Receipt::for_sweep(&signal, sample_sweep());
        // Different run ids, identical file names.
        assert_ne!(r1.run_id, r2.run_id);
        assert_eq!(r1.file_name(), r2.file_name());
        assert!(r1.file_name().starts_with("sweep_"));
        assert!(r1.file_name().ends_with(".json"));
    }

    #[test]
    fn test_receipt_round_trips_through_json() {
        let signal = Signal::new("You must pay $100 by Friday.");
        let receipt = Receipt::for_sweep(&signal, sample_sweep());
        let json = serde_json::to_string(&receipt).unwrap();
        assert!(json.contains("\"kind\":\"sweep\""));
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back.signal, receipt.signal);
        match back.outcome {
            ReceiptOutcome::Sweep(s) => assert_eq!(s.budgets, vec![120, 80, 40]),
            ReceiptOutcome::Drift(_) => panic!("wrong outcome kind"),
        }
    }

    #[test]
    fn test_write_json_creates_file() {
        let dir = std::env::temp_dir().join(format!("ccp_receipt_{}", Uuid::now_v7()));
        let signal = Signal::new("You must pay $100 by Friday.");
        let receipt = Receipt::for_sweep(&signal, sample_sweep());
        let path = receipt.write_json(&dir).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
