// crates/ccp-cli/src/commands/batch.rs
//
// `ccp batch` — run sweep + drift for every signal of the canonical corpus.
//
// Independent signals have no data dependency, so they run on a bounded
// spawn_blocking pool; each worker owns its protocol state and the oracle
// backend must tolerate concurrent calls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tabled::Tabled;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

use ccp_core::{CanonicalCorpus, Receipt, Signal};
use ccp_protocol::{ConservationProtocol, DriftConfig, DriftProtocol, SweepConfig};

use crate::config::HarnessConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Batch evaluation command.
#[derive(Debug, Args)]
pub struct BatchCmd {
    /// Canonical corpus JSON path.
    #[arg(long)]
    pub corpus: Option<String>,

    /// Bounded worker count.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Wrap every transformation in enforcement repair.
    #[arg(long)]
    pub enforce: bool,

    /// Reference oracle: "identity", "truncation", or "clause-drop".
    #[arg(long)]
    pub oracle: Option<String>,

    /// Extraction mode: "simple" or "structured".
    #[arg(long)]
    pub mode: Option<String>,

    /// Directory receipts are written into.
    #[arg(long)]
    pub receipt_dir: Option<String>,
}

#[derive(Tabled, serde::Serialize)]
struct BatchRow {
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Commitments")]
    commitments: usize,
    #[tabled(rename = "Min fidelity")]
    min_fidelity: String,
    #[tabled(rename = "Final drift")]
    final_drift: String,
}

/// Run the batch command.
pub async fn run(
    cmd: &BatchCmd,
    config: &HarnessConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let corpus_path = cmd.corpus.as_deref().unwrap_or(&config.corpus_path);
    let corpus = CanonicalCorpus::load(Path::new(corpus_path))?;
    corpus.validate()?;
    info!(
        corpus = %corpus.name,
        signals = corpus.canonical_signals.len(),
        "starting batch evaluation"
    );

    let extractor = super::build_extractor(cmd.mode.as_deref(), config)?;
    let oracle = super::build_oracle(cmd.oracle.as_deref(), config)?;
    let receipt_dir: PathBuf = cmd
        .receipt_dir
        .as_deref()
        .unwrap_or(&config.receipt_dir)
        .into();

    let sweep_config = SweepConfig {
        grid: config.sigma_grid.clone(),
        enforcement: cmd.enforce,
        chars_per_unit: config.chars_per_unit,
        ..SweepConfig::default()
    };
    let drift_config = DriftConfig {
        depth: config.recursion_depth,
        enforcement: cmd.enforce,
        ..DriftConfig::default()
    };

    let workers = cmd.workers.unwrap_or(config.workers).max(1);
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();

    for text in corpus.canonical_signals.clone() {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = extractor.clone();
        let oracle = oracle.clone();
        let sweep_config = sweep_config.clone();
        let drift_config = drift_config.clone();
        let receipt_dir = receipt_dir.clone();

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let signal = Signal::new(text.clone());
            let base_len = extractor.extract(&text).len();

            let sweep = ConservationProtocol::new(extractor.clone(), oracle.clone(), sweep_config)
                .run(&signal);
            let walk = DriftProtocol::new(extractor, oracle, drift_config).run(&signal);

            let min_fidelity = min_fidelity_cell(&sweep.fidelities);
            let final_drift = walk.final_drift().unwrap_or(f64::NAN);

            let sweep_path = Receipt::for_sweep(&signal, sweep).write_json(&receipt_dir);
            let drift_path = Receipt::for_drift(&signal, walk).write_json(&receipt_dir);
            sweep_path?;
            drift_path?;

            Ok::<BatchRow, ccp_core::CcpError>(BatchRow {
                signal: preview(&text),
                commitments: base_len,
                min_fidelity,
                final_drift: format!("{:.3}", final_drift),
            })
        });
    }

    let mut rows = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        rows.push(joined??);
    }
    // Join order depends on scheduling; keep the summary deterministic.
    rows.sort_by(|a, b| a.signal.cmp(&b.signal));

    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => {
            println!("{}", format_table(&rows));
            println!("\n{} signal(s) evaluated.", rows.len());
        }
    }
    Ok(())
}

/// First 40 characters of a signal, for summary rows.
fn preview(text: &str) -> String {
    let prefix: String = text.chars().take(40).collect();
    if prefix.len() < text.len() {
        format!("{}…", prefix)
    } else {
        prefix
    }
}

/// Minimum sweep fidelity as a table cell; "-" when the sweep produced no
/// grid points (an oracle failing at the first budget).
fn min_fidelity_cell(fidelities: &[f64]) -> String {
    if fidelities.is_empty() {
        return "-".to_string();
    }
    let min = fidelities.iter().copied().fold(f64::INFINITY, f64::min);
    format!("{:.3}", min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_fidelity_cell_empty_sweep() {
        assert_eq!(min_fidelity_cell(&[]), "-");
    }

    #[test]
    fn test_min_fidelity_cell_picks_minimum() {
        assert_eq!(min_fidelity_cell(&[1.0, 0.25, 0.5]), "0.250");
    }
}
