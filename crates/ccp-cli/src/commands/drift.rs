// crates/ccp-cli/src/commands/drift.rs
//
// `ccp drift <signal>` — run the recursive drift walk and write a receipt.

use std::path::Path;

use clap::Args;
use tabled::Tabled;

use ccp_core::{Receipt, Signal};
use ccp_protocol::{DriftConfig, DriftProtocol};

use crate::config::HarnessConfig;
use crate::output::{abort_notice, format_json, format_table, OutputFormat};

/// Recursive drift walk command.
#[derive(Debug, Args)]
pub struct DriftCmd {
    /// The signal text under evaluation.
    #[arg()]
    pub signal: String,

    /// Number of paraphrase steps (records depth + 1 drift values).
    #[arg(long)]
    pub depth: Option<u32>,

    /// Wrap each paraphrase in enforcement repair.
    #[arg(long)]
    pub enforce: bool,

    /// Reference oracle: "identity", "truncation", or "clause-drop".
    #[arg(long)]
    pub oracle: Option<String>,

    /// Extraction mode: "simple" or "structured".
    #[arg(long)]
    pub mode: Option<String>,

    /// Directory the receipt is written into.
    #[arg(long)]
    pub receipt_dir: Option<String>,

    /// Skip writing a receipt file.
    #[arg(long)]
    pub no_receipt: bool,
}

#[derive(Tabled)]
struct DriftRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Drift")]
    drift: String,
}

/// Run the drift command.
pub fn run(
    cmd: &DriftCmd,
    config: &HarnessConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = super::build_extractor(cmd.mode.as_deref(), config)?;
    let oracle = super::build_oracle(cmd.oracle.as_deref(), config)?;
    let protocol = DriftProtocol::new(
        extractor,
        oracle,
        DriftConfig {
            depth: cmd.depth.unwrap_or(config.recursion_depth),
            enforcement: cmd.enforce,
            ..DriftConfig::default()
        },
    );

    let signal = Signal::new(cmd.signal.clone());
    let result = protocol.run(&signal);
    let receipt = Receipt::for_drift(&signal, result);

    match format {
        OutputFormat::Json => println!("{}", format_json(&receipt)),
        OutputFormat::Table => {
            let ccp_core::ReceiptOutcome::Drift(ref result) = receipt.outcome else {
                unreachable!("drift receipt holds a drift outcome");
            };
            let rows: Vec<DriftRow> = result
                .drift_values
                .iter()
                .enumerate()
                .map(|(step, drift)| DriftRow {
                    step,
                    drift: format!("{:.3}", drift),
                })
                .collect();
            println!("{}", format_table(&rows));
            if let Some(notice) = abort_notice("Walk", result.failure.as_deref()) {
                println!("\n{}", notice);
            }
        }
    }

    if !cmd.no_receipt {
        let dir = cmd.receipt_dir.as_deref().unwrap_or(&config.receipt_dir);
        let path = receipt.write_json(Path::new(dir))?;
        eprintln!("Receipt written to {}", path.display());
    }
    Ok(())
}
