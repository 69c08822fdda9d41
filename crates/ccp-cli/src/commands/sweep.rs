// crates/ccp-cli/src/commands/sweep.rs
//
// `ccp sweep <signal>` — run the compression sweep over a budget grid and
// write a receipt.

use std::path::Path;

use clap::Args;
use tabled::Tabled;

use ccp_core::{Receipt, Signal};
use ccp_protocol::{ConservationProtocol, SweepConfig};

use crate::config::HarnessConfig;
use crate::output::{abort_notice, format_json, format_table, OutputFormat};

/// Compression sweep command.
#[derive(Debug, Args)]
pub struct SweepCmd {
    /// The signal text under evaluation.
    #[arg()]
    pub signal: String,

    /// Budget grid, comma-separated, walked in the order given.
    #[arg(long, value_delimiter = ',')]
    pub grid: Option<Vec<u32>>,

    /// Wrap each compression in enforcement repair.
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
struct SweepRow {
    #[tabled(rename = "Budget")]
    budget: u32,
    #[tabled(rename = "Fidelity")]
    fidelity: String,
}

/// Run the sweep command.
pub fn run(
    cmd: &SweepCmd,
    config: &HarnessConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = super::build_extractor(cmd.mode.as_deref(), config)?;
    let oracle = super::build_oracle(cmd.oracle.as_deref(), config)?;
    let protocol = ConservationProtocol::new(
        extractor,
        oracle,
        SweepConfig {
            grid: cmd.grid.clone().unwrap_or_else(|| config.sigma_grid.clone()),
            enforcement: cmd.enforce,
            chars_per_unit: config.chars_per_unit,
            ..SweepConfig::default()
        },
    );

    let signal = Signal::new(cmd.signal.clone());
    let result = protocol.run(&signal);
    let receipt = Receipt::for_sweep(&signal, result);

    match format {
        OutputFormat::Json => println!("{}", format_json(&receipt)),
        OutputFormat::Table => {
            let ccp_core::ReceiptOutcome::Sweep(ref result) = receipt.outcome else {
                unreachable!("sweep receipt holds a sweep outcome");
            };
            let rows: Vec<SweepRow> = result
                .points()
                .map(|(budget, fidelity)| SweepRow {
                    budget,
                    fidelity: format!("{:.3}", fidelity),
                })
                .collect();
            println!("{}", format_table(&rows));
            if let Some(notice) = abort_notice("Sweep", result.failure.as_deref()) {
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
