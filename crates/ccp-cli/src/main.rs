// crates/ccp-cli/src/main.rs
//
// CLI entrypoint for the Commitment Conservation Protocol harness.
//
// Provides subcommands for extracting commitments, running compression
// sweeps and recursive drift walks, and batch-evaluating the canonical
// corpus. Receipts land in the configured receipt directory under
// content-derived file names.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::batch::BatchCmd;
use commands::drift::DriftCmd;
use commands::extract::ExtractCmd;
use commands::sweep::SweepCmd;
use config::HarnessConfig;
use output::OutputFormat;

/// Commitment Conservation Protocol CLI — does a commitment survive
/// compression and recursive paraphrase?
#[derive(Parser, Debug)]
#[command(
    name = "ccp",
    version = "0.1.0",
    about = "Commitment Conservation Protocol harness — extraction, sweeps, drift walks"
)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract the commitment set of a text.
    Extract(ExtractCmd),

    /// Run a compression sweep over a budget grid.
    Sweep(SweepCmd),

    /// Run a recursive drift walk.
    Drift(DriftCmd),

    /// Evaluate every signal of the canonical corpus.
    Batch(BatchCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match &cli.command {
        Commands::Extract(cmd) => commands::extract::run(cmd, &config, format)?,
        Commands::Sweep(cmd) => commands::sweep::run(cmd, &config, format)?,
        Commands::Drift(cmd) => commands::drift::run(cmd, &config, format)?,
        Commands::Batch(cmd) => commands::batch::run(cmd, &config, format).await?,
    }

    Ok(())
}
