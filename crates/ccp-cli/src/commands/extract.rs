// crates/ccp-cli/src/commands/extract.rs
//
// `ccp extract <text>` — extract and display the commitment set of a text.

use clap::Args;
use tabled::Tabled;

use ccp_extract::ModalLexicon;

use crate::config::HarnessConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Commitment extraction command.
#[derive(Debug, Args)]
pub struct ExtractCmd {
    /// The text to extract commitments from.
    #[arg()]
    pub text: String,

    /// Extraction mode: "simple" or "structured".
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Tabled)]
struct CommitmentRow {
    #[tabled(rename = "Digest")]
    digest: String,
    #[tabled(rename = "Modality")]
    modality: String,
    #[tabled(rename = "Clause")]
    clause: String,
}

/// Run the extract command.
pub fn run(
    cmd: &ExtractCmd,
    config: &HarnessConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = super::build_extractor(cmd.mode.as_deref(), config)?;
    let set = extractor.extract(&cmd.text);

    match format {
        OutputFormat::Json => {
            println!("{}", format_json(&set.to_vec()));
        }
        OutputFormat::Table => {
            if set.is_empty() {
                println!("No commitments found.");
                return Ok(());
            }
            let lexicon = ModalLexicon::default();
            let rows: Vec<CommitmentRow> = set
                .iter()
                .map(|c| CommitmentRow {
                    digest: c.digest(),
                    modality: lexicon
                        .lookup(&c.text)
                        .map(|m| m.modality.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    clause: c.text.clone(),
                })
                .collect();
            println!("{}", format_table(&rows));
            println!("\n{} commitment(s).", set.len());
        }
    }
    Ok(())
}
