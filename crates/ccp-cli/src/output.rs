// crates/ccp-cli/src/output.rs
//
// Output formatting utilities for the ccp CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Footer line for a protocol run that an oracle failure cut short, or
/// `None` when the run completed.
pub fn abort_notice(operation: &str, failure: Option<&str>) -> Option<String> {
    failure.map(|reason| format!("{} aborted early: {}", operation, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_notice_only_on_failure() {
        assert_eq!(abort_notice("Sweep", None), None);
        assert_eq!(
            abort_notice("Sweep", Some("oracle unavailable")).unwrap(),
            "Sweep aborted early: oracle unavailable"
        );
    }
}
