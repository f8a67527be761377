//! Output formatting for diff results

use clap::ValueEnum;

use certive_diff::Difference;

/// Output format options for the diff command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing (default)
    #[default]
    Table,
    /// JSON array of difference records
    Json,
}

/// Render differences in the requested format.
pub fn format_differences(diffs: &[Difference], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(diffs).unwrap_or_default();
            out.push('\n');
            out
        }
        OutputFormat::Table => format_listing(diffs),
    }
}

fn format_listing(diffs: &[Difference]) -> String {
    let mut out = String::new();
    for diff in diffs {
        out.push_str(&format!("~ {diff}\n"));
        for value in &diff.added_values {
            out.push_str(&format!("    + {value}\n"));
        }
        for value in &diff.removed_values {
            out.push_str(&format!("    - {value}\n"));
        }
    }
    out.push_str(&format!("{} difference(s)\n", diffs.len()));
    out
}
