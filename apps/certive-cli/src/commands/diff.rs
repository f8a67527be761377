//! Diff command for comparing attribute snapshots
//!
//! Loads two JSON snapshots of an object's attributes and lists what
//! changed between them. Useful for previewing provisioning updates and
//! for detecting drift between a system of record and a target system.
//!
//! # Usage
//!
//! Compare two account snapshots:
//! ```bash
//! certive diff before.json after.json
//! ```
//!
//! Machine-readable output for pipelines:
//! ```bash
//! certive diff before.json after.json --output json
//! ```

use std::path::{Path, PathBuf};

use clap::Args;

use certive_diff::{AttributeBag, DiffConfig, DiffEngine, DEFAULT_MAX_STRING_LEN};

use crate::error::{CliError, CliResult, EXIT_CHANGES_FOUND, EXIT_NO_CHANGES};
use crate::output::{format_differences, OutputFormat};

/// Compare two attribute snapshots
///
/// Each snapshot is a JSON object mapping attribute names to values
/// (scalars, arrays, or entity references). The command lists every
/// attribute that changed, appeared, or disappeared between the two.
#[derive(Args, Debug)]
#[command(after_help = "EXIT CODES:
    0  No differences found (snapshots match)
    1  Differences detected
    2  Error occurred (file not found, parse error)

EXAMPLES:
    # Compare two account snapshots
    certive diff before.json after.json

    # Skip volatile attributes
    certive diff before.json after.json --ignore lastLogin --ignore pwdChangedTime

    # Machine-readable output for pipelines
    certive diff before.json after.json --output json

    # Stop at the first difference
    certive diff before.json after.json --max-diffs 1
")]
pub struct DiffArgs {
    /// Baseline snapshot (JSON attribute map)
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// Snapshot to compare against the baseline
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Attribute to skip (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "ATTR")]
    pub ignore: Vec<String>,

    /// Stop after this many differences (0 scans everything)
    #[arg(long, default_value_t = 0)]
    pub max_diffs: usize,

    /// Maximum characters per value summary (0 disables truncation)
    #[arg(long, default_value_t = DEFAULT_MAX_STRING_LEN)]
    pub max_len: usize,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Run the diff command, returning the process exit code.
pub fn execute(args: DiffArgs) -> CliResult<i32> {
    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;
    tracing::debug!(
        old_attrs = old.len(),
        new_attrs = new.len(),
        "comparing snapshots"
    );

    let engine = DiffEngine::new(DiffConfig::new().with_max_string_len(args.max_len));
    let ignore: Vec<&str> = args.ignore.iter().map(String::as_str).collect();

    match engine.diff_bags(Some(&old), Some(&new), &ignore, args.max_diffs) {
        None => {
            println!("No differences.");
            Ok(EXIT_NO_CHANGES)
        }
        Some(diffs) => {
            print!("{}", format_differences(&diffs, args.output));
            Ok(EXIT_CHANGES_FOUND)
        }
    }
}

fn load_snapshot(path: &Path) -> CliResult<AttributeBag> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_snapshot(&raw).map_err(|message| CliError::Parse {
        path: path.display().to_string(),
        message,
    })
}

fn parse_snapshot(raw: &str) -> Result<AttributeBag, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}
