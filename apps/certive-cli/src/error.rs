//! CLI error types and exit codes

use thiserror::Error;

/// Exit code when snapshots are identical
pub const EXIT_NO_CHANGES: i32 = 0;

/// Exit code when differences are detected
pub const EXIT_CHANGES_FOUND: i32 = 1;

/// Exit code when an error occurs (file not found, parse error)
pub const EXIT_ERROR: i32 = 2;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid snapshot {path}: {message}")]
    Parse { path: String, message: String },
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }
}
