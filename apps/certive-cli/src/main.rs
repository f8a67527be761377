//! certive CLI - Attribute snapshot inspection for the certive platform
//!
//! This CLI enables operators to:
//! - Compare two attribute snapshots and list the differences
//! - Feed change detection into scripts via exit codes and JSON output

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod output;

use error::CliResult;

/// certive CLI - Attribute snapshot inspection
#[derive(Parser)]
#[command(name = "certive")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two attribute snapshots
    Diff(commands::diff::DiffArgs),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> CliResult<i32> {
    match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
