//! CLI for parsing and re-exporting Cardano transactions with normalized
//! collection encodings

use clap::{Parser, Subcommand};
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Transaction export with era normalization
pub mod export;

/// Transaction inspection
pub mod inspect;

/// Shared transaction input handling
pub mod source;

/// CLI commands available
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a transaction and print it as pretty JSON
    Inspect(inspect::Args),

    /// Sanitize a transaction for a target era and write it out
    Export(export::Args),
}

#[derive(Debug, Parser)]
#[clap(name = "sanitizer-cli")]
#[clap(bin_name = "cardano-tx-sanitizer")]
#[clap(version=env!("CARGO_PKG_VERSION"))]
#[clap(about = "Parses Cardano transactions and re-exports them with normalized encodings")]
#[clap(long_about = None)]
/// Cli command data type
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// main function of the cardano-tx-sanitizer binary
pub fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Command::Inspect(args) => inspect::run(args),
        Command::Export(args) => export::run(args),
    }
}
