/// Transaction inspection
use crate::source::TxSource;
use clap::Parser;
use std::error::Error;

#[derive(Debug, Parser)]
/// Arguments for transaction inspection
pub struct Args {
    #[command(flatten)]
    source: TxSource,
}

/// Parses the transaction and prints it as pretty JSON
pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let tx = args.source.load()?;
    println!("{}", serde_json::to_string_pretty(&tx)?);

    Ok(())
}
