/// Transaction export with era normalization
use crate::source::TxSource;
use clap::{Parser, ValueEnum};
use sanitizer_export::envelope::TextEnvelope;
use sanitizer_export::{encode_tx_hex, sanitize, CollectionType, Era};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EraArg {
    Babbage,
    Conway,
}

impl From<EraArg> for Era {
    fn from(value: EraArg) -> Self {
        match value {
            EraArg::Babbage => Era::Babbage,
            EraArg::Conway => Era::Conway,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollectionsArg {
    /// Follow the target era CDDL
    Default,
    /// Force plain cbor arrays everywhere
    List,
    /// Force tag-258 sets everywhere
    Set,
}

impl From<CollectionsArg> for CollectionType {
    fn from(value: CollectionsArg) -> Self {
        match value {
            CollectionsArg::Default => CollectionType::Default,
            CollectionsArg::List => CollectionType::List,
            CollectionsArg::Set => CollectionType::Set,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Pretty JSON of the sanitized transaction
    Json,
    /// Bare cbor hex
    CborHex,
    /// cardano-cli style text envelope
    Envelope,
}

#[derive(Debug, Parser)]
/// Arguments for transaction export
pub struct Args {
    #[command(flatten)]
    source: TxSource,

    /// Target era for the exported transaction
    #[arg(short, long, value_enum, default_value_t = EraArg::Conway)]
    era: EraArg,

    /// How to frame set-like collections
    #[arg(short, long, value_enum, default_value_t = CollectionsArg::Default)]
    collections: CollectionsArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Envelope)]
    format: FormatArg,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Sanitizes the transaction for the target era and writes it out
pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let tx = args.source.load()?;
    let era = Era::from(args.era);

    let (sanitized, notes) = sanitize(&tx, era, args.collections.into());

    for note in &notes {
        eprintln!("warning: {note}");
    }

    let rendered = match args.format {
        FormatArg::Json => serde_json::to_string_pretty(&sanitized)?,
        FormatArg::CborHex => encode_tx_hex(&sanitized)?,
        FormatArg::Envelope => TextEnvelope::for_tx(&sanitized, era)?.to_json()?,
    };

    match args.output {
        Some(path) => std::fs::write(&path, rendered + "\n")
            .map_err(|err| format!("failed to write {}: {err}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}
