/// Shared transaction input handling
use clap::Args as ClapArgs;
use sanitizer_export::envelope::TextEnvelope;
use sanitizer_export::parse_tx_hex;
use sanitizer_primitives::Tx;
use std::error::Error;
use std::path::PathBuf;

/// Where the transaction comes from. A file holds either a text envelope
/// (any json with a `cborHex` field) or bare cbor hex.
#[derive(Debug, ClapArgs)]
#[group(required = true, multiple = false)]
pub struct TxSource {
    /// Path to a text envelope json file or a file holding cbor hex
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Transaction cbor as a hex string
    #[arg(long, value_name = "HEX")]
    pub cbor_hex: Option<String>,
}

impl TxSource {
    pub fn load(&self) -> Result<Tx, Box<dyn Error>> {
        if let Some(hex_payload) = &self.cbor_hex {
            return Ok(parse_tx_hex(hex_payload)?);
        }

        // clap guarantees one of the two is present
        let Some(path) = &self.file else {
            return Err("no transaction input was provided".into());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to open {}: {err}", path.display()))?;

        let tx = if contents.trim_start().starts_with('{') {
            TextEnvelope::from_json(&contents)?.parse_tx()?
        } else {
            parse_tx_hex(&contents)?
        };

        Ok(tx)
    }
}
