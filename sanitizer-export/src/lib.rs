//! Era normalization and export for Cardano transactions.
//!
//! A transaction decoded with `sanitizer-primitives` remembers how each
//! set-like collection was framed on the wire. This crate rewrites that
//! framing to match a target era (or an explicit override), drops body fields
//! the target era does not know, and serializes the result as JSON, cbor hex
//! or a cardano-cli style TextEnvelope.

pub mod envelope;
mod normalize;

pub use normalize::{sanitize, Note};

use sanitizer_codec::{minicbor, Fragment};
use sanitizer_primitives::Tx;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid transaction cbor: {0}")]
    Cbor(#[from] minicbor::decode::Error),

    #[error("cbor encoding failed: {0}")]
    CborEncode(String),

    #[error("invalid envelope json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Era {
    Babbage,
    Conway,
}

impl Era {
    /// The era name as it appears in a TextEnvelope `type` field.
    pub fn envelope_name(&self) -> &'static str {
        match self {
            Era::Babbage => "BabbageEra",
            Era::Conway => "ConwayEra",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Era::Babbage => f.write_str("Babbage"),
            Era::Conway => f.write_str("Conway"),
        }
    }
}

/// How to frame set-like collections on re-encode.
///
/// `Default` follows the target era CDDL, `List` forces plain cbor arrays,
/// `Set` forces tag-258 wrapping everywhere.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CollectionType {
    Default,
    List,
    Set,
}

/// Decodes any cbor fragment from a hex payload.
pub fn parse_hex<T: Fragment>(cbor_hex: &str) -> Result<T, Error> {
    let bytes = hex::decode(cbor_hex.trim())?;

    Ok(minicbor::decode(&bytes)?)
}

/// Encodes any cbor fragment back to hex.
pub fn encode_hex<T: Fragment>(fragment: &T) -> Result<String, Error> {
    let bytes = minicbor::to_vec(fragment).map_err(|e| Error::CborEncode(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// Decodes a transaction from its cbor hex representation.
pub fn parse_tx_hex(cbor_hex: &str) -> Result<Tx, Error> {
    parse_hex(cbor_hex)
}

/// Encodes a transaction back to cbor hex.
pub fn encode_tx_hex(tx: &Tx) -> Result<String, Error> {
    encode_hex(tx)
}
