//! cardano-cli style TextEnvelope handling.
//!
//! An envelope is a small json document wrapping the transaction cbor:
//!
//! ```json
//! {
//!   "type": "Unwitnessed Tx ConwayEra",
//!   "description": "Generated by Cardano Transaction Sanitizer",
//!   "cborHex": "84a300..."
//! }
//! ```

use crate::{encode_tx_hex, parse_tx_hex, Era, Error};
use sanitizer_primitives::Tx;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENVELOPE_DESCRIPTION: &str = "Generated by Cardano Transaction Sanitizer";

/// Only `cborHex` is required on input; envelopes written by this tool
/// always carry all three fields.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct TextEnvelope {
    #[serde(rename = "type", default)]
    pub type_: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "cborHex")]
    pub cbor_hex: String,
}

impl TextEnvelope {
    /// Wraps a transaction for the given era. The type field records whether
    /// the witness set carries any witnesses.
    pub fn for_tx(tx: &Tx, era: Era) -> Result<Self, Error> {
        let status = if tx.transaction_witness_set.is_empty() {
            "Unwitnessed"
        } else {
            "Signed"
        };

        Ok(TextEnvelope {
            type_: format!("{status} Tx {}", era.envelope_name()),
            description: ENVELOPE_DESCRIPTION.to_string(),
            cbor_hex: encode_tx_hex(tx)?,
        })
    }

    /// Decodes the wrapped transaction.
    pub fn parse_tx(&self) -> Result<Tx, Error> {
        parse_tx_hex(&self.cbor_hex)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitizer_codec::utils::{Bytes, Nullable, Set};
    use sanitizer_primitives::{
        Hash, TransactionBody, TransactionInput, VKeyWitness, WitnessSet,
    };

    fn sample_tx() -> Tx {
        Tx {
            transaction_body: TransactionBody {
                inputs: Set::Untagged(vec![TransactionInput {
                    transaction_id: Hash::new([0x67; 32]),
                    index: 0,
                }]),
                outputs: vec![],
                fee: 0,
                ttl: None,
                certificates: None,
                withdrawals: None,
                update: None,
                auxiliary_data_hash: None,
                validity_interval_start: None,
                mint: None,
                script_data_hash: None,
                collateral: None,
                required_signers: None,
                network_id: None,
                collateral_return: None,
                total_collateral: None,
                reference_inputs: None,
                voting_procedures: None,
                proposal_procedures: None,
                treasury_value: None,
                donation: None,
            },
            transaction_witness_set: WitnessSet {
                vkeywitness: None,
                native_script: None,
                bootstrap_witness: None,
                plutus_v1_script: None,
                plutus_data: None,
                redeemer: None,
                plutus_v2_script: None,
                plutus_v3_script: None,
            },
            success: true,
            auxiliary_data: Nullable::Null,
        }
    }

    #[test]
    fn unwitnessed_tx_envelope_type() {
        let envelope = TextEnvelope::for_tx(&sample_tx(), Era::Conway).unwrap();

        assert_eq!(envelope.type_, "Unwitnessed Tx ConwayEra");
        assert_eq!(envelope.description, ENVELOPE_DESCRIPTION);
    }

    #[test]
    fn signed_tx_envelope_type() {
        let mut tx = sample_tx();
        tx.transaction_witness_set.vkeywitness = Some(Set::Untagged(vec![VKeyWitness {
            vkey: Bytes::from(vec![0; 32]),
            signature: Bytes::from(vec![0; 64]),
        }]));

        let envelope = TextEnvelope::for_tx(&tx, Era::Babbage).unwrap();

        assert_eq!(envelope.type_, "Signed Tx BabbageEra");
    }

    #[test]
    fn envelope_json_field_names() {
        let envelope = TextEnvelope::for_tx(&sample_tx(), Era::Conway).unwrap();
        let value: serde_json::Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert!(value.get("type").is_some());
        assert!(value.get("description").is_some());
        assert!(value.get("cborHex").is_some());
    }

    #[test]
    fn envelope_round_trips_the_transaction() {
        let tx = sample_tx();
        let envelope = TextEnvelope::for_tx(&tx, Era::Conway).unwrap();
        let json = envelope.to_json().unwrap();

        let back = TextEnvelope::from_json(&json).unwrap();
        assert_eq!(back.parse_tx().unwrap(), tx);
    }

    #[test]
    fn accepts_envelope_with_only_cbor_hex() {
        let tx = sample_tx();
        let json = format!(
            r#"{{"cborHex": "{}"}}"#,
            crate::encode_tx_hex(&tx).unwrap()
        );

        let envelope = TextEnvelope::from_json(&json).unwrap();
        assert_eq!(envelope.parse_tx().unwrap(), tx);
    }

    #[test]
    fn rejects_envelope_without_cbor_hex() {
        let json = r#"{"type": "Unwitnessed Tx ConwayEra", "description": ""}"#;
        let envelope = TextEnvelope::from_json(json);

        assert!(envelope.is_err());
    }

    #[test]
    fn rejects_garbage_cbor_hex() {
        let envelope = TextEnvelope {
            type_: "Unwitnessed Tx ConwayEra".into(),
            description: String::new(),
            cbor_hex: "zz".into(),
        };

        assert!(envelope.parse_tx().is_err());
    }
}
