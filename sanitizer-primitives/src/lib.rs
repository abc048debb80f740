//! Ledger primitives and cbor codecs shared by the Babbage and Conway
//! transaction models.
//!
//! The model in this crate is the superset of both eras: a decoded
//! transaction keeps every field either era defines, and remembers how each
//! collection was framed on the wire (plain array vs tag-258 set) so callers
//! can re-encode it for a specific era.

mod hash;
mod model;
mod plutus;

pub use hash::Hash;
pub use model::*;
pub use plutus::*;

use sanitizer_codec::codec_by_datatype;
use sanitizer_codec::minicbor::{self, data::Tag, Decode, Encode};
use sanitizer_codec::utils::{Bytes, Int, KeyValuePairs, Nullable};
use serde::{Deserialize, Serialize};

pub type Coin = u64;

pub type Epoch = u64;

pub type AddrKeyhash = Hash<28>;

pub type PoolKeyhash = Hash<28>;

pub type VrfKeyhash = Hash<32>;

pub type Genesishash = Hash<28>;

pub type GenesisDelegateHash = Hash<28>;

pub type ScriptHash = Hash<28>;

pub type PolicyId = Hash<28>;

pub type DatumHash = Hash<32>;

pub type AuxiliaryDataHash = Bytes;

pub type PoolMetadataHash = Hash<32>;

pub type AssetName = Bytes;

pub type RewardAccount = Bytes;

pub type DnsName = String;

pub type Port = u32;

pub type IPv4 = Bytes;

pub type IPv6 = Bytes;

pub type CostModel = Vec<i64>;

pub type ProtocolVersion = (u64, u64);

pub type MetadatumLabel = u64;

pub type Metadata = KeyValuePairs<MetadatumLabel, Metadatum>;

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone, Hash)]
pub struct TransactionInput {
    #[n(0)]
    pub transaction_id: Hash<32>,

    #[n(1)]
    pub index: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
pub struct RationalNumber {
    pub numerator: u64,
    pub denominator: u64,
}

pub type UnitInterval = RationalNumber;

pub type PositiveInterval = RationalNumber;

impl<'b, C> Decode<'b, C> for RationalNumber {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        match d.tag()? {
            Tag::Unassigned(30) => {
                d.array()?;

                Ok(RationalNumber {
                    numerator: d.u64()?,
                    denominator: d.u64()?,
                })
            }
            _ => Err(minicbor::decode::Error::message(
                "invalid tag for rational number",
            )),
        }
    }
}

impl<C> Encode<C> for RationalNumber {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.tag(Tag::Unassigned(30))?;
        e.array(2)?;
        e.u64(self.numerator)?;
        e.u64(self.denominator)?;

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
pub enum StakeCredential {
    AddrKeyhash(AddrKeyhash),
    ScriptHash(ScriptHash),
}

impl<'b, C> Decode<'b, C> for StakeCredential {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(StakeCredential::AddrKeyhash(d.decode_with(ctx)?)),
            1 => Ok(StakeCredential::ScriptHash(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for StakeCredential",
            )),
        }
    }
}

impl<C> Encode<C> for StakeCredential {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(2)?;

        match self {
            StakeCredential::AddrKeyhash(x) => {
                e.u16(0)?;
                e.encode_with(x, ctx)?;
            }
            StakeCredential::ScriptHash(x) => {
                e.u16(1)?;
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Relay {
    SingleHostAddr(Nullable<Port>, Nullable<IPv4>, Nullable<IPv6>),
    SingleHostName(Nullable<Port>, DnsName),
    MultiHostName(DnsName),
}

impl<'b, C> Decode<'b, C> for Relay {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(Relay::SingleHostAddr(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            1 => Ok(Relay::SingleHostName(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            2 => Ok(Relay::MultiHostName(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for Relay",
            )),
        }
    }
}

impl<C> Encode<C> for Relay {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Relay::SingleHostAddr(a, b, c) => {
                e.array(4)?;
                e.encode_with(0, ctx)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Relay::SingleHostName(a, b) => {
                e.array(3)?;
                e.encode_with(1, ctx)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Relay::MultiHostName(a) => {
                e.array(2)?;
                e.encode_with(2, ctx)?;
                e.encode_with(a, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct PoolMetadata {
    #[n(0)]
    pub url: String,

    #[n(1)]
    pub hash: PoolMetadataHash,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
#[cbor(index_only)]
pub enum NetworkId {
    #[n(0)]
    Testnet,

    #[n(1)]
    Mainnet,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
#[cbor(index_only)]
pub enum NonceVariant {
    #[n(0)]
    NeutralNonce,

    #[n(1)]
    Nonce,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Nonce {
    pub variant: NonceVariant,
    pub hash: Option<Hash<32>>,
}

impl<'b, C> Decode<'b, C> for Nonce {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        let variant = d.decode_with(ctx)?;

        let hash = match variant {
            NonceVariant::NeutralNonce => None,
            NonceVariant::Nonce => Some(d.decode_with(ctx)?),
        };

        Ok(Nonce { variant, hash })
    }
}

impl<C> Encode<C> for Nonce {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match &self.hash {
            None => {
                e.array(1)?;
                e.encode_with(&self.variant, ctx)?;
            }
            Some(x) => {
                e.array(2)?;
                e.encode_with(&self.variant, ctx)?;
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct ExUnits {
    #[n(0)]
    pub mem: u64,

    #[n(1)]
    pub steps: u64,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct ExUnitPrices {
    #[n(0)]
    pub mem_price: PositiveInterval,

    #[n(1)]
    pub step_price: PositiveInterval,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
#[cbor(transparent)]
pub struct PlutusScript<const VERSION: usize>(#[n(0)] pub Bytes);

impl<const VERSION: usize> AsRef<[u8]> for PlutusScript<VERSION> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Metadatum {
    Int(Int),
    Bytes(Bytes),
    Text(String),
    Array(Vec<Metadatum>),
    Map(KeyValuePairs<Metadatum, Metadatum>),
}

codec_by_datatype! {
    Metadatum,
    U8 | U16 | U32 | U64 | I8 | I16 | I32 | I64 | Int => Int,
    Bytes | BytesIndef => Bytes,
    String | StringIndef => Text,
    Array | ArrayIndef => Array,
    Map | MapIndef => Map,
    ()
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn rational_number_roundtrip() {
        let bytes = hex::decode("d81e820105").unwrap();
        let rational: RationalNumber = minicbor::decode(&bytes).unwrap();

        assert_eq!(rational.numerator, 1);
        assert_eq!(rational.denominator, 5);

        let encoded = minicbor::to_vec(&rational).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn rational_number_rejects_wrong_tag() {
        let bytes = hex::decode("d81f820105").unwrap();
        let rational: Result<RationalNumber, _> = minicbor::decode(&bytes);

        assert!(rational.is_err());
    }

    #[test]
    fn stake_credential_roundtrip() {
        let bytes =
            hex::decode("8200581c276fd18711931e2c0e21430192dbeac0e458093cd9d1fcd7210f64b3")
                .unwrap();

        let credential: StakeCredential = minicbor::decode(&bytes).unwrap();
        assert!(matches!(credential, StakeCredential::AddrKeyhash(_)));

        let encoded = minicbor::to_vec(&credential).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn metadatum_nested_map_roundtrip() {
        // {674: {"msg": ["hello"]}}
        let bytes = hex::decode("a11902a2a1636d7367816568656c6c6f").unwrap();

        let metadata: Metadata = minicbor::decode(&bytes).unwrap();
        let encoded = minicbor::to_vec(&metadata).unwrap();

        assert_eq!(encoded, bytes);
    }
}
