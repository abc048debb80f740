use sanitizer_codec::minicbor::data::{Tag, Type};
use sanitizer_codec::minicbor::{self, Decode, Decoder, Encode, Encoder};
use sanitizer_codec::utils::{Int, KeyValuePairs, MaybeIndefArray};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/*
plutus_data =
    constr<plutus_data>
  / {* plutus_data => plutus_data}
  / [* plutus_data]
  / big_int
  / bounded_bytes
 */

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum PlutusData {
    Constr(Constr<PlutusData>),
    Map(KeyValuePairs<PlutusData, PlutusData>),
    BigInt(BigInt),
    BoundedBytes(BoundedBytes),
    Array(MaybeIndefArray<PlutusData>),
}

impl<'b, C> Decode<'b, C> for PlutusData {
    fn decode(d: &mut Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        match d.datatype()? {
            Type::Tag => match d.probe().tag()? {
                Tag::PosBignum | Tag::NegBignum => Ok(Self::BigInt(d.decode_with(ctx)?)),
                Tag::Unassigned(tag) if is_constr_tag(tag) => {
                    Ok(Self::Constr(d.decode_with(ctx)?))
                }
                _ => Err(minicbor::decode::Error::message(
                    "unknown tag for plutus data",
                )),
            },
            Type::Map | Type::MapIndef => Ok(Self::Map(d.decode_with(ctx)?)),
            Type::Array | Type::ArrayIndef => Ok(Self::Array(d.decode_with(ctx)?)),
            // chunked bytestrings coalesce into a single buffer on decode
            Type::Bytes | Type::BytesIndef => Ok(Self::BoundedBytes(d.decode_with(ctx)?)),
            Type::U8
            | Type::U16
            | Type::U32
            | Type::U64
            | Type::I8
            | Type::I16
            | Type::I32
            | Type::I64
            | Type::Int => Ok(Self::BigInt(d.decode_with(ctx)?)),
            any => Err(minicbor::decode::Error::message(format!(
                "bad cbor data type ({any:?}) for plutus data"
            ))),
        }
    }
}

impl<C> Encode<C> for PlutusData {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Self::Constr(x) => e.encode_with(x, ctx)?,
            Self::Map(x) => e.encode_with(x, ctx)?,
            Self::BigInt(x) => e.encode_with(x, ctx)?,
            Self::BoundedBytes(x) => e.encode_with(x, ctx)?,
            Self::Array(x) => e.encode_with(x, ctx)?,
        };

        Ok(())
    }
}

/*
big_int = int / big_uint / big_nint
big_uint = #6.2(bounded_bytes)
big_nint = #6.3(bounded_bytes)
 */

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum BigInt {
    Int(Int),
    BigUInt(BoundedBytes),
    BigNInt(BoundedBytes),
}

impl<'b, C> Decode<'b, C> for BigInt {
    fn decode(d: &mut Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        if d.datatype()? == Type::Tag {
            return match d.tag()? {
                Tag::PosBignum => Ok(Self::BigUInt(d.decode_with(ctx)?)),
                Tag::NegBignum => Ok(Self::BigNInt(d.decode_with(ctx)?)),
                _ => Err(minicbor::decode::Error::message(
                    "invalid cbor tag for big int",
                )),
            };
        }

        // anything that is not a bignum tag must be an inline int
        Ok(Self::Int(d.decode_with(ctx)?))
    }
}

impl<C> Encode<C> for BigInt {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Self::Int(x) => {
                e.encode_with(x, ctx)?;
            }
            Self::BigUInt(x) => {
                e.tag(Tag::PosBignum)?;
                e.encode_with(x, ctx)?;
            }
            Self::BigNInt(x) => {
                e.tag(Tag::NegBignum)?;
                e.encode_with(x, ctx)?;
            }
        };

        Ok(())
    }
}

/// Tag ranges carrying a constructor alternative directly; anything outside
/// them goes through tag 102 with an explicit constructor index.
fn is_constr_tag(tag: u64) -> bool {
    matches!(tag, (121..=127) | (1280..=1400) | 102)
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct Constr<A: Clone> {
    pub tag: u64,
    pub any_constructor: Option<u64>,
    pub fields: MaybeIndefArray<A>,
}

impl<'b, C, A> Decode<'b, C> for Constr<A>
where
    A: Decode<'b, C> + Clone,
{
    fn decode(d: &mut Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        match d.tag()? {
            Tag::Unassigned(102) => {
                d.array()?;

                Ok(Constr {
                    tag: 102,
                    any_constructor: Some(d.u64()?),
                    fields: d.decode_with(ctx)?,
                })
            }
            Tag::Unassigned(tag @ ((121..=127) | (1280..=1400))) => Ok(Constr {
                tag,
                any_constructor: None,
                fields: d.decode_with(ctx)?,
            }),
            _ => Err(minicbor::decode::Error::message(
                "bad tag code for plutus constr",
            )),
        }
    }
}

impl<C, A> Encode<C> for Constr<A>
where
    A: Encode<C> + Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.tag(Tag::Unassigned(self.tag))?;

        if self.tag == 102 {
            e.array(2)?;
            e.u64(self.any_constructor.unwrap_or_default())?;
        }

        e.encode_with(&self.fields, ctx)?;

        Ok(())
    }
}

/// Plutus bytestring. Buffers longer than 64 bytes re-encode as indefinite
/// sequences of 64-byte chunks, matching what the on-chain hashing expects.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct BoundedBytes(Vec<u8>);

const BYTES_CHUNK_LEN: usize = 64;

impl From<Vec<u8>> for BoundedBytes {
    fn from(xs: Vec<u8>) -> Self {
        BoundedBytes(xs)
    }
}

impl From<BoundedBytes> for Vec<u8> {
    fn from(b: BoundedBytes) -> Self {
        b.0
    }
}

impl Deref for BoundedBytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for BoundedBytes {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(BoundedBytes(hex::decode(value)?))
    }
}

impl From<BoundedBytes> for String {
    fn from(b: BoundedBytes) -> Self {
        hex::encode(&b.0)
    }
}

impl fmt::Display for BoundedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl<C> Encode<C> for BoundedBytes {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        if self.0.len() <= BYTES_CHUNK_LEN {
            e.bytes(&self.0)?;
        } else {
            e.begin_bytes()?;
            for chunk in self.0.chunks(BYTES_CHUNK_LEN) {
                e.bytes(chunk)?;
            }
            e.end()?;
        }

        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for BoundedBytes {
    fn decode(d: &mut Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let mut bytes = Vec::new();

        for chunk in d.bytes_iter()? {
            bytes.extend_from_slice(chunk?);
        }

        Ok(BoundedBytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unit_constr_roundtrip() {
        // constr 0 with no fields, the plutus unit value
        let bytes = hex::decode("d87980").unwrap();
        let data: PlutusData = minicbor::decode(&bytes).unwrap();

        assert!(matches!(data, PlutusData::Constr(Constr { tag: 121, .. })));

        let encoded = minicbor::to_vec(&data).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn any_constructor_roundtrip() {
        // 102([15, []])
        let bytes = hex::decode("d866820f80").unwrap();
        let data: PlutusData = minicbor::decode(&bytes).unwrap();

        let PlutusData::Constr(constr) = &data else {
            panic!("expected a constr");
        };
        assert_eq!(constr.any_constructor, Some(15));

        let encoded = minicbor::to_vec(&data).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn bignum_roundtrip() {
        // 2(h'010000000000000000'), 2^64 as a positive bignum
        let bytes = hex::decode("c249010000000000000000").unwrap();
        let data: PlutusData = minicbor::decode(&bytes).unwrap();

        assert!(matches!(data, PlutusData::BigInt(BigInt::BigUInt(_))));

        let encoded = minicbor::to_vec(&data).unwrap();
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn long_bytestring_chunked_on_encode() {
        let data = PlutusData::BoundedBytes(BoundedBytes::from(vec![0xab; 100]));
        let bytes = minicbor::to_vec(&data).unwrap();

        // indefinite bytestring of a 64-byte chunk and a 36-byte chunk
        assert_eq!(bytes[0], 0x5f);
        assert_eq!(*bytes.last().unwrap(), 0xff);

        let back: PlutusData = minicbor::decode(&bytes).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn chunked_bytestring_coalesces_on_decode() {
        // (_ h'abab', h'ab')
        let bytes = hex::decode("5f42abab41abff").unwrap();
        let data: PlutusData = minicbor::decode(&bytes).unwrap();

        assert_eq!(data, PlutusData::BoundedBytes(vec![0xab; 3].into()));

        // short buffers re-encode as a single definite bytestring
        assert_eq!(minicbor::to_vec(&data).unwrap(), hex::decode("43ababab").unwrap());
    }

    fn any_plutus_data() -> impl Strategy<Value = PlutusData> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(|n| PlutusData::BigInt(BigInt::Int(n.into()))),
            proptest::collection::vec(any::<u8>(), 0..80)
                .prop_map(|bs| PlutusData::BigInt(BigInt::BigUInt(bs.into()))),
            proptest::collection::vec(any::<u8>(), 0..80)
                .prop_map(|bs| PlutusData::BoundedBytes(bs.into())),
        ];

        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                (121u64..=127, proptest::collection::vec(inner.clone(), 0..4)).prop_map(
                    |(tag, fields)| {
                        PlutusData::Constr(Constr {
                            tag,
                            any_constructor: None,
                            fields: MaybeIndefArray::Def(fields),
                        })
                    }
                ),
                proptest::collection::vec(inner.clone(), 0..4)
                    .prop_map(|xs| PlutusData::Array(MaybeIndefArray::Indef(xs))),
                proptest::collection::vec((inner.clone(), inner), 0..4)
                    .prop_map(|kvs| PlutusData::Map(KeyValuePairs::Def(kvs))),
            ]
        })
    }

    proptest! {
        #[test]
        fn plutus_data_survives_reencoding(data in any_plutus_data()) {
            let bytes = minicbor::to_vec(&data).unwrap();
            let back: PlutusData = minicbor::decode(&bytes).unwrap();
            prop_assert_eq!(back, data);
        }
    }
}
