use minicbor::{data::Tag, Decode, Encode};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// IANA tag marking a cbor array as a mathematical set
pub const SET_TAG: u64 = 258;

/// A collection that remembers whether it was encoded as a plain array or
/// as a tag-258 set
///
/// Babbage-era payloads encode set-like fields as plain arrays while Conway
/// payloads wrap them with tag 258. Decoding accepts both forms and keeps
/// track of which one was found, so a re-encode can either reproduce the
/// original framing or switch it deliberately.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "Vec::<T>", into = "Vec::<T>")]
pub enum Set<T>
where
    T: Clone,
{
    Tagged(Vec<T>),
    Untagged(Vec<T>),
}

impl<T> Set<T>
where
    T: Clone,
{
    pub fn to_vec(self) -> Vec<T> {
        self.into()
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Set::Tagged(_))
    }

    /// Re-frames the collection without touching its items
    pub fn with_tag(self, tagged: bool) -> Self {
        let items = self.to_vec();

        if tagged {
            Set::Tagged(items)
        } else {
            Set::Untagged(items)
        }
    }
}

impl<T> From<Set<T>> for Vec<T>
where
    T: Clone,
{
    fn from(other: Set<T>) -> Self {
        match other {
            Set::Tagged(x) => x,
            Set::Untagged(x) => x,
        }
    }
}

impl<T> From<Vec<T>> for Set<T>
where
    T: Clone,
{
    fn from(other: Vec<T>) -> Self {
        Set::Tagged(other)
    }
}

impl<T> Deref for Set<T>
where
    T: Clone,
{
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        match self {
            Set::Tagged(x) => x,
            Set::Untagged(x) => x,
        }
    }
}

impl<'b, C, T> minicbor::decode::Decode<'b, C> for Set<T>
where
    T: Decode<'b, C> + Clone,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        match d.datatype()? {
            minicbor::data::Type::Tag => match d.tag()? {
                Tag::Unassigned(SET_TAG) => Ok(Set::Tagged(d.decode_with(ctx)?)),
                other => Err(minicbor::decode::Error::message(format!(
                    "unrecognised set tag: {other:?}"
                ))),
            },
            _ => Ok(Set::Untagged(d.decode_with(ctx)?)),
        }
    }
}

impl<C, T> minicbor::encode::Encode<C> for Set<T>
where
    T: Encode<C> + Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Set::Tagged(x) => {
                e.tag(Tag::Unassigned(SET_TAG))?;
                e.encode_with(x, ctx)?;
            }
            Set::Untagged(x) => {
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

/// A [Set] that rejects the empty collection while decoding
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptySet<T>(Set<T>)
where
    T: Clone;

impl<T> NonEmptySet<T>
where
    T: Clone,
{
    pub fn to_vec(self) -> Vec<T> {
        self.0.to_vec()
    }

    pub fn is_tagged(&self) -> bool {
        self.0.is_tagged()
    }

    pub fn with_tag(self, tagged: bool) -> Self {
        NonEmptySet(self.0.with_tag(tagged))
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptySet<T>
where
    T: Clone,
{
    type Error = Vec<T>;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(value)
        } else {
            Ok(NonEmptySet(Set::from(value)))
        }
    }
}

impl<T> Deref for NonEmptySet<T>
where
    T: Clone,
{
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl<'b, C, T> minicbor::decode::Decode<'b, C> for NonEmptySet<T>
where
    T: Decode<'b, C> + Clone,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let inner: Set<T> = d.decode_with(ctx)?;

        if inner.is_empty() {
            return Err(minicbor::decode::Error::message(
                "decoding empty set as NonEmptySet",
            ));
        }

        Ok(NonEmptySet(inner))
    }
}

impl<C, T> minicbor::encode::Encode<C> for NonEmptySet<T>
where
    T: Encode<C> + Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        self.0.encode(e, ctx)
    }
}

/// Custom collection to ensure ordered pairs of values
///
/// Entries are kept in the order they appeared on the wire (as opposed to a
/// BTreeMap or HashMap) so that re-encoding does not silently reorder a
/// payload that was not canonically sorted to begin with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "Vec::<(K, V)>", into = "Vec::<(K, V)>")]
pub enum KeyValuePairs<K, V>
where
    K: Clone,
    V: Clone,
{
    Def(Vec<(K, V)>),
    Indef(Vec<(K, V)>),
}

impl<K, V> KeyValuePairs<K, V>
where
    K: Clone,
    V: Clone,
{
    pub fn to_vec(self) -> Vec<(K, V)> {
        self.into()
    }
}

impl<K, V> From<KeyValuePairs<K, V>> for Vec<(K, V)>
where
    K: Clone,
    V: Clone,
{
    fn from(other: KeyValuePairs<K, V>) -> Self {
        match other {
            KeyValuePairs::Def(x) => x,
            KeyValuePairs::Indef(x) => x,
        }
    }
}

impl<K, V> From<Vec<(K, V)>> for KeyValuePairs<K, V>
where
    K: Clone,
    V: Clone,
{
    fn from(other: Vec<(K, V)>) -> Self {
        KeyValuePairs::Def(other)
    }
}

impl<K, V> Deref for KeyValuePairs<K, V>
where
    K: Clone,
    V: Clone,
{
    type Target = Vec<(K, V)>;

    fn deref(&self) -> &Self::Target {
        match self {
            KeyValuePairs::Def(x) => x,
            KeyValuePairs::Indef(x) => x,
        }
    }
}

impl<'b, C, K, V> minicbor::decode::Decode<'b, C> for KeyValuePairs<K, V>
where
    K: Encode<C> + Decode<'b, C> + Clone,
    V: Encode<C> + Decode<'b, C> + Clone,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let datatype = d.datatype()?;

        let items: Result<Vec<_>, _> = d.map_iter_with::<C, K, V>(ctx)?.collect();
        let items = items?;

        match datatype {
            minicbor::data::Type::Map => Ok(KeyValuePairs::Def(items)),
            minicbor::data::Type::MapIndef => Ok(KeyValuePairs::Indef(items)),
            _ => Err(minicbor::decode::Error::message(
                "invalid data type for keyvaluepairs",
            )),
        }
    }
}

impl<C, K, V> minicbor::encode::Encode<C> for KeyValuePairs<K, V>
where
    K: Encode<C> + Clone,
    V: Encode<C> + Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            KeyValuePairs::Def(x) => {
                e.map(x.len() as u64)?;

                for (k, v) in x.iter() {
                    k.encode(e, ctx)?;
                    v.encode(e, ctx)?;
                }
            }
            KeyValuePairs::Indef(x) => {
                e.begin_map()?;

                for (k, v) in x.iter() {
                    k.encode(e, ctx)?;
                    v.encode(e, ctx)?;
                }

                e.end()?;
            }
        }

        Ok(())
    }
}

/// A struct that maintains a reference to whether a cbor array was indef or not
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
#[serde(from = "Vec::<A>", into = "Vec::<A>")]
pub enum MaybeIndefArray<A>
where
    A: Clone,
{
    Def(Vec<A>),
    Indef(Vec<A>),
}

impl<A> MaybeIndefArray<A>
where
    A: Clone,
{
    pub fn to_vec(self) -> Vec<A> {
        self.into()
    }
}

impl<A> Deref for MaybeIndefArray<A>
where
    A: Clone,
{
    type Target = Vec<A>;

    fn deref(&self) -> &Self::Target {
        match self {
            MaybeIndefArray::Def(x) => x,
            MaybeIndefArray::Indef(x) => x,
        }
    }
}

impl<A> From<MaybeIndefArray<A>> for Vec<A>
where
    A: Clone,
{
    fn from(other: MaybeIndefArray<A>) -> Self {
        match other {
            MaybeIndefArray::Def(x) => x,
            MaybeIndefArray::Indef(x) => x,
        }
    }
}

impl<A> From<Vec<A>> for MaybeIndefArray<A>
where
    A: Clone,
{
    fn from(other: Vec<A>) -> Self {
        MaybeIndefArray::Def(other)
    }
}

impl<'b, C, A> minicbor::decode::Decode<'b, C> for MaybeIndefArray<A>
where
    A: minicbor::decode::Decode<'b, C> + Clone,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let datatype = d.datatype()?;

        match datatype {
            minicbor::data::Type::Array => Ok(Self::Def(d.decode_with(ctx)?)),
            minicbor::data::Type::ArrayIndef => Ok(Self::Indef(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "unknown data type of maybe indef array",
            )),
        }
    }
}

impl<C, A> minicbor::encode::Encode<C> for MaybeIndefArray<A>
where
    A: minicbor::encode::Encode<C> + Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            MaybeIndefArray::Def(x) => {
                e.encode_with(x, ctx)?;
            }
            MaybeIndefArray::Indef(x) => {
                e.begin_array()?;

                for v in x.iter() {
                    e.encode_with(v, ctx)?;
                }

                e.end()?;
            }
        };

        Ok(())
    }
}

/// Wraps a struct so that it is encoded/decoded as cbor-in-bytes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd)]
#[serde(transparent)]
pub struct CborWrap<T>(pub T);

impl<'b, C, T> minicbor::Decode<'b, C> for CborWrap<T>
where
    T: minicbor::Decode<'b, C>,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.tag()?;
        let cbor = d.bytes()?;
        let wrapped = minicbor::decode_with(cbor, ctx)?;

        Ok(CborWrap(wrapped))
    }
}

impl<C, T> minicbor::Encode<C> for CborWrap<T>
where
    T: minicbor::Encode<C>,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        let buf = minicbor::to_vec_with(&self.0, ctx).map_err(|_| {
            minicbor::encode::Error::message("error encoding cbor-wrapped structure")
        })?;

        e.tag(Tag::Cbor)?;
        e.bytes(&buf)?;

        Ok(())
    }
}

impl<T> Deref for CborWrap<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "Option::<T>", into = "Option::<T>")]
pub enum Nullable<T>
where
    T: std::clone::Clone,
{
    Some(T),
    Null,
    Undefined,
}

impl<T> Nullable<T>
where
    T: std::clone::Clone,
{
    pub fn map<F, O>(self, f: F) -> Nullable<O>
    where
        O: std::clone::Clone,
        F: Fn(T) -> O,
    {
        match self {
            Nullable::Some(x) => Nullable::Some(f(x)),
            Nullable::Null => Nullable::Null,
            Nullable::Undefined => Nullable::Undefined,
        }
    }
}

impl<'b, C, T> minicbor::Decode<'b, C> for Nullable<T>
where
    T: minicbor::Decode<'b, C> + std::clone::Clone,
{
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        match d.datatype()? {
            minicbor::data::Type::Null => {
                d.null()?;
                Ok(Self::Null)
            }
            minicbor::data::Type::Undefined => {
                d.undefined()?;
                Ok(Self::Undefined)
            }
            _ => {
                let x = d.decode_with(ctx)?;
                Ok(Self::Some(x))
            }
        }
    }
}

impl<C, T> minicbor::Encode<C> for Nullable<T>
where
    T: minicbor::Encode<C> + std::clone::Clone,
{
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Nullable::Some(x) => {
                e.encode_with(x, ctx)?;
                Ok(())
            }
            Nullable::Null => {
                e.null()?;
                Ok(())
            }
            Nullable::Undefined => {
                e.undefined()?;
                Ok(())
            }
        }
    }
}

impl<T> From<Option<T>> for Nullable<T>
where
    T: std::clone::Clone,
{
    fn from(x: Option<T>) -> Self {
        match x {
            Some(x) => Nullable::Some(x),
            None => Nullable::Null,
        }
    }
}

impl<T> From<Nullable<T>> for Option<T>
where
    T: std::clone::Clone,
{
    fn from(other: Nullable<T>) -> Self {
        match other {
            Nullable::Some(x) => Some(x),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Encode, Decode, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cbor(transparent)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct Bytes(#[n(0)] minicbor::bytes::ByteVec);

impl From<Vec<u8>> for Bytes {
    fn from(xs: Vec<u8>) -> Self {
        Bytes(minicbor::bytes::ByteVec::from(xs))
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(b: Bytes) -> Self {
        b.0.into()
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl TryFrom<String> for Bytes {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let v = hex::decode(value)?;
        Ok(Bytes(minicbor::bytes::ByteVec::from(v)))
    }
}

impl From<Bytes> for String {
    fn from(b: Bytes) -> Self {
        hex::encode(b.deref())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes: Vec<u8> = self.clone().into();

        f.write_str(&hex::encode(bytes))
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Encode, Decode, Debug, PartialEq, Eq, PartialOrd, Ord,
)]
#[cbor(transparent)]
#[serde(into = "i128")]
#[serde(try_from = "i128")]
pub struct Int(#[n(0)] pub minicbor::data::Int);

impl Deref for Int {
    type Target = minicbor::data::Int;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Int> for i128 {
    fn from(value: Int) -> Self {
        i128::from(value.0)
    }
}

impl From<i64> for Int {
    fn from(x: i64) -> Self {
        let inner = minicbor::data::Int::from(x);
        Self(inner)
    }
}

impl TryFrom<i128> for Int {
    type Error = minicbor::data::TryFromIntError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        let inner = minicbor::data::Int::try_from(value)?;
        Ok(Self(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_decode_untagged_array() {
        let bytes = hex::decode("83010203").unwrap();
        let set: Set<u8> = minicbor::decode(&bytes).unwrap();

        assert!(!set.is_tagged());
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn set_decode_tagged_array() {
        let bytes = hex::decode("d9010283010203").unwrap();
        let set: Set<u8> = minicbor::decode(&bytes).unwrap();

        assert!(set.is_tagged());
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn set_decode_indef_array() {
        let bytes = hex::decode("9f010203ff").unwrap();
        let set: Set<u8> = minicbor::decode(&bytes).unwrap();

        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn set_reject_unknown_tag() {
        let bytes = hex::decode("d9010383010203").unwrap();
        let set: Result<Set<u8>, _> = minicbor::decode(&bytes);

        assert!(set
            .map_err(|e| e.to_string())
            .unwrap_err()
            .contains("unrecognised set tag"));
    }

    #[test]
    fn set_retag_changes_framing() {
        let bytes = hex::decode("83010203").unwrap();
        let set: Set<u8> = minicbor::decode(&bytes).unwrap();

        let tagged = minicbor::to_vec(set.with_tag(true)).unwrap();
        assert_eq!(hex::encode(tagged), "d9010283010203");
    }

    #[test]
    fn nonempty_set_reject_empty() {
        let bytes = hex::decode("80").unwrap();
        let set: Result<NonEmptySet<u8>, _> = minicbor::decode(&bytes);

        assert_eq!(
            set.map_err(|e| e.to_string()),
            Err("decode error: decoding empty set as NonEmptySet".to_owned())
        );

        let bytes = hex::decode("d9010280").unwrap();
        let set: Result<NonEmptySet<u8>, _> = minicbor::decode(&bytes);

        assert!(set.is_err());
    }

    #[test]
    fn keyvaluepairs_keep_indef_framing() {
        let bytes = hex::decode("bf01020304ff").unwrap();
        let kvp: KeyValuePairs<u8, u8> = minicbor::decode(&bytes).unwrap();

        assert!(matches!(kvp, KeyValuePairs::Indef(_)));

        let bytes2 = minicbor::to_vec(&kvp).unwrap();
        assert_eq!(hex::encode(bytes2), "bf01020304ff");
    }

    #[test]
    fn maybe_indef_array_roundtrip() {
        for original in ["83010203", "9f010203ff"] {
            let bytes = hex::decode(original).unwrap();
            let xs: MaybeIndefArray<u8> = minicbor::decode(&bytes).unwrap();
            let bytes2 = minicbor::to_vec(&xs).unwrap();

            assert_eq!(hex::encode(bytes2), original);
        }
    }
}
