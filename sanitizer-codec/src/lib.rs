/// Shared re-export of minicbor across the workspace
pub use minicbor;

/// Round-trip friendly common helper structs
pub mod utils;

pub trait Fragment: Sized + for<'b> minicbor::Decode<'b, ()> + minicbor::Encode<()> {}

impl<T> Fragment for T where T: for<'b> minicbor::Decode<'b, ()> + minicbor::Encode<()> + Sized {}

/// Derives a codec for an enum where the variant is discriminated by the
/// datatype of the next cbor token instead of an explicit wrapper.
///
/// Each arm maps a set of cbor datatypes to a single-field variant. The
/// optional trailing group handles the common `[coin, multiasset]` pattern
/// where an array datatype selects a multi-field variant encoded as a
/// 2-element array.
#[macro_export]
macro_rules! codec_by_datatype {
    (
        $enum_name:ident,
        $( $( $cbortype:ident )|* => $one_f:ident ),*,
        ($( $( $vars:ident ),+ => $many_f:ident )?)
    ) => {
        impl<'__b, C> minicbor::decode::Decode<'__b, C> for $enum_name {
            fn decode(d: &mut minicbor::Decoder<'__b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
                match d.datatype()? {
                    $( minicbor::data::Type::Array => {
                        d.array()?;
                        Ok($enum_name::$many_f($({ let $vars = d.decode_with(ctx)?; $vars }, )+ ))
                    }, )?
                    $( $( minicbor::data::Type::$cbortype )|* => Ok($enum_name::$one_f(d.decode_with(ctx)?)), )*
                    _ => Err(minicbor::decode::Error::message(
                            "unknown cbor data type for this macro-defined enum")
                    ),
                }
            }
        }

        impl<C> minicbor::encode::Encode<C> for $enum_name {
            fn encode<W: minicbor::encode::Write>(
                &self,
                e: &mut minicbor::Encoder<W>,
                ctx: &mut C,
            ) -> Result<(), minicbor::encode::Error<W::Error>> {
                match self {
                    $( $enum_name::$many_f ($( $vars ),+) => {
                        e.array(2)?;
                        $( e.encode_with($vars, ctx)?; )+
                    }, )?
                    $( $enum_name::$one_f(__x) => {
                        e.encode_with(__x, ctx)?;
                    } )*
                };

                Ok(())
            }
        }
    }
}
