//! Static shape inspection of a deserializable type.
//!
//! [`Inspect`] answers the first request a type's `Deserialize` impl makes and
//! stops right there, so the shape is known without building a value. Boxes,
//! newtype structs and one level of `Option` are looked through.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use thiserror::Error as ThisError;

use crate::error::Kind;

/// Returns `None` when `T` is a record (a struct, possibly behind one `Option`
/// or `Box`), otherwise the kind it turned out to be.
pub(crate) fn non_record_kind<T: DeserializeOwned>() -> Option<Kind> {
    match T::deserialize(Inspect { optional: false }) {
        Err(Found::Record) => None,
        Err(Found::Other(kind)) => Some(kind),
        // the type never asked for anything or failed on its own
        Ok(_) | Err(Found::Custom(_)) => Some(Kind::Any),
    }
}

#[derive(Debug, ThisError)]
enum Found {
    #[error("record")]
    Record,
    #[error("{0}")]
    Other(Kind),
    #[error("{0}")]
    Custom(String),
}

impl de::Error for Found {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Found::Custom(msg.to_string())
    }
}

struct Inspect {
    optional: bool,
}

macro_rules! found {
    ($($method:ident => $kind:ident,)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value, Found>
            where
                V: Visitor<'de>,
            {
                Err(Found::Other(Kind::$kind))
            }
        )*
    };
}

impl<'de> Deserializer<'de> for Inspect {
    type Error = Found;

    found! {
        deserialize_any => Any,
        deserialize_ignored_any => Any,
        deserialize_identifier => Any,
        deserialize_bool => Bool,
        deserialize_i8 => Int,
        deserialize_i16 => Int,
        deserialize_i32 => Int,
        deserialize_i64 => Int,
        deserialize_i128 => Int,
        deserialize_u8 => Uint,
        deserialize_u16 => Uint,
        deserialize_u32 => Uint,
        deserialize_u64 => Uint,
        deserialize_u128 => Uint,
        deserialize_f32 => Float,
        deserialize_f64 => Float,
        deserialize_char => Char,
        deserialize_str => String,
        deserialize_string => String,
        deserialize_bytes => Slice,
        deserialize_byte_buf => Slice,
        deserialize_seq => Slice,
        deserialize_map => Map,
        deserialize_unit => Unit,
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        if self.optional {
            return Err(Found::Other(Kind::Option));
        }
        visitor.visit_some(Inspect { optional: true })
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        Err(Found::Other(Kind::Unit))
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        Err(Found::Other(Kind::Slice))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        Err(Found::Other(Kind::Slice))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        Err(Found::Record)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Found>
    where
        V: Visitor<'de>,
    {
        Err(Found::Other(Kind::Enum))
    }
}
