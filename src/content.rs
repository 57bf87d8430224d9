//! Lossless, type-aware capture of a value's serde representation.
//!
//! Unlike a JSON tree, [`Content`] keeps the serde data model intact: structs
//! stay distinct from maps and enum variants, floats keep every bit (including
//! `NaN` and infinities), and integers keep their width.

use std::fmt;

use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Content {
    Bool(bool),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    None,
    Some(Box<Content>),
    Unit,
    NewtypeStruct(Box<Content>),
    Seq(Vec<Content>),
    Map(Vec<(Content, Content)>),
    Struct(Vec<(&'static str, Content)>),
    UnitVariant(&'static str),
    NewtypeVariant(&'static str, Box<Content>),
    TupleVariant(&'static str, Vec<Content>),
    StructVariant(&'static str, Vec<(&'static str, Content)>),
}

/// Failure raised while capturing or rebuilding a value.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
#[error("{0}")]
pub struct ValueError(String);

impl ser::Error for ValueError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

impl serde::de::Error for ValueError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

impl Content {
    pub(crate) fn capture<T: Serialize + ?Sized>(value: &T) -> Result<Self, ValueError> {
        value.serialize(ContentSerializer)
    }
}

struct ContentSerializer;

pub(crate) struct SeqSerializer {
    items: Vec<Content>,
}

pub(crate) struct TupleVariantSerializer {
    variant: &'static str,
    items: Vec<Content>,
}

pub(crate) struct MapSerializer {
    entries: Vec<(Content, Content)>,
    key: Option<Content>,
}

pub(crate) struct StructSerializer {
    fields: Vec<(&'static str, Content)>,
}

pub(crate) struct StructVariantSerializer {
    variant: &'static str,
    fields: Vec<(&'static str, Content)>,
}

impl Serializer for ContentSerializer {
    type Ok = Content;
    type Error = ValueError;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = TupleVariantSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn serialize_bool(self, v: bool) -> Result<Content, ValueError> {
        Ok(Content::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Content, ValueError> {
        Ok(Content::I64(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Content, ValueError> {
        Ok(Content::I64(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Content, ValueError> {
        Ok(Content::I64(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Content, ValueError> {
        Ok(Content::I64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Content, ValueError> {
        Ok(Content::I128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Content, ValueError> {
        Ok(Content::U64(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Content, ValueError> {
        Ok(Content::U64(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Content, ValueError> {
        Ok(Content::U64(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Content, ValueError> {
        Ok(Content::U64(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Content, ValueError> {
        Ok(Content::U128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Content, ValueError> {
        Ok(Content::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Content, ValueError> {
        Ok(Content::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Content, ValueError> {
        Ok(Content::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Content, ValueError> {
        Ok(Content::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Content, ValueError> {
        Ok(Content::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Content, ValueError> {
        Ok(Content::None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Content, ValueError> {
        Ok(Content::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<Content, ValueError> {
        Ok(Content::Unit)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Content, ValueError> {
        Ok(Content::Unit)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Content, ValueError> {
        Ok(Content::UnitVariant(variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Content, ValueError> {
        Ok(Content::NewtypeStruct(Box::new(value.serialize(self)?)))
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Content, ValueError> {
        Ok(Content::NewtypeVariant(
            variant,
            Box::new(value.serialize(self)?),
        ))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer, ValueError> {
        Ok(SeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer, ValueError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqSerializer, ValueError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantSerializer, ValueError> {
        Ok(TupleVariantSerializer {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapSerializer, ValueError> {
        Ok(MapSerializer {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<StructSerializer, ValueError> {
        Ok(StructSerializer {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantSerializer, ValueError> {
        Ok(StructVariantSerializer {
            variant,
            fields: Vec::with_capacity(len),
        })
    }
}

impl SerializeSeq for SeqSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ValueError> {
        self.items.push(Content::capture(value)?);
        Ok(())
    }

    fn end(self) -> Result<Content, ValueError> {
        Ok(Content::Seq(self.items))
    }
}

impl SerializeTuple for SeqSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ValueError> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Content, ValueError> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for SeqSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ValueError> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Content, ValueError> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleVariant for TupleVariantSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ValueError> {
        self.items.push(Content::capture(value)?);
        Ok(())
    }

    fn end(self) -> Result<Content, ValueError> {
        Ok(Content::TupleVariant(self.variant, self.items))
    }
}

impl SerializeMap for MapSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ValueError> {
        self.key = Some(Content::capture(key)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ValueError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| <ValueError as ser::Error>::custom("map value without a key"))?;
        self.entries.push((key, Content::capture(value)?));
        Ok(())
    }

    fn end(self) -> Result<Content, ValueError> {
        Ok(Content::Map(self.entries))
    }
}

impl SerializeStruct for StructSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ValueError> {
        self.fields.push((key, Content::capture(value)?));
        Ok(())
    }

    fn end(self) -> Result<Content, ValueError> {
        Ok(Content::Struct(self.fields))
    }
}

impl SerializeStructVariant for StructVariantSerializer {
    type Ok = Content;
    type Error = ValueError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ValueError> {
        self.fields.push((key, Content::capture(value)?));
        Ok(())
    }

    fn end(self) -> Result<Content, ValueError> {
        Ok(Content::StructVariant(self.variant, self.fields))
    }
}
