//! Deserializers that rebuild a typed value from its captured [`Content`].
//!
//! [`Projected`] walks the target type together with a selection node. Only
//! struct targets are filtered: each declared field is taken from the source
//! when the node selects it and rebuilt from [`Zero`] otherwise. Every other
//! shape (scalars, sequences, maps, enums) is copied as is. [`Zero`] produces
//! the natural empty value for whatever type asks: `0`, `false`, `""`, `None`,
//! empty collections, structs made of zero fields and the first variant of an
//! enum.

use serde::de::value::StrDeserializer;
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;

use crate::content::{Content, ValueError};
use crate::node::{Node, WILDCARD};

/// Deserializes captured content, keeping only the struct fields `node` selects.
pub(crate) struct Projected<'n> {
    content: Content,
    node: &'n Node,
}

/// Deserializes the zero value of any type.
pub(crate) struct Zero;

impl<'n> Projected<'n> {
    pub(crate) fn new(content: Content, node: &'n Node) -> Self {
        Self { content, node }
    }

    fn copied(content: Content) -> Projected<'static> {
        Projected {
            content,
            node: &WILDCARD,
        }
    }
}

impl<'de, 'n> Deserializer<'de> for Projected<'n> {
    type Error = ValueError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Bool(v) => visitor.visit_bool(v),
            Content::I64(v) => visitor.visit_i64(v),
            Content::U64(v) => visitor.visit_u64(v),
            Content::I128(v) => visitor.visit_i128(v),
            Content::U128(v) => visitor.visit_u128(v),
            Content::F32(v) => visitor.visit_f32(v),
            Content::F64(v) => visitor.visit_f64(v),
            Content::Char(v) => visitor.visit_char(v),
            Content::String(v) => visitor.visit_string(v),
            Content::Bytes(v) => visitor.visit_byte_buf(v),
            Content::None => visitor.visit_none(),
            Content::Some(inner) => visitor.visit_some(Projected::new(*inner, self.node)),
            Content::Unit => visitor.visit_unit(),
            Content::NewtypeStruct(inner) => {
                visitor.visit_newtype_struct(Projected::new(*inner, self.node))
            }
            Content::Seq(items) => visitor.visit_seq(CopiedSeq::new(items)),
            Content::Map(entries) => visitor.visit_map(CopiedMap::new(entries)),
            Content::Struct(fields) => visitor.visit_map(CopiedStruct {
                fields: fields.into_iter(),
                value: None,
            }),
            content @ (Content::UnitVariant(_)
            | Content::NewtypeVariant(..)
            | Content::TupleVariant(..)
            | Content::StructVariant(..)) => visitor.visit_enum(CopiedEnum { content }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::None | Content::Unit => visitor.visit_none(),
            Content::Some(inner) => visitor.visit_some(Projected::new(*inner, self.node)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::NewtypeStruct(inner) => {
                visitor.visit_newtype_struct(Projected::new(*inner, self.node))
            }
            _ => visitor.visit_newtype_struct(self),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Struct(source) => {
                visitor.visit_map(FilledStruct::new(source, fields, self.node))
            }
            _ => self.deserialize_any(visitor),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

/// Walks the declared fields of a struct. A field is taken from the source
/// when `node` selects it and the source carries it, and from [`Zero`] otherwise.
struct FilledStruct<'n> {
    source: Vec<(&'static str, Content)>,
    fields: std::slice::Iter<'static, &'static str>,
    node: &'n Node,
    value: Option<Projected<'n>>,
}

impl<'n> FilledStruct<'n> {
    fn new(
        source: Vec<(&'static str, Content)>,
        fields: &'static [&'static str],
        node: &'n Node,
    ) -> Self {
        Self {
            source,
            fields: fields.iter(),
            node,
            value: None,
        }
    }

    fn zeroed(fields: &'static [&'static str]) -> FilledStruct<'static> {
        FilledStruct::new(Vec::new(), fields, &WILDCARD)
    }

    fn take(&mut self, field: &str) -> Option<Content> {
        let idx = self.source.iter().position(|(name, _)| *name == field)?;
        Some(self.source.swap_remove(idx).1)
    }
}

impl<'de, 'n> MapAccess<'de> for FilledStruct<'n> {
    type Error = ValueError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, ValueError>
    where
        K: DeserializeSeed<'de>,
    {
        let field = match self.fields.next() {
            Some(field) => *field,
            None => return Ok(None),
        };

        let node = self.node;
        self.value = match node.select_field(field) {
            Some(selected) => self
                .take(field)
                .map(|content| Projected::new(content, selected.child)),
            None => None,
        };

        let key: StrDeserializer<'_, ValueError> = field.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, ValueError>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(projected) => seed.deserialize(projected),
            None => seed.deserialize(Zero),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Struct content read by a target that is not a derived struct, such as a
/// map or a flattened field.
struct CopiedStruct {
    fields: std::vec::IntoIter<(&'static str, Content)>,
    value: Option<Content>,
}

impl<'de> MapAccess<'de> for CopiedStruct {
    type Error = ValueError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, ValueError>
    where
        K: DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some((field, value)) => {
                self.value = Some(value);
                let key: StrDeserializer<'_, ValueError> = field.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, ValueError>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Projected::copied(value)),
            None => Err(de::Error::custom("struct value requested before its field")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

struct CopiedSeq {
    items: std::vec::IntoIter<Content>,
}

impl CopiedSeq {
    fn new(items: Vec<Content>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for CopiedSeq {
    type Error = ValueError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, ValueError>
    where
        T: DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => seed.deserialize(Projected::copied(item)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct CopiedMap {
    entries: std::vec::IntoIter<(Content, Content)>,
    value: Option<Content>,
}

impl CopiedMap {
    fn new(entries: Vec<(Content, Content)>) -> Self {
        Self {
            entries: entries.into_iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for CopiedMap {
    type Error = ValueError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, ValueError>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Projected::copied(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, ValueError>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Projected::copied(value)),
            None => Err(de::Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct CopiedEnum {
    content: Content,
}

impl<'de> EnumAccess<'de> for CopiedEnum {
    type Error = ValueError;
    type Variant = Content;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Content), ValueError>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = match &self.content {
            Content::UnitVariant(variant)
            | Content::NewtypeVariant(variant, _)
            | Content::TupleVariant(variant, _)
            | Content::StructVariant(variant, _) => *variant,
            _ => return Err(de::Error::custom("expected an enum variant")),
        };
        let key: StrDeserializer<'_, ValueError> = variant.into_deserializer();
        Ok((seed.deserialize(key)?, self.content))
    }
}

impl<'de> VariantAccess<'de> for Content {
    type Error = ValueError;

    fn unit_variant(self) -> Result<(), ValueError> {
        match self {
            Content::UnitVariant(_) => Ok(()),
            _ => Err(de::Error::custom("expected a unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, ValueError>
    where
        T: DeserializeSeed<'de>,
    {
        match self {
            Content::NewtypeVariant(_, inner) => seed.deserialize(Projected::copied(*inner)),
            _ => Err(de::Error::custom("expected a newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self {
            Content::TupleVariant(_, items) => visitor.visit_seq(CopiedSeq::new(items)),
            _ => Err(de::Error::custom("expected a tuple variant")),
        }
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match self {
            Content::StructVariant(_, source) => {
                visitor.visit_map(FilledStruct::new(source, fields, &WILDCARD))
            }
            _ => Err(de::Error::custom("expected a struct variant")),
        }
    }
}

struct ZeroSeq {
    remaining: usize,
}

impl<'de> SeqAccess<'de> for ZeroSeq {
    type Error = ValueError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, ValueError>
    where
        T: DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(Zero).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

struct ZeroEnum {
    variant: &'static str,
}

impl<'de> EnumAccess<'de> for ZeroEnum {
    type Error = ValueError;
    type Variant = Zero;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Zero), ValueError>
    where
        V: DeserializeSeed<'de>,
    {
        let key: StrDeserializer<'_, ValueError> = self.variant.into_deserializer();
        Ok((seed.deserialize(key)?, Zero))
    }
}

impl<'de> VariantAccess<'de> for Zero {
    type Error = ValueError;

    fn unit_variant(self) -> Result<(), ValueError> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, ValueError>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(Zero)
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(FilledStruct::zeroed(fields))
    }
}

macro_rules! visit_zero {
    ($($method:ident => $visit:ident($zero:expr),)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, ValueError>
            where
                V: Visitor<'de>,
            {
                visitor.$visit($zero)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for Zero {
    type Error = ValueError;

    visit_zero! {
        deserialize_bool => visit_bool(false),
        deserialize_i8 => visit_i8(0),
        deserialize_i16 => visit_i16(0),
        deserialize_i32 => visit_i32(0),
        deserialize_i64 => visit_i64(0),
        deserialize_i128 => visit_i128(0),
        deserialize_u8 => visit_u8(0),
        deserialize_u16 => visit_u16(0),
        deserialize_u32 => visit_u32(0),
        deserialize_u64 => visit_u64(0),
        deserialize_u128 => visit_u128(0),
        deserialize_f32 => visit_f32(0.0),
        deserialize_f64 => visit_f64(0.0),
        deserialize_char => visit_char('\0'),
        deserialize_str => visit_str(""),
        deserialize_string => visit_str(""),
        deserialize_identifier => visit_str(""),
        deserialize_bytes => visit_bytes(&[]),
        deserialize_byte_buf => visit_bytes(&[]),
        deserialize_seq => visit_seq(ZeroSeq { remaining: 0 }),
        deserialize_map => visit_map(FilledStruct::zeroed(&[])),
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_none()
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(FilledStruct::zeroed(fields))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ValueError>
    where
        V: Visitor<'de>,
    {
        match variants.first() {
            Some(&variant) => visitor.visit_enum(ZeroEnum { variant }),
            None => Err(de::Error::custom(format!(
                "enum {name} has no variants to build a zero value from"
            ))),
        }
    }
}
