//! Custom serde Serializer that turns any `Serialize` value into a [`Value`].
//!
//! This is the gate between arbitrary host data and the store. Anything a
//! settings file cannot represent is rejected here with
//! [`ArrayfigError::UnsupportedValueType`] instead of being stringified:
//!
//! - byte strings
//! - enum variants carrying data (newtype, tuple and struct variants)
//! - integers outside the `i64` range
//! - map keys that are neither strings nor integers
//!
//! Structs and maps become groups, sequences and tuples become index-keyed
//! groups, `None` and `()` become [`Value::Null`], unit variants become their
//! name.

use serde::ser::{self, Impossible, Serialize};

use crate::error::ArrayfigError;
use crate::value::{Properties, Value};

/// Convert a `Serialize` value into a [`Value`].
pub fn to_value<T: Serialize + ?Sized>(source: &T) -> Result<Value, ArrayfigError> {
    source
        .serialize(ValueSerializer)
        .map_err(|e| ArrayfigError::UnsupportedValueType { kind: e.0 })
}

#[derive(Debug)]
pub struct ConvertError(String);

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "convert error: {}", self.0)
    }
}

impl std::error::Error for ConvertError {}

impl ser::Error for ConvertError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConvertError(msg.to_string())
    }
}

fn unsupported(kind: &str) -> ConvertError {
    ConvertError(kind.to_string())
}

#[derive(Clone, Copy)]
struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = ConvertError;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = Impossible<Value, ConvertError>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = Impossible<Value, ConvertError>;

    fn serialize_bool(self, v: bool) -> Result<Value, Self::Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Self::Error> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Self::Error> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| unsupported("unsigned integer above i64::MAX"))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Self::Error> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value, Self::Error> {
        Err(unsupported("byte string"))
    }

    fn serialize_none(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value, Self::Error> {
        Err(unsupported(&format!("enum variant {name}::{variant} with data")))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(SeqSerializer {
            items: Properties::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(unsupported(&format!("enum variant {name}::{variant} with data")))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapSerializer {
            entries: Properties::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(StructSerializer {
            fields: Properties::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(unsupported(&format!("enum variant {name}::{variant} with data")))
    }
}

// --- SerializeSeq / Tuple / TupleStruct ---

struct SeqSerializer {
    items: Properties,
}

impl SeqSerializer {
    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ConvertError> {
        let item = value.serialize(ValueSerializer)?;
        self.items.insert(self.items.len().to_string(), item);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Group(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Group(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Group(self.items))
    }
}

// --- SerializeMap ---

struct MapSerializer {
    entries: Properties,
    next_key: Option<String>,
}

/// Map keys must end up as strings; integers are kept in their decimal form
/// so they render as bare numeric keys.
fn key_string(key: Value) -> Result<String, ConvertError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Integer(i) => Ok(i.to_string()),
        other => Err(unsupported(&format!("map key of type {}", other.kind()))),
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        self.next_key = Some(key_string(key.serialize(ValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| ConvertError("map value without a key".into()))?;
        self.entries.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Group(self.entries))
    }
}

// --- SerializeStruct ---

struct StructSerializer {
    fields: Properties,
}

impl ser::SerializeStruct for StructSerializer {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.fields
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Group(self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Region, SiteSettings};
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[test]
    fn struct_becomes_group_in_field_order() {
        let value = to_value(&Region {
            timezone: "+10:00".into(),
            country: Some("AU".into()),
        })
        .unwrap();
        let g = value.as_group().unwrap();
        assert_eq!(g.keys().collect::<Vec<_>>(), vec!["timezone", "country"]);
        assert_eq!(g["country"].as_str(), Some("AU"));
    }

    #[test]
    fn nested_struct_becomes_nested_group() {
        let value = to_value(&SiteSettings::sample()).unwrap();
        let g = value.as_group().unwrap();
        let region = g["region"].as_group().unwrap();
        assert_eq!(region["timezone"].as_str(), Some("+10:00"));
        assert_eq!(region["country"], Value::Null);
    }

    #[test]
    fn sequence_becomes_index_keyed_group() {
        let value = to_value(&vec![10, 20, 30]).unwrap();
        let g = value.as_group().unwrap();
        assert_eq!(g.keys().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert_eq!(g["2"].as_integer(), Some(30));
    }

    #[test]
    fn integer_map_keys_are_stringified() {
        let mut m = BTreeMap::new();
        m.insert(7, "seven");
        let value = to_value(&m).unwrap();
        assert_eq!(value.as_group().unwrap()["7"].as_str(), Some("seven"));
    }

    #[test]
    fn bool_map_keys_are_rejected() {
        let mut m = BTreeMap::new();
        m.insert(true, 1);
        let err = to_value(&m).unwrap_err();
        assert!(matches!(err, ArrayfigError::UnsupportedValueType { .. }));
    }

    #[test]
    fn bytes_are_rejected() {
        struct Raw;
        impl Serialize for Raw {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_bytes(&[0xde, 0xad])
            }
        }
        let err = to_value(&Raw).unwrap_err();
        match err {
            ArrayfigError::UnsupportedValueType { kind } => assert_eq!(kind, "byte string"),
            other => panic!("Expected UnsupportedValueType, got {other:?}"),
        }
    }

    #[test]
    fn data_carrying_variants_are_rejected() {
        #[derive(Serialize)]
        enum Shape {
            Circle(f64),
        }
        let err = to_value(&Shape::Circle(1.0)).unwrap_err();
        assert!(err.to_string().contains("Shape::Circle"));
    }

    #[test]
    fn unit_variants_become_names() {
        #[derive(Serialize)]
        #[serde(rename_all = "lowercase")]
        enum Mode {
            Fast,
        }
        assert_eq!(to_value(&Mode::Fast).unwrap(), Value::from("fast"));
    }

    #[test]
    fn oversized_unsigned_is_rejected() {
        assert!(to_value(&u64::MAX).is_err());
        assert_eq!(to_value(&42u64).unwrap(), Value::Integer(42));
    }
}
