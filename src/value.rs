//! The setting value model: scalars, null, and (possibly nested) groups.
//!
//! [`Properties`] is insertion-ordered so that rendering the same data twice
//! yields identical bytes.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// An insertion-ordered mapping from key to [`Value`].
pub type Properties = IndexMap<String, Value>;

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A named mapping of properties. Lists are stored as groups keyed `"0"`, `"1"`, ...
    Group(Properties),
}

impl Value {
    /// Convert any serializable value, rejecting shapes a setting cannot hold.
    ///
    /// See [`convert`](crate::convert) for what counts as unsupported.
    pub fn from_serialize<T: Serialize + ?Sized>(
        source: &T,
    ) -> Result<Value, crate::ArrayfigError> {
        crate::convert::to_value(source)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }

    pub fn as_group(&self) -> Option<&Properties> {
        match self {
            Value::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Properties> {
        match self {
            Value::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Length of the value's textual form.
    ///
    /// `false` and `null` have an empty textual form, `true` is `"1"`. For a
    /// group this is its entry count.
    pub fn text_len(&self) -> usize {
        match self {
            Value::Null | Value::Bool(false) => 0,
            Value::Bool(true) => 1,
            Value::Integer(i) => i.to_string().len(),
            Value::Float(f) => crate::render::float_literal(*f).len(),
            Value::String(s) => s.len(),
            Value::Group(g) => g.len(),
        }
    }

    /// Short name of the variant, used in listings and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Group(_) => "group",
        }
    }
}

impl fmt::Display for Value {
    /// Human-readable form: strings unquoted, groups as literal arrays.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Group(g) if g.is_empty() => write!(f, "array()"),
            Value::Group(g) => write!(f, "{}", crate::render::render_array(g, 1)),
            other => write!(f, "{}", crate::render::scalar_literal(other)),
        }
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Properties> for Value {
    fn from(v: Properties) -> Self {
        Value::Group(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Group(
            v.into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Group(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// --- Deserialize ---

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, a list, or a mapping of settings")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range for a setting")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut group = Properties::new();
        while let Some(item) = seq.next_element::<Value>()? {
            group.insert(group.len().to_string(), item);
        }
        Ok(Value::Group(group))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut group = Properties::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            group.insert(key, value);
        }
        // TOML datetimes arrive as a single-entry map under a private key.
        if group.len() == 1
            && let Some(Value::String(stamp)) = group.get(TOML_DATETIME_KEY)
        {
            return Ok(Value::String(stamp.clone()));
        }
        Ok(Value::Group(group))
    }
}
