use crate::document::Document;
use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display, Formatter};

/// Represents a [Document] field value.
///
/// # Purpose
/// Provides a unified representation for all value types that can be stored
/// in a document: scalars, ordered sequences, nested documents, timestamps,
/// and raw bytes.
///
/// # Characteristics
/// - **Flexible**: any JSON-compatible shape plus timestamps and bytes
/// - **Comparable**: `PartialEq` for filter matching and test assertions
/// - **Serializable**: serde support behind the default `serde` feature
/// - **Default**: defaults to `Null`
///
/// # Usage
/// Create values with the `From` trait or the `doc!` macro:
/// ```text
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let doc = doc! { name: "Alice", age: 42 };
/// ```
///
/// Access values using the `as_*` methods, which return `Option` when the
/// variant matches:
/// ```text
/// if let Some(name) = doc.get("name").and_then(|v| v.as_str().map(String::from)) {
///     println!("name: {}", name);
/// }
/// ```
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 64-bit integer value. All integer inputs widen to
    /// this variant.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents an ordered sequence of values.
    Array(Vec<Value>),
    /// Represents a nested document value.
    Document(Document),
    /// Represents a UTC timestamp value.
    Timestamp(DateTime<Utc>),
    /// Represents binary data. It cannot be used in filter predicates.
    Bytes(Vec<u8>),
}

impl Value {
    /// Checks whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks whether this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `I64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the floating point value if this is an `F64` or an `I64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            Value::I64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the array if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the nested document if this is a `Document`.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a `Timestamp`.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the byte slice if this is `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(a) => f.debug_list().entries(a.iter()).finish(),
            Value::Document(d) => write!(f, "{:?}", d),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F64(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn integer_inputs_widen_to_i64() {
        assert_eq!(Value::from(42i32), Value::I64(42));
        assert_eq!(Value::from(42u32), Value::I64(42));
        assert_eq!(Value::from(42i64), Value::I64(42));
    }

    #[test]
    fn float_inputs_widen_to_f64() {
        assert_eq!(Value::from(1.5f32), Value::F64(1.5));
        assert_eq!(Value::from(1.5f64), Value::F64(1.5));
    }

    #[test]
    fn string_conversions() {
        assert_eq!(Value::from("abc"), Value::String("abc".to_string()));
        assert_eq!(
            Value::from(String::from("abc")),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::I64(7));
    }

    #[test]
    fn accessors_return_matching_variants() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::I64(3).as_i64(), Some(3));
        assert_eq!(Value::F64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::I64(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::Null.is_null());
        assert!(Value::from("x").is_string());
    }

    #[test]
    fn accessors_reject_mismatched_variants() {
        assert_eq!(Value::from("x").as_bool(), None);
        assert_eq!(Value::Bool(true).as_i64(), None);
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::I64(1).as_array(), None);
    }

    #[test]
    fn timestamp_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = Value::from(ts);
        assert_eq!(value.as_timestamp(), Some(ts));
    }

    #[test]
    fn debug_formats_scalars() {
        assert_eq!(format!("{:?}", Value::Null), "null");
        assert_eq!(format!("{:?}", Value::I64(42)), "42");
        assert_eq!(format!("{:?}", Value::from("a")), "\"a\"");
        assert_eq!(format!("{:?}", Value::Bytes(vec![1, 2])), "<2 bytes>");
    }
}
