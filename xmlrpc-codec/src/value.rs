//! The XML-RPC data model

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// A single XML-RPC value
///
/// Covers every type the protocol defines: four-byte integers, booleans,
/// strings, doubles, `dateTime.iso8601` timestamps, base64 binary blobs,
/// arrays, and structs, plus the widely supported `<i8>` extension for
/// eight-byte integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<i4>` / `<int>`
    Int(i32),
    /// `<i8>` (extension)
    Long(i64),
    /// `<boolean>`, serialized as `1` or `0`
    Bool(bool),
    /// `<string>`, or an untyped `<value>` text node
    String(String),
    /// `<double>`
    Double(f64),
    /// `<dateTime.iso8601>`
    DateTime(NaiveDateTime),
    /// `<base64>`
    Base64(Vec<u8>),
    /// `<array><data>...`
    Array(Vec<Value>),
    /// `<struct><member>...`
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the value's type, used in decode mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Long(_) => "i8",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Base64(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Struct(v)
    }
}

/// Binary payload carried as `<base64>`
///
/// A newtype rather than a bare `Vec<u8>` so that byte blobs and arrays of
/// values stay distinct in the [`Encode`](crate::Encode) and
/// [`Decode`](crate::Decode) impls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Base64(v.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(41), Value::Int(41));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(
            Value::from("South Dakota"),
            Value::String("South Dakota".to_string())
        );
        assert_eq!(Value::from(2.5), Value::Double(2.5));
        assert_eq!(
            Value::from(Bytes(vec![1, 2, 3])),
            Value::Base64(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(0).type_name(), "int");
        assert_eq!(Value::Struct(BTreeMap::new()).type_name(), "struct");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
    }
}
