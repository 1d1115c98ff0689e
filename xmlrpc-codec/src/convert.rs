//! Typed conversions between native Rust types and [`Value`]
//!
//! `Encode` feeds request parameters into the codec; `Decode` is how a
//! caller names the type a response should come back as. Both sides stay
//! in terms of [`Value`], so they compose with any [`Coder`](crate::Coder)
//! implementation.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::DecodeError;
use crate::value::{Bytes, Value};

/// A type that can be turned into an XML-RPC value
pub trait Encode {
    fn to_value(&self) -> Value;
}

/// A type that can be recovered from an XML-RPC value
pub trait Decode: Sized {
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

impl Encode for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Decode for Value {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident, $expected:literal;)*) => {
        $(
            impl Encode for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }

            impl Decode for $ty {
                fn from_value(value: Value) -> Result<Self, DecodeError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(DecodeError::WrongType {
                            expected: $expected,
                            found: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    i32 => Int, "int";
    bool => Bool, "boolean";
    String => String, "string";
    f64 => Double, "double";
    NaiveDateTime => DateTime, "dateTime.iso8601";
}

impl Encode for &str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Encode for i64 {
    fn to_value(&self) -> Value {
        Value::Long(*self)
    }
}

impl Decode for i64 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Long(v) => Ok(v),
            // An i4 always fits
            Value::Int(v) => Ok(v.into()),
            other => Err(DecodeError::WrongType {
                expected: "i8",
                found: other.type_name(),
            }),
        }
    }
}

impl Encode for Bytes {
    fn to_value(&self) -> Value {
        Value::Base64(self.0.clone())
    }
}

impl Decode for Bytes {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Base64(bytes) => Ok(Bytes(bytes)),
            other => Err(DecodeError::WrongType {
                expected: "base64",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Encode::to_value).collect())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(DecodeError::WrongType {
                expected: "array",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Struct(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Struct(members) => members
                .into_iter()
                .map(|(k, v)| Ok((k, T::from_value(v)?)))
                .collect(),
            other => Err(DecodeError::WrongType {
                expected: "struct",
                found: other.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trips() {
        assert_eq!(i32::from_value(41i32.to_value()).unwrap(), 41);
        assert_eq!(bool::from_value(true.to_value()).unwrap(), true);
        assert_eq!(f64::from_value(2.5f64.to_value()).unwrap(), 2.5);
        assert_eq!(
            String::from_value("South Dakota".to_value()).unwrap(),
            "South Dakota"
        );
    }

    #[test]
    fn test_type_mismatch_is_wrong_type() {
        let err = i32::from_value(Value::String("41".to_string())).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::WrongType {
                expected: "int",
                found: "string"
            }
        ));
    }

    #[test]
    fn test_long_widens_from_int() {
        assert_eq!(i64::from_value(Value::Int(41)).unwrap(), 41i64);
        assert_eq!(i64::from_value(Value::Long(1 << 40)).unwrap(), 1i64 << 40);
    }

    #[test]
    fn test_vec_round_trip() {
        let items = vec![1, 2, 3];
        assert_eq!(Vec::<i32>::from_value(items.to_value()).unwrap(), items);
    }

    #[test]
    fn test_vec_inner_mismatch_propagates() {
        let mixed = Value::Array(vec![Value::Int(1), Value::Bool(false)]);
        assert!(Vec::<i32>::from_value(mixed).is_err());
    }

    #[test]
    fn test_struct_round_trip() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        assert_eq!(
            BTreeMap::<String, i32>::from_value(map.to_value()).unwrap(),
            map
        );
    }
}
