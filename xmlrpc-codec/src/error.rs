//! Error types for the XML-RPC value codec

use thiserror::Error;

/// Errors that can occur while encoding a value into the `<value>` grammar
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value has no representation in XML-RPC
    ///
    /// The only standard scalar without a total encoding is the double:
    /// XML-RPC has no spelling for NaN or the infinities.
    #[error("value cannot be represented in XML-RPC: {0}")]
    Unrepresentable(String),
}

/// Errors that can occur while decoding a `<value>` element or converting
/// a decoded [`Value`](crate::Value) into a native type
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The type element inside `<value>` is not part of the grammar
    #[error("unknown XML-RPC value type: <{0}>")]
    UnknownType(String),

    /// A scalar payload could not be parsed as its declared type
    #[error("invalid {kind} payload: {text:?}")]
    InvalidScalar { kind: &'static str, text: String },

    /// The `<value>` node itself does not match the grammar
    #[error("malformed <value> node: {0}")]
    MalformedValue(String),

    /// The decoded value is not of the type the caller requested
    #[error("type mismatch: expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// A struct value is missing a member the target type requires
    #[error("missing struct member: {0}")]
    MissingMember(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let error = DecodeError::UnknownType("float".to_string());
        assert_eq!(error.to_string(), "unknown XML-RPC value type: <float>");

        let error = DecodeError::InvalidScalar {
            kind: "int",
            text: "forty one".to_string(),
        };
        assert_eq!(error.to_string(), "invalid int payload: \"forty one\"");

        let error = DecodeError::WrongType {
            expected: "string",
            found: "int",
        };
        assert_eq!(error.to_string(), "type mismatch: expected string, found int");

        let error = DecodeError::MissingMember("faultCode".to_string());
        assert_eq!(error.to_string(), "missing struct member: faultCode");
    }

    #[test]
    fn test_encode_error_display() {
        let error = EncodeError::Unrepresentable("non-finite double NaN".to_string());
        assert!(error.to_string().contains("non-finite double"));
    }
}
