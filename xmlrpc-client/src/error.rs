//! Error types for the XML-RPC client
//!
//! The taxonomy is closed: every failure in the request/response pipeline
//! is re-classified at the component boundary into exactly one
//! [`ClientError`] variant before it reaches the caller. Nothing is
//! retried internally; the caller decides retry policy.

use thiserror::Error;
use xmlrpc_codec::DecodeError;

/// Failure raised by the transport capability
///
/// Wraps whatever the underlying HTTP stack reports. The message is always
/// present; the source is kept when the stack provides a typed cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// A transport failure with no typed underlying cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// A transport failure wrapping the cause reported by the HTTP stack
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced while turning a response body into a typed value
#[derive(Debug, Error)]
pub enum ResponseParsingError {
    /// The body is not valid XML, or does not match the methodResponse grammar
    #[error("malformed XML-RPC response")]
    MalformedResponse,

    /// The grammar was respected but the value could not be decoded as the requested type
    #[error("failed to decode response value: {0}")]
    Decoding(#[from] DecodeError),

    /// The server explicitly reported an XML-RPC fault
    #[error("server fault {code}: {message}")]
    Fault { code: i32, message: String },
}

/// Classified outcome of one failed XML-RPC exchange
///
/// This is the only error surface exposed to callers. Callers can match on
/// [`ResponseParsingError::Fault`] through the `ResponseParsing` variant to
/// branch on fault codes.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The body was present but did not yield a value of the requested type
    #[error("response parsing failed: {0}")]
    ResponseParsing(#[from] ResponseParsingError),

    /// HTTP 200 arrived with no body to parse
    #[error("server returned 200 with an empty body")]
    NoData,

    /// The server was reached but answered with a non-200 status
    ///
    /// The body, if any, is not inspected.
    #[error("server returned HTTP status {0}")]
    HttpNotOk(u16),

    /// No usable HTTP response came back
    ///
    /// Covers unreachable hosts, cancelled transfers, and transport
    /// timeouts. The source is `None` only when the transport could not
    /// name a cause.
    #[error("network transfer failed")]
    Network {
        #[source]
        source: Option<TransportError>,
    },

    /// The coder misbehaved outside its error contract
    ///
    /// Signals a coder implementation defect, not a protocol fault.
    #[error("internal inconsistency in the value coder: {0}")]
    InternalInconsistency(String),
}

/// Convenience alias for results carrying a [`ClientError`]
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let error = ClientError::HttpNotOk(404);
        assert_eq!(error.to_string(), "server returned HTTP status 404");

        let error = ClientError::NoData;
        assert_eq!(error.to_string(), "server returned 200 with an empty body");

        let error = ClientError::ResponseParsing(ResponseParsingError::Fault {
            code: 4,
            message: "Too many parameters.".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "response parsing failed: server fault 4: Too many parameters."
        );
    }

    #[test]
    fn test_network_error_source_chain() {
        use std::error::Error as _;

        let error = ClientError::Network {
            source: Some(TransportError::new("connection refused")),
        };
        let source = error.source().expect("cause should be chained");
        assert_eq!(source.to_string(), "connection refused");

        let error = ClientError::Network { source: None };
        assert!(error.source().is_none());
    }

    #[test]
    fn test_decode_error_wraps_into_parsing_error() {
        let decode_error = DecodeError::WrongType {
            expected: "int",
            found: "string",
        };
        let parsing_error: ResponseParsingError = decode_error.into();
        assert!(matches!(parsing_error, ResponseParsingError::Decoding(_)));
        assert!(parsing_error.to_string().contains("type mismatch"));
    }
}
