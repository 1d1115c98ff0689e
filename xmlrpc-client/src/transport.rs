//! The HTTP capability the client runs on
//!
//! The client never talks to an HTTP stack directly; it consumes the
//! [`Transport`] trait and classifies whatever comes back. The default
//! implementation runs on reqwest. Timeouts and cancellation live entirely
//! in the transport and surface to the client as [`TransportError`]s.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;

/// Content type of every XML-RPC request body
pub const CONTENT_TYPE_XML: &str = "text/xml";

/// One HTTP response as seen by the client
///
/// `body` is `None` when the server sent no body at all; a zero-length
/// body is reported the same way.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Option<Vec<u8>>,
}

/// A single HTTP POST exchange
///
/// Exactly one request maps to exactly one reply or one error; the
/// transport must not retry. Implementations must be safe for concurrent
/// use, the client shares one instance across calls.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<HttpReply, TransportError>;
}

/// Default transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default connect/read timeouts
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Create a transport over a caller-configured reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::with_source(format!("failed to reach {}", url), e))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::with_source("failed to read response body", e))?;

        let body = if bytes.is_empty() {
            None
        } else {
            Some(bytes.to_vec())
        };

        Ok(HttpReply { status, body })
    }
}
