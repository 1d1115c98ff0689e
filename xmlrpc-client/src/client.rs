//! The XML-RPC proxy client
//!
//! One call is exactly one request/response exchange: build the
//! `methodCall` document, POST it, classify the HTTP outcome, and hand a
//! 200 body to the response parser. Every failure path lands in exactly
//! one [`ClientError`] variant.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use xmlrpc_codec::{Coder, Decode, StandardCoder, Value};

use crate::error::{ClientError, ResponseParsingError, Result};
use crate::request::RpcRequest;
use crate::response::ResponseParser;
use crate::transport::{HttpReply, HttpTransport, Transport, CONTENT_TYPE_XML};

/// Client for one XML-RPC endpoint
///
/// Holds no per-call mutable state, so a single instance is safe for
/// concurrent reuse across threads and tasks. Cloning is cheap; clones
/// share the transport and coder.
#[derive(Clone)]
pub struct ProxyClient {
    transport: Arc<dyn Transport>,
    endpoint: Url,
    coder: Arc<dyn Coder>,
}

impl ProxyClient {
    /// Create a client with the default transport and the standard codec
    pub fn new(endpoint: Url) -> Self {
        Self::with_parts(
            endpoint,
            Arc::new(HttpTransport::new()),
            Arc::new(StandardCoder::new()),
        )
    }

    /// Create a client with injected transport and coder capabilities
    pub fn with_parts(endpoint: Url, transport: Arc<dyn Transport>, coder: Arc<dyn Coder>) -> Self {
        Self {
            transport,
            endpoint,
            coder,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Execute one XML-RPC call and await the typed outcome
    ///
    /// This is the primary execution shape; the callback shape in
    /// [`execute_with_callback`](Self::execute_with_callback) wraps it.
    /// `None` params omit the `<params>` element, `Some(vec![])` sends an
    /// empty one. No retries are performed on any path.
    pub async fn execute<D: Decode>(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<D> {
        let request = RpcRequest::new(method, params);
        let body = request
            .to_bytes(self.coder.as_ref())
            .map_err(|e| ClientError::InternalInconsistency(e.to_string()))?;

        debug!(method, endpoint = %self.endpoint, "dispatching XML-RPC call");

        let reply = self
            .transport
            .post(&self.endpoint, CONTENT_TYPE_XML, body)
            .await
            .map_err(|e| ClientError::Network { source: Some(e) })?;

        self.classify(method, reply)
    }

    /// Execute one XML-RPC call, delivering the outcome to a completion handler
    ///
    /// Same classification as [`execute`](Self::execute); the call is
    /// spawned on the ambient tokio runtime and the handler runs exactly
    /// once, on whichever worker the transport completes on. Must be
    /// called from within a runtime.
    pub fn execute_with_callback<D, F>(&self, method: &str, params: Option<Vec<Value>>, on_complete: F)
    where
        D: Decode + Send + 'static,
        F: FnOnce(Result<D>) + Send + 'static,
    {
        let client = self.clone();
        let method = method.to_string();
        tokio::spawn(async move {
            on_complete(client.execute(&method, params).await);
        });
    }

    fn classify<D: Decode>(&self, method: &str, reply: HttpReply) -> Result<D> {
        if reply.status != 200 {
            warn!(method, status = reply.status, "XML-RPC call rejected at the HTTP layer");
            return Err(ClientError::HttpNotOk(reply.status));
        }
        let Some(body) = reply.body else {
            return Err(ClientError::NoData);
        };

        let parser = ResponseParser::new(self.coder.as_ref());
        // The coder is caller-supplied; a panic out of it is a coder
        // defect and must not escape unclassified
        let parsed = catch_unwind(AssertUnwindSafe(|| parser.parse_bytes::<D>(&body)))
            .map_err(|panic| ClientError::InternalInconsistency(panic_message(panic)))?;

        parsed.map_err(|e| {
            if let ResponseParsingError::Fault { code, message } = &e {
                warn!(method, code, message = message.as_str(), "server reported a fault");
            }
            ClientError::ResponseParsing(e)
        })
    }
}

impl fmt::Debug for ProxyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "coder panicked".to_string()
    }
}
