//! XML-RPC protocol client
//!
//! Turns a method name and a sequence of typed parameters into a
//! `methodCall` document, POSTs it, and turns the HTTP outcome back into
//! either a typed value or one variant of a closed error taxonomy:
//! network failure, non-200 status, empty body, malformed response,
//! decoding mismatch, or an explicit server fault.
//!
//! The value codec ([`codec::Coder`]) and the HTTP layer ([`Transport`])
//! are injected capabilities with standard defaults, so both can be
//! swapped for testing or for non-standard dialects.
//!
//! ```rust,no_run
//! use url::Url;
//! use xmlrpc_client::{codec::Value, ProxyClient};
//!
//! # async fn demo() -> xmlrpc_client::Result<()> {
//! let client = ProxyClient::new(Url::parse("http://betty.userland.com/RPC2").unwrap());
//! let state: String = client
//!     .execute("examples.getStateName", Some(vec![Value::Int(41)]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod macros;
mod request;
mod response;
mod transport;

pub use client::ProxyClient;
pub use error::{ClientError, ResponseParsingError, Result, TransportError};
pub use request::RpcRequest;
pub use response::ResponseParser;
pub use transport::{HttpReply, HttpTransport, Transport, CONTENT_TYPE_XML};

pub use xmlrpc_codec as codec;

// Re-exported for the expansion of `xmlrpc_method!`
#[doc(hidden)]
pub use paste;
