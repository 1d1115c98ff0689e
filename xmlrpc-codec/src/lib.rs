//! XML-RPC value codec
//!
//! This crate translates between native Rust values and the `<value>`
//! element grammar of XML-RPC. It is consumed by the client crate through
//! the [`Coder`] trait, which makes the codec swappable for testing or for
//! dialects that deviate from the standard grammar.

mod coder;
mod convert;
mod error;
mod value;

pub use coder::{Coder, StandardCoder};
pub use convert::{Decode, Encode};
pub use error::{DecodeError, EncodeError};
pub use value::{Bytes, Value};
