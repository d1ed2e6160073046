//! Request serialization core for typed HTTP API clients.
//!
//! This crate turns named, typed field values into a fully formed HTTP
//! request: a resolved URL (base + path + query string) and an encoded body
//! with matching headers. It performs no I/O; a transport layer consumes
//! the output.
//!
//! - [`RequestBuilder`] - accumulates path, query, and body fields
//! - [`Field`] / [`FieldValue`] / [`Part`] - the typed field model
//! - [`BodyEncoder`] - JSON, multipart, or form-urlencoded bodies
//! - [`QueryEncoder`] - query-string serialization with its own options
//! - [`EncodingOptions`] - date, binary, non-finite-float, key-order, and
//!   pretty-print strategies
//! - [`Error`] and [`Result`] - error handling
//!
//! # Example
//!
//! ```
//! use wireform::{BodyEncoder, Method, RequestBuilder};
//!
//! let builder = RequestBuilder::new("https://api.example.com", Method::Post, "/upload")
//!     .field("file", wireform::Part::file("note.txt", "hello"))
//!     .body_encoder(BodyEncoder::multipart("boundary123"));
//!
//! let encoded = builder.body_and_headers().expect("encode");
//! assert!(encoded.bytes().is_some());
//! ```

mod encode;
mod error;
mod field;
mod method;
mod options;
pub mod prelude;
mod request;
mod scalar;

pub use encode::{BodyEncoder, EncodedBody, FormEncoder, JsonEncoder, MultipartEncoder, QueryEncoder};
pub use error::{Error, Result};
pub use field::{DescribeValue, Field, FieldValue, Part, ValueBuilder};
pub use method::Method;
pub use options::{DataEncoding, DateEncoding, EncodingOptions, KeyOrder, NonFinite};
pub use request::RequestBuilder;

// Re-export http crate types for header names and values
pub use http::{HeaderMap, header};
