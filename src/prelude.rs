//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types for easy glob importing:
//!
//! ```
//! use wireform::prelude::*;
//!
//! let builder = RequestBuilder::new("https://api.example.com", Method::Get, "/health");
//! # let _ = builder;
//! ```

pub use crate::{
    BodyEncoder, EncodedBody, EncodingOptions, Error, Field, FieldValue, Method, Part,
    QueryEncoder, RequestBuilder, Result,
};
