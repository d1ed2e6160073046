//! Body and query encoders.
//!
//! A [`BodyEncoder`] turns the builder's ordered field list into body bytes
//! plus a `Content-Type` value. Selection is a closed tag dispatch over the
//! three wire formats; each variant carries its own configuration.

use bytes::Bytes;
use http::HeaderMap;

use crate::{EncodingOptions, Field, Result};

mod form;
mod json;
mod multipart;
mod query;

pub use form::FormEncoder;
pub use json::JsonEncoder;
pub use multipart::MultipartEncoder;
pub use query::QueryEncoder;

/// A request body encoding strategy.
#[derive(Debug, Clone)]
pub enum BodyEncoder {
    /// Structured-object (JSON) body.
    Json(JsonEncoder),
    /// `multipart/form-data` body.
    Multipart(MultipartEncoder),
    /// `application/x-www-form-urlencoded` body.
    Form(FormEncoder),
}

impl BodyEncoder {
    /// JSON encoder with default options.
    #[must_use]
    pub fn json() -> Self {
        Self::Json(JsonEncoder::new())
    }

    /// JSON encoder with explicit options.
    #[must_use]
    pub fn json_with(options: EncodingOptions) -> Self {
        Self::Json(JsonEncoder::with_options(options))
    }

    /// Multipart encoder with the given boundary token.
    #[must_use]
    pub fn multipart(boundary: impl Into<String>) -> Self {
        Self::Multipart(MultipartEncoder::new(boundary))
    }

    /// Form-urlencoded encoder with default options.
    #[must_use]
    pub fn form() -> Self {
        Self::Form(FormEncoder::new())
    }

    /// Encode the ordered field list into `(body bytes, content-type)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a field value is unsupported by this encoder, a
    /// non-finite float has no substitution strategy, or a custom date
    /// pattern cannot render.
    pub fn encode(&self, fields: &[Field]) -> Result<(Bytes, String)> {
        match self {
            Self::Json(encoder) => encoder.encode(fields),
            Self::Multipart(encoder) => encoder.encode(fields),
            Self::Form(encoder) => encoder.encode(fields),
        }
    }
}

/// An encoded request body with its matching headers.
///
/// `bytes` is `None` when the request has no body encoder; headers then
/// contain only the builder's own overrides.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    bytes: Option<Bytes>,
    headers: HeaderMap,
}

impl EncodedBody {
    pub(crate) fn new(bytes: Option<Bytes>, headers: HeaderMap) -> Self {
        Self { bytes, headers }
    }

    /// Body bytes, absent when no body encoder is configured.
    #[must_use]
    pub const fn bytes(&self) -> Option<&Bytes> {
        self.bytes.as_ref()
    }

    /// Headers to send with the body (`Content-Type`, `Content-Length`,
    /// plus builder overrides).
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume into `(bytes, headers)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<Bytes>, HeaderMap) {
        (self.bytes, self.headers)
    }
}
