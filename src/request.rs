//! Request building.
//!
//! [`RequestBuilder`] accumulates ordered path, query, and body fields for
//! one logical request, then resolves them into a URL and an encoded
//! body/header pair for the transport layer.
//!
//! # Example
//!
//! ```
//! use wireform::{BodyEncoder, Method, RequestBuilder};
//!
//! let builder = RequestBuilder::new("https://api.example.com", Method::Post, "/users")
//!     .query("page", 1)
//!     .field("name", "Alice")
//!     .body_encoder(BodyEncoder::json());
//!
//! let url = builder.full_url().expect("url");
//! assert_eq!(url.as_str(), "https://api.example.com/users?page=1");
//!
//! let encoded = builder.body_and_headers().expect("encode");
//! assert_eq!(encoded.bytes().expect("body").as_ref(), br#"{"name":"Alice"}"#);
//! ```

use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::encode::{BodyEncoder, EncodedBody, QueryEncoder};
use crate::{Error, Field, FieldValue, Method, Result};

/// Accumulates one logical request and serializes it.
///
/// Field lists are append-only and keep duplicates; each in-flight request
/// must own its own builder.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body_fields: Vec<Field>,
    query_fields: Vec<Field>,
    body_encoder: Option<BodyEncoder>,
    query_encoder: QueryEncoder,
}

impl RequestBuilder {
    /// Create a builder for `method` against `base_url` + `path`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            method,
            path: path.into(),
            headers: Vec::new(),
            body_fields: Vec::new(),
            query_fields: Vec::new(),
            body_encoder: None,
            query_encoder: QueryEncoder::new(),
        }
    }

    /// Append a body field, preserving insertion order. Duplicate names are
    /// kept; coalescing, if any, is the encoder's business.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.body_fields.push(Field::new(name, value));
        self
    }

    /// Append a query field, preserving insertion order.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.query_fields.push(Field::new(name, value));
        self
    }

    /// Add an override header. These are merged into
    /// [`body_and_headers`](Self::body_and_headers) output but never
    /// replace the encoder-derived `Content-Type`/`Content-Length`.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body encoder.
    #[must_use]
    pub fn body_encoder(mut self, encoder: BodyEncoder) -> Self {
        self.body_encoder = Some(encoder);
        self
    }

    /// Set the query encoder (with its own strategy options).
    #[must_use]
    pub fn query_encoder(mut self, encoder: QueryEncoder) -> Self {
        self.query_encoder = encoder;
        self
    }

    /// HTTP method for the transport layer.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Body fields accumulated so far.
    #[must_use]
    pub fn body_fields(&self) -> &[Field] {
        &self.body_fields
    }

    /// Query fields accumulated so far.
    #[must_use]
    pub fn query_fields(&self) -> &[Field] {
        &self.query_fields
    }

    /// Resolve the full URL: base joined with path by exactly one `/`,
    /// followed by the encoded query string when query fields exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty, the combination does not
    /// parse as a URL, or a query field fails to encode.
    pub fn full_url(&self) -> Result<Url> {
        if self.base_url.is_empty() {
            return Err(Error::EmptyBaseUrl);
        }
        let mut resolved = join_paths(&self.base_url, &self.path);
        if !self.query_fields.is_empty() {
            let query = self.query_encoder.encode(&self.query_fields)?;
            resolved.push('?');
            resolved.push_str(&query);
        }
        Ok(Url::parse(&resolved)?)
    }

    /// Encode the body and produce its headers.
    ///
    /// With no body encoder configured the body is absent and only the
    /// override headers are returned. Otherwise the encoder's output
    /// supplies `Content-Type`, and `Content-Length` is the exact byte
    /// length of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if a field value is unsupported by the encoder, a
    /// non-finite float has no substitution strategy, a custom date pattern
    /// fails, or an override header name/value is invalid.
    pub fn body_and_headers(&self) -> Result<EncodedBody> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            headers.append(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }

        let Some(encoder) = &self.body_encoder else {
            return Ok(EncodedBody::new(None, headers));
        };

        let (bytes, content_type) = encoder.encode(&self.body_fields)?;
        headers.insert(CONTENT_TYPE, HeaderValue::try_from(content_type)?);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
        Ok(EncodedBody::new(Some(bytes), headers))
    }
}

/// Join base and path with exactly one separating `/`.
fn join_paths(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => {
            let trimmed = path.strip_prefix('/').unwrap_or(path);
            format!("{base}{trimmed}")
        }
        (false, false) => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_collapses_duplicate_separator() {
        assert_eq!(join_paths("foo/", "/baz"), "foo/baz");
    }

    #[test]
    fn join_inserts_missing_separator() {
        assert_eq!(join_paths("foo", "baz"), "foo/baz");
    }

    #[test]
    fn join_keeps_single_separator() {
        assert_eq!(join_paths("foo/", "baz"), "foo/baz");
        assert_eq!(join_paths("foo", "/baz"), "foo/baz");
    }

    #[test]
    fn join_empty_path() {
        assert_eq!(join_paths("foo", ""), "foo");
    }

    #[test]
    fn full_url_without_query() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Get, "/users");
        let url = builder.full_url().expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn full_url_with_query() {
        let builder = RequestBuilder::new("https://api.example.com/", Method::Get, "users")
            .query("page", 2)
            .query("q", "rust");
        let url = builder.full_url().expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/users?page=2&q=rust");
    }

    #[test]
    fn full_url_empty_base_fails() {
        let builder = RequestBuilder::new("", Method::Get, "/users");
        let err = builder.full_url().expect_err("should fail");
        assert!(err.is_malformed_url());
    }

    #[test]
    fn full_url_unparsable_fails() {
        let builder = RequestBuilder::new("not a url", Method::Get, "x");
        let err = builder.full_url().expect_err("should fail");
        assert!(err.is_malformed_url());
    }

    #[test]
    fn no_encoder_means_no_body() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Get, "/users")
            .header("Accept", "application/json")
            .field("ignored", "value");
        let encoded = builder.body_and_headers().expect("encode");
        assert!(encoded.bytes().is_none());
        assert_eq!(encoded.headers().len(), 1);
        assert_eq!(
            encoded.headers().get("Accept").expect("header"),
            "application/json"
        );
    }

    #[test]
    fn content_length_matches_body() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Post, "/users")
            .field("name", "Alice")
            .body_encoder(BodyEncoder::json());
        let encoded = builder.body_and_headers().expect("encode");
        let body = encoded.bytes().expect("body");
        assert_eq!(
            encoded.headers().get(CONTENT_LENGTH).expect("header"),
            &body.len().to_string()
        );
        assert_eq!(
            encoded.headers().get(CONTENT_TYPE).expect("header"),
            "application/json"
        );
    }

    #[test]
    fn encoder_content_type_wins_over_override() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Post, "/users")
            .header("Content-Type", "text/plain")
            .header("X-Custom", "yes")
            .body_encoder(BodyEncoder::form());
        let encoded = builder.body_and_headers().expect("encode");
        assert_eq!(
            encoded.headers().get(CONTENT_TYPE).expect("header"),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(encoded.headers().get("X-Custom").expect("header"), "yes");
    }

    #[test]
    fn invalid_override_header_fails() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Get, "/")
            .header("bad name", "v");
        assert!(builder.body_and_headers().is_err());
    }

    #[test]
    fn duplicate_fields_are_kept() {
        let builder = RequestBuilder::new("https://api.example.com", Method::Post, "/")
            .field("a", 1)
            .field("a", 2);
        assert_eq!(builder.body_fields().len(), 2);
    }
}
