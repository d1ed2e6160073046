//! Error types for wireform.

use derive_more::{Display, Error, From};

/// Main error type for request construction and encoding.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Base URL and path cannot be combined into a valid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The builder was created with an empty base URL.
    #[display("empty base URL")]
    #[from(skip)]
    EmptyBaseUrl,

    /// An HTTP method outside the supported set.
    #[display("unsupported HTTP method: {_0}")]
    #[from(skip)]
    UnsupportedMethod(#[error(not(source))] String),

    /// A field value's type is not supported by the active encoder.
    #[display("{encoder} encoder does not support {kind} values")]
    #[from(skip)]
    Unsupported {
        /// Name of the encoder that rejected the value.
        encoder: &'static str,
        /// Kind of the rejected field value.
        kind: &'static str,
    },

    /// A non-finite float was encountered with no substitution strategy.
    #[display("cannot encode non-finite float {_0}")]
    #[from(skip)]
    NonFiniteFloat(#[error(not(source))] f64),

    /// A custom date pattern could not be rendered.
    #[display("invalid date format pattern: {_0}")]
    #[from(skip)]
    DateFormat(#[error(not(source))] String),

    /// JSON serialization error from the serde bridge.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// A header name set on the builder is not a valid HTTP header name.
    #[display("invalid header name: {_0}")]
    #[from]
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// A header value is not a valid HTTP header value.
    #[display("invalid header value: {_0}")]
    #[from]
    InvalidHeaderValue(http::header::InvalidHeaderValue),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported-value error.
    #[must_use]
    pub const fn unsupported(encoder: &'static str, kind: &'static str) -> Self {
        Self::Unsupported { encoder, kind }
    }

    /// Create a date-format error.
    #[must_use]
    pub fn date_format(message: impl Into<String>) -> Self {
        Self::DateFormat(message.into())
    }

    /// Returns `true` if this is a malformed-URL error.
    #[must_use]
    pub const fn is_malformed_url(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::EmptyBaseUrl)
    }

    /// Returns `true` if this is an unsupported-value error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if this is a non-finite float error.
    #[must_use]
    pub const fn is_non_finite(&self) -> bool {
        matches!(self, Self::NonFiniteFloat(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::unsupported("multipart", "nested");
        assert_eq!(
            err.to_string(),
            "multipart encoder does not support nested values"
        );

        let err = Error::NonFiniteFloat(f64::NAN);
        assert_eq!(err.to_string(), "cannot encode non-finite float NaN");

        let err = Error::date_format("unknown token `Q`");
        assert_eq!(
            err.to_string(),
            "invalid date format pattern: unknown token `Q`"
        );

        let err = Error::EmptyBaseUrl;
        assert_eq!(err.to_string(), "empty base URL");
    }

    #[test]
    fn error_predicates() {
        assert!(Error::EmptyBaseUrl.is_malformed_url());
        assert!(!Error::EmptyBaseUrl.is_unsupported());

        let parse_err = url::Url::parse("::not a url::").expect_err("should fail");
        assert!(Error::from(parse_err).is_malformed_url());

        assert!(Error::unsupported("query", "part").is_unsupported());
        assert!(Error::NonFiniteFloat(f64::INFINITY).is_non_finite());
    }
}
