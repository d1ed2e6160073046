//! Encoding strategy options.
//!
//! Each encoder instance carries its own immutable [`EncodingOptions`],
//! so the query string and the body can, for example, format dates
//! differently within the same request.

/// How date/time values are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateEncoding {
    /// RFC 3339 UTC string, e.g. `1970-01-01T00:00:00Z`.
    #[default]
    Iso8601,
    /// Seconds since the Unix epoch as a number, fraction preserved.
    SecondsSinceEpoch,
    /// Milliseconds since the Unix epoch as a number, fraction preserved.
    MillisecondsSinceEpoch,
    /// Custom pattern using standard date-format tokens (e.g. `yyyy-MM-dd`),
    /// rendered in UTC. Unsupported tokens fail encoding.
    Custom(String),
}

/// How binary blobs are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataEncoding {
    /// Standard base64 alphabet with padding.
    #[default]
    Base64,
    /// URL-safe base64 alphabet without padding.
    Base64Url,
}

/// How non-finite floats (NaN, +Inf, -Inf) are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NonFinite {
    /// Encoding fails with an error.
    #[default]
    Fail,
    /// Substitute the configured string in place of the numeric literal.
    Substitute {
        /// Replacement for `+Inf`.
        pos_inf: String,
        /// Replacement for `-Inf`.
        neg_inf: String,
        /// Replacement for `NaN`.
        nan: String,
    },
}

impl NonFinite {
    /// Conventional substitution strings: `Infinity`, `-Infinity`, `NaN`.
    #[must_use]
    pub fn substitute_default() -> Self {
        Self::Substitute {
            pos_inf: "Infinity".to_string(),
            neg_inf: "-Infinity".to_string(),
            nan: "NaN".to_string(),
        }
    }
}

/// Key ordering for structured-object output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Preserve field-addition order.
    #[default]
    Insertion,
    /// Sort keys lexicographically.
    Sorted,
}

/// Strategy options shared by all encoders.
///
/// Immutable once handed to an encoder; configure with the `with_*`
/// builder methods before attaching the encoder to a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodingOptions {
    /// Date/time rendering strategy.
    pub date: DateEncoding,
    /// Binary blob rendering strategy.
    pub data: DataEncoding,
    /// Non-finite float rendering strategy.
    pub non_finite: NonFinite,
    /// Key ordering for structured-object output.
    pub key_order: KeyOrder,
    /// Pretty-print structured-object output with 2-space indentation.
    pub pretty: bool,
}

impl EncodingOptions {
    /// Default options: ISO 8601 dates, base64 data, failing non-finite
    /// floats, insertion-ordered keys, minified output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date rendering strategy.
    #[must_use]
    pub fn with_date(mut self, date: DateEncoding) -> Self {
        self.date = date;
        self
    }

    /// Set the binary blob rendering strategy.
    #[must_use]
    pub fn with_data(mut self, data: DataEncoding) -> Self {
        self.data = data;
        self
    }

    /// Set the non-finite float rendering strategy.
    #[must_use]
    pub fn with_non_finite(mut self, non_finite: NonFinite) -> Self {
        self.non_finite = non_finite;
        self
    }

    /// Set the key ordering.
    #[must_use]
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    /// Enable or disable pretty-printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = EncodingOptions::new();
        assert_eq!(options.date, DateEncoding::Iso8601);
        assert_eq!(options.data, DataEncoding::Base64);
        assert_eq!(options.non_finite, NonFinite::Fail);
        assert_eq!(options.key_order, KeyOrder::Insertion);
        assert!(!options.pretty);
    }

    #[test]
    fn options_builder() {
        let options = EncodingOptions::new()
            .with_date(DateEncoding::SecondsSinceEpoch)
            .with_key_order(KeyOrder::Sorted)
            .with_pretty(true);
        assert_eq!(options.date, DateEncoding::SecondsSinceEpoch);
        assert_eq!(options.key_order, KeyOrder::Sorted);
        assert!(options.pretty);
    }

    #[test]
    fn non_finite_substitute_default() {
        let NonFinite::Substitute { pos_inf, neg_inf, nan } = NonFinite::substitute_default()
        else {
            panic!("expected substitution strategy");
        };
        assert_eq!(pos_inf, "Infinity");
        assert_eq!(neg_inf, "-Infinity");
        assert_eq!(nan, "NaN");
    }
}
