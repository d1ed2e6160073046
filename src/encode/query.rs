//! URL query-string encoding.

use url::form_urlencoded;

use crate::options::EncodingOptions;
use crate::scalar::render_plain;
use crate::{Field, Result};

const ENCODER: &str = "query";

/// Encodes query fields into a URL query string.
///
/// Carries its own [`EncodingOptions`], independent of the body encoder's,
/// so for example query-string dates can use an epoch strategy while the
/// body keeps ISO 8601. Pairs are emitted in field-addition order, since
/// the query string is part of the URL and its order is observable.
#[derive(Debug, Clone, Default)]
pub struct QueryEncoder {
    options: EncodingOptions,
}

impl QueryEncoder {
    /// Encoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with explicit options.
    #[must_use]
    pub const fn with_options(options: EncodingOptions) -> Self {
        Self { options }
    }

    /// This encoder's options.
    #[must_use]
    pub const fn options(&self) -> &EncodingOptions {
        &self.options
    }

    /// Encode the fields as a query string without the leading `?`.
    ///
    /// # Errors
    ///
    /// Returns an error on `Part` or structured values, on non-finite
    /// floats with no substitution strategy, or on a failing custom date
    /// pattern.
    pub fn encode(&self, fields: &[Field]) -> Result<String> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for field in fields {
            let value = render_plain(&field.value, &self.options, ENCODER)?;
            serializer.append_pair(&field.name, &value);
        }
        Ok(serializer.finish())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::options::DateEncoding;

    use super::*;

    #[test]
    fn pairs_in_insertion_order() {
        let encoder = QueryEncoder::new();
        let fields = [Field::new("page", 1), Field::new("q", "rust http")];
        assert_eq!(
            encoder.encode(&fields).expect("encode"),
            "page=1&q=rust+http"
        );
    }

    #[test]
    fn date_with_epoch_strategy() {
        let encoder = QueryEncoder::with_options(
            EncodingOptions::new().with_date(DateEncoding::SecondsSinceEpoch),
        );
        let date = Utc.timestamp_opt(1000, 0).single().expect("valid timestamp");
        let fields = [Field::new("since", date)];
        assert_eq!(encoder.encode(&fields).expect("encode"), "since=1000.0");
    }

    #[test]
    fn empty_fields_empty_string() {
        let encoder = QueryEncoder::new();
        assert_eq!(encoder.encode(&[]).expect("encode"), "");
    }
}
