//! `application/x-www-form-urlencoded` body encoding.

use bytes::Bytes;
use url::form_urlencoded;

use crate::options::EncodingOptions;
use crate::scalar::render_plain;
use crate::{Field, Result};

const ENCODER: &str = "form";

/// Encodes body fields as `application/x-www-form-urlencoded` pairs.
///
/// Names and rendered values are percent-escaped, spaces become `+`, and
/// pairs are joined with `&` in field-addition order. (The insertion
/// ordering here is deliberately stronger than required; see DESIGN.md.)
#[derive(Debug, Clone, Default)]
pub struct FormEncoder {
    options: EncodingOptions,
}

impl FormEncoder {
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

    /// Encode the fields as a form-urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns an error on `Part` or structured values, on non-finite
    /// floats with no substitution strategy, or on a failing custom date
    /// pattern.
    pub fn encode(&self, fields: &[Field]) -> Result<(Bytes, String)> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for field in fields {
            let value = render_plain(&field.value, &self.options, ENCODER)?;
            serializer.append_pair(&field.name, &value);
        }
        let body = serializer.finish();
        Ok((
            Bytes::from(body),
            "application/x-www-form-urlencoded".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{FieldValue, Part};

    use super::*;

    fn encode_str(encoder: &FormEncoder, fields: &[Field]) -> String {
        let (body, _) = encoder.encode(fields).expect("encode");
        String::from_utf8(body.to_vec()).expect("utf8")
    }

    #[test]
    fn simple_pairs_in_insertion_order() {
        let encoder = FormEncoder::new();
        let fields = [Field::new("a", "one"), Field::new("b", "two")];
        assert_eq!(encode_str(&encoder, &fields), "a=one&b=two");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let encoder = FormEncoder::new();
        let fields = [Field::new("q", "a b&c=d")];
        assert_eq!(encode_str(&encoder, &fields), "q=a+b%26c%3Dd");
    }

    #[test]
    fn duplicate_names_kept() {
        let encoder = FormEncoder::new();
        let fields = [Field::new("tag", "a"), Field::new("tag", "b")];
        assert_eq!(encode_str(&encoder, &fields), "tag=a&tag=b");
    }

    #[test]
    fn content_type() {
        let encoder = FormEncoder::new();
        let (_, content_type) = encoder.encode(&[]).expect("encode");
        assert_eq!(content_type, "application/x-www-form-urlencoded");
    }

    #[test]
    fn part_is_unsupported() {
        let encoder = FormEncoder::new();
        let fields = [Field::new("upload", Part::new("data"))];
        let err = encoder.encode(&fields).expect_err("should fail");
        assert_eq!(err.to_string(), "form encoder does not support part values");
    }

    #[test]
    fn list_is_unsupported() {
        let encoder = FormEncoder::new();
        let fields = [Field::new("xs", FieldValue::List(vec![]))];
        assert!(encoder.encode(&fields).expect_err("should fail").is_unsupported());
    }
}
