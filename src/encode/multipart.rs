//! `multipart/form-data` body encoding.

use bytes::{BufMut, Bytes, BytesMut};

use crate::options::EncodingOptions;
use crate::scalar::render_plain;
use crate::{Error, Field, FieldValue, Result};

const ENCODER: &str = "multipart";

/// Encodes body fields as `multipart/form-data` with a fixed boundary.
///
/// Output byte order exactly matches field-addition order. [`crate::Part`]
/// values carry their own filename and MIME type lines; scalar values are
/// rendered as plain text part bodies.
#[derive(Debug, Clone)]
pub struct MultipartEncoder {
    boundary: String,
    options: EncodingOptions,
}

impl MultipartEncoder {
    /// Encoder with the given boundary token and default options.
    #[must_use]
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            options: EncodingOptions::default(),
        }
    }

    /// Encoder with a generated, unique boundary token.
    #[must_use]
    pub fn random() -> Self {
        Self::new(generate_boundary())
    }

    /// Set the encoding options.
    #[must_use]
    pub fn with_options(mut self, options: EncodingOptions) -> Self {
        self.options = options;
        self
    }

    /// The boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Encode the fields as a multipart body.
    ///
    /// # Errors
    ///
    /// Returns an error on structured (`Nested`/`List`/`Null`) values, on
    /// non-finite floats with no substitution strategy, or on a failing
    /// custom date pattern.
    pub fn encode(&self, fields: &[Field]) -> Result<(Bytes, String)> {
        let mut buf = BytesMut::new();

        for field in fields {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(field.name.as_bytes());
            buf.put_slice(b"\"");

            match &field.value {
                FieldValue::Part(part) => {
                    if let Some(file_name) = part.file_name() {
                        buf.put_slice(b"; filename=\"");
                        buf.put_slice(file_name.as_bytes());
                        buf.put_slice(b"\"");
                    }
                    buf.put_slice(b"\r\n");
                    if let Some(mime_type) = part.mime_type() {
                        buf.put_slice(b"Content-Type: ");
                        buf.put_slice(mime_type.as_bytes());
                        buf.put_slice(b"\r\n");
                    }
                    buf.put_slice(b"\r\n");
                    buf.put_slice(part.data());
                }
                FieldValue::Nested(_) | FieldValue::List(_) | FieldValue::Null => {
                    return Err(Error::unsupported(ENCODER, field.value.kind()));
                }
                scalar => {
                    buf.put_slice(b"\r\n\r\n");
                    let text = render_plain(scalar, &self.options, ENCODER)?;
                    buf.put_slice(text.as_bytes());
                }
            }
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        Ok((buf.freeze(), content_type))
    }
}

/// Generate a unique boundary token from the current time.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----WireformBoundary{timestamp:x}")
}

#[cfg(test)]
mod tests {
    use crate::Part;

    use super::*;

    fn encode_str(encoder: &MultipartEncoder, fields: &[Field]) -> (String, String) {
        let (body, content_type) = encoder.encode(fields).expect("encode");
        (String::from_utf8(body.to_vec()).expect("utf8"), content_type)
    }

    #[test]
    fn parts_with_and_without_attributes() {
        let encoder = MultipartEncoder::new("B");
        let fields = [
            Field::new(
                "a",
                Part::new("one")
                    .with_file_name("one.txt")
                    .with_mime_type("text/plain"),
            ),
            Field::new("b", Part::new("two")),
        ];

        let (body, content_type) = encode_str(&encoder, &fields);

        assert_eq!(content_type, "multipart/form-data; boundary=B");
        assert_eq!(
            body,
            "--B\r\n\
             Content-Disposition: form-data; name=\"a\"; filename=\"one.txt\"\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             one\r\n\
             --B\r\n\
             Content-Disposition: form-data; name=\"b\"\r\n\
             \r\n\
             two\r\n\
             --B--\r\n"
        );
    }

    #[test]
    fn scalar_fields_render_plain() {
        let encoder = MultipartEncoder::new("X");
        let fields = [Field::new("count", 3), Field::new("active", true)];

        let (body, _) = encode_str(&encoder, &fields);

        assert_eq!(
            body,
            "--X\r\n\
             Content-Disposition: form-data; name=\"count\"\r\n\
             \r\n\
             3\r\n\
             --X\r\n\
             Content-Disposition: form-data; name=\"active\"\r\n\
             \r\n\
             true\r\n\
             --X--\r\n"
        );
    }

    #[test]
    fn empty_field_list_is_just_closing_line() {
        let encoder = MultipartEncoder::new("E");
        let (body, _) = encode_str(&encoder, &[]);
        assert_eq!(body, "--E--\r\n");
    }

    #[test]
    fn nested_is_unsupported() {
        let encoder = MultipartEncoder::new("B");
        let fields = [Field::new("obj", FieldValue::Nested(vec![]))];
        let err = encoder.encode(&fields).expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "multipart encoder does not support nested values"
        );
    }

    #[test]
    fn random_boundary_prefix() {
        let encoder = MultipartEncoder::random();
        assert!(encoder.boundary().starts_with("----WireformBoundary"));
    }
}
