//! Structured-object (JSON) body encoding.
//!
//! The writer is hand-rolled rather than delegated to `serde_json` because
//! the output format is configurable in ways serde's serializer is not:
//! key ordering, the ` : ` key separator in pretty mode, duplicate keys,
//! and per-instance date/data/float strategies.

use bytes::Bytes;

use crate::options::{EncodingOptions, KeyOrder};
use crate::scalar::{Rendered, render_data, render_date, render_float};
use crate::{Error, Field, FieldValue, Result};

const ENCODER: &str = "json";

/// Encodes body fields as a single JSON object.
///
/// # Example
///
/// ```
/// use wireform::{Field, JsonEncoder};
///
/// let encoder = JsonEncoder::new();
/// let fields = [Field::new("name", "Alice"), Field::new("age", 30)];
/// let (body, content_type) = encoder.encode(&fields).expect("encode");
/// assert_eq!(body.as_ref(), br#"{"name":"Alice","age":30}"#);
/// assert_eq!(content_type, "application/json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    options: EncodingOptions,
}

impl JsonEncoder {
    /// Encoder with default options (minified, insertion-ordered keys).
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

    /// Encode the fields as one JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error on `Part` values, on non-finite floats with no
    /// substitution strategy, or on a failing custom date pattern.
    pub fn encode(&self, fields: &[Field]) -> Result<(Bytes, String)> {
        let mut out = String::new();
        self.write_object(&mut out, fields, 0)?;
        Ok((Bytes::from(out), "application/json".to_string()))
    }

    fn write_object(&self, out: &mut String, fields: &[Field], depth: usize) -> Result<()> {
        if fields.is_empty() {
            out.push_str("{}");
            return Ok(());
        }

        let mut ordered: Vec<&Field> = fields.iter().collect();
        if self.options.key_order == KeyOrder::Sorted {
            // Stable sort: duplicate names keep their insertion order.
            ordered.sort_by(|a, b| a.name.cmp(&b.name));
        }

        out.push('{');
        for (i, field) in ordered.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.options.pretty {
                out.push('\n');
                indent(out, depth + 1);
            }
            write_string(out, &field.name);
            out.push_str(if self.options.pretty { " : " } else { ":" });
            self.write_value(out, &field.value, depth + 1)?;
        }
        if self.options.pretty {
            out.push('\n');
            indent(out, depth);
        }
        out.push('}');
        Ok(())
    }

    fn write_array(&self, out: &mut String, items: &[FieldValue], depth: usize) -> Result<()> {
        if items.is_empty() {
            out.push_str("[]");
            return Ok(());
        }

        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.options.pretty {
                out.push('\n');
                indent(out, depth + 1);
            }
            self.write_value(out, item, depth + 1)?;
        }
        if self.options.pretty {
            out.push('\n');
            indent(out, depth);
        }
        out.push(']');
        Ok(())
    }

    fn write_value(&self, out: &mut String, value: &FieldValue, depth: usize) -> Result<()> {
        match value {
            FieldValue::Null => out.push_str("null"),
            FieldValue::Text(s) => write_string(out, s),
            FieldValue::Integer(n) => out.push_str(&n.to_string()),
            FieldValue::Float(x) => {
                write_rendered(out, render_float(*x, &self.options.non_finite)?);
            }
            FieldValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            FieldValue::Date(d) => {
                write_rendered(out, render_date(d, &self.options.date)?);
            }
            FieldValue::Data(data) => write_string(out, &render_data(data, self.options.data)),
            FieldValue::Nested(fields) => self.write_object(out, fields, depth)?,
            FieldValue::List(items) => self.write_array(out, items, depth)?,
            FieldValue::Part(_) => return Err(Error::unsupported(ENCODER, value.kind())),
        }
        Ok(())
    }
}

fn write_rendered(out: &mut String, rendered: Rendered) {
    match rendered {
        Rendered::Number(literal) => out.push_str(&literal),
        Rendered::Text(text) => write_string(out, &text),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
