//! Named, typed field values.
//!
//! A request accumulates ordered lists of [`Field`]s for its body and its
//! query string. [`FieldValue`] is a closed variant over the value types the
//! encoders know how to serialize; callers with their own structured types
//! plug in through [`DescribeValue`] or the serde bridge
//! [`FieldValue::json`].

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::Result;

/// A named binary attachment for multipart bodies.
///
/// # Example
///
/// ```
/// use wireform::Part;
///
/// let part = Part::new("raw bytes").with_mime_type("application/octet-stream");
/// let upload = Part::file("photo.jpg", vec![0xFF, 0xD8, 0xFF]);
/// assert_eq!(upload.mime_type(), Some("image/jpeg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    data: Bytes,
    file_name: Option<String>,
    mime_type: Option<String>,
}

impl Part {
    /// Create a part from raw data, with no filename or MIME type.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            mime_type: None,
        }
    }

    /// Create a file part; the MIME type is guessed from the filename
    /// extension, defaulting to `application/octet-stream`.
    #[must_use]
    pub fn file(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name);
        Self {
            data: data.into(),
            file_name: Some(file_name),
            mime_type: Some(mime_type),
        }
    }

    /// Set the filename.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Raw part data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Filename, if set.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// MIME type, if set.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// Guess a MIME type from a filename extension.
fn guess_mime_type(file_name: &str) -> String {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// A field value: the closed set of types the encoders can serialize.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null (only representable in structured-object bodies).
    Null,
    /// UTF-8 text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Date/time instant.
    Date(DateTime<Utc>),
    /// Binary blob, rendered per the active data-encoding strategy.
    Data(Bytes),
    /// Multipart attachment with optional filename and MIME type.
    Part(Part),
    /// Ordered structured object.
    Nested(Vec<Field>),
    /// Ordered array of values.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Kind name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Data(_) => "data",
            Self::Part(_) => "part",
            Self::Nested(_) => "nested",
            Self::List(_) => "list",
        }
    }

    /// Build a value from a type describing itself into a [`ValueBuilder`].
    #[must_use]
    pub fn described(value: &impl DescribeValue) -> Self {
        let mut builder = ValueBuilder::new();
        value.describe(&mut builder);
        builder.into_value()
    }

    /// Bridge a serde-serializable type into a structured value.
    ///
    /// Objects keep the serializer's field order, arrays become lists, and
    /// numbers become [`FieldValue::Integer`] when they fit in `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if serde serialization fails.
    ///
    /// # Example
    ///
    /// ```
    /// use wireform::FieldValue;
    ///
    /// #[derive(serde::Serialize)]
    /// struct User { name: String, age: u32 }
    ///
    /// let value = FieldValue::json(&User { name: "Alice".to_string(), age: 30 })
    ///     .expect("serialize");
    /// assert_eq!(value.kind(), "nested");
    /// ```
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(Self::from_json_value(value))
    }

    fn from_json_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || Self::Float(n.as_f64().unwrap_or(f64::NAN)),
                Self::Integer,
            ),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json_value).collect())
            }
            serde_json::Value::Object(entries) => Self::Nested(
                entries
                    .into_iter()
                    .map(|(name, value)| Field::new(name, Self::from_json_value(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Bytes> for FieldValue {
    fn from(value: Bytes) -> Self {
        Self::Data(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Data(Bytes::from(value))
    }
}

impl From<Part> for FieldValue {
    fn from(value: Part) -> Self {
        Self::Part(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        Self::List(value)
    }
}

/// A name + typed value pair to be serialized into a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

impl Field {
    /// Create a field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Accumulates a generic [`FieldValue`].
///
/// Used by [`DescribeValue`] implementations to write themselves out
/// without the crate knowing their concrete type. A described value can
/// take any shape: the scalar setters make it a scalar, [`field`](Self::field)
/// calls build an ordered object, and [`push`](Self::push) calls build a
/// list. An untouched builder yields an empty object.
#[derive(Debug, Default)]
pub struct ValueBuilder {
    value: Option<FieldValue>,
}

impl ValueBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe a text value.
    pub fn text(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(FieldValue::Text(value.into()));
        self
    }

    /// Describe an integer value.
    pub fn integer(&mut self, value: i64) -> &mut Self {
        self.value = Some(FieldValue::Integer(value));
        self
    }

    /// Describe a floating-point value.
    pub fn float(&mut self, value: f64) -> &mut Self {
        self.value = Some(FieldValue::Float(value));
        self
    }

    /// Describe a boolean value.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.value = Some(FieldValue::Bool(value));
        self
    }

    /// Describe a date/time value.
    pub fn date(&mut self, value: DateTime<Utc>) -> &mut Self {
        self.value = Some(FieldValue::Date(value));
        self
    }

    /// Describe a binary value.
    pub fn data(&mut self, value: impl Into<Bytes>) -> &mut Self {
        self.value = Some(FieldValue::Data(value.into()));
        self
    }

    /// Append a named field, preserving insertion order. The described
    /// value becomes an ordered object.
    pub fn field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let field = Field::new(name, value);
        if let Some(FieldValue::Nested(fields)) = &mut self.value {
            fields.push(field);
        } else {
            self.value = Some(FieldValue::Nested(vec![field]));
        }
        self
    }

    /// Append an element, preserving insertion order. The described value
    /// becomes a list.
    pub fn push(&mut self, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        if let Some(FieldValue::List(items)) = &mut self.value {
            items.push(value);
        } else {
            self.value = Some(FieldValue::List(vec![value]));
        }
        self
    }

    /// Finish, producing the described value.
    #[must_use]
    pub fn into_value(self) -> FieldValue {
        self.value.unwrap_or_else(|| FieldValue::Nested(Vec::new()))
    }
}

/// Escape hatch for caller-supplied structured values.
///
/// Implement this to serialize a type without going through serde:
///
/// ```
/// use wireform::{DescribeValue, FieldValue, ValueBuilder};
///
/// struct Point { x: i64, y: i64 }
///
/// impl DescribeValue for Point {
///     fn describe(&self, builder: &mut ValueBuilder) {
///         builder.field("x", self.x).field("y", self.y);
///     }
/// }
///
/// let value = FieldValue::described(&Point { x: 1, y: 2 });
/// assert_eq!(value.kind(), "nested");
/// ```
pub trait DescribeValue {
    /// Write this value into the builder.
    fn describe(&self, builder: &mut ValueBuilder);
}
