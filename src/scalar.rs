//! Shared scalar rendering used by every encoder.
//!
//! Dates, binary blobs, and floats render the same way whether they end up
//! in a JSON body, a multipart part, a form pair, or the query string; only
//! the quoting differs, which is what [`Rendered`] captures.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::options::{DataEncoding, DateEncoding, EncodingOptions, NonFinite};
use crate::{Error, FieldValue, Result};

/// A rendered scalar, tagged with whether it is a numeric literal or text.
///
/// The JSON encoder quotes `Text` and emits `Number` bare; the other
/// encoders use the plain string either way.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Rendered {
    /// Bare numeric literal.
    Number(String),
    /// Textual value (quoted in JSON output).
    Text(String),
}

impl Rendered {
    pub(crate) fn into_plain(self) -> String {
        match self {
            Self::Number(s) | Self::Text(s) => s,
        }
    }
}

/// Shortest round-trip float literal, decimal point always present
/// (`1000.0`, not `1000`).
pub(crate) fn float_literal(value: f64) -> String {
    format!("{value:?}")
}

/// Render a finite or non-finite float per the strategy.
pub(crate) fn render_float(value: f64, non_finite: &NonFinite) -> Result<Rendered> {
    if value.is_finite() {
        return Ok(Rendered::Number(float_literal(value)));
    }
    match non_finite {
        NonFinite::Fail => Err(Error::NonFiniteFloat(value)),
        NonFinite::Substitute {
            pos_inf,
            neg_inf,
            nan,
        } => {
            let text = if value.is_nan() {
                nan
            } else if value.is_sign_positive() {
                pos_inf
            } else {
                neg_inf
            };
            Ok(Rendered::Text(text.clone()))
        }
    }
}

/// Render a date per the strategy. Epoch modes are numeric with the
/// fractional part preserved; the other modes are text.
pub(crate) fn render_date(date: &DateTime<Utc>, encoding: &DateEncoding) -> Result<Rendered> {
    match encoding {
        DateEncoding::Iso8601 => Ok(Rendered::Text(
            date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )),
        DateEncoding::SecondsSinceEpoch => {
            let seconds = to_f64_micros(date) / 1_000_000.0;
            Ok(Rendered::Number(float_literal(seconds)))
        }
        DateEncoding::MillisecondsSinceEpoch => {
            let millis = to_f64_micros(date) / 1_000.0;
            Ok(Rendered::Number(float_literal(millis)))
        }
        DateEncoding::Custom(pattern) => {
            let spec = translate_pattern(pattern)?;
            Ok(Rendered::Text(date.format(&spec).to_string()))
        }
    }
}

fn to_f64_micros(date: &DateTime<Utc>) -> f64 {
    // Microsecond precision is plenty for wire formats and avoids the
    // nanosecond range overflow of `timestamp_nanos_opt`.
    date.timestamp_micros() as f64
}

/// Render a binary blob per the data-encoding strategy.
pub(crate) fn render_data(data: &[u8], encoding: DataEncoding) -> String {
    match encoding {
        DataEncoding::Base64 => STANDARD.encode(data),
        DataEncoding::Base64Url => URL_SAFE_NO_PAD.encode(data),
    }
}

/// Translate a `yyyy-MM-dd`-style pattern into a chrono format spec.
///
/// Supported tokens: `yyyy`, `yy`, `MM`, `dd`, `HH`, `mm`, `ss`, `SSS`.
/// Literal text goes inside single quotes (`''` is an escaped quote).
/// Any other alphabetic run fails with [`Error::DateFormat`].
fn translate_pattern(pattern: &str) -> Result<String> {
    let mut spec = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' {
            // Quoted literal; '' inside is an escaped single quote.
            let mut closed = false;
            while let Some(inner) = chars.next() {
                if inner == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        spec.push('\'');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    push_literal(&mut spec, inner);
                }
            }
            if !closed {
                return Err(Error::date_format("unterminated quoted literal"));
            }
            continue;
        }

        if ch.is_ascii_alphabetic() {
            let mut run = 1_usize;
            while chars.peek() == Some(&ch) {
                chars.next();
                run += 1;
            }
            let token = match (ch, run) {
                ('y', 4) => "%Y",
                ('y', 2) => "%y",
                ('M', 2) => "%m",
                ('d', 2) => "%d",
                ('H', 2) => "%H",
                ('m', 2) => "%M",
                ('s', 2) => "%S",
                ('S', 3) => "%3f",
                _ => {
                    let run: String = std::iter::repeat_n(ch, run).collect();
                    return Err(Error::date_format(format!("unknown token `{run}`")));
                }
            };
            spec.push_str(token);
        } else {
            push_literal(&mut spec, ch);
        }
    }

    Ok(spec)
}

fn push_literal(spec: &mut String, ch: char) {
    if ch == '%' {
        spec.push_str("%%");
    } else {
        spec.push(ch);
    }
}

/// Render a scalar field value to its plain-text form, as used by the
/// multipart, form, and query encoders. Structured values and parts are
/// rejected with the given encoder name in the error.
pub(crate) fn render_plain(
    value: &FieldValue,
    options: &EncodingOptions,
    encoder: &'static str,
) -> Result<String> {
    match value {
        FieldValue::Text(s) => Ok(s.clone()),
        FieldValue::Integer(n) => Ok(n.to_string()),
        FieldValue::Float(x) => Ok(render_float(*x, &options.non_finite)?.into_plain()),
        FieldValue::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
        FieldValue::Date(d) => Ok(render_date(d, &options.date)?.into_plain()),
        FieldValue::Data(data) => Ok(render_data(data, options.data)),
        FieldValue::Null
        | FieldValue::Part(_)
        | FieldValue::Nested(_)
        | FieldValue::List(_) => Err(Error::unsupported(encoder, value.kind())),
    }
}
