//! [`Document`] to JSON text.

use alloc::string::String;
use core::fmt::{self, Write};

use bstr::{BStr, ByteSlice};

use crate::array::Array;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::layout::{BoolState, RootKind, ValueType};
use crate::object::Object;
use crate::options::EncodeOptions;
use crate::value::Value;

/// Encodes `doc` as JSON text.
///
/// # Errors
///
/// [`Error::EmptyDocument`] if the document has no root and [`Error::Alloc`]
/// if the output buffer cannot be reserved.
///
/// # Examples
///
/// ```rust
/// use soadoc::{EncodeOptions, decode, encode};
///
/// let doc = decode(r#"{"city":"Zürich"}"#).unwrap();
/// let options = EncodeOptions {
///     ascii_only: true,
///     ..Default::default()
/// };
/// assert_eq!(encode(&doc, options).unwrap(), r#"{"city":"Z\u00fcrich"}"#);
/// ```
pub fn encode(doc: &Document, options: EncodeOptions) -> Result<String> {
    let mut out = String::new();
    out.try_reserve(doc.len())
        .map_err(|e| Error::alloc(doc.len(), e))?;
    encode_to(doc, options, &mut out)?;
    tracing::debug!(bytes = out.len(), "document encoded");
    Ok(out)
}

/// Encodes `doc` into a caller-provided sink.
///
/// A container that is reachable from itself is written without bound.
///
/// # Errors
///
/// [`Error::EmptyDocument`] if the document has no root and
/// [`Error::Format`] if the sink fails.
pub fn encode_to<W: Write>(doc: &Document, options: EncodeOptions, out: &mut W) -> Result<()> {
    let mut encoder = Encoder {
        out,
        options,
        depth: 0,
    };
    match doc.root_kind() {
        RootKind::Object => match doc.root_object() {
            Some(object) => encoder.write_object(object)?,
            None => return Err(Error::EmptyDocument),
        },
        RootKind::Array => match doc.root_array() {
            Some(array) => encoder.write_array(array)?,
            None => return Err(Error::EmptyDocument),
        },
        RootKind::None => return Err(Error::EmptyDocument),
    }
    Ok(())
}

/// Compact JSON. A document without a root writes nothing.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match encode_to(self, EncodeOptions::default(), f) {
            Ok(()) | Err(Error::EmptyDocument) => Ok(()),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Compact JSON for this value and everything below it.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Encoder {
            out: f,
            options: EncodeOptions::default(),
            depth: 0,
        }
        .write_value(*self)
    }
}

struct Encoder<'w, W> {
    out: &'w mut W,
    options: EncodeOptions,
    depth: usize,
}

impl<W: Write> Encoder<'_, W> {
    fn newline(&mut self) -> fmt::Result {
        if self.options.pretty {
            self.out.write_char('\n')?;
            for _ in 0..self.depth {
                self.out.write_str(self.options.indent)?;
            }
        }
        Ok(())
    }

    fn write_value(&mut self, value: Value<'_>) -> fmt::Result {
        match value.value_type() {
            ValueType::Bool => self.out.write_str(match value.as_bool_state() {
                BoolState::True => "true",
                BoolState::False => "false",
                BoolState::Null => "null",
            }),
            ValueType::Int => write!(self.out, "{}", value.as_i64()),
            ValueType::UInt => write!(self.out, "{}", value.as_u64()),
            ValueType::Float => write_float(self.out, value.as_f64()),
            ValueType::Str | ValueType::InlineStr => {
                let s = value.as_bstr().unwrap_or(BStr::new(""));
                write_string(self.out, s, self.options.ascii_only)
            }
            ValueType::Object => match value.as_object() {
                Some(object) => self.write_object(object),
                None => self.out.write_str("null"),
            },
            ValueType::Array => match value.as_array() {
                Some(array) => self.write_array(array),
                None => self.out.write_str("null"),
            },
        }
    }

    fn write_array(&mut self, array: Array<'_>) -> fmt::Result {
        if array.is_empty() {
            return self.out.write_str("[]");
        }
        self.out.write_char('[')?;
        self.depth += 1;
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline()?;
            self.write_value(element)?;
        }
        self.depth -= 1;
        self.newline()?;
        self.out.write_char(']')
    }

    fn write_object(&mut self, object: Object<'_>) -> fmt::Result {
        if object.is_empty() {
            return self.out.write_str("{}");
        }
        self.out.write_char('{')?;
        self.depth += 1;
        for i in 0..object.len() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline()?;
            let key = object.key_bstr_at(i).unwrap_or(BStr::new(""));
            write_string(self.out, key, self.options.ascii_only)?;
            self.out
                .write_str(if self.options.pretty { ": " } else { ":" })?;
            if let Some(value) = object.value_at(i) {
                self.write_value(value)?;
            }
        }
        self.depth -= 1;
        self.newline()?;
        self.out.write_char('}')
    }
}

/// Shortest round-trip form, always with a `.` or an exponent so it reads
/// back as a float. Non-finite values have no JSON form and become `null`.
fn write_float<W: Write>(out: &mut W, f: f64) -> fmt::Result {
    if f.is_finite() {
        write!(out, "{f:?}")
    } else {
        out.write_str("null")
    }
}

/// Writes `s` as a quoted JSON string, one code point at a time. Bytes that
/// are not valid UTF-8 are written as U+FFFD.
fn write_string<W: Write>(out: &mut W, s: &BStr, ascii_only: bool) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '/' => out.write_str("\\/")?,
            '\u{08}' => out.write_str("\\b")?,
            '\u{0C}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(out, "\\u{:04x}", u32::from(c))?,
            c if ascii_only && u32::from(c) > 0x7E => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{unit:04x}")?;
                }
            }
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
