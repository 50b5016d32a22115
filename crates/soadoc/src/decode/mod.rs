//! JSON text to [`Document`].
//!
//! Decoding runs the same grammar twice. The sizing pass walks the text and
//! records the length of every container in discovery order together with the
//! total number of bytes the document needs. The buffer is then allocated once
//! at exactly that size and the materialize pass walks the text again, writing
//! each value into the place the layout already assigned to it.
//!
//! The layout puts all array containers first, then all object containers,
//! then all long strings, each region in discovery order. The root container
//! is the first of its kind, so it sits at the start of its region.
//!
//! Malformed input is always detected by the sizing pass, before anything is
//! allocated.

mod escape;
mod materialize;
mod number;
mod parser;
mod scanner;
mod sizing;

use alloc::vec::Vec;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::layout::RootKind;
use crate::options::DecodeOptions;

use materialize::Writer;
use parser::Parser;
use sizing::Sizer;

/// Decodes `text` with the default [`DecodeOptions`].
///
/// # Errors
///
/// [`Error::Decode`] if `text` is not a JSON object or array, and
/// [`Error::Alloc`] if the document buffer cannot be allocated.
///
/// # Examples
///
/// ```rust
/// let doc = soadoc::decode(r#"{"a": 1, "b": [true, null]}"#).unwrap();
/// let root = doc.root_object().unwrap();
/// assert_eq!(root.get("a").unwrap().as_u64(), 1);
/// assert_eq!(root.get("b").unwrap().as_array().unwrap().len(), 2);
/// ```
pub fn decode(text: &str) -> Result<Document> {
    decode_with(text, DecodeOptions::default())
}

/// Decodes `text` into a document held in a single exact-size allocation.
///
/// # Errors
///
/// See [`decode`]. Nothing is allocated for the document when the input is
/// malformed.
pub fn decode_with(text: &str, options: DecodeOptions) -> Result<Document> {
    let mut sizer = Sizer::new(options.table_capacity);
    let root_kind = Parser::new(text, &mut sizer, options).parse_document()?;
    let plan = sizer.finish()?;

    let mut data = Vec::new();
    data.try_reserve_exact(plan.total)
        .map_err(|e| Error::alloc(plan.total, e))?;
    data.resize(plan.total, 0);
    tracing::debug!(bytes = plan.total, "document buffer allocated");

    let mut writer = Writer::new(&mut data, &plan);
    Parser::new(text, &mut writer, options).parse_document()?;

    let root = match root_kind {
        RootKind::Object => plan.object_base,
        _ => 0,
    };
    Ok(Document::from_parts(data, root, root_kind))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::layout::ValueType;

    #[test]
    fn buffer_is_exactly_sized() {
        let text = r#"{"name":"a string longer than eight","tags":["x","y"],"n":-3}"#;
        let doc = decode(text).unwrap();
        let expected = 8 + 9 * 2 // one array, two elements
            + 8 + 18 * 3 // one object, three entries
            + "a string longer than eight".len() + 1;
        assert_eq!(doc.len(), expected);
    }

    #[test]
    fn array_root_sits_at_offset_zero() {
        let doc = decode(r#"[{"k":1}]"#).unwrap();
        assert_eq!(doc.root_array().unwrap().id().offset(), 0);
        let inner = doc.root_array().unwrap().get(0).unwrap().as_object().unwrap();
        assert_eq!(inner.id().offset(), 8 + 9);
    }

    #[test]
    fn object_root_follows_the_array_region() {
        let doc = decode(r#"{"a":[1,2]}"#).unwrap();
        let root = doc.root_object().unwrap();
        assert_eq!(root.id().offset(), 8 + 2 * 9);
        assert_eq!(root.get("a").unwrap().value_type(), ValueType::Array);
    }

    #[test]
    fn decoded_document_accepts_appends() {
        let mut doc = decode("[1]").unwrap();
        let root = doc.root_array().unwrap().id();
        let extra = doc.add_array(1).unwrap();
        let slot = doc.array_slot(root, 0).unwrap();
        doc.value_mut(slot).set_array(extra);
        assert_eq!(doc.to_string(), "[[null]]");
    }
}
