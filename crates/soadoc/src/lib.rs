//! An offset-addressed binary document format for JSON-like trees.
//!
//! A [`Document`] keeps every object, array, entry and long string in one
//! growable byte buffer and refers to all of them by offset, never by address.
//! The buffer can be reallocated at any time without invalidating anything.
//!
//! Documents are built either by hand, through [`Document::add_object`],
//! [`Document::add_array`] and the [`ValueMut`] setters, or from JSON text with
//! [`decode`]. The decoder sizes the whole document in a first pass and then
//! writes it into a single allocation in a second one. [`encode`] turns a
//! document back into text.
//!
//! ```rust
//! use soadoc::{EncodeOptions, decode, encode};
//!
//! let doc = decode(r#"{"name": "soadoc", "tags": ["arena", "json"]}"#).unwrap();
//! let root = doc.root_object().unwrap();
//! assert_eq!(root.get("name").unwrap().as_str(), Some("soadoc"));
//!
//! let text = encode(&doc, EncodeOptions::default()).unwrap();
//! assert_eq!(text, r#"{"name":"soadoc","tags":["arena","json"]}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod array;
mod decode;
mod document;
mod encode;
mod error;
mod layout;
mod object;
mod options;
#[cfg(feature = "serde")]
mod ser;
mod value;

#[cfg(test)]
mod tests;

pub use array::{Array, Elements};
pub use decode::{decode, decode_with};
pub use document::{ArrayId, Document, ObjectId, ValueId};
pub use encode::{encode, encode_to};
pub use error::{DecodeError, Error, Result, SyntaxError};
pub use layout::{BoolState, RootKind, ValueType};
pub use object::{Entries, Object};
pub use options::{DecodeOptions, DocumentOptions, EncodeOptions};
pub use value::{Value, ValueMut};
