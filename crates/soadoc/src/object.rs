//! Object views.
//!
//! An object is a count followed by that many 18-byte entries, each a value
//! slot plus a key. Lookup by key is a linear scan in entry order and returns
//! the first match, so duplicate keys are kept but shadowed.

use bstr::BStr;

use crate::document::{Document, ObjectId};
use crate::layout::{
    HEADER_SIZE, KEY_FLAG_OFFSET, KEY_OFFSET, OBJECT_ENTRY_SIZE, read_cstr, read_inline,
    read_offset, read_u8,
};
use crate::value::Value;

/// A shared view of an object.
#[derive(Clone, Copy)]
pub struct Object<'a> {
    doc: &'a Document,
    offset: usize,
}

impl<'a> Object<'a> {
    pub(crate) fn new(doc: &'a Document, offset: usize) -> Self {
        Self { doc, offset }
    }

    /// Offset handle of this object.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        ObjectId(self.offset)
    }

    /// Number of entries, fixed when the object was created.
    #[must_use]
    pub fn len(&self) -> usize {
        read_offset(&self.doc.data, self.offset)
    }

    /// `true` for `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, index: usize) -> usize {
        self.offset + HEADER_SIZE + index * OBJECT_ENTRY_SIZE
    }

    /// Raw key bytes of the `index`th entry.
    #[must_use]
    pub fn key_bstr_at(&self, index: usize) -> Option<&'a BStr> {
        if index >= self.len() {
            return None;
        }
        let data = &self.doc.data;
        let entry = self.entry(index);
        let key = if read_u8(data, entry + KEY_FLAG_OFFSET) == 0 {
            read_cstr(data, read_offset(data, entry + KEY_OFFSET))
        } else {
            read_inline(data, entry + KEY_OFFSET)
        };
        Some(BStr::new(key))
    }

    /// Key of the `index`th entry, or `None` past the end.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&'a str> {
        self.key_bstr_at(index)
            .and_then(|k| core::str::from_utf8(k).ok())
    }

    /// Value of the `index`th entry, or `None` past the end.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<Value<'a>> {
        (index < self.len()).then(|| Value::new(self.doc, self.entry(index)))
    }

    /// Value of the first entry whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value<'a>> {
        (0..self.len())
            .find(|&i| self.key_bstr_at(i).is_some_and(|k| k == key.as_bytes()))
            .and_then(|i| self.value_at(i))
    }

    /// Entries in order.
    #[must_use]
    pub fn iter(&self) -> Entries<'a> {
        Entries {
            object: *self,
            index: 0,
            len: self.len(),
        }
    }
}

impl<'a> IntoIterator for Object<'a> {
    type Item = (&'a str, Value<'a>);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over an object's `(key, value)` pairs.
///
/// Keys that are not valid UTF-8 are yielded as `""`.
#[derive(Clone)]
pub struct Entries<'a> {
    object: Object<'a>,
    index: usize,
    len: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, Value<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        let value = self.object.value_at(i)?;
        Some((self.object.key_at(i).unwrap_or(""), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Entries<'_> {}
