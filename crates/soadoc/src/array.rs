//! Array views.

use crate::document::{ArrayId, Document};
use crate::layout::{ARRAY_ENTRY_SIZE, HEADER_SIZE, read_offset};
use crate::value::Value;

/// A shared view of an array.
#[derive(Clone, Copy)]
pub struct Array<'a> {
    doc: &'a Document,
    offset: usize,
}

impl<'a> Array<'a> {
    pub(crate) fn new(doc: &'a Document, offset: usize) -> Self {
        Self { doc, offset }
    }

    /// Offset handle of this array.
    #[must_use]
    pub fn id(&self) -> ArrayId {
        ArrayId(self.offset)
    }

    /// Number of elements, fixed when the array was created.
    #[must_use]
    pub fn len(&self) -> usize {
        read_offset(&self.doc.data, self.offset)
    }

    /// `true` for `[]`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`th element, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        (index < self.len())
            .then(|| Value::new(self.doc, self.offset + HEADER_SIZE + index * ARRAY_ENTRY_SIZE))
    }

    /// Elements in order.
    #[must_use]
    pub fn iter(&self) -> Elements<'a> {
        Elements {
            array: *self,
            index: 0,
            len: self.len(),
        }
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = Value<'a>;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Debug for Array<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over an array's elements.
#[derive(Clone)]
pub struct Elements<'a> {
    array: Array<'a>,
    index: usize,
    len: usize,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = (self.index < self.len).then(|| self.array.get(self.index))??;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Elements<'_> {}
