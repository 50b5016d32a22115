//! First pass: count everything, allocate nothing in the document.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::layout::{ARRAY_ENTRY_SIZE, BoolState, HEADER_SIZE, INLINE_CAPACITY, OBJECT_ENTRY_SIZE};

use super::parser::Visitor;

/// Records container lengths in discovery order and accumulates the totals
/// the final buffer is sized from.
pub(crate) struct Sizer {
    arrays: Vec<usize>,
    objects: Vec<usize>,
    array_entries: usize,
    object_entries: usize,
    long_strings: usize,
    string_bytes: usize,
}

/// Where each region of the decoded buffer starts, and how long every
/// container is.
#[derive(Debug)]
pub(crate) struct Plan {
    pub(crate) arrays: Vec<usize>,
    pub(crate) objects: Vec<usize>,
    pub(crate) object_base: usize,
    pub(crate) string_base: usize,
    pub(crate) total: usize,
}

impl Sizer {
    pub(crate) fn new(table_capacity: usize) -> Self {
        Self {
            arrays: Vec::with_capacity(table_capacity),
            objects: Vec::with_capacity(table_capacity),
            array_entries: 0,
            object_entries: 0,
            long_strings: 0,
            string_bytes: 0,
        }
    }

    fn count_string(&mut self, raw: &[u8]) {
        // sized by the escaped length; decoding only ever shrinks it
        if raw.len() >= INLINE_CAPACITY {
            self.long_strings += 1;
            self.string_bytes += raw.len() + 1;
        }
    }

    /// Lays the regions out back to back: array containers, then object
    /// containers, then string bytes.
    pub(crate) fn finish(self) -> Result<Plan> {
        let region = |count: usize, entries: usize, entry_size: usize| {
            count
                .checked_mul(HEADER_SIZE)?
                .checked_add(entries.checked_mul(entry_size)?)
        };
        let array_bytes =
            region(self.arrays.len(), self.array_entries, ARRAY_ENTRY_SIZE).ok_or_else(too_large)?;
        let object_bytes = region(self.objects.len(), self.object_entries, OBJECT_ENTRY_SIZE)
            .ok_or_else(too_large)?;
        let string_base = array_bytes.checked_add(object_bytes).ok_or_else(too_large)?;
        let total = string_base
            .checked_add(self.string_bytes)
            .ok_or_else(too_large)?;
        tracing::debug!(
            arrays = self.arrays.len(),
            array_entries = self.array_entries,
            objects = self.objects.len(),
            object_entries = self.object_entries,
            long_strings = self.long_strings,
            string_bytes = self.string_bytes,
            total,
            "sizing pass complete"
        );
        Ok(Plan {
            arrays: self.arrays,
            objects: self.objects,
            object_base: array_bytes,
            string_base,
            total,
        })
    }
}

fn too_large() -> Error {
    Error::Alloc {
        requested: usize::MAX,
    }
}

impl Visitor for Sizer {
    type Slot = ();
    /// Index of the container in its kind's table.
    type Frame = usize;

    fn begin_array(&mut self, _slot: Option<()>) -> usize {
        self.arrays.push(0);
        self.arrays.len() - 1
    }

    fn array_slot(&mut self, _frame: &usize, _index: usize) {}

    fn end_array(&mut self, frame: usize, len: usize) {
        self.arrays[frame] = len;
        self.array_entries += len;
    }

    fn begin_object(&mut self, _slot: Option<()>) -> usize {
        self.objects.push(0);
        self.objects.len() - 1
    }

    fn object_slot(&mut self, _frame: &usize, _index: usize, key: &[u8]) {
        self.count_string(key);
    }

    fn end_object(&mut self, frame: usize, len: usize) {
        self.objects[frame] = len;
        self.object_entries += len;
    }

    fn string(&mut self, _slot: (), raw: &[u8]) {
        self.count_string(raw);
    }

    fn number(&mut self, _slot: (), _lexeme: &str) {}

    fn literal(&mut self, _slot: (), _state: BoolState) {}
}
