//! Second pass: write every value straight into its final position.
//!
//! The buffer was sized and zeroed from the [`Plan`], so the writer only moves
//! three region cursors forward. A container's position is taken from its
//! region cursor the moment it opens, which is before any of its children are
//! visited, and its length comes from the table the sizing pass filled. No
//! offset is ever patched after the fact.

use crate::layout::{
    ARRAY_ENTRY_SIZE, BoolState, HEADER_SIZE, INLINE_CAPACITY, KEY_FLAG_OFFSET, KEY_OFFSET,
    OBJECT_ENTRY_SIZE, PAYLOAD_SIZE, TAG_OFFSET, ValueType, read_offset, write_inline, write_offset,
    write_u64,
};

use super::escape::unescape_into;
use super::number::Number;
use super::parser::Visitor;
use super::sizing::Plan;

pub(crate) struct Writer<'d> {
    data: &'d mut [u8],
    plan: &'d Plan,
    next_array: usize,
    next_object: usize,
    array_cursor: usize,
    object_cursor: usize,
    string_cursor: usize,
}

impl<'d> Writer<'d> {
    pub(crate) fn new(data: &'d mut [u8], plan: &'d Plan) -> Self {
        debug_assert_eq!(data.len(), plan.total);
        Self {
            data,
            plan,
            next_array: 0,
            next_object: 0,
            array_cursor: 0,
            object_cursor: plan.object_base,
            string_cursor: plan.string_base,
        }
    }

    fn set_tag(&mut self, slot: usize, ty: ValueType) {
        self.data[slot + TAG_OFFSET] = ty as u8;
    }

    /// Stores a string in the 8-byte field at `at` and reports whether it
    /// went inline.
    fn store_string(&mut self, at: usize, raw: &[u8]) -> bool {
        if raw.len() < INLINE_CAPACITY {
            let mut inline = [0u8; INLINE_CAPACITY];
            let n = unescape_into(raw, &mut inline);
            write_inline(self.data, at, &inline[..n]);
            true
        } else {
            let start = self.string_cursor;
            let end = start + raw.len();
            // the terminator and any slack are already zero
            unescape_into(raw, &mut self.data[start..end]);
            self.string_cursor = end + 1;
            write_offset(self.data, at, start);
            false
        }
    }
}

impl Visitor for Writer<'_> {
    /// Offset of the slot being filled.
    type Slot = usize;
    /// Header offset of the open container.
    type Frame = usize;

    fn begin_array(&mut self, slot: Option<usize>) -> usize {
        let len = self.plan.arrays[self.next_array];
        self.next_array += 1;
        let header = self.array_cursor;
        self.array_cursor += HEADER_SIZE + len * ARRAY_ENTRY_SIZE;
        write_offset(self.data, header, len);
        if let Some(slot) = slot {
            write_offset(self.data, slot, header);
            self.set_tag(slot, ValueType::Array);
        }
        header
    }

    fn array_slot(&mut self, frame: &usize, index: usize) -> usize {
        frame + HEADER_SIZE + index * ARRAY_ENTRY_SIZE
    }

    fn end_array(&mut self, frame: usize, len: usize) {
        debug_assert_eq!(read_offset(self.data, frame), len);
    }

    fn begin_object(&mut self, slot: Option<usize>) -> usize {
        let len = self.plan.objects[self.next_object];
        self.next_object += 1;
        let header = self.object_cursor;
        self.object_cursor += HEADER_SIZE + len * OBJECT_ENTRY_SIZE;
        write_offset(self.data, header, len);
        if let Some(slot) = slot {
            write_offset(self.data, slot, header);
            self.set_tag(slot, ValueType::Object);
        }
        header
    }

    fn object_slot(&mut self, frame: &usize, index: usize, key: &[u8]) -> usize {
        let entry = frame + HEADER_SIZE + index * OBJECT_ENTRY_SIZE;
        let inline = self.store_string(entry + KEY_OFFSET, key);
        self.data[entry + KEY_FLAG_OFFSET] = u8::from(inline);
        entry
    }

    fn end_object(&mut self, frame: usize, len: usize) {
        debug_assert_eq!(read_offset(self.data, frame), len);
    }

    fn string(&mut self, slot: usize, raw: &[u8]) {
        let ty = if self.store_string(slot, raw) {
            ValueType::InlineStr
        } else {
            ValueType::Str
        };
        self.set_tag(slot, ty);
    }

    fn number(&mut self, slot: usize, lexeme: &str) {
        let (ty, bits) = match Number::parse(lexeme) {
            Number::Int(n) => (ValueType::Int, u64::from_le_bytes(n.to_le_bytes())),
            Number::UInt(n) => (ValueType::UInt, n),
            Number::Float(f) => (ValueType::Float, f.to_bits()),
        };
        write_u64(self.data, slot, bits);
        self.set_tag(slot, ty);
    }

    fn literal(&mut self, slot: usize, state: BoolState) {
        self.data[slot..slot + PAYLOAD_SIZE].fill(0);
        self.data[slot] = state.to_byte();
        self.set_tag(slot, ValueType::Bool);
    }
}
