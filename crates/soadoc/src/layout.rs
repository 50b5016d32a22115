//! Byte layout of a document.
//!
//! All multi-byte fields are little-endian and unaligned; every access goes
//! through the helpers here with a buffer slice and an offset, never through
//! a stored address.
//!
//! ```text
//! container header   [count: u64]
//! value slot         [payload: 8][tag: u8]
//! array entry        [slot]
//! object entry       [slot][key_inline: u8][key: 8]
//! string             [bytes...][0]
//! ```
//!
//! A slot payload holds a bool state, an `i64`, a `u64`, an `f64`, an offset
//! (long string, object, array) or up to seven inline string bytes plus a
//! terminator. An object key is inline under the same rule, otherwise it is the
//! offset of a NUL-terminated string.

/// Size of a container's leading element count.
pub(crate) const HEADER_SIZE: usize = 8;
/// Size of a value slot's payload.
pub(crate) const PAYLOAD_SIZE: usize = 8;
/// Payload plus tag byte.
pub(crate) const SLOT_SIZE: usize = PAYLOAD_SIZE + 1;
pub(crate) const ARRAY_ENTRY_SIZE: usize = SLOT_SIZE;
pub(crate) const OBJECT_ENTRY_SIZE: usize = SLOT_SIZE + 1 + PAYLOAD_SIZE;

pub(crate) const TAG_OFFSET: usize = PAYLOAD_SIZE;
pub(crate) const KEY_FLAG_OFFSET: usize = SLOT_SIZE;
pub(crate) const KEY_OFFSET: usize = SLOT_SIZE + 1;

/// Strings whose byte length is below this are stored inside the slot.
pub(crate) const INLINE_CAPACITY: usize = PAYLOAD_SIZE;

/// Bool-or-null payload byte values.
pub(crate) const BOOL_FALSE: u8 = 0;
pub(crate) const BOOL_TRUE: u8 = 1;
pub(crate) const BOOL_NULL: u8 = 2;

/// Type tag stored after each value payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    /// `true`, `false` or `null`.
    Bool = 0,
    /// Signed 64-bit integer.
    Int = 1,
    /// Unsigned 64-bit integer.
    UInt = 2,
    /// 64-bit float.
    Float = 3,
    /// String stored in the arena, payload is its offset.
    Str = 4,
    /// String of at most seven bytes stored in the payload itself.
    InlineStr = 5,
    /// Object, payload is its header offset.
    Object = 6,
    /// Array, payload is its header offset.
    Array = 7,
}

impl ValueType {
    /// Decodes a tag byte.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ValueType::Bool,
            1 => ValueType::Int,
            2 => ValueType::UInt,
            3 => ValueType::Float,
            4 => ValueType::Str,
            5 => ValueType::InlineStr,
            6 => ValueType::Object,
            7 => ValueType::Array,
            _ => return None,
        })
    }

    /// Short name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::UInt => "uint",
            ValueType::Float => "float",
            ValueType::Str | ValueType::InlineStr => "str",
            ValueType::Object => "object",
            ValueType::Array => "array",
        }
    }

    /// `true` for both string representations.
    #[must_use]
    pub fn is_string(self) -> bool {
        matches!(self, ValueType::Str | ValueType::InlineStr)
    }
}

/// The three states of a bool-or-null slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolState {
    /// `false`
    False,
    /// `true`
    True,
    /// `null`
    Null,
}

impl BoolState {
    pub(crate) fn from_byte(b: u8) -> Self {
        match b {
            BOOL_FALSE => BoolState::False,
            BOOL_TRUE => BoolState::True,
            _ => BoolState::Null,
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        match self {
            BoolState::False => BOOL_FALSE,
            BoolState::True => BOOL_TRUE,
            BoolState::Null => BOOL_NULL,
        }
    }
}

impl From<bool> for BoolState {
    fn from(b: bool) -> Self {
        if b { BoolState::True } else { BoolState::False }
    }
}

/// Which container, if any, is the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RootKind {
    /// Empty document.
    #[default]
    None,
    /// Root is an object.
    Object,
    /// Root is an array.
    Array,
}

#[inline]
pub(crate) fn read_u64(data: &[u8], offset: usize) -> u64 {
    offset
        .checked_add(8)
        .and_then(|end| data.get(offset..end))
        .and_then(|b| b.try_into().ok())
        .map_or(0, u64::from_le_bytes)
}

#[inline]
pub(crate) fn write_u64(data: &mut [u8], offset: usize, value: u64) {
    data[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn read_u8(data: &[u8], offset: usize) -> u8 {
    data.get(offset).copied().unwrap_or(0)
}

#[inline]
pub(crate) fn read_offset(data: &[u8], offset: usize) -> usize {
    usize::try_from(read_u64(data, offset)).unwrap_or(usize::MAX)
}

#[inline]
pub(crate) fn write_offset(data: &mut [u8], offset: usize, value: usize) {
    write_u64(data, offset, value as u64);
}

/// Bytes of the NUL-terminated run starting at `offset`, without the
/// terminator. Stops at the end of `data` if no terminator is found.
pub(crate) fn read_cstr(data: &[u8], offset: usize) -> &[u8] {
    let Some(tail) = data.get(offset..) else {
        return &[];
    };
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    &tail[..end]
}

/// Bytes of an inline string held in the 8-byte payload at `offset`.
pub(crate) fn read_inline(data: &[u8], offset: usize) -> &[u8] {
    let Some(payload) = offset
        .checked_add(PAYLOAD_SIZE)
        .and_then(|end| data.get(offset..end))
    else {
        return &[];
    };
    let end = payload.iter().position(|&b| b == 0).unwrap_or(PAYLOAD_SIZE);
    &payload[..end]
}

/// Writes `bytes` (shorter than [`INLINE_CAPACITY`]) into the payload at
/// `offset`, zero-filling the rest.
pub(crate) fn write_inline(data: &mut [u8], offset: usize, bytes: &[u8]) {
    debug_assert!(bytes.len() < INLINE_CAPACITY);
    let payload = &mut data[offset..offset + PAYLOAD_SIZE];
    payload.fill(0);
    payload[..bytes.len()].copy_from_slice(bytes);
}

/// Writes a null slot at `offset`.
pub(crate) fn write_null(data: &mut [u8], offset: usize) {
    data[offset..offset + PAYLOAD_SIZE].fill(0);
    data[offset] = BOOL_NULL;
    data[offset + TAG_OFFSET] = ValueType::Bool as u8;
}
