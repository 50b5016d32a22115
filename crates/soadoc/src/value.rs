//! Value handles.
//!
//! A value is a 9-byte slot somewhere in the arena: an 8-byte payload followed
//! by a [`ValueType`] tag. [`Value`] reads a slot through a shared borrow of
//! the document; [`ValueMut`] rewrites it in place.
//!
//! # Coercion
//!
//! The plain getters never fail. When the stored type differs from the one
//! asked for, numbers convert into each other with `as` semantics (floats
//! truncate toward zero and saturate, integers reinterpret), booleans read as
//! `0`/`1`, and a number read as a boolean is `true` when greater than zero.
//! A request that makes no structural sense (a string read as an array, an
//! object read as a number) yields the zero value for scalars and `None` for
//! strings and containers.
//!
//! The `try_*` getters are the strict counterpart: they accept the stored type
//! and lossless numeric widening only, and report
//! [`Error::TypeMismatch`] otherwise.

use bstr::BStr;

use crate::array::Array;
use crate::document::{ArrayId, Document, ObjectId, ValueId};
use crate::error::{Error, Result};
use crate::layout::{
    BoolState, INLINE_CAPACITY, TAG_OFFSET, ValueType, read_cstr, read_inline,
    read_offset, read_u64, read_u8, write_inline, write_offset, write_u64,
};
use crate::object::Object;

/// A shared view of one value slot.
#[derive(Clone, Copy)]
pub struct Value<'a> {
    doc: &'a Document,
    offset: usize,
}

impl<'a> Value<'a> {
    pub(crate) fn new(doc: &'a Document, offset: usize) -> Self {
        Self { doc, offset }
    }

    /// Offset handle for this slot, usable with [`Document::value_mut`].
    #[must_use]
    pub fn id(&self) -> ValueId {
        ValueId(self.offset)
    }

    /// Type tag of the stored value. An unreadable tag reads as
    /// [`ValueType::Bool`].
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        ValueType::from_tag(read_u8(&self.doc.data, self.offset + TAG_OFFSET))
            .unwrap_or(ValueType::Bool)
    }

    fn payload_u64(&self) -> u64 {
        read_u64(&self.doc.data, self.offset)
    }

    fn payload_i64(&self) -> i64 {
        i64::from_le_bytes(self.payload_u64().to_le_bytes())
    }

    fn payload_f64(&self) -> f64 {
        f64::from_bits(self.payload_u64())
    }

    fn payload_bool(&self) -> BoolState {
        BoolState::from_byte(read_u8(&self.doc.data, self.offset))
    }

    /// `true` if the slot holds `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.value_type() == ValueType::Bool && self.payload_bool() == BoolState::Null
    }

    /// Reads the slot as `true`/`false`/`null`.
    ///
    /// Numbers read as [`BoolState::True`] when greater than zero; strings and
    /// containers read as [`BoolState::Null`].
    #[must_use]
    pub fn as_bool_state(&self) -> BoolState {
        match self.value_type() {
            ValueType::Bool => self.payload_bool(),
            ValueType::Int => (self.payload_i64() > 0).into(),
            ValueType::UInt => (self.payload_u64() > 0).into(),
            ValueType::Float => (self.payload_f64() > 0.0).into(),
            _ => BoolState::Null,
        }
    }

    /// `true` only when [`as_bool_state`](Self::as_bool_state) is
    /// [`BoolState::True`].
    #[must_use]
    pub fn as_bool(&self) -> bool {
        self.as_bool_state() == BoolState::True
    }

    /// Reads the slot as a signed integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn as_i64(&self) -> i64 {
        match self.value_type() {
            ValueType::Int => self.payload_i64(),
            ValueType::UInt => self.payload_u64() as i64,
            ValueType::Float => self.payload_f64() as i64,
            ValueType::Bool => i64::from(self.as_bool()),
            _ => 0,
        }
    }

    /// Reads the slot as an unsigned integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_u64(&self) -> u64 {
        match self.value_type() {
            ValueType::UInt => self.payload_u64(),
            ValueType::Int => self.payload_i64() as u64,
            ValueType::Float => self.payload_f64() as u64,
            ValueType::Bool => u64::from(self.as_bool()),
            _ => 0,
        }
    }

    /// Reads the slot as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match self.value_type() {
            ValueType::Float => self.payload_f64(),
            ValueType::Int => self.payload_i64() as f64,
            ValueType::UInt => self.payload_u64() as f64,
            ValueType::Bool => f64::from(u8::from(self.as_bool())),
            _ => 0.0,
        }
    }

    /// Raw bytes of a string value, inline or arena-stored.
    #[must_use]
    pub fn as_bstr(&self) -> Option<&'a BStr> {
        let data = &self.doc.data;
        match self.value_type() {
            ValueType::InlineStr => Some(BStr::new(read_inline(data, self.offset))),
            ValueType::Str => Some(BStr::new(read_cstr(data, read_offset(data, self.offset)))),
            _ => None,
        }
    }

    /// A string value, or `None` for any other type.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bstr().and_then(|s| core::str::from_utf8(s).ok())
    }

    /// An object value.
    #[must_use]
    pub fn as_object(&self) -> Option<Object<'a>> {
        match self.value_type() {
            ValueType::Object => Some(Object::new(self.doc, self.doc.slot_target(self.offset))),
            _ => None,
        }
    }

    /// An array value.
    #[must_use]
    pub fn as_array(&self) -> Option<Array<'a>> {
        match self.value_type() {
            ValueType::Array => Some(Array::new(self.doc, self.doc.slot_target(self.offset))),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            found: if self.is_null() {
                "null"
            } else {
                self.value_type().name()
            },
        }
    }

    /// Strict boolean read; `null` is a mismatch.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the slot holds `true` or `false`.
    pub fn try_bool(&self) -> Result<bool> {
        match (self.value_type(), self.payload_bool()) {
            (ValueType::Bool, BoolState::True) => Ok(true),
            (ValueType::Bool, BoolState::False) => Ok(false),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Strict signed read. Unsigned values that fit are accepted.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for any other type or an unsigned value above
    /// `i64::MAX`.
    pub fn try_i64(&self) -> Result<i64> {
        match self.value_type() {
            ValueType::Int => Ok(self.payload_i64()),
            ValueType::UInt => {
                i64::try_from(self.payload_u64()).map_err(|_| self.mismatch("int"))
            }
            _ => Err(self.mismatch("int")),
        }
    }

    /// Strict unsigned read. Non-negative signed values are accepted.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for any other type or a negative value.
    pub fn try_u64(&self) -> Result<u64> {
        match self.value_type() {
            ValueType::UInt => Ok(self.payload_u64()),
            ValueType::Int => u64::try_from(self.payload_i64()).map_err(|_| self.mismatch("uint")),
            _ => Err(self.mismatch("uint")),
        }
    }

    /// Strict float read. Integers widen.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-numeric values.
    pub fn try_f64(&self) -> Result<f64> {
        match self.value_type() {
            ValueType::Float | ValueType::Int | ValueType::UInt => Ok(self.as_f64()),
            _ => Err(self.mismatch("float")),
        }
    }

    /// Strict string read.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-string values.
    pub fn try_str(&self) -> Result<&'a str> {
        self.as_str().ok_or_else(|| self.mismatch("str"))
    }

    /// Strict object read.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-object values.
    pub fn try_object(&self) -> Result<Object<'a>> {
        self.as_object().ok_or_else(|| self.mismatch("object"))
    }

    /// Strict array read.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-array values.
    pub fn try_array(&self) -> Result<Array<'a>> {
        self.as_array().ok_or_else(|| self.mismatch("array"))
    }
}

impl core::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.value_type() {
            ValueType::Bool => match self.payload_bool() {
                BoolState::Null => f.write_str("null"),
                b => write!(f, "{}", b == BoolState::True),
            },
            ValueType::Int => write!(f, "{}", self.payload_i64()),
            ValueType::UInt => write!(f, "{}u", self.payload_u64()),
            ValueType::Float => write!(f, "{:?}", self.payload_f64()),
            ValueType::Str | ValueType::InlineStr => {
                write!(f, "{:?}", self.as_bstr().unwrap_or(BStr::new("")))
            }
            ValueType::Object => write!(f, "object({})", self.as_object().map_or(0, |o| o.len())),
            ValueType::Array => write!(f, "array({})", self.as_array().map_or(0, |a| a.len())),
        }
    }
}

/// Exclusive write access to one value slot.
///
/// Setters overwrite the tag and payload in place. A string that does not fit
/// inline is appended to the arena; whatever the slot held before is never
/// reclaimed.
pub struct ValueMut<'a> {
    doc: &'a mut Document,
    offset: usize,
}

impl<'a> ValueMut<'a> {
    pub(crate) fn new(doc: &'a mut Document, offset: usize) -> Self {
        Self { doc, offset }
    }

    /// Offset handle for this slot.
    #[must_use]
    pub fn id(&self) -> ValueId {
        ValueId(self.offset)
    }

    /// Read view of the slot as it currently is.
    #[must_use]
    pub fn as_value(&self) -> Value<'_> {
        Value::new(self.doc, self.offset)
    }

    fn set_tag(&mut self, ty: ValueType) {
        self.doc.data[self.offset + TAG_OFFSET] = ty as u8;
    }

    fn set_payload(&mut self, bits: u64) {
        write_u64(&mut self.doc.data, self.offset, bits);
    }

    /// Stores `true`, `false` or `null`.
    pub fn set_bool_state(&mut self, state: BoolState) {
        self.set_tag(ValueType::Bool);
        self.set_payload(u64::from(state.to_byte()));
    }

    /// Stores `null`.
    pub fn set_null(&mut self) {
        self.set_bool_state(BoolState::Null);
    }

    /// Stores a boolean.
    pub fn set_bool(&mut self, value: bool) {
        self.set_bool_state(value.into());
    }

    /// Stores a signed integer.
    pub fn set_i64(&mut self, value: i64) {
        self.set_tag(ValueType::Int);
        self.set_payload(u64::from_le_bytes(value.to_le_bytes()));
    }

    /// Stores an unsigned integer.
    pub fn set_u64(&mut self, value: u64) {
        self.set_tag(ValueType::UInt);
        self.set_payload(value);
    }

    /// Stores a float.
    pub fn set_f64(&mut self, value: f64) {
        self.set_tag(ValueType::Float);
        self.set_payload(value.to_bits());
    }

    /// Stores a string, inline when shorter than eight bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`] if a long string cannot be appended.
    pub fn set_str(&mut self, value: &str) -> Result<()> {
        if value.len() < INLINE_CAPACITY {
            write_inline(&mut self.doc.data, self.offset, value.as_bytes());
            self.set_tag(ValueType::InlineStr);
        } else {
            let s = self.doc.add_string(value)?;
            write_offset(&mut self.doc.data, self.offset, s);
            self.set_tag(ValueType::Str);
        }
        Ok(())
    }

    /// Points the slot at an object.
    pub fn set_object(&mut self, object: ObjectId) {
        write_offset(&mut self.doc.data, self.offset, object.0);
        self.set_tag(ValueType::Object);
    }

    /// Points the slot at an array.
    pub fn set_array(&mut self, array: ArrayId) {
        write_offset(&mut self.doc.data, self.offset, array.0);
        self.set_tag(ValueType::Array);
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use rstest::rstest;

    use super::*;

    fn doc_with_slot() -> (Document, ValueId) {
        let mut doc = Document::new();
        let arr = doc.add_array(1).unwrap();
        doc.set_root_array(arr);
        let slot = doc.array_slot(arr, 0).unwrap();
        (doc, slot)
    }

    #[test]
    fn fresh_slot_is_null() {
        let (doc, slot) = doc_with_slot();
        let v = doc.value(slot);
        assert!(v.is_null());
        assert_eq!(v.as_bool_state(), BoolState::Null);
        assert_eq!(v.as_i64(), 0);
    }

    #[rstest]
    #[case(-7, false, -7.0)]
    #[case(0, false, 0.0)]
    #[case(3, true, 3.0)]
    fn int_coerces(#[case] n: i64, #[case] truthy: bool, #[case] f: f64) {
        let (mut doc, slot) = doc_with_slot();
        doc.value_mut(slot).set_i64(n);
        let v = doc.value(slot);
        assert_eq!(v.as_bool(), truthy);
        assert_eq!(v.as_f64(), f);
        assert_eq!(v.as_str(), None);
        assert!(v.as_array().is_none());
    }

    #[test]
    fn float_truncates_toward_zero() {
        let (mut doc, slot) = doc_with_slot();
        doc.value_mut(slot).set_f64(-2.9);
        assert_eq!(doc.value(slot).as_i64(), -2);
        doc.value_mut(slot).set_f64(2.9);
        assert_eq!(doc.value(slot).as_u64(), 2);
    }

    #[test]
    fn bool_reads_as_zero_or_one() {
        let (mut doc, slot) = doc_with_slot();
        doc.value_mut(slot).set_bool(true);
        assert_eq!(doc.value(slot).as_u64(), 1);
        assert_eq!(doc.value(slot).as_f64(), 1.0);
        doc.value_mut(slot).set_bool(false);
        assert_eq!(doc.value(slot).as_i64(), 0);
    }

    #[test]
    fn strings_switch_storage_at_eight_bytes() {
        let (mut doc, slot) = doc_with_slot();
        let before = doc.len();
        doc.value_mut(slot).set_str("1234567").unwrap();
        assert_eq!(doc.value(slot).value_type(), ValueType::InlineStr);
        assert_eq!(doc.len(), before);

        doc.value_mut(slot).set_str("12345678").unwrap();
        assert_eq!(doc.value(slot).value_type(), ValueType::Str);
        assert_eq!(doc.len(), before + 9);
        assert_eq!(doc.value(slot).as_str(), Some("12345678"));

        // overwriting never reclaims the old string
        doc.value_mut(slot).set_str("abcdefghij").unwrap();
        assert_eq!(doc.len(), before + 9 + 11);
    }

    #[test]
    fn strings_read_as_zero_numbers() {
        let (mut doc, slot) = doc_with_slot();
        doc.value_mut(slot).set_str("12").unwrap();
        let v = doc.value(slot);
        assert_eq!(v.as_i64(), 0);
        assert_eq!(v.as_bool_state(), BoolState::Null);
    }

    #[test]
    fn strict_getters_report_mismatch() {
        let (mut doc, slot) = doc_with_slot();
        assert_eq!(
            doc.value(slot).try_bool(),
            Err(Error::TypeMismatch {
                expected: "bool",
                found: "null"
            })
        );
        doc.value_mut(slot).set_u64(u64::MAX);
        assert!(doc.value(slot).try_i64().is_err());
        assert_eq!(doc.value(slot).try_u64(), Ok(u64::MAX));
        doc.value_mut(slot).set_i64(-1);
        assert!(doc.value(slot).try_u64().is_err());
        assert_eq!(doc.value(slot).try_f64(), Ok(-1.0));
        assert!(doc.value(slot).try_str().is_err());
    }

    #[test]
    fn containers_link_by_offset() {
        let (mut doc, slot) = doc_with_slot();
        let inner = doc.add_array(2).unwrap();
        doc.value_mut(slot).set_array(inner);
        let arr = doc.value(slot).as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.id(), inner);
        assert!(doc.value(slot).as_object().is_none());
    }

    #[test]
    fn debug_shows_logical_value() {
        let (mut doc, slot) = doc_with_slot();
        doc.value_mut(slot).set_u64(5);
        assert_eq!(format!("{:?}", doc.value(slot)), "5u");
        doc.value_mut(slot).set_str("hi").unwrap();
        assert_eq!(format!("{:?}", doc.value(slot)), "\"hi\"");
    }
}
