//! `serde::Serialize` for documents and views.
//!
//! Objects serialize as maps in entry order, duplicate keys included. Strings
//! that are not valid UTF-8 are passed on lossily.

use bstr::{BStr, ByteSlice};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::array::Array;
use crate::document::Document;
use crate::layout::{BoolState, ValueType};
use crate::object::Object;
use crate::value::Value;

/// A document without a root serializes as a unit (`null` in JSON).
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(object) = self.root_object() {
            object.serialize(serializer)
        } else if let Some(array) = self.root_array() {
            array.serialize(serializer)
        } else {
            serializer.serialize_unit()
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value_type() {
            ValueType::Bool => match self.as_bool_state() {
                BoolState::True => serializer.serialize_bool(true),
                BoolState::False => serializer.serialize_bool(false),
                BoolState::Null => serializer.serialize_unit(),
            },
            ValueType::Int => serializer.serialize_i64(self.as_i64()),
            ValueType::UInt => serializer.serialize_u64(self.as_u64()),
            ValueType::Float => serializer.serialize_f64(self.as_f64()),
            ValueType::Str | ValueType::InlineStr => {
                let s = self.as_bstr().unwrap_or(BStr::new(""));
                serializer.serialize_str(&s.to_str_lossy())
            }
            ValueType::Object => match self.as_object() {
                Some(object) => object.serialize(serializer),
                None => serializer.serialize_unit(),
            },
            ValueType::Array => match self.as_array() {
                Some(array) => array.serialize(serializer),
                None => serializer.serialize_unit(),
            },
        }
    }
}

impl Serialize for Object<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for i in 0..self.len() {
            let key = self.key_bstr_at(i).unwrap_or(BStr::new(""));
            if let Some(value) = self.value_at(i) {
                map.serialize_entry(&*key.to_str_lossy(), &value)?;
            }
        }
        map.end()
    }
}

impl Serialize for Array<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}
