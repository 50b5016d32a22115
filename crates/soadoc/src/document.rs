//! The document arena.
//!
//! A [`Document`] owns one contiguous byte buffer. Every container, entry and
//! long string lives in it and is referred to by its offset from the start of
//! the buffer, so growing (and possibly relocating) the buffer never
//! invalidates anything handed out earlier. Allocation is a monotonic bump:
//! nothing is ever freed or resized in place.

use alloc::vec::Vec;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::layout::{
    ARRAY_ENTRY_SIZE, HEADER_SIZE, INLINE_CAPACITY, KEY_FLAG_OFFSET, KEY_OFFSET,
    OBJECT_ENTRY_SIZE, RootKind, read_offset, write_inline, write_null, write_offset, write_u64,
};
use crate::object::Object;
use crate::options::DocumentOptions;
use crate::value::{Value, ValueMut};

/// Offset of a value slot. Valid only for the document that issued it.
///
/// Reads through an id from another document return arbitrary values or
/// `None`; writes through one may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub(crate) usize);

/// Offset of an object header. Valid only for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// Offset of an array header. Valid only for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayId(pub(crate) usize);

impl ValueId {
    /// Byte offset of the slot from the start of the arena.
    #[must_use]
    pub fn offset(self) -> usize {
        self.0
    }
}

impl ObjectId {
    /// Byte offset of the header from the start of the arena.
    #[must_use]
    pub fn offset(self) -> usize {
        self.0
    }
}

impl ArrayId {
    /// Byte offset of the header from the start of the arena.
    #[must_use]
    pub fn offset(self) -> usize {
        self.0
    }
}

/// A binary JSON-like document.
///
/// # Examples
///
/// ```rust
/// use soadoc::Document;
///
/// let mut doc = Document::new();
/// let root = doc.add_object(1).unwrap();
/// doc.set_root_object(root);
/// doc.set_key(root, 0, "answer").unwrap();
/// let slot = doc.object_slot(root, 0).unwrap();
/// doc.value_mut(slot).set_u64(42);
///
/// assert_eq!(doc.to_string(), r#"{"answer":42}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) data: Vec<u8>,
    root: usize,
    root_kind: RootKind,
    grow_factor: usize,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.root == other.root && self.root_kind == other.root_kind
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with no root.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), 0, RootKind::None)
    }

    /// Creates an empty document configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the initial capacity cannot be reserved.
    pub fn with_options(options: DocumentOptions) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(options.initial_capacity)
            .map_err(|e| Error::alloc(options.initial_capacity, e))?;
        Ok(Self {
            data,
            root: 0,
            root_kind: RootKind::None,
            grow_factor: options.grow_factor,
        })
    }

    /// Wraps a buffer that the decoder filled in one allocation.
    pub(crate) fn from_parts(data: Vec<u8>, root: usize, root_kind: RootKind) -> Self {
        Self {
            data,
            root,
            root_kind,
            grow_factor: DocumentOptions::default().grow_factor,
        }
    }

    /// Bytes in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if nothing has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes reserved by the arena.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The raw arena. The layout is private and unversioned.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bump-allocates `n` zeroed bytes and returns their offset.
    ///
    /// When the request does not fit, capacity becomes
    /// `(len + n) * grow_factor`. Offsets returned earlier stay valid.
    pub(crate) fn grow(&mut self, n: usize) -> Result<usize> {
        let start = self.data.len();
        let needed = start.checked_add(n).ok_or(Error::Alloc { requested: n })?;
        if needed > self.data.capacity() {
            let target = needed.saturating_mul(self.grow_factor.max(1));
            let old = self.data.capacity();
            self.data
                .try_reserve_exact(target - start)
                .map_err(|e| Error::alloc(target, e))?;
            tracing::trace!(old, new = self.data.capacity(), "document arena grew");
        }
        self.data.resize(needed, 0);
        Ok(start)
    }

    /// Appends `s` and a NUL terminator, returning the string's offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the arena cannot grow.
    pub fn add_string(&mut self, s: &str) -> Result<usize> {
        let offset = self.grow(s.len() + 1)?;
        self.data[offset..offset + s.len()].copy_from_slice(s.as_bytes());
        Ok(offset)
    }

    /// Appends an object with `len` entries, each a null value with an empty
    /// key. The entry count is fixed for the life of the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the arena cannot grow.
    pub fn add_object(&mut self, len: usize) -> Result<ObjectId> {
        let size = container_size(len, OBJECT_ENTRY_SIZE)?;
        let offset = self.grow(size)?;
        write_u64(&mut self.data, offset, len as u64);
        for i in 0..len {
            write_null(&mut self.data, offset + HEADER_SIZE + i * OBJECT_ENTRY_SIZE);
            // key flag set, key bytes zero: an inline empty key
            self.data[offset + HEADER_SIZE + i * OBJECT_ENTRY_SIZE + KEY_FLAG_OFFSET] = 1;
        }
        Ok(ObjectId(offset))
    }

    /// Appends an array with `len` null entries. The entry count is fixed for
    /// the life of the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the arena cannot grow.
    pub fn add_array(&mut self, len: usize) -> Result<ArrayId> {
        let size = container_size(len, ARRAY_ENTRY_SIZE)?;
        let offset = self.grow(size)?;
        write_u64(&mut self.data, offset, len as u64);
        for i in 0..len {
            write_null(&mut self.data, offset + HEADER_SIZE + i * ARRAY_ENTRY_SIZE);
        }
        Ok(ArrayId(offset))
    }

    /// Which container is the root.
    #[must_use]
    pub fn root_kind(&self) -> RootKind {
        self.root_kind
    }

    /// The root, if it is an object.
    #[must_use]
    pub fn root_object(&self) -> Option<Object<'_>> {
        match self.root_kind {
            RootKind::Object => Some(Object::new(self, self.root)),
            _ => None,
        }
    }

    /// The root, if it is an array.
    #[must_use]
    pub fn root_array(&self) -> Option<Array<'_>> {
        match self.root_kind {
            RootKind::Array => Some(Array::new(self, self.root)),
            _ => None,
        }
    }

    /// Makes `object` the document root.
    pub fn set_root_object(&mut self, object: ObjectId) {
        self.root = object.0;
        self.root_kind = RootKind::Object;
    }

    /// Makes `array` the document root.
    pub fn set_root_array(&mut self, array: ArrayId) {
        self.root = array.0;
        self.root_kind = RootKind::Array;
    }

    /// Read view of an object.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Object<'_> {
        Object::new(self, id.0)
    }

    /// Read view of an array.
    #[must_use]
    pub fn array(&self, id: ArrayId) -> Array<'_> {
        Array::new(self, id.0)
    }

    /// Read view of a value.
    #[must_use]
    pub fn value(&self, id: ValueId) -> Value<'_> {
        Value::new(self, id.0)
    }

    /// Write access to a value.
    ///
    /// # Panics
    ///
    /// The setters panic if `id` was not issued by this document and points
    /// past the end of its arena.
    pub fn value_mut(&mut self, id: ValueId) -> ValueMut<'_> {
        ValueMut::new(self, id.0)
    }

    /// Slot of the `index`th entry of `object`, or `None` past the end.
    #[must_use]
    pub fn object_slot(&self, object: ObjectId, index: usize) -> Option<ValueId> {
        self.object(object).value_at(index).map(|v| v.id())
    }

    /// Slot of the `index`th element of `array`, or `None` past the end.
    #[must_use]
    pub fn array_slot(&self, array: ArrayId, index: usize) -> Option<ValueId> {
        self.array(array).get(index).map(|v| v.id())
    }

    /// Sets the key of the `index`th entry of `object`.
    ///
    /// Keys shorter than eight bytes are stored inline in the entry; longer
    /// keys are appended to the arena. A previous long key is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the object's fixed length and
    /// [`Error::Alloc`] if a long key cannot be stored.
    ///
    /// # Panics
    ///
    /// If `object` was not issued by this document and its count field reads
    /// as a length that runs past the end of the arena.
    pub fn set_key(&mut self, object: ObjectId, index: usize, key: &str) -> Result<()> {
        let length = self.object(object).len();
        if index >= length {
            return Err(Error::IndexOutOfBounds { index, length });
        }
        let entry = object.0 + HEADER_SIZE + index * OBJECT_ENTRY_SIZE;
        if key.len() < INLINE_CAPACITY {
            write_inline(&mut self.data, entry + KEY_OFFSET, key.as_bytes());
            self.data[entry + KEY_FLAG_OFFSET] = 1;
        } else {
            // the arena may move here; `entry` is an offset and survives it
            let s = self.add_string(key)?;
            write_offset(&mut self.data, entry + KEY_OFFSET, s);
            self.data[entry + KEY_FLAG_OFFSET] = 0;
        }
        Ok(())
    }

    /// Offset stored in a container-valued slot.
    pub(crate) fn slot_target(&self, slot: usize) -> usize {
        read_offset(&self.data, slot)
    }
}

fn container_size(len: usize, entry_size: usize) -> Result<usize> {
    len.checked_mul(entry_size)
        .and_then(|n| n.checked_add(HEADER_SIZE))
        .ok_or(Error::Alloc {
            requested: usize::MAX,
        })
}
