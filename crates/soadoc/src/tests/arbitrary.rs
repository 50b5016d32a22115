//! An owned value tree used as the reference model in property tests.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen};

use crate::{ArrayId, Document, ObjectId, Value, ValueId, ValueType};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tree {
    Null,
    Bool(bool),
    /// Always negative; a non-negative literal decodes as unsigned.
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

/// A tree whose root is a container, the only kind a document can hold.
#[derive(Clone, Debug)]
pub(crate) struct RootTree(pub(crate) Tree);

/// Strings cannot carry NUL: the stored form is NUL-terminated.
fn text(g: &mut Gen) -> String {
    String::arbitrary(g).replace('\0', "")
}

fn scalar(g: &mut Gen) -> Tree {
    match usize::arbitrary(g) % 6 {
        0 => Tree::Null,
        1 => Tree::Bool(bool::arbitrary(g)),
        2 => Tree::Int(i64::arbitrary(g).checked_abs().map_or(i64::MIN, |n| -n.max(1))),
        3 => Tree::UInt(u64::arbitrary(g)),
        4 => {
            let mut f = f64::arbitrary(g);
            while !f.is_finite() {
                f = f64::arbitrary(g);
            }
            Tree::Float(f)
        }
        _ => Tree::Str(text(g)),
    }
}

fn container(g: &mut Gen, depth: usize) -> Tree {
    let len = usize::arbitrary(g) % 4;
    if bool::arbitrary(g) {
        Tree::Array((0..len).map(|_| tree(g, depth)).collect())
    } else {
        Tree::Object((0..len).map(|_| (text(g), tree(g, depth))).collect())
    }
}

fn tree(g: &mut Gen, depth: usize) -> Tree {
    if depth == 0 || usize::arbitrary(g) % 3 != 0 {
        scalar(g)
    } else {
        container(g, depth - 1)
    }
}

impl Arbitrary for RootTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        RootTree(container(g, depth))
    }
}

/// Builds a document holding `root` through the navigation API.
pub(crate) fn build(root: &Tree) -> Document {
    let mut doc = Document::new();
    match root {
        Tree::Array(items) => {
            let id = add_array(&mut doc, items);
            doc.set_root_array(id);
        }
        Tree::Object(entries) => {
            let id = add_object(&mut doc, entries);
            doc.set_root_object(id);
        }
        other => panic!("not a container: {other:?}"),
    }
    doc
}

fn add_array(doc: &mut Document, items: &[Tree]) -> ArrayId {
    let id = doc.add_array(items.len()).unwrap();
    for (i, item) in items.iter().enumerate() {
        let slot = doc.array_slot(id, i).unwrap();
        fill(doc, slot, item);
    }
    id
}

fn add_object(doc: &mut Document, entries: &[(String, Tree)]) -> ObjectId {
    let id = doc.add_object(entries.len()).unwrap();
    for (i, (key, item)) in entries.iter().enumerate() {
        doc.set_key(id, i, key).unwrap();
        let slot = doc.object_slot(id, i).unwrap();
        fill(doc, slot, item);
    }
    id
}

fn fill(doc: &mut Document, slot: ValueId, tree: &Tree) {
    match tree {
        Tree::Null => doc.value_mut(slot).set_null(),
        Tree::Bool(b) => doc.value_mut(slot).set_bool(*b),
        Tree::Int(n) => doc.value_mut(slot).set_i64(*n),
        Tree::UInt(n) => doc.value_mut(slot).set_u64(*n),
        Tree::Float(f) => doc.value_mut(slot).set_f64(*f),
        Tree::Str(s) => doc.value_mut(slot).set_str(s).unwrap(),
        Tree::Array(items) => {
            let id = add_array(doc, items);
            doc.value_mut(slot).set_array(id);
        }
        Tree::Object(entries) => {
            let id = add_object(doc, entries);
            doc.value_mut(slot).set_object(id);
        }
    }
}

/// Reads a document back into the model.
pub(crate) fn read_document(doc: &Document) -> Tree {
    if let Some(object) = doc.root_object() {
        Tree::Object(
            object
                .iter()
                .map(|(k, v)| (k.to_string(), read(v)))
                .collect(),
        )
    } else if let Some(array) = doc.root_array() {
        Tree::Array(array.iter().map(read).collect())
    } else {
        Tree::Null
    }
}

pub(crate) fn read(value: Value<'_>) -> Tree {
    match value.value_type() {
        ValueType::Bool if value.is_null() => Tree::Null,
        ValueType::Bool => Tree::Bool(value.as_bool()),
        ValueType::Int => Tree::Int(value.as_i64()),
        ValueType::UInt => Tree::UInt(value.as_u64()),
        ValueType::Float => Tree::Float(value.as_f64()),
        ValueType::Str | ValueType::InlineStr => Tree::Str(value.as_str().unwrap().to_string()),
        ValueType::Array => Tree::Array(value.as_array().unwrap().iter().map(read).collect()),
        ValueType::Object => Tree::Object(
            value
                .as_object()
                .unwrap()
                .iter()
                .map(|(k, v)| (k.to_string(), read(v)))
                .collect(),
        ),
    }
}
