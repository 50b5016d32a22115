//! Builds a document through the navigation API, encodes it, decodes the text
//! again and walks the result.
//!
//! Run with
//!
//! ```bash
//! cargo run -p soadoc --example build_document
//! ```
#![allow(missing_docs)]

use soadoc::{Document, EncodeOptions, Result, ValueType, decode, encode};

fn build() -> Result<Document> {
    let mut doc = Document::new();
    let root = doc.add_object(3)?;
    doc.set_root_object(root);

    doc.set_key(root, 0, "name")?;
    let name = doc.object_slot(root, 0).expect("entry 0 exists");
    doc.value_mut(name).set_str("offset-addressed arena")?;

    doc.set_key(root, 1, "version")?;
    let version = doc.object_slot(root, 1).expect("entry 1 exists");
    doc.value_mut(version).set_u64(1);

    doc.set_key(root, 2, "sizes")?;
    let sizes = doc.add_array(3)?;
    for (i, size) in [8i64, -9, 18].into_iter().enumerate() {
        let slot = doc.array_slot(sizes, i).expect("element exists");
        doc.value_mut(slot).set_i64(size);
    }
    let slot = doc.object_slot(root, 2).expect("entry 2 exists");
    doc.value_mut(slot).set_array(sizes);

    Ok(doc)
}

fn main() -> Result<()> {
    let doc = build()?;
    println!("arena: {} bytes used, {} reserved", doc.len(), doc.capacity());

    let text = encode(&doc, EncodeOptions::pretty())?;
    println!("{text}");

    let decoded = decode(&text)?;
    println!("decoded into exactly {} bytes", decoded.len());
    if let Some(root) = decoded.root_object() {
        for (key, value) in root.iter() {
            match value.value_type() {
                ValueType::Array => {
                    let array = value.try_array()?;
                    println!("{key}: array of {}", array.len());
                }
                _ => println!("{key}: {value}"),
            }
        }
    }
    Ok(())
}
