#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use soadoc::{EncodeOptions, SyntaxError, decode, encode};

const SAMPLE: &str = r#"
{
    "moderation": {"decision": "allow", "reason": null},
    "request": {
        "filename": "example.rs",
        "options": {"opt_level": 2, "features": ["serde", "tokio"]}
    },
    "snippets": ["fn main() {}", "println!(\"hi\")"],
    "matrix": [[-1, 2.5], []],
    "unicode": "café 😀 /"
}
"#;

#[test]
fn compact_output() {
    let doc = decode(SAMPLE).unwrap();
    insta::assert_snapshot!(encode(&doc, EncodeOptions::default()).unwrap(), @r#"{"moderation":{"decision":"allow","reason":null},"request":{"filename":"example.rs","options":{"opt_level":2,"features":["serde","tokio"]}},"snippets":["fn main() {}","println!(\"hi\")"],"matrix":[[-1,2.5],[]],"unicode":"café 😀 \/"}"#);
}

#[test]
fn pretty_output() {
    let doc = decode(SAMPLE).unwrap();
    insta::assert_snapshot!(encode(&doc, EncodeOptions::pretty()).unwrap(), @r#"
    {
        "moderation": {
            "decision": "allow",
            "reason": null
        },
        "request": {
            "filename": "example.rs",
            "options": {
                "opt_level": 2,
                "features": [
                    "serde",
                    "tokio"
                ]
            }
        },
        "snippets": [
            "fn main() {}",
            "println!(\"hi\")"
        ],
        "matrix": [
            [
                -1,
                2.5
            ],
            []
        ],
        "unicode": "café 😀 \/"
    }
    "#);
}

#[test]
fn ascii_only_output() {
    let doc = decode(r#"["café", "😀", "tab\there"]"#).unwrap();
    let options = EncodeOptions {
        ascii_only: true,
        ..Default::default()
    };
    insta::assert_snapshot!(encode(&doc, options).unwrap(), @r#"["caf\u00e9","\ud83d\ude00","tab\there"]"#);
}

#[test]
fn escape_fidelity() {
    let doc = decode(r#"["a\n\tb\u00e9"]"#).unwrap();
    let ascii = EncodeOptions {
        ascii_only: true,
        ..Default::default()
    };
    assert_eq!(encode(&doc, ascii).unwrap(), r#"["a\n\tb\u00e9"]"#);
    assert_eq!(
        encode(&doc, EncodeOptions::default()).unwrap(),
        "[\"a\\n\\tb\u{e9}\"]"
    );
}

#[test]
fn decoded_strings_match_serde_json() {
    let doc = decode(SAMPLE).unwrap();
    let oracle: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
    let reparsed: serde_json::Value =
        serde_json::from_str(&encode(&doc, EncodeOptions::default()).unwrap()).unwrap();
    assert_eq!(reparsed, oracle);
}

#[test]
fn malformed_input_produces_no_document() {
    for text in [r#"{"a":}"#, "[1,2", r#""unterminated"#] {
        let err = decode(text).unwrap_err();
        assert_ne!(err.code(), 0, "{text}");
    }
    let err = decode("[1,2").unwrap_err();
    assert!(matches!(
        err,
        soadoc::Error::Decode(ref e) if *e.kind() == SyntaxError::UnterminatedArray
    ));
}

#[test]
fn display_is_compact() {
    let doc = decode("[ {\"a\" : [ 1 ] } ]").unwrap();
    assert_eq!(doc.to_string(), r#"[{"a":[1]}]"#);
}
