#![no_main]
use libfuzzer_sys::fuzz_target;
use soadoc::{DecodeOptions, EncodeOptions, decode, decode_with, encode};

fuzz_target!(|data: &[u8]| {
    // The first byte picks the encoder flags; the rest is the document text.
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let options = EncodeOptions {
        pretty: flags & 1 != 0,
        ascii_only: flags & 2 != 0,
        ..Default::default()
    };
    let lenient = DecodeOptions {
        allow_trailing_characters: flags & 4 != 0,
        ..Default::default()
    };

    let Ok(doc) = decode_with(text, lenient) else {
        return;
    };
    let first = encode(&doc, options).expect("decoded documents always have a root");
    let again = decode(&first).expect("encoder output must decode");
    let second = encode(&again, options).expect("re-decoded documents always have a root");
    assert_eq!(first, second, "formatting is not idempotent for {text:?}");
});
