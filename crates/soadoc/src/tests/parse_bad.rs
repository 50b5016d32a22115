use alloc::string::{String, ToString};

use rstest::rstest;

use crate::{Error, SyntaxError, decode};

fn syntax_error(text: &str) -> (SyntaxError, usize, usize) {
    match decode(text) {
        Err(Error::Decode(e)) => (*e.kind(), e.line, e.column),
        other => panic!("expected a decode error for {text:?}, got {other:?}"),
    }
}

#[rstest]
#[case(r#"{"a":}"#, SyntaxError::ExpectedValue, 32)]
#[case("[1,2", SyntaxError::UnterminatedArray, 1)]
#[case("[", SyntaxError::UnterminatedArray, 1)]
#[case("[1, ", SyntaxError::UnterminatedArray, 1)]
#[case("[[1,2],", SyntaxError::UnterminatedArray, 1)]
#[case(r#"{"a":["#, SyntaxError::UnterminatedArray, 1)]
#[case(r#""unterminated"#, SyntaxError::NonContainerRoot, 40)]
#[case(r#"["unterminated"#, SyntaxError::UnterminatedString, 21)]
#[case(r#"{"a":1"#, SyntaxError::UnterminatedObject, 11)]
#[case(r#"{"a" 1}"#, SyntaxError::ExpectedColon, 12)]
#[case(r#"{a:1}"#, SyntaxError::ExpectedKey, 13)]
#[case("[1 2]", SyntaxError::ExpectedSeparator, 2)]
#[case("[1,]", SyntaxError::ExpectedValue, 32)]
#[case(r#"{"a":1,}"#, SyntaxError::ExpectedKey, 13)]
#[case("[tru]", SyntaxError::ExpectedValue, 32)]
#[case("[-]", SyntaxError::ExpectedValue, 32)]
#[case("[1.]", SyntaxError::ExpectedValue, 32)]
#[case("[nan]", SyntaxError::ExpectedValue, 32)]
#[case("42", SyntaxError::NonContainerRoot, 40)]
#[case("", SyntaxError::NonContainerRoot, 40)]
#[case("[] x", SyntaxError::TrailingCharacters, 41)]
#[case("[1]]", SyntaxError::TrailingCharacters, 41)]
fn rejected(#[case] text: &str, #[case] kind: SyntaxError, #[case] code: u32) {
    let (found, _, _) = syntax_error(text);
    assert_eq!(found, kind);
    assert_eq!(found.code(), code);
    assert_eq!(decode(text).unwrap_err().code(), code);
}

#[test]
fn errors_point_at_the_offending_character() {
    assert_eq!(
        syntax_error("{\n  \"a\": }"),
        (SyntaxError::ExpectedValue, 2, 8)
    );
    assert_eq!(syntax_error("[1,\n 2 3]"), (SyntaxError::ExpectedSeparator, 2, 4));
    assert_eq!(syntax_error("[1,\n  "), (SyntaxError::UnterminatedArray, 2, 3));
}

#[test]
fn messages_carry_the_position() {
    let err = decode("[1,2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "decode error: array not terminated at 1:5"
    );
}

#[test]
fn depth_limit_guards_the_stack() {
    let text: String = "[".repeat(10_000);
    let (kind, line, column) = syntax_error(&text);
    assert_eq!(kind, SyntaxError::DepthLimitExceeded);
    assert_eq!((line, column), (1, 129));
}
