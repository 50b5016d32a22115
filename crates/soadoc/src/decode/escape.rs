//! In-place decoding of JSON string escapes.
//!
//! Decoding never produces more bytes than it consumes: a two-byte escape
//! yields one byte, `\uXXXX` yields at most three and a surrogate pair
//! (twelve bytes of input) yields four. Callers size the output by the escaped
//! length and rely on that.

/// Substituted for an escape that cannot be decoded.
const INVALID_ESCAPE: u8 = b'?';

/// Decodes `raw` into `out` and returns the number of bytes written.
///
/// Unknown escape characters and `\u` without four hex digits become `?`.
/// A surrogate half that is not part of a valid pair becomes U+FFFD.
///
/// # Panics
///
/// If `out` is shorter than `raw`.
pub(crate) fn unescape_into(raw: &[u8], out: &mut [u8]) -> usize {
    assert!(out.len() >= raw.len());
    let mut r = 0;
    let mut w = 0;
    while r < raw.len() {
        let b = raw[r];
        if b != b'\\' {
            out[w] = b;
            w += 1;
            r += 1;
            continue;
        }
        let Some(&esc) = raw.get(r + 1) else {
            out[w] = INVALID_ESCAPE;
            w += 1;
            break;
        };
        r += 2;
        let simple = match esc {
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'u' => None,
            _ => Some(INVALID_ESCAPE),
        };
        if let Some(byte) = simple {
            out[w] = byte;
            w += 1;
            continue;
        }
        let Some(unit) = hex4(raw, r) else {
            out[w] = INVALID_ESCAPE;
            w += 1;
            continue;
        };
        r += 4;
        let ch = if (0xD800..0xDC00).contains(&unit) {
            match low_surrogate(raw, r) {
                Some(low) => {
                    r += 6;
                    char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
                }
                None => None,
            }
        } else {
            char::from_u32(unit)
        };
        let ch = ch.unwrap_or(char::REPLACEMENT_CHARACTER);
        w += ch.encode_utf8(&mut out[w..]).len();
    }
    w
}

#[inline]
fn hex_val(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

/// The four hex digits at `at`, as a UTF-16 code unit.
fn hex4(raw: &[u8], at: usize) -> Option<u32> {
    raw.get(at..at + 4)?
        .iter()
        .try_fold(0u32, |acc, &b| Some((acc << 4) | hex_val(b)?))
}

/// A `\uDC00`..`\uDFFF` escape at `at`.
fn low_surrogate(raw: &[u8], at: usize) -> Option<u32> {
    if raw.get(at..at + 2)? != b"\\u" {
        return None;
    }
    hex4(raw, at + 2).filter(|u| (0xDC00..0xE000).contains(u))
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn unescape(raw: &str) -> Vec<u8> {
        let mut out = vec![0; raw.len()];
        let n = unescape_into(raw.as_bytes(), &mut out);
        out.truncate(n);
        out
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(unescape(r#"a\"b\\c\/d"#), br#"a"b\c/d"#);
        assert_eq!(unescape(r"\b\f\n\r\t"), b"\x08\x0C\n\r\t");
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(unescape(r"a\n\tb\u00e9"), "a\n\tb\u{e9}".as_bytes());
        assert_eq!(unescape(r"\u20AC"), "\u{20ac}".as_bytes());
        assert_eq!(unescape(r"\ud83d\ude00"), "\u{1f600}".as_bytes());
    }

    #[test]
    fn unpaired_surrogates_become_replacement() {
        assert_eq!(unescape(r"\ud83d"), "\u{fffd}".as_bytes());
        assert_eq!(unescape(r"\ude00x"), "\u{fffd}x".as_bytes());
        assert_eq!(unescape(r"\ud83dA"), "\u{fffd}A".as_bytes());
    }

    #[test]
    fn malformed_escapes_become_question_marks() {
        assert_eq!(unescape(r"\x"), b"?");
        assert_eq!(unescape(r"\u12G4"), b"?12G4");
        assert_eq!(unescape(r"\u12"), b"?12");
        assert_eq!(unescape("ab\\"), b"ab?");
    }

    #[test]
    fn raw_utf8_passes_through() {
        assert_eq!(unescape("caf\u{e9} \u{1f600}"), "caf\u{e9} \u{1f600}".as_bytes());
    }
}
