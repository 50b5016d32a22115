//! Byte cursor over the input text.
//!
//! The scanner only recognizes tokens; it never decodes escapes or converts
//! numbers. Both passes of the decoder drive the same scanner over the same
//! text, so they see identical token boundaries.

use crate::error::{DecodeError, SyntaxError};

pub(crate) type PResult<T> = core::result::Result<T, DecodeError>;

pub(crate) struct Scanner<'src> {
    text: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Consumes `b` if it is next.
    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    pub(crate) fn error(&self, kind: SyntaxError) -> DecodeError {
        self.error_at(kind, self.pos)
    }

    pub(crate) fn error_at(&self, kind: SyntaxError, pos: usize) -> DecodeError {
        DecodeError::at(kind, self.text, pos)
    }

    /// Consumes `word` if the input continues with it.
    pub(crate) fn eat_literal(&mut self, word: &[u8]) -> bool {
        if self.bytes.get(self.pos..).is_some_and(|rest| rest.starts_with(word)) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    /// Consumes a quoted string and returns its contents with escapes left
    /// as written. The cursor must be on the opening quote.
    pub(crate) fn scan_string(&mut self) -> PResult<&'src [u8]> {
        let open = self.pos;
        let start = open + 1;
        let mut pos = start;
        while pos < self.bytes.len() {
            match self.bytes[pos] {
                b'"' => {
                    self.pos = pos + 1;
                    return Ok(&self.bytes[start..pos]);
                }
                b'\\' => pos += 2,
                _ => pos += 1,
            }
        }
        Err(self.error_at(SyntaxError::UnterminatedString, open))
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consumes a number and returns its lexeme.
    ///
    /// Accepts an optional sign, a digit run, an optional fraction and an
    /// optional exponent. Each part that is present must carry digits.
    pub(crate) fn scan_number(&mut self) -> PResult<&'src str> {
        let start = self.pos;
        if let Some(b'-' | b'+') = self.peek() {
            self.pos += 1;
        }
        if self.skip_digits() == 0 {
            return Err(self.error_at(SyntaxError::ExpectedValue, start));
        }
        if self.eat(b'.') && self.skip_digits() == 0 {
            return Err(self.error_at(SyntaxError::ExpectedValue, start));
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'-' | b'+') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.error_at(SyntaxError::ExpectedValue, start));
            }
        }
        // every byte consumed above is ASCII
        Ok(&self.text[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_keep_escapes() {
        let mut s = Scanner::new(r#""a\"b" rest"#);
        assert_eq!(s.scan_string().unwrap(), br#"a\"b"#);
        assert_eq!(s.peek(), Some(b' '));
    }

    #[test]
    fn escaped_backslash_before_quote_terminates() {
        let mut s = Scanner::new(r#""a\\""#);
        assert_eq!(s.scan_string().unwrap(), br"a\\");
        assert!(s.at_end());
    }

    #[test]
    fn unterminated_string_points_at_the_quote() {
        let mut s = Scanner::new(r#"  "abc\""#);
        s.skip_whitespace();
        let err = s.scan_string().unwrap_err();
        assert_eq!(*err.kind(), SyntaxError::UnterminatedString);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn number_lexemes() {
        for (text, lexeme) in [
            ("123,", "123"),
            ("-4.5e-3]", "-4.5e-3"),
            ("+7}", "+7"),
            ("1E10 ", "1E10"),
        ] {
            let mut s = Scanner::new(text);
            assert_eq!(s.scan_number().unwrap(), lexeme);
        }
    }

    #[test]
    fn number_parts_need_digits() {
        for text in ["-", "1.", "1e", "1e+", ".5"] {
            let mut s = Scanner::new(text);
            assert!(s.scan_number().is_err(), "{text}");
        }
    }

    #[test]
    fn literals_need_every_byte() {
        let mut s = Scanner::new("tru");
        assert!(!s.eat_literal(b"true"));
        let mut s = Scanner::new("null]");
        assert!(s.eat_literal(b"null"));
        assert_eq!(s.peek(), Some(b']'));
    }
}
