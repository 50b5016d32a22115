//! Recursive-descent grammar shared by both decoding passes.
//!
//! [`Parser`] owns the syntax: separators, nesting, the root rule and every
//! error. What happens to each token is up to the [`Visitor`]. The sizing pass
//! only counts, the materialize pass writes into the final buffer, and since
//! both run the same grammar over the same text they visit containers in the
//! same pre-order.

use crate::error::SyntaxError;
use crate::layout::{BoolState, RootKind};
use crate::options::DecodeOptions;

use super::scanner::{PResult, Scanner};

/// Receives the decoder's structural events.
///
/// A `Slot` names the place a value is written to. A `Frame` is whatever the
/// visitor needs to hand out slots for the entries of an open container.
pub(crate) trait Visitor {
    type Slot: Copy;
    type Frame;

    /// An array opens. `slot` is `None` for the root.
    fn begin_array(&mut self, slot: Option<Self::Slot>) -> Self::Frame;
    /// Slot for element `index` of the open array.
    fn array_slot(&mut self, frame: &Self::Frame, index: usize) -> Self::Slot;
    /// The array closed after `len` elements.
    fn end_array(&mut self, frame: Self::Frame, len: usize);

    /// An object opens. `slot` is `None` for the root.
    fn begin_object(&mut self, slot: Option<Self::Slot>) -> Self::Frame;
    /// Slot for entry `index` of the open object, whose key is `key` with
    /// escapes still in place.
    fn object_slot(&mut self, frame: &Self::Frame, index: usize, key: &[u8]) -> Self::Slot;
    /// The object closed after `len` entries.
    fn end_object(&mut self, frame: Self::Frame, len: usize);

    /// A string, escapes still in place.
    fn string(&mut self, slot: Self::Slot, raw: &[u8]);
    /// A number lexeme accepted by the scanner.
    fn number(&mut self, slot: Self::Slot, lexeme: &str);
    /// `true`, `false` or `null`.
    fn literal(&mut self, slot: Self::Slot, state: BoolState);
}

pub(crate) struct Parser<'src, 'v, V> {
    scanner: Scanner<'src>,
    visitor: &'v mut V,
    options: DecodeOptions,
    depth: usize,
}

impl<'src, 'v, V: Visitor> Parser<'src, 'v, V> {
    pub(crate) fn new(text: &'src str, visitor: &'v mut V, options: DecodeOptions) -> Self {
        Self {
            scanner: Scanner::new(text),
            visitor,
            options,
            depth: 0,
        }
    }

    /// Parses the whole input and reports which kind of container the root
    /// is.
    pub(crate) fn parse_document(mut self) -> PResult<RootKind> {
        self.scanner.skip_whitespace();
        let kind = match self.scanner.peek() {
            Some(b'{') => {
                self.parse_object(None)?;
                RootKind::Object
            }
            Some(b'[') => {
                self.parse_array(None)?;
                RootKind::Array
            }
            _ => return Err(self.scanner.error(SyntaxError::NonContainerRoot)),
        };
        if !self.options.allow_trailing_characters {
            self.scanner.skip_whitespace();
            if !self.scanner.at_end() {
                return Err(self.scanner.error(SyntaxError::TrailingCharacters));
            }
        }
        Ok(kind)
    }

    fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.scanner.error(SyntaxError::DepthLimitExceeded));
        }
        Ok(())
    }

    fn parse_value(&mut self, slot: V::Slot) -> PResult<()> {
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some(b'{') => self.parse_object(Some(slot)),
            Some(b'[') => self.parse_array(Some(slot)),
            Some(b'"') => {
                let raw = self.scanner.scan_string()?;
                self.visitor.string(slot, raw);
                Ok(())
            }
            Some(b'-' | b'+' | b'0'..=b'9') => {
                let lexeme = self.scanner.scan_number()?;
                self.visitor.number(slot, lexeme);
                Ok(())
            }
            Some(b't' | b'f' | b'n') => {
                let state = if self.scanner.eat_literal(b"true") {
                    BoolState::True
                } else if self.scanner.eat_literal(b"false") {
                    BoolState::False
                } else if self.scanner.eat_literal(b"null") {
                    BoolState::Null
                } else {
                    return Err(self.scanner.error(SyntaxError::ExpectedValue));
                };
                self.visitor.literal(slot, state);
                Ok(())
            }
            _ => Err(self.scanner.error(SyntaxError::ExpectedValue)),
        }
    }

    fn parse_array(&mut self, slot: Option<V::Slot>) -> PResult<()> {
        self.enter()?;
        self.scanner.bump();
        let frame = self.visitor.begin_array(slot);
        self.scanner.skip_whitespace();
        let mut len = 0;
        if !self.scanner.eat(b']') {
            loop {
                self.scanner.skip_whitespace();
                if self.scanner.at_end() {
                    return Err(self.scanner.error(SyntaxError::UnterminatedArray));
                }
                let element = self.visitor.array_slot(&frame, len);
                self.parse_value(element)?;
                len += 1;
                self.scanner.skip_whitespace();
                match self.scanner.peek() {
                    Some(b',') => self.scanner.bump(),
                    Some(b']') => {
                        self.scanner.bump();
                        break;
                    }
                    None => return Err(self.scanner.error(SyntaxError::UnterminatedArray)),
                    Some(_) => return Err(self.scanner.error(SyntaxError::ExpectedSeparator)),
                }
            }
        }
        self.visitor.end_array(frame, len);
        self.depth -= 1;
        Ok(())
    }

    fn parse_object(&mut self, slot: Option<V::Slot>) -> PResult<()> {
        self.enter()?;
        self.scanner.bump();
        let frame = self.visitor.begin_object(slot);
        self.scanner.skip_whitespace();
        let mut len = 0;
        if !self.scanner.eat(b'}') {
            loop {
                self.scanner.skip_whitespace();
                match self.scanner.peek() {
                    Some(b'"') => {}
                    None => return Err(self.scanner.error(SyntaxError::UnterminatedObject)),
                    Some(_) => return Err(self.scanner.error(SyntaxError::ExpectedKey)),
                }
                let key = self.scanner.scan_string()?;
                self.scanner.skip_whitespace();
                if !self.scanner.eat(b':') {
                    let kind = if self.scanner.at_end() {
                        SyntaxError::UnterminatedObject
                    } else {
                        SyntaxError::ExpectedColon
                    };
                    return Err(self.scanner.error(kind));
                }
                let entry = self.visitor.object_slot(&frame, len, key);
                self.parse_value(entry)?;
                len += 1;
                self.scanner.skip_whitespace();
                match self.scanner.peek() {
                    Some(b',') => self.scanner.bump(),
                    Some(b'}') => {
                        self.scanner.bump();
                        break;
                    }
                    None => return Err(self.scanner.error(SyntaxError::UnterminatedObject)),
                    Some(_) => return Err(self.scanner.error(SyntaxError::ExpectedSeparator)),
                }
            }
        }
        self.visitor.end_object(frame, len);
        self.depth -= 1;
        Ok(())
    }
}
