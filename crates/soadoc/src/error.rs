//! Error types.

use alloc::collections::TryReserveError;
use core::fmt;

use thiserror::Error;

/// A decode failure, located in the input text.
///
/// `line` and `column` are 1-based and count characters, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct DecodeError {
    pub(crate) source: SyntaxError,
    /// Line of the offending character.
    pub line: usize,
    /// Column of the offending character.
    pub column: usize,
}

impl DecodeError {
    pub(crate) fn at(source: SyntaxError, text: &str, pos: usize) -> Self {
        let (line, column) = line_column(text, pos);
        Self {
            source,
            line,
            column,
        }
    }

    /// The syntax error that stopped the decoder.
    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.source
    }

    /// Stable numeric code of the underlying [`SyntaxError`].
    #[must_use]
    pub fn code(&self) -> u32 {
        self.source.code()
    }
}

/// Malformed-input conditions detected by the sizing pass.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// Input ended inside an array.
    #[error("array not terminated")]
    UnterminatedArray,
    /// Input ended inside an object.
    #[error("object not terminated")]
    UnterminatedObject,
    /// An object key is not followed by `:`.
    #[error("expected ':' after object key")]
    ExpectedColon,
    /// An entry is followed by something other than `,` or the closing
    /// delimiter.
    #[error("expected ',' or a closing delimiter")]
    ExpectedSeparator,
    /// An object entry does not start with a string.
    #[error("expected a string key")]
    ExpectedKey,
    /// Input ended inside a string.
    #[error("string not terminated")]
    UnterminatedString,
    /// No valid value where one is required.
    #[error("value expected")]
    ExpectedValue,
    /// The text does not start with `{` or `[`.
    #[error("document root must be an object or an array")]
    NonContainerRoot,
    /// Something other than whitespace follows the root.
    #[error("unexpected characters after the document root")]
    TrailingCharacters,
    /// Containers nest deeper than
    /// [`DecodeOptions::max_depth`](crate::DecodeOptions::max_depth).
    #[error("nesting exceeds the configured depth limit")]
    DepthLimitExceeded,
}

impl SyntaxError {
    /// Numeric code reported alongside the message.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            SyntaxError::UnterminatedArray => 1,
            SyntaxError::ExpectedSeparator => 2,
            SyntaxError::UnterminatedObject => 11,
            SyntaxError::ExpectedColon => 12,
            SyntaxError::ExpectedKey => 13,
            SyntaxError::UnterminatedString => 21,
            SyntaxError::ExpectedValue => 32,
            SyntaxError::NonContainerRoot => 40,
            SyntaxError::TrailingCharacters => 41,
            SyntaxError::DepthLimitExceeded => 42,
        }
    }
}

/// Errors returned by document, decoder and encoder operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text is not a valid document.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Encoding a document that has no root.
    #[error("document has no root container")]
    EmptyDocument,
    /// The allocator refused a request, or the requested size overflows.
    #[error("failed to reserve {requested} bytes for the document arena")]
    Alloc {
        /// Bytes that were asked for.
        requested: usize,
    },
    /// A write past a container's fixed length.
    #[error("index {index} out of bounds (length={length})")]
    IndexOutOfBounds {
        /// The index asked for.
        index: usize,
        /// The container's length.
        length: usize,
    },
    /// A strict accessor found a different type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the accessor reads.
        expected: &'static str,
        /// Type stored in the slot.
        found: &'static str,
    },
    /// The output sink failed.
    #[error("formatter error")]
    Format(#[from] fmt::Error),
}

impl Error {
    pub(crate) fn alloc(requested: usize, _err: TryReserveError) -> Self {
        Error::Alloc { requested }
    }

    /// Numeric code for this error. Decode errors forward their
    /// [`SyntaxError::code`].
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Error::Decode(e) => e.code(),
            Error::EmptyDocument => 100,
            Error::Alloc { .. } => 101,
            Error::IndexOutOfBounds { .. } => 102,
            Error::TypeMismatch { .. } => 103,
            Error::Format(_) => 104,
        }
    }
}

/// Result type alias for document operations.
pub type Result<T> = core::result::Result<T, Error>;

fn line_column(text: &str, pos: usize) -> (usize, usize) {
    let mut end = pos.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let prefix = &text[..end];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}
