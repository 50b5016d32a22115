/// Configuration for a [`Document`](crate::Document) arena.
///
/// # Default
///
/// An empty arena that doubles its capacity whenever a request does not fit.
#[derive(Debug, Clone, Copy)]
pub struct DocumentOptions {
    /// Bytes reserved up front when the document is created.
    ///
    /// # Default
    ///
    /// `0`
    pub initial_capacity: usize,

    /// Multiplier applied to the required size when the arena has to grow.
    ///
    /// When an append of `n` bytes does not fit, the new capacity becomes
    /// `(len + n) * grow_factor`. Factors below `1` are treated as `1`, which
    /// makes every append reallocate to the exact size.
    ///
    /// # Default
    ///
    /// `2`
    pub grow_factor: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            grow_factor: 2,
        }
    }
}

/// Configuration for [`decode_with`](crate::decode_with).
///
/// # Examples
///
/// ```rust
/// use soadoc::{DecodeOptions, decode_with};
///
/// let options = DecodeOptions {
///     allow_trailing_characters: true,
///     ..Default::default()
/// };
/// let doc = decode_with("[1, 2] trailing", options).unwrap();
/// assert_eq!(doc.root_array().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Initial capacity of the per-kind container size tables built by the
    /// sizing pass. The tables grow on demand, so this only affects how many
    /// reallocations a large document costs.
    ///
    /// # Default
    ///
    /// `8`
    pub table_capacity: usize,

    /// Maximum nesting depth of objects and arrays. Deeper input fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded)
    /// instead of exhausting the stack. The limit is inclusive and applies to
    /// well-formed input too: with the default, a valid document nested more
    /// than 128 levels deep is rejected.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether anything after the root container is ignored.
    ///
    /// When `false`, only whitespace may follow the root.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_characters: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            table_capacity: 8,
            max_depth: 128,
            allow_trailing_characters: false,
        }
    }
}

/// Configuration for [`encode`](crate::encode).
///
/// # Default
///
/// Compact output with raw UTF-8 passed through.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Emit a newline before every entry and closing delimiter, indented by
    /// [`indent`](Self::indent) once per nesting level, and a space after
    /// each `:`.
    pub pretty: bool,

    /// Escape every code point above `0x7E` as `\uXXXX`, using a UTF-16
    /// surrogate pair outside the Basic Multilingual Plane. When `false`,
    /// non-ASCII text is written as raw UTF-8.
    pub ascii_only: bool,

    /// Indent unit used by [`pretty`](Self::pretty).
    ///
    /// # Default
    ///
    /// Four spaces.
    pub indent: &'static str,
}

impl EncodeOptions {
    /// Pretty-printed output with the default indent.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            ascii_only: false,
            indent: "    ",
        }
    }
}
