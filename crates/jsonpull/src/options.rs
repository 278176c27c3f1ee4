//! Session configuration.

/// Configuration options for the tokenizer.
///
/// # Default
///
/// All options default to `false`: strict RFC 8259 with exactly one
/// top-level value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether to allow `//` line and `/* */` block comments wherever
    /// whitespace is allowed.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether to parse multiple whitespace-separated JSON values in one
    /// input stream.
    ///
    /// When `true`, the parser does not stop after the first top-level
    /// value but keeps accepting further values, which supports formats
    /// such as JSON Lines and arbitrary concatenations:
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,
}

/// Configuration options for the pull adapter.
#[derive(Debug, Clone, Copy)]
pub struct PullOptions {
    /// Maximum bytes requested from the source per read.
    ///
    /// One buffer of this size is allocated per session and reused for
    /// every read. Must be non-zero.
    ///
    /// # Default
    ///
    /// `64 * 1024`
    pub chunk_size: usize,

    /// Tokenizer options for the session.
    pub parser: ParserOptions,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
            parser: ParserOptions::default(),
        }
    }
}
