//! Error taxonomy.
//!
//! Malformed documents surface as [`ParseError`], invalid session setup as
//! [`ConfigError`], stage construction failures as [`PipelineBuildError`],
//! and byte-source failures as [`SourceError`]. End of stream is never an
//! error: the pull adapter reports it as `Ok(None)`.

use thiserror::Error;

/// A JSON syntax error with its position in the input.
///
/// Lines are 1-based; columns are 1-based byte offsets within the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line} column {column}")]
pub struct ParseError {
    pub(crate) kind: SyntaxError,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based byte column of the offending byte.
    pub column: usize,
}

impl ParseError {
    /// The specific syntax problem.
    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.kind
    }
}

/// The ways a document can be malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A byte that cannot start or continue the expected token.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A backslash escape other than `\" \\ \/ \b \f \n \r \t \u`.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A non-hex digit inside a `\uXXXX` escape.
    #[error("invalid unicode escape character '{0}'")]
    InvalidUnicodeEscape(char),
    /// A UTF-16 surrogate half without its partner.
    #[error("lone surrogate \\u{0:04X} in string")]
    LoneSurrogate(u32),
    /// String content that is not valid UTF-8.
    #[error("invalid UTF-8 in string literal")]
    InvalidUtf8,
    /// The input ended inside a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The input ended with unclosed containers or no value at all.
    #[error("incomplete JSON document")]
    IncompleteDocument,
    /// Bytes after the single top-level value.
    #[error("trailing data after top-level value")]
    TrailingData,
}

/// Invalid session setup, reported before any parsing starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The pull adapter cannot read zero-byte chunks.
    #[error("chunk size must be non-zero")]
    ZeroChunkSize,
}

/// A pipeline stage failed to construct.
///
/// Stages report a reason via [`PipelineBuildError::new`]; the builder
/// stamps the zero-based index of the failing stage before propagating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pipeline stage {index} failed to build: {reason}")]
pub struct PipelineBuildError {
    /// Zero-based position of the failing stage in the stage list.
    pub index: usize,
    /// What went wrong, in the stage's own words.
    pub reason: String,
}

impl PipelineBuildError {
    /// Creates a build error with the given reason.
    ///
    /// The index is filled in by the pipeline builder.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            index: 0,
            reason: reason.into(),
        }
    }
}

/// A byte-source failure.
///
/// Mirrors [`std::io::Error`] as `(kind, message)` so a failed session can
/// re-surface the same error on every later call; `io::Error` itself is not
/// clonable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("byte source error: {message}")]
pub struct SourceError {
    /// The originating [`std::io::ErrorKind`].
    pub kind: std::io::ErrorKind,
    /// The original error's message.
    pub message: String,
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Everything [`crate::PullParser::next_event`] can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The document is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The byte source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
