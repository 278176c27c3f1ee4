//! The byte-oriented push tokenizer.
//!
//! [`Tokenizer`] consumes raw bytes in arbitrary-sized chunks and invokes a
//! [`TokenSink`] once per completed token, in document order, before `feed`
//! returns. Chunks may split tokens and multi-byte UTF-8 sequences at any
//! offset; the tokenizer carries the partial state across feeds. A
//! zero-length feed finalizes the document.
//!
//! The grammar is strict RFC 8259, with two opt-ins via
//! [`ParserOptions`](crate::ParserOptions): `//` and `/* */` comments, and
//! multiple whitespace-separated top-level values.

use crate::{
    error::{ParseError, SyntaxError},
    escape_buffer::{EscapeStep, UnicodeEscapeBuffer},
    literal_buffer::{Literal, LiteralMatcher, Step},
    options::ParserOptions,
    sink::Flow,
};

/// One completed token, borrowing its lexeme from the tokenizer's scratch
/// buffer.
///
/// String and key payloads are fully decoded (escapes resolved, UTF-8
/// validated); number payloads are the exact source lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// The `null` keyword.
    Null,
    /// The `true` or `false` keyword.
    Boolean(bool),
    /// A numeric lexeme, exactly as written.
    Number(&'a str),
    /// A string value.
    String(&'a str),
    /// An object member name.
    MapKey(&'a str),
    /// `{`
    StartMap,
    /// `}`
    EndMap,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
}

/// A consumer of tokens.
pub trait TokenSink {
    /// Accepts one completed token. Returning [`Flow::Stop`] aborts the
    /// in-progress feed; the session is closed afterwards.
    fn token(&mut self, token: Token<'_>) -> Flow;
}

/// How a feed call ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// The whole chunk was consumed.
    Consumed,
    /// The sink requested a stop; the session is closed.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Between tokens; the next byte is dispatched on the parse state.
    Ready,
    Literal,
    NumberSign,
    NumberZero,
    NumberInt,
    NumberFracStart,
    NumberFrac,
    NumberExpStart,
    NumberExpSign,
    NumberExp,
    InString,
    StringEscape,
    StringUnicode,
    /// A high surrogate was decoded; expecting `\` of the low-half escape.
    SurrogateBackslash,
    /// Expecting the `u` of the low-half escape.
    SurrogateU,
    CommentStart,
    LineComment,
    BlockComment,
    BlockCommentStar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Expecting a top-level value.
    AtRoot,
    /// `{` just opened: a key or `}`.
    BeforeFirstKey,
    /// After `,` in an object: a key is required.
    BeforeKey,
    /// After a key: expecting `:`.
    AfterKey,
    /// After `:`: expecting the member value.
    BeforeMapValue,
    /// `[` just opened: a value or `]`.
    BeforeFirstElement,
    /// After `,` in an array: a value is required.
    BeforeElement,
    /// After a value inside a container: `,` or the closer.
    AfterValue,
    /// The single top-level value is complete.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Map,
    Array,
}

#[derive(Debug)]
enum Status {
    Active,
    Stopped,
    Finished,
    Failed(ParseError),
}

/// A streaming SAX-style JSON tokenizer.
///
/// # Examples
///
/// ```
/// use jsonpull::{Flow, ParserOptions, Token, TokenSink, Tokenizer};
///
/// struct Count(usize);
/// impl TokenSink for Count {
///     fn token(&mut self, _token: Token<'_>) -> Flow {
///         self.0 += 1;
///         Flow::Continue
///     }
/// }
///
/// let mut tokenizer = Tokenizer::new(ParserOptions::default());
/// let mut count = Count(0);
/// tokenizer.feed(b"[1, 2]", &mut count).unwrap();
/// tokenizer.feed(b"", &mut count).unwrap();
/// assert_eq!(count.0, 4);
/// ```
#[derive(Debug)]
pub struct Tokenizer {
    options: ParserOptions,
    lex: LexState,
    parse: ParseState,
    containers: Vec<Container>,

    /// Scratch for the token in flight: number lexeme bytes, or decoded
    /// string content.
    scratch: Vec<u8>,
    literal: LiteralMatcher,
    escape: UnicodeEscapeBuffer,
    /// The string in flight is an object member name.
    in_key: bool,
    /// At least one top-level value has completed.
    saw_value: bool,

    line: usize,
    column: usize,
    status: Status,
}

impl Tokenizer {
    /// Creates a tokenizer for one session.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            lex: LexState::Ready,
            parse: ParseState::AtRoot,
            containers: Vec::with_capacity(16),
            scratch: Vec::new(),
            literal: LiteralMatcher::none(),
            escape: UnicodeEscapeBuffer::new(),
            in_key: false,
            saw_value: false,
            line: 1,
            column: 1,
            status: Status::Active,
        }
    }

    /// Feeds one chunk of input.
    ///
    /// Every token completed by this chunk is delivered to `sink` before
    /// the call returns. An empty chunk signals end of input and finalizes
    /// the document; feeding non-empty input after finalization is a
    /// [`SyntaxError::TrailingData`] error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on malformed input. A failed session keeps
    /// returning the same error; a stopped session keeps returning
    /// [`FeedStatus::Stopped`].
    #[allow(clippy::too_many_lines)]
    pub fn feed<T: TokenSink + ?Sized>(
        &mut self,
        bytes: &[u8],
        sink: &mut T,
    ) -> Result<FeedStatus, ParseError> {
        match &self.status {
            Status::Failed(err) => return Err(err.clone()),
            Status::Stopped => return Ok(FeedStatus::Stopped),
            Status::Active | Status::Finished => {}
        }
        if bytes.is_empty() {
            return self.finish(sink);
        }
        if matches!(self.status, Status::Finished) {
            return Err(self.fail(SyntaxError::TrailingData));
        }

        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            match self.lex {
                LexState::Ready => match b {
                    b' ' | b'\t' | b'\n' | b'\r' => {
                        self.advance(b);
                        i += 1;
                    }
                    b'/' if self.options.allow_comments => {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::CommentStart;
                    }
                    _ => match self.parse {
                        ParseState::AtRoot
                        | ParseState::BeforeMapValue
                        | ParseState::BeforeElement => {
                            self.begin_value(bytes, &mut i, sink)?;
                            if matches!(self.status, Status::Stopped) {
                                return Ok(FeedStatus::Stopped);
                            }
                        }
                        ParseState::BeforeFirstElement => {
                            if b == b']' {
                                self.advance(b);
                                i += 1;
                                self.containers.pop();
                                let flow = sink.token(Token::EndArray);
                                self.complete_value();
                                if flow == Flow::Stop {
                                    self.status = Status::Stopped;
                                    return Ok(FeedStatus::Stopped);
                                }
                            } else {
                                self.begin_value(bytes, &mut i, sink)?;
                                if matches!(self.status, Status::Stopped) {
                                    return Ok(FeedStatus::Stopped);
                                }
                            }
                        }
                        ParseState::BeforeFirstKey | ParseState::BeforeKey => match b {
                            b'"' => {
                                self.advance(b);
                                i += 1;
                                self.in_key = true;
                                self.scratch.clear();
                                self.lex = LexState::InString;
                            }
                            b'}' if self.parse == ParseState::BeforeFirstKey => {
                                self.advance(b);
                                i += 1;
                                self.containers.pop();
                                let flow = sink.token(Token::EndMap);
                                self.complete_value();
                                if flow == Flow::Stop {
                                    self.status = Status::Stopped;
                                    return Ok(FeedStatus::Stopped);
                                }
                            }
                            _ => return Err(self.invalid_char(bytes, i)),
                        },
                        ParseState::AfterKey => {
                            if b == b':' {
                                self.advance(b);
                                i += 1;
                                self.parse = ParseState::BeforeMapValue;
                            } else {
                                return Err(self.invalid_char(bytes, i));
                            }
                        }
                        ParseState::AfterValue => match (b, self.containers.last().copied()) {
                            (b',', Some(Container::Map)) => {
                                self.advance(b);
                                i += 1;
                                self.parse = ParseState::BeforeKey;
                            }
                            (b',', Some(Container::Array)) => {
                                self.advance(b);
                                i += 1;
                                self.parse = ParseState::BeforeElement;
                            }
                            (b'}', Some(Container::Map)) | (b']', Some(Container::Array)) => {
                                self.advance(b);
                                i += 1;
                                self.containers.pop();
                                let flow = sink.token(if b == b'}' {
                                    Token::EndMap
                                } else {
                                    Token::EndArray
                                });
                                self.complete_value();
                                if flow == Flow::Stop {
                                    self.status = Status::Stopped;
                                    return Ok(FeedStatus::Stopped);
                                }
                            }
                            _ => return Err(self.invalid_char(bytes, i)),
                        },
                        ParseState::Done => {
                            return Err(self.fail(SyntaxError::TrailingData));
                        }
                    },
                },

                LexState::Literal => match self.literal.step(b) {
                    Step::NeedMore => {
                        self.advance(b);
                        i += 1;
                    }
                    Step::Done(literal) => {
                        self.advance(b);
                        i += 1;
                        let flow = sink.token(match literal {
                            Literal::Null => Token::Null,
                            Literal::True => Token::Boolean(true),
                            Literal::False => Token::Boolean(false),
                        });
                        self.complete_value();
                        self.lex = LexState::Ready;
                        if flow == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                    Step::Reject => return Err(self.invalid_char(bytes, i)),
                },

                // ---------------------------- numbers ----------------------------
                LexState::NumberSign => match b {
                    b'0' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberZero;
                    }
                    b'1'..=b'9' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberInt;
                    }
                    _ => return Err(self.invalid_char(bytes, i)),
                },
                LexState::NumberZero => match b {
                    b'.' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberFracStart;
                    }
                    b'e' | b'E' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberExpStart;
                    }
                    // A digit here would be a leading zero.
                    b'0'..=b'9' => return Err(self.invalid_char(bytes, i)),
                    _ => {
                        if self.emit_number(sink) == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                },
                LexState::NumberInt => match b {
                    b'0'..=b'9' => self.copy_digits(bytes, &mut i),
                    b'.' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberFracStart;
                    }
                    b'e' | b'E' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberExpStart;
                    }
                    _ => {
                        if self.emit_number(sink) == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                },
                LexState::NumberFracStart => match b {
                    b'0'..=b'9' => {
                        self.lex = LexState::NumberFrac;
                        self.copy_digits(bytes, &mut i);
                    }
                    _ => return Err(self.invalid_char(bytes, i)),
                },
                LexState::NumberFrac => match b {
                    b'0'..=b'9' => self.copy_digits(bytes, &mut i),
                    b'e' | b'E' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberExpStart;
                    }
                    _ => {
                        if self.emit_number(sink) == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                },
                LexState::NumberExpStart => match b {
                    b'+' | b'-' => {
                        self.advance(b);
                        i += 1;
                        self.scratch.push(b);
                        self.lex = LexState::NumberExpSign;
                    }
                    b'0'..=b'9' => {
                        self.lex = LexState::NumberExp;
                        self.copy_digits(bytes, &mut i);
                    }
                    _ => return Err(self.invalid_char(bytes, i)),
                },
                LexState::NumberExpSign => match b {
                    b'0'..=b'9' => {
                        self.lex = LexState::NumberExp;
                        self.copy_digits(bytes, &mut i);
                    }
                    _ => return Err(self.invalid_char(bytes, i)),
                },
                LexState::NumberExp => match b {
                    b'0'..=b'9' => self.copy_digits(bytes, &mut i),
                    _ => {
                        if self.emit_number(sink) == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                },

                // ---------------------------- strings ----------------------------
                LexState::InString => match b {
                    b'"' => {
                        self.advance(b);
                        i += 1;
                        let text = match core::str::from_utf8(&self.scratch) {
                            Ok(text) => text,
                            Err(_) => return Err(self.fail(SyntaxError::InvalidUtf8)),
                        };
                        let flow = if self.in_key {
                            sink.token(Token::MapKey(text))
                        } else {
                            sink.token(Token::String(text))
                        };
                        if self.in_key {
                            self.in_key = false;
                            self.parse = ParseState::AfterKey;
                        } else {
                            self.complete_value();
                        }
                        self.scratch.clear();
                        self.lex = LexState::Ready;
                        if flow == Flow::Stop {
                            self.status = Status::Stopped;
                            return Ok(FeedStatus::Stopped);
                        }
                    }
                    b'\\' => {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::StringEscape;
                    }
                    0x00..=0x1F => return Err(self.invalid_char(bytes, i)),
                    _ => {
                        // Copy as many plain content bytes as possible in one
                        // pass. Bytes >= 0x80 pass through; UTF-8 validity is
                        // checked once when the string completes.
                        let start = i;
                        while i < bytes.len()
                            && !matches!(bytes[i], b'"' | b'\\' | 0x00..=0x1F)
                        {
                            i += 1;
                        }
                        self.scratch.extend_from_slice(&bytes[start..i]);
                        self.column += i - start;
                    }
                },
                LexState::StringEscape => {
                    let decoded = match b {
                        b'"' | b'\\' | b'/' => Some(b),
                        b'b' => Some(0x08),
                        b'f' => Some(0x0C),
                        b'n' => Some(b'\n'),
                        b'r' => Some(b'\r'),
                        b't' => Some(b'\t'),
                        b'u' => None,
                        _ => {
                            return Err(self.fail(SyntaxError::InvalidEscape(char::from(b))));
                        }
                    };
                    self.advance(b);
                    i += 1;
                    match decoded {
                        Some(byte) => {
                            self.scratch.push(byte);
                            self.lex = LexState::InString;
                        }
                        None => self.lex = LexState::StringUnicode,
                    }
                }
                LexState::StringUnicode => match self.escape.feed(b) {
                    Ok(EscapeStep::NeedMore) => {
                        self.advance(b);
                        i += 1;
                    }
                    Ok(EscapeStep::Char(ch)) => {
                        self.advance(b);
                        i += 1;
                        let mut utf8 = [0u8; 4];
                        self.scratch
                            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                        self.lex = LexState::InString;
                    }
                    Ok(EscapeStep::NeedLowSurrogate) => {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::SurrogateBackslash;
                    }
                    Err(kind) => return Err(self.fail(kind)),
                },
                LexState::SurrogateBackslash => {
                    if b == b'\\' {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::SurrogateU;
                    } else {
                        return Err(self.lone_surrogate());
                    }
                }
                LexState::SurrogateU => {
                    if b == b'u' {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::StringUnicode;
                    } else {
                        return Err(self.lone_surrogate());
                    }
                }

                // ---------------------------- comments ----------------------------
                LexState::CommentStart => match b {
                    b'/' => {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::LineComment;
                    }
                    b'*' => {
                        self.advance(b);
                        i += 1;
                        self.lex = LexState::BlockComment;
                    }
                    _ => return Err(self.invalid_char(bytes, i)),
                },
                LexState::LineComment => {
                    let start = i;
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                    self.column += i - start;
                    if i < bytes.len() {
                        self.advance(b'\n');
                        i += 1;
                        self.lex = LexState::Ready;
                    }
                }
                LexState::BlockComment => {
                    self.advance(b);
                    i += 1;
                    if b == b'*' {
                        self.lex = LexState::BlockCommentStar;
                    }
                }
                LexState::BlockCommentStar => {
                    self.advance(b);
                    i += 1;
                    match b {
                        b'/' => self.lex = LexState::Ready,
                        b'*' => {}
                        _ => self.lex = LexState::BlockComment,
                    }
                }
            }
        }

        Ok(FeedStatus::Consumed)
    }

    /// Finalizes the document; equivalent to feeding an empty chunk.
    fn finish<T: TokenSink + ?Sized>(&mut self, sink: &mut T) -> Result<FeedStatus, ParseError> {
        if matches!(self.status, Status::Finished) {
            return Ok(FeedStatus::Consumed);
        }

        match self.lex {
            // A number at end of input may still need its token emitted.
            LexState::NumberZero
            | LexState::NumberInt
            | LexState::NumberFrac
            | LexState::NumberExp => {
                if self.emit_number(sink) == Flow::Stop {
                    self.status = Status::Stopped;
                    return Ok(FeedStatus::Stopped);
                }
            }
            // A line comment may run to end of input.
            LexState::Ready | LexState::LineComment => {}
            _ => return Err(self.fail(SyntaxError::UnexpectedEndOfInput)),
        }

        if !self.containers.is_empty() {
            return Err(self.fail(SyntaxError::IncompleteDocument));
        }
        match self.parse {
            ParseState::Done => {}
            ParseState::AtRoot if self.saw_value => {}
            _ => return Err(self.fail(SyntaxError::IncompleteDocument)),
        }

        self.status = Status::Finished;
        Ok(FeedStatus::Consumed)
    }

    /// Dispatches the first byte of a value. Consumes the byte unless it
    /// errors.
    fn begin_value<T: TokenSink + ?Sized>(
        &mut self,
        bytes: &[u8],
        i: &mut usize,
        sink: &mut T,
    ) -> Result<(), ParseError> {
        let b = bytes[*i];
        match b {
            b'{' => {
                self.advance(b);
                *i += 1;
                self.containers.push(Container::Map);
                self.parse = ParseState::BeforeFirstKey;
                if sink.token(Token::StartMap) == Flow::Stop {
                    self.status = Status::Stopped;
                }
            }
            b'[' => {
                self.advance(b);
                *i += 1;
                self.containers.push(Container::Array);
                self.parse = ParseState::BeforeFirstElement;
                if sink.token(Token::StartArray) == Flow::Stop {
                    self.status = Status::Stopped;
                }
            }
            b'"' => {
                self.advance(b);
                *i += 1;
                self.in_key = false;
                self.scratch.clear();
                self.lex = LexState::InString;
            }
            b'n' | b't' | b'f' => {
                self.advance(b);
                *i += 1;
                self.literal = LiteralMatcher::new(b);
                self.lex = LexState::Literal;
            }
            b'-' => {
                self.advance(b);
                *i += 1;
                self.scratch.clear();
                self.scratch.push(b);
                self.lex = LexState::NumberSign;
            }
            b'0' => {
                self.advance(b);
                *i += 1;
                self.scratch.clear();
                self.scratch.push(b);
                self.lex = LexState::NumberZero;
            }
            b'1'..=b'9' => {
                self.advance(b);
                *i += 1;
                self.scratch.clear();
                self.scratch.push(b);
                self.lex = LexState::NumberInt;
            }
            _ => return Err(self.invalid_char(bytes, *i)),
        }
        Ok(())
    }

    /// Emits the number in the scratch buffer. The terminating byte is not
    /// consumed; the caller's loop reprocesses it in `Ready` state.
    fn emit_number<T: TokenSink + ?Sized>(&mut self, sink: &mut T) -> Flow {
        let lexeme = core::str::from_utf8(&self.scratch).expect("number lexemes are ASCII");
        let flow = sink.token(Token::Number(lexeme));
        self.complete_value();
        self.scratch.clear();
        self.lex = LexState::Ready;
        flow
    }

    /// Copies the digit run starting at `i` into the scratch buffer.
    fn copy_digits(&mut self, bytes: &[u8], i: &mut usize) {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        self.scratch.extend_from_slice(&bytes[start..*i]);
        self.column += *i - start;
    }

    /// Adjusts the parse state after a value (scalar or closed container)
    /// finished.
    fn complete_value(&mut self) {
        self.parse = match self.containers.last() {
            Some(_) => ParseState::AfterValue,
            None => {
                self.saw_value = true;
                if self.options.allow_multiple_values {
                    ParseState::AtRoot
                } else {
                    ParseState::Done
                }
            }
        };
    }

    #[inline]
    fn advance(&mut self, b: u8) {
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn invalid_char(&mut self, bytes: &[u8], i: usize) -> ParseError {
        // Decode the whole scalar for the diagnostic; a chunk boundary can
        // truncate it, in which case the replacement character stands in.
        let (ch, _) = bstr::decode_utf8(&bytes[i..]);
        self.fail(SyntaxError::InvalidCharacter(ch.unwrap_or('\u{FFFD}')))
    }

    fn lone_surrogate(&mut self) -> ParseError {
        let high = self
            .escape
            .take_pending()
            .expect("surrogate lex states imply a pending high half");
        self.fail(SyntaxError::LoneSurrogate(u32::from(high)))
    }

    fn fail(&mut self, kind: SyntaxError) -> ParseError {
        let err = ParseError {
            kind,
            line: self.line,
            column: self.column,
        };
        self.status = Status::Failed(err.clone());
        err
    }
}
