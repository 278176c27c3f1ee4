//! The push-style parser: bytes in, [`ParseEvent`]s out through an
//! [`EventSink`].

use crate::{
    error::ParseError,
    event::ParseEvent,
    number::Number,
    options::ParserOptions,
    sink::{EventSink, Flow},
    tokenizer::{FeedStatus, Token, TokenSink, Tokenizer},
};

/// Adapts a [`TokenSink`] callback into [`ParseEvent`] deliveries.
struct EventBridge<'a, S> {
    sink: &'a mut S,
}

impl<S: EventSink> TokenSink for EventBridge<'_, S> {
    fn token(&mut self, token: Token<'_>) -> Flow {
        let event = match token {
            Token::Null => ParseEvent::Null,
            Token::Boolean(value) => ParseEvent::Boolean(value),
            Token::Number(lexeme) => ParseEvent::Number(Number::from_lexeme(lexeme)),
            Token::String(text) => ParseEvent::String(text.to_owned()),
            Token::MapKey(name) => ParseEvent::MapKey(name.to_owned()),
            Token::StartMap => ParseEvent::StartMap,
            Token::EndMap => ParseEvent::EndMap,
            Token::StartArray => ParseEvent::StartArray,
            Token::EndArray => ParseEvent::EndArray,
        };
        self.sink.accept(event)
    }
}

/// A push-style streaming parser that delivers [`ParseEvent`]s to an owned
/// [`EventSink`].
///
/// Events are delivered in document order during [`feed`](Self::feed), before
/// the call returns. Call [`close`](Self::close) after the last chunk so
/// truncated documents are rejected.
///
/// # Examples
///
/// ```
/// use jsonpull::{ParseEvent, ParserOptions, PushParser};
///
/// let mut parser = PushParser::new(Vec::new(), ParserOptions::default());
/// parser.feed(b"{\"on\": tr").unwrap();
/// parser.feed(b"ue}").unwrap();
/// parser.close().unwrap();
/// assert_eq!(
///     parser.into_sink(),
///     vec![
///         ParseEvent::StartMap,
///         ParseEvent::MapKey("on".to_owned()),
///         ParseEvent::Boolean(true),
///         ParseEvent::EndMap,
///     ],
/// );
/// ```
#[derive(Debug)]
pub struct PushParser<S> {
    tokenizer: Tokenizer,
    sink: S,
}

impl<S: EventSink> PushParser<S> {
    /// Creates a parser delivering events to `sink`.
    pub fn new(sink: S, options: ParserOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(options),
            sink,
        }
    }

    /// Feeds one chunk of input, delivering every event it completes.
    ///
    /// An empty chunk is equivalent to [`close`](Self::close).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on malformed input; the error repeats on
    /// every later call.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FeedStatus, ParseError> {
        let mut bridge = EventBridge {
            sink: &mut self.sink,
        };
        self.tokenizer.feed(bytes, &mut bridge)
    }

    /// Signals end of input, rejecting truncated documents. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the document is incomplete.
    pub fn close(&mut self) -> Result<FeedStatus, ParseError> {
        self.feed(&[])
    }

    /// Borrows the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrows the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the parser and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
