//! A streaming, pull-based JSON event parser.
//!
//! `jsonpull` bridges a push-style JSON tokenizer and pull-style consumers.
//! The [`PushParser`] feeds raw bytes into the tokenizer and forwards one
//! typed [`ParseEvent`] per token to a caller-supplied [`EventSink`]; the
//! [`PullParser`] owns a byte source and exposes the same events one at a
//! time, reading further chunks only when its internal queue runs dry. This
//! keeps memory bounded regardless of document size.
//!
//! Numbers are never routed through binary floating point: integer lexemes
//! become arbitrary-precision [`Integer`]s and fractional or exponential
//! lexemes become exact textual [`Decimal`]s.
//!
//! # Examples
//!
//! ```
//! use jsonpull::{ParseEvent, PullOptions, PullParser};
//!
//! let doc = br#"{"a": [true, null]}"#;
//! let parser = PullParser::new(&doc[..], PullOptions::default()).unwrap();
//! let events: Vec<_> = parser.map(Result::unwrap).collect();
//! assert_eq!(events[0], ParseEvent::StartMap);
//! assert_eq!(events[1], ParseEvent::MapKey("a".into()));
//! assert_eq!(events.last(), Some(&ParseEvent::EndMap));
//! ```

mod error;
mod escape_buffer;
mod event;
mod literal_buffer;
mod number;
mod options;
mod pipeline;
mod pull;
mod push;
mod sink;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use error::{
    ConfigError, ParseError, PipelineBuildError, SourceError, StreamError, SyntaxError,
};
pub use event::ParseEvent;
pub use number::{Decimal, Integer, Number};
pub use options::{ParserOptions, PullOptions};
pub use pipeline::{Pipeline, Stage};
pub use pull::PullParser;
pub use push::PushParser;
pub use sink::{EventQueue, EventSink, Flow};
pub use tokenizer::{FeedStatus, Token, TokenSink, Tokenizer};
