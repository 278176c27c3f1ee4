//! Events emitted by the parser.
//!
//! [`ParseEvent`] enumerates everything the tokenizer can report: one
//! variant per scalar token plus the structural boundaries of maps and
//! arrays. Map keys are a distinct variant so consumers can tell a key from
//! a scalar string without tracking container context.

use crate::number::Number;

/// One parsed token or structural boundary.
///
/// Events arrive in strict document order; a well-formed document always
/// yields balanced `StartMap`/`EndMap` and `StartArray`/`EndArray` pairs
/// with every `MapKey` immediately followed by the events of its value.
///
/// # Examples
///
/// ```
/// use jsonpull::{ParseEvent, ParserOptions, PushParser};
///
/// let mut parser = PushParser::new(Vec::new(), ParserOptions::default());
/// parser.feed(b"[null]").unwrap();
/// parser.close().unwrap();
/// assert_eq!(
///     parser.into_sink(),
///     vec![
///         ParseEvent::StartArray,
///         ParseEvent::Null,
///         ParseEvent::EndArray,
///     ]
/// );
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A JSON `null`.
    Null,
    /// A JSON `true` or `false`.
    Boolean(bool),
    /// A JSON number, preserved exactly.
    Number(Number),
    /// A JSON string value (never a map key).
    String(String),
    /// Marks the start of a JSON object.
    StartMap,
    /// An object member name.
    MapKey(String),
    /// Marks the end of a JSON object.
    EndMap,
    /// Marks the start of a JSON array.
    StartArray,
    /// Marks the end of a JSON array.
    EndArray,
}

impl ParseEvent {
    /// Returns `true` for scalar value events (null, boolean, number,
    /// string), `false` for map keys and structural boundaries.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Boolean(_) | Self::Number(_) | Self::String(_)
        )
    }

    /// Returns the key if this event is a [`MapKey`], otherwise `None`.
    ///
    /// [`MapKey`]: ParseEvent::MapKey
    #[must_use]
    pub fn as_map_key(&self) -> Option<&str> {
        if let Self::MapKey(key) = self {
            Some(key)
        } else {
            None
        }
    }
}
