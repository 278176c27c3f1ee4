//! Accumulator for `\uXXXX` escape sequences, including surrogate pairs.
//!
//! Four hex digits are collected one byte at a time (escapes can be split
//! across chunks). A high surrogate half is held until the matching low
//! half arrives through a second `\uXXXX` escape; anything else makes the
//! held half a lone surrogate, which is an error.

use crate::error::SyntaxError;

/// What happened after feeding one hex digit.
pub(crate) enum EscapeStep {
    /// More hex digits wanted.
    NeedMore,
    /// The escape decoded to a character.
    Char(char),
    /// A high surrogate was parsed; the next escape must supply the low
    /// half before any other string content.
    NeedLowSurrogate,
}

#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    hex: [u8; 4],
    len: u8,
    pending_high: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self {
            hex: [0; 4],
            len: 0,
            pending_high: None,
        }
    }

    /// Takes the held high surrogate, if any, for error reporting.
    pub(crate) fn take_pending(&mut self) -> Option<u16> {
        self.pending_high.take()
    }

    /// Feeds one byte of the four-digit hex payload.
    pub(crate) fn feed(&mut self, b: u8) -> Result<EscapeStep, SyntaxError> {
        if !b.is_ascii_hexdigit() {
            return Err(SyntaxError::InvalidUnicodeEscape(char::from(b)));
        }

        self.hex[usize::from(self.len)] = b;
        self.len += 1;
        if self.len < 4 {
            return Ok(EscapeStep::NeedMore);
        }
        self.len = 0;

        // The digits were checked as they arrived.
        let hex = core::str::from_utf8(&self.hex).expect("hex digits are ASCII");
        let code = u16::from_str_radix(hex, 16).expect("four hex digits fit u16");

        match (self.pending_high.take(), code) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let scalar = 0x10000
                    + ((u32::from(high) - 0xD800) << 10)
                    + (u32::from(code) - 0xDC00);
                let ch = char::from_u32(scalar)
                    .ok_or(SyntaxError::LoneSurrogate(u32::from(high)))?;
                Ok(EscapeStep::Char(ch))
            }
            (Some(high), _) => Err(SyntaxError::LoneSurrogate(u32::from(high))),
            (None, 0xD800..=0xDBFF) => {
                self.pending_high = Some(code);
                Ok(EscapeStep::NeedLowSurrogate)
            }
            (None, 0xDC00..=0xDFFF) => Err(SyntaxError::LoneSurrogate(u32::from(code))),
            (None, _) => Ok(EscapeStep::Char(
                char::from_u32(u32::from(code)).expect("non-surrogate BMP code point"),
            )),
        }
    }
}
