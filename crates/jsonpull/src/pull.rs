//! The pull-style parser: a byte source in, one [`ParseEvent`] at a time
//! out.

use std::io::{ErrorKind, Read};

use crate::{
    error::{ConfigError, SourceError, StreamError},
    event::ParseEvent,
    options::PullOptions,
    push::PushParser,
    sink::EventQueue,
};

#[derive(Debug)]
enum State {
    /// The source may still produce bytes.
    Running,
    /// End of stream reached and the document finalized cleanly.
    Exhausted,
    /// A parse or source error occurred; no further source access happens.
    Failed(StreamError),
}

/// A pull-style streaming parser over a [`Read`] byte source.
///
/// The parser reads the source in `chunk_size` slices into one reusable
/// buffer, feeds them to an internal [`PushParser`], and queues the events
/// each chunk completes. [`next_event`](Self::next_event) drains the queue
/// and triggers the next read only when it runs dry, so memory stays bounded
/// by the chunk size plus the largest single token.
///
/// Terminal states are idempotent: after exhaustion every call returns
/// `Ok(None)`, and after a failure every call returns the same error, with
/// no further source access either way.
///
/// # Examples
///
/// ```
/// use jsonpull::{ParseEvent, PullOptions, PullParser};
///
/// let mut parser = PullParser::new(&b"[1, 2]"[..], PullOptions::default()).unwrap();
/// assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::StartArray));
/// assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::Number(1.into())));
/// assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::Number(2.into())));
/// assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::EndArray));
/// assert_eq!(parser.next_event().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct PullParser<R> {
    source: R,
    parser: PushParser<EventQueue>,
    buffer: Vec<u8>,
    state: State,
    /// The [`Iterator`] impl has yielded its final item.
    fused: bool,
}

impl<R: Read> PullParser<R> {
    /// Creates a parser over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroChunkSize`] if `options.chunk_size` is 0.
    pub fn new(source: R, options: PullOptions) -> Result<Self, ConfigError> {
        if options.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(Self {
            source,
            parser: PushParser::new(EventQueue::new(), options.parser),
            buffer: vec![0; options.chunk_size],
            state: State::Running,
            fused: false,
        })
    }

    /// Returns the next event, reading from the source as needed.
    ///
    /// `Ok(None)` means the document (or, with multiple top-level values
    /// enabled, the whole stream) completed cleanly. Events completed
    /// before a failure still drain out in document order; the error
    /// surfaces once the queue is empty.
    ///
    /// # Errors
    ///
    /// [`StreamError::Parse`] on malformed input, [`StreamError::Source`]
    /// on a read failure. Interrupted reads are retried. The same error is
    /// returned on every later call.
    pub fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError> {
        loop {
            if let Some(event) = self.parser.sink_mut().pop() {
                return Ok(Some(event));
            }
            match &self.state {
                State::Failed(err) => return Err(err.clone()),
                State::Exhausted => return Ok(None),
                State::Running => {}
            }
            let read = match self.source.read(&mut self.buffer) {
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.state = State::Failed(SourceError::from(err).into());
                    continue;
                }
            };
            if read == 0 {
                // Finalization can still complete a dangling number token,
                // so loop back around to drain before reporting the end.
                self.state = match self.parser.close() {
                    Ok(_) => State::Exhausted,
                    Err(err) => State::Failed(err.into()),
                };
            } else if let Err(err) = self.parser.feed(&self.buffer[..read]) {
                self.state = State::Failed(err.into());
            }
        }
    }

    /// Consumes the parser and returns the byte source.
    pub fn into_source(self) -> R {
        self.source
    }
}

/// Yields each event as `Ok`, or one `Err` followed by `None`.
///
/// Unlike [`next_event`](PullParser::next_event), which keeps re-surfacing
/// a terminal error, the iterator yields it once and then fuses.
impl<R: Read> Iterator for PullParser<R> {
    type Item = Result<ParseEvent, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}
