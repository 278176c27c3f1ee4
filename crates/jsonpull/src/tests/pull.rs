use std::{
    cell::Cell,
    io::{self, Read},
    rc::Rc,
};

use crate::{
    ConfigError, Number, ParseEvent, PullOptions, PullParser, StreamError, SyntaxError,
};

/// A source that hands out its data and counts `read` calls.
#[derive(Debug)]
struct CountingReader {
    data: Vec<u8>,
    pos: usize,
    reads: Rc<Cell<usize>>,
}

impl CountingReader {
    fn new(data: &[u8]) -> (Self, Rc<Cell<usize>>) {
        let reads = Rc::new(Cell::new(0));
        (
            Self {
                data: data.to_vec(),
                pos: 0,
                reads: Rc::clone(&reads),
            },
            reads,
        )
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.set(self.reads.get() + 1);
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Yields `prefix`, then fails every read with the given error kind.
struct FailingReader {
    prefix: Vec<u8>,
    kind: io::ErrorKind,
    reads: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.prefix.is_empty() {
            return Err(io::Error::new(self.kind, "source broke"));
        }
        let n = buf.len().min(self.prefix.len());
        buf[..n].copy_from_slice(&self.prefix[..n]);
        self.prefix.drain(..n);
        Ok(n)
    }
}

fn options(chunk_size: usize) -> PullOptions {
    PullOptions {
        chunk_size,
        ..PullOptions::default()
    }
}

#[test]
fn streams_events_across_tiny_chunks() {
    let (source, _) = CountingReader::new(br#"{"a": [1, "two"]}"#);
    let parser = PullParser::new(source, options(3)).unwrap();
    let events: Vec<_> = parser.map(Result::unwrap).collect();
    assert_eq!(
        events,
        vec![
            ParseEvent::StartMap,
            ParseEvent::MapKey("a".to_owned()),
            ParseEvent::StartArray,
            ParseEvent::Number(Number::from_lexeme("1")),
            ParseEvent::String("two".to_owned()),
            ParseEvent::EndArray,
            ParseEvent::EndMap,
        ],
    );
}

#[test]
fn zero_chunk_size_is_rejected() {
    let (source, _) = CountingReader::new(b"[]");
    let err = PullParser::new(source, options(0)).unwrap_err();
    assert_eq!(err, ConfigError::ZeroChunkSize);
}

#[test]
fn reads_only_when_the_queue_runs_dry() {
    let (source, reads) = CountingReader::new(b"[1, 2, 3]");
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();

    // The whole document fits in the first chunk.
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::StartArray));
    assert_eq!(reads.get(), 1);
    for _ in 0..3 {
        assert!(matches!(
            parser.next_event().unwrap(),
            Some(ParseEvent::Number(_))
        ));
    }
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::EndArray));
    assert_eq!(reads.get(), 1);

    // One more read observes end of stream and finalizes.
    assert_eq!(parser.next_event().unwrap(), None);
    assert_eq!(reads.get(), 2);
}

#[test]
fn exhaustion_is_idempotent_without_further_reads() {
    let (source, reads) = CountingReader::new(b"null");
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::Null));
    assert_eq!(parser.next_event().unwrap(), None);
    let settled = reads.get();
    for _ in 0..3 {
        assert_eq!(parser.next_event().unwrap(), None);
    }
    assert_eq!(reads.get(), settled);
}

#[test]
fn number_dangling_at_end_of_stream_still_arrives() {
    let (source, _) = CountingReader::new(b"42");
    let mut parser = PullParser::new(source, options(1)).unwrap();
    assert_eq!(
        parser.next_event().unwrap(),
        Some(ParseEvent::Number(Number::from_lexeme("42"))),
    );
    assert_eq!(parser.next_event().unwrap(), None);
}

#[test]
fn parse_errors_repeat_without_further_reads() {
    let (source, reads) = CountingReader::new(b"[1,,]");
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::StartArray));
    assert!(matches!(
        parser.next_event().unwrap(),
        Some(ParseEvent::Number(_))
    ));

    let first = parser.next_event().unwrap_err();
    let StreamError::Parse(parse_err) = &first else {
        panic!("expected a parse error, got {first:?}");
    };
    assert_eq!(parse_err.kind(), &SyntaxError::InvalidCharacter(','));

    let settled = reads.get();
    assert_eq!(parser.next_event().unwrap_err(), first);
    assert_eq!(parser.next_event().unwrap_err(), first);
    assert_eq!(reads.get(), settled);
}

#[test]
fn source_errors_surface_with_their_kind() {
    let source = FailingReader {
        prefix: b"[1, ".to_vec(),
        kind: io::ErrorKind::ConnectionReset,
        reads: 0,
    };
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::StartArray));
    assert!(matches!(
        parser.next_event().unwrap(),
        Some(ParseEvent::Number(_))
    ));

    let err = parser.next_event().unwrap_err();
    let StreamError::Source(source_err) = &err else {
        panic!("expected a source error, got {err:?}");
    };
    assert_eq!(source_err.kind, io::ErrorKind::ConnectionReset);
    assert_eq!(parser.next_event().unwrap_err(), err);
}

#[test]
fn interrupted_reads_are_retried() {
    struct InterruptOnce {
        inner: io::Cursor<Vec<u8>>,
        interrupted: bool,
    }
    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    let source = InterruptOnce {
        inner: io::Cursor::new(b"true".to_vec()),
        interrupted: false,
    };
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::Boolean(true)));
    assert_eq!(parser.next_event().unwrap(), None);
}

#[test]
fn iterator_yields_an_error_once_then_fuses() {
    let (source, _) = CountingReader::new(b"{]");
    let mut parser = PullParser::new(source, PullOptions::default()).unwrap();
    assert!(matches!(parser.next(), Some(Ok(ParseEvent::StartMap))));
    assert!(matches!(parser.next(), Some(Err(StreamError::Parse(_)))));
    assert_eq!(parser.next(), None);
    assert_eq!(parser.next(), None);
}

#[test]
fn multiple_values_stream_through_the_pull_api() {
    let (source, _) = CountingReader::new(b"1 2 3");
    let opts = PullOptions {
        parser: crate::ParserOptions {
            allow_multiple_values: true,
            ..crate::ParserOptions::default()
        },
        ..PullOptions::default()
    };
    let mut parser = PullParser::new(source, opts).unwrap();
    for expected in ["1", "2", "3"] {
        assert_eq!(
            parser.next_event().unwrap(),
            Some(ParseEvent::Number(Number::from_lexeme(expected))),
        );
    }
    assert_eq!(parser.next_event().unwrap(), None);
}

#[test]
fn into_source_returns_the_reader() {
    let (source, _) = CountingReader::new(b"null extra");
    let opts = PullOptions {
        parser: crate::ParserOptions {
            allow_multiple_values: true,
            ..crate::ParserOptions::default()
        },
        chunk_size: 4,
        ..PullOptions::default()
    };
    let mut parser = PullParser::new(source, opts).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(ParseEvent::Null));
    let source = parser.into_source();
    assert!(source.pos <= source.data.len());
}
