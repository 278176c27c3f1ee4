use std::{cell::RefCell, rc::Rc};

use crate::{
    EventSink, FeedStatus, Flow, ParseEvent, ParserOptions, Pipeline, PipelineBuildError,
    PushParser, Stage,
};

/// Tags every string event with a label, recording traversal order.
struct Tag(&'static str);

struct TagSink<'a> {
    label: &'static str,
    downstream: Box<dyn EventSink + 'a>,
}

impl EventSink for TagSink<'_> {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        let event = match event {
            ParseEvent::String(text) => ParseEvent::String(format!("{text}+{}", self.label)),
            other => other,
        };
        self.downstream.accept(event)
    }
}

impl Stage for Tag {
    fn install<'a>(
        self: Box<Self>,
        downstream: Box<dyn EventSink + 'a>,
    ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError> {
        Ok(Box::new(TagSink {
            label: self.0,
            downstream,
        }))
    }
}

/// Always fails to install.
struct Broken;

impl Stage for Broken {
    fn install<'a>(
        self: Box<Self>,
        _downstream: Box<dyn EventSink + 'a>,
    ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError> {
        Err(PipelineBuildError::new("broken on purpose"))
    }
}

/// Shared recording sink so events survive the boxed chain.
#[derive(Clone, Default)]
struct Record(Rc<RefCell<Vec<ParseEvent>>>);

impl EventSink for Record {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        self.0.borrow_mut().push(event);
        Flow::Continue
    }
}

#[test]
fn first_stage_listed_runs_first() {
    let record = Record::default();
    let mut chain = Pipeline::new()
        .stage(Tag("outer"))
        .stage(Tag("inner"))
        .build(record.clone())
        .unwrap();

    chain.accept(ParseEvent::String("x".to_owned()));
    assert_eq!(
        *record.0.borrow(),
        vec![ParseEvent::String("x+outer+inner".to_owned())],
    );
}

#[test]
fn empty_pipeline_is_the_terminal_sink() {
    let record = Record::default();
    let mut chain = Pipeline::new().build(record.clone()).unwrap();
    chain.accept(ParseEvent::Null);
    assert_eq!(*record.0.borrow(), vec![ParseEvent::Null]);
}

#[test]
fn build_failure_reports_the_stage_index() {
    let err = Pipeline::new()
        .stage(Tag("ok"))
        .stage(Broken)
        .stage(Tag("unreached"))
        .build(Vec::<ParseEvent>::new())
        .err()
        .unwrap();
    assert_eq!(err.index, 1);
    assert_eq!(err.reason, "broken on purpose");
}

#[test]
fn pipeline_feeds_from_a_push_parser() {
    let record = Record::default();
    let chain = Pipeline::new()
        .stage(Tag("seen"))
        .build(record.clone())
        .unwrap();

    let mut parser = PushParser::new(chain, ParserOptions::default());
    parser.feed(br#"["a", 1]"#).unwrap();
    parser.close().unwrap();

    assert_eq!(
        *record.0.borrow(),
        vec![
            ParseEvent::StartArray,
            ParseEvent::String("a+seen".to_owned()),
            ParseEvent::Number(crate::Number::from_lexeme("1")),
            ParseEvent::EndArray,
        ],
    );
}

#[test]
fn stop_propagates_through_the_chain() {
    /// Stops the session at the first string event.
    struct StopAtString;
    struct StopAtStringSink<'a>(Box<dyn EventSink + 'a>);

    impl EventSink for StopAtStringSink<'_> {
        fn accept(&mut self, event: ParseEvent) -> Flow {
            if matches!(event, ParseEvent::String(_)) {
                Flow::Stop
            } else {
                self.0.accept(event)
            }
        }
    }

    impl Stage for StopAtString {
        fn install<'a>(
            self: Box<Self>,
            downstream: Box<dyn EventSink + 'a>,
        ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError> {
            Ok(Box::new(StopAtStringSink(downstream)))
        }
    }

    let record = Record::default();
    let chain = Pipeline::new()
        .stage(StopAtString)
        .build(record.clone())
        .unwrap();
    let mut parser = PushParser::new(chain, ParserOptions::default());

    let status = parser.feed(br#"[1, "stop", 2]"#).unwrap();
    assert_eq!(status, FeedStatus::Stopped);
    assert_eq!(
        *record.0.borrow(),
        vec![
            ParseEvent::StartArray,
            ParseEvent::Number(crate::Number::from_lexeme("1")),
        ],
    );

    // A stopped session stays stopped.
    assert_eq!(parser.feed(b"ignored").unwrap(), FeedStatus::Stopped);
}
