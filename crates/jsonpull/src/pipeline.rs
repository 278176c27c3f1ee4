//! Composition of [`EventSink`] stages into a single processing chain.

use crate::{error::PipelineBuildError, sink::EventSink};

/// A pipeline stage: a sink transformer installed around a downstream sink.
///
/// A stage receives the already-built downstream chain and returns the sink
/// that upstream events should enter. Construction may fail, for example on
/// invalid stage configuration.
pub trait Stage {
    /// Wraps `downstream` and returns the stage's inbound sink.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineBuildError`] if the stage cannot be built; the
    /// pipeline builder stamps the failing stage's position onto it.
    fn install<'a>(
        self: Box<Self>,
        downstream: Box<dyn EventSink + 'a>,
    ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError>;
}

/// An ordered collection of [`Stage`]s, assembled front to back.
///
/// The first stage added is the outermost: events enter it first and leave
/// the last stage into the terminal sink, mirroring left-to-right
/// composition order.
///
/// # Examples
///
/// ```
/// use jsonpull::{EventSink, Flow, ParseEvent, Pipeline, PipelineBuildError, Stage};
///
/// /// Drops `Null` events, forwarding everything else.
/// struct DropNulls;
///
/// struct DropNullsSink<'a>(Box<dyn EventSink + 'a>);
///
/// impl EventSink for DropNullsSink<'_> {
///     fn accept(&mut self, event: ParseEvent) -> Flow {
///         if event == ParseEvent::Null {
///             Flow::Continue
///         } else {
///             self.0.accept(event)
///         }
///     }
/// }
///
/// impl Stage for DropNulls {
///     fn install<'a>(
///         self: Box<Self>,
///         downstream: Box<dyn EventSink + 'a>,
///     ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError> {
///         Ok(Box::new(DropNullsSink(downstream)))
///     }
/// }
///
/// let mut sink = Pipeline::new()
///     .stage(DropNulls)
///     .build(Vec::<ParseEvent>::new())
///     .unwrap();
/// sink.accept(ParseEvent::Null);
/// sink.accept(ParseEvent::Boolean(true));
/// ```
#[derive(Default)]
pub struct Pipeline<'a> {
    stages: Vec<Box<dyn Stage + 'a>>,
}

impl<'a> Pipeline<'a> {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage. Stages run in the order added.
    #[must_use]
    pub fn stage(mut self, stage: impl Stage + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Assembles the chain around `sink` and returns the entry sink.
    ///
    /// Stages are installed back to front so that the first stage added
    /// ends up outermost. An empty pipeline returns `sink` unchanged
    /// (boxed).
    ///
    /// # Errors
    ///
    /// Returns the first stage's [`PipelineBuildError`], with
    /// [`index`](PipelineBuildError::index) set to the failing stage's
    /// position in the order added.
    pub fn build(
        self,
        sink: impl EventSink + 'a,
    ) -> Result<Box<dyn EventSink + 'a>, PipelineBuildError> {
        let mut chain: Box<dyn EventSink + 'a> = Box::new(sink);
        for (index, stage) in self.stages.into_iter().enumerate().rev() {
            chain = stage.install(chain).map_err(|mut err| {
                err.index = index;
                err
            })?;
        }
        Ok(chain)
    }

    /// The number of stages added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stages have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
