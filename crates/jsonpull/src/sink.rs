//! The sink contract and the queue collector.
//!
//! Every consumer of events — pipeline stage or terminal collector —
//! implements [`EventSink`] uniformly; there is no runtime capability
//! probing. A sink controls the session through its return value: `Stop`
//! aborts the in-progress feed without an error.

use std::collections::VecDeque;

use crate::event::ParseEvent;

/// Whether the producer should keep going after an event was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep delivering events.
    Continue,
    /// Abort the in-progress feed; the session is closed afterwards.
    Stop,
}

/// A consumer of parse events.
pub trait EventSink {
    /// Accepts one event, in document order.
    fn accept(&mut self, event: ParseEvent) -> Flow;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        (**self).accept(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        (**self).accept(event)
    }
}

/// Collects every event; handy as a terminal sink in tests and tools.
impl EventSink for Vec<ParseEvent> {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        self.push(event);
        Flow::Continue
    }
}

/// A FIFO event buffer bridging push and pull.
///
/// The pull adapter installs one of these as the push parser's sink: a feed
/// call grows the queue, the consumer drains it front to back. The backing
/// storage is reused across fills, so a session's memory stays bounded by
/// the largest batch of events one chunk produced.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ParseEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest buffered event.
    pub fn pop(&mut self) -> Option<ParseEvent> {
        self.events.pop_front()
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventQueue {
    fn accept(&mut self, event: ParseEvent) -> Flow {
        self.events.push_back(event);
        Flow::Continue
    }
}
