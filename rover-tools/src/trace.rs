#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A small, allocation-friendly trace event.
///
/// This is intentionally "dumb data" so it can be recorded while the tree
/// runs and later rendered by tooling. The runtime uses the `a`/`b` payload
/// words for child indices and counters; richer event types belong in the
/// tools that consume them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

use rover_core::Blackboard;

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: &str = "rover.trace.log";
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: &str = "rover.trace.sink";

/// Emit an event into whichever trace channels the blackboard carries.
///
/// A blackboard with neither key pays only two map lookups, so the runtime
/// can emit unconditionally from its hot path.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut::<TraceLog>(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut::<Box<dyn TraceSink>>(TRACE_SINK) {
        sink.emit(event);
    }
}
