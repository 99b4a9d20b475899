//! Diagnostic events emitted by the registry
//!
//! The registry reports every operation to a [`RegistryObserver`] as one
//! [`TraceEvent`]. Observers only watch; they cannot change what an
//! operation returns.

use super::{QueueError, QueueId};
use std::fmt;
use tracing::{debug, error, info, trace, warn, Level};

/// Registry operation an event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Destroy,
    Size,
    InsertAt,
    RemoveAt,
    GetAt,
    Clear,
    Compare,
    Teardown,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Destroy => "destroy",
            Operation::Size => "size",
            Operation::InsertAt => "insert_at",
            Operation::RemoveAt => "remove_at",
            Operation::GetAt => "get_at",
            Operation::Clear => "clear",
            Operation::Compare => "compare",
            Operation::Teardown => "teardown",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single argument or return value carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceArg<'a> {
    Id(QueueId),
    Index(usize),
    Int(i32),
    Str(&'a str),
    /// An absent string, printed as `NULL`
    Null,
}

impl fmt::Display for TraceArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceArg::Id(id) => write!(f, "{id}"),
            TraceArg::Index(n) => write!(f, "{n}"),
            TraceArg::Int(n) => write!(f, "{n}"),
            TraceArg::Str(s) => write!(f, "{s:?}"),
            TraceArg::Null => f.write_str("NULL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOutcome<'a> {
    /// Completed with nothing to return
    Done,
    Returns(TraceArg<'a>),
    /// Degraded to its fallback result for the given reason
    Failed(QueueError),
}

impl TraceOutcome<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            TraceOutcome::Done => "done",
            TraceOutcome::Returns(_) => "returns",
            TraceOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent<'a> {
    pub op: Operation,
    pub args: &'a [TraceArg<'a>],
    pub outcome: TraceOutcome<'a>,
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.op)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")?;

        match &self.outcome {
            TraceOutcome::Done => f.write_str(" done"),
            TraceOutcome::Returns(value) => write!(f, " returns {value}"),
            TraceOutcome::Failed(reason) => write!(f, " failed: {reason}"),
        }
    }
}

/// Render an event as one diagnostic line, e.g. `insert_at(0, 5, "x") done`
pub fn format_event(event: &TraceEvent<'_>) -> String {
    event.to_string()
}

/// Sink for registry diagnostics
pub trait RegistryObserver {
    /// When false the registry never builds events for this observer.
    const ENABLED: bool = true;

    fn on_event(&self, event: &TraceEvent<'_>);
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RegistryObserver for NoopObserver {
    const ENABLED: bool = false;

    #[inline(always)]
    fn on_event(&self, _event: &TraceEvent<'_>) {}
}

/// Forwards events to `tracing` at a fixed level
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    level: Level,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl TracingObserver {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl RegistryObserver for TracingObserver {
    // The line is rendered by the subscriber, so filtered-out levels cost no formatting.
    fn on_event(&self, event: &TraceEvent<'_>) {
        let op = event.op.as_str();
        let outcome = event.outcome.label();

        match self.level {
            Level::TRACE => trace!(op, outcome, "{}", event),
            Level::DEBUG => debug!(op, outcome, "{}", event),
            Level::INFO => info!(op, outcome, "{}", event),
            Level::WARN => warn!(op, outcome, "{}", event),
            _ => error!(op, outcome, "{}", event),
        }
    }
}
