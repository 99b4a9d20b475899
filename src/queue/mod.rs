//! Handle-addressed string queues
//!
//! This module provides:
//! - A registry owning many independent positional string queues
//! - Monotonic handles that are never reissued after deletion
//! - Lexicographic three-way comparison between queues
//! - Pluggable observers receiving one diagnostic event per operation

pub mod error;
pub mod registry;
pub mod trace;

pub use error::QueueError;
pub use registry::{QueueId, QueueRegistry};
pub use trace::{
    format_event, NoopObserver, Operation, RegistryObserver, TraceArg, TraceEvent, TraceOutcome,
    TracingObserver,
};

/// Registry used by the command line, traced or not depending on configuration
pub type TracedRegistry = QueueRegistry<Option<TracingObserver>>;

impl<O: RegistryObserver> RegistryObserver for Option<O> {
    const ENABLED: bool = O::ENABLED;

    fn on_event(&self, event: &TraceEvent<'_>) {
        if let Some(observer) = self {
            observer.on_event(event);
        }
    }
}

/// Create a registry that forwards events to `tracing` when `observer` is set
pub fn create_registry(observer: Option<TracingObserver>) -> TracedRegistry {
    QueueRegistry::with_observer(observer)
}
