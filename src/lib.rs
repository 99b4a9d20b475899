pub mod cli;
pub mod config;
pub mod queue;

// Public API
pub use config::Config;
pub use queue::{
    QueueError, QueueId, QueueRegistry, RegistryObserver, TraceEvent, TracingObserver,
};
