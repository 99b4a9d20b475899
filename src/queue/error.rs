//! Failure conditions of registry operations
//!
//! None of these ever escape the public registry API. Each operation turns
//! them into its degraded result and reports them to the observer.

use super::QueueId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue {0} does not exist")]
    HandleNotFound(QueueId),

    #[error("queue {id} does not contain string at position {position}")]
    PositionOutOfRange {
        id: QueueId,
        position: usize,
        len: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
