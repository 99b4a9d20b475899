//! Registry of independent positional string queues addressed by handle

use super::error::QueueError;
use super::trace::{
    NoopObserver, Operation, RegistryObserver, TraceArg, TraceEvent, TraceOutcome,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Opaque handle of a queue owned by a [`QueueRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QueueId(pub u64);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns every queue and hands out handles that are never reissued.
///
/// No operation fails loudly: a missing handle, an out-of-range position or
/// an absent value degrades to a no-op or a sentinel result and is reported
/// to the observer.
#[derive(Debug)]
pub struct QueueRegistry<O: RegistryObserver = NoopObserver> {
    queues: HashMap<QueueId, VecDeque<String>>,
    next_id: u64,
    observer: O,
}

impl Default for QueueRegistry<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueRegistry<NoopObserver> {
    /// Create an empty registry without diagnostics
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl<O: RegistryObserver> QueueRegistry<O> {
    /// Create an empty registry reporting to `observer`
    pub fn with_observer(observer: O) -> Self {
        Self {
            queues: HashMap::new(),
            next_id: 0,
            observer,
        }
    }

    /// The observer receiving this registry's events
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Allocate a new empty queue and return its handle
    pub fn create(&mut self) -> QueueId {
        let id = QueueId(self.next_id);
        self.next_id += 1;
        self.queues.insert(id, VecDeque::new());

        self.report(Operation::Create, &[], TraceOutcome::Returns(TraceArg::Id(id)));
        id
    }

    /// Remove a queue; unknown handles are ignored
    pub fn destroy(&mut self, id: QueueId) {
        self.queues.remove(&id);
        self.report(Operation::Destroy, &[TraceArg::Id(id)], TraceOutcome::Done);
    }

    /// Number of strings in the queue, 0 if the handle does not exist
    pub fn size(&self, id: QueueId) -> usize {
        let args = [TraceArg::Id(id)];
        match self.queue(id) {
            Ok(queue) => {
                let len = queue.len();
                self.report(Operation::Size, &args, TraceOutcome::Returns(TraceArg::Index(len)));
                len
            }
            Err(e) => {
                self.report(Operation::Size, &args, TraceOutcome::Failed(e));
                0
            }
        }
    }

    /// Insert `value` before the element at `position`, or append when
    /// `position` is at or past the end.
    pub fn insert_at(&mut self, id: QueueId, position: usize, value: Option<&str>) {
        let result = self.try_insert_at(id, position, value);
        let args = [
            TraceArg::Id(id),
            TraceArg::Index(position),
            value.map_or(TraceArg::Null, TraceArg::Str),
        ];
        self.report(Operation::InsertAt, &args, Self::unit_outcome(result));
    }

    /// Remove the element at `position`; out-of-range positions are ignored
    pub fn remove_at(&mut self, id: QueueId, position: usize) {
        let result = self.try_remove_at(id, position);
        let args = [TraceArg::Id(id), TraceArg::Index(position)];
        self.report(Operation::RemoveAt, &args, Self::unit_outcome(result));
    }

    /// Borrow the string at `position`.
    ///
    /// The borrow ends before the next mutation of the registry, so callers
    /// that need the value longer must copy it.
    pub fn get_at(&self, id: QueueId, position: usize) -> Option<&str> {
        let args = [TraceArg::Id(id), TraceArg::Index(position)];
        match self.element(id, position) {
            Ok(value) => {
                self.report(Operation::GetAt, &args, TraceOutcome::Returns(TraceArg::Str(value)));
                Some(value)
            }
            Err(e) => {
                self.report(Operation::GetAt, &args, TraceOutcome::Failed(e));
                None
            }
        }
    }

    /// Empty the queue while keeping its handle valid
    pub fn clear(&mut self, id: QueueId) {
        let result = self.queue_mut(id).map(VecDeque::clear);
        self.report(Operation::Clear, &[TraceArg::Id(id)], Self::unit_outcome(result));
    }

    /// Three-way comparison of two queues, returning -1, 0 or 1.
    ///
    /// A missing queue sorts before any existing one and two missing queues
    /// are equal. Existing queues compare element by element in byte order,
    /// a strict prefix sorting first.
    pub fn compare(&self, id1: QueueId, id2: QueueId) -> i32 {
        let ordering = match (self.queues.get(&id1), self.queues.get(&id2)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(first), Some(second)) => compare_contents(first, second),
        };
        let result = ordering as i32;

        let args = [TraceArg::Id(id1), TraceArg::Id(id2)];
        self.report(Operation::Compare, &args, TraceOutcome::Returns(TraceArg::Int(result)));
        result
    }

    /// Whether `id` refers to a live queue
    pub fn contains(&self, id: QueueId) -> bool {
        self.queues.contains_key(&id)
    }

    /// Number of live queues
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Whether no queue is live
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Drop every queue and the registry itself, returning how many queues
    /// were still live.
    pub fn teardown(self) -> usize {
        let dropped = self.queues.len();
        self.report(Operation::Teardown, &[], TraceOutcome::Returns(TraceArg::Index(dropped)));
        dropped
    }

    fn queue(&self, id: QueueId) -> Result<&VecDeque<String>, QueueError> {
        self.queues.get(&id).ok_or(QueueError::HandleNotFound(id))
    }

    fn queue_mut(&mut self, id: QueueId) -> Result<&mut VecDeque<String>, QueueError> {
        self.queues
            .get_mut(&id)
            .ok_or(QueueError::HandleNotFound(id))
    }

    fn element(&self, id: QueueId, position: usize) -> Result<&str, QueueError> {
        let queue = self.queue(id)?;
        queue
            .get(position)
            .map(String::as_str)
            .ok_or(QueueError::PositionOutOfRange {
                id,
                position,
                len: queue.len(),
            })
    }

    fn try_insert_at(
        &mut self,
        id: QueueId,
        position: usize,
        value: Option<&str>,
    ) -> Result<(), QueueError> {
        let queue = self.queue_mut(id)?;
        let value = value.ok_or(QueueError::InvalidArgument("value is null"))?;

        if position >= queue.len() {
            queue.push_back(value.to_string());
        } else {
            queue.insert(position, value.to_string());
        }
        Ok(())
    }

    fn try_remove_at(&mut self, id: QueueId, position: usize) -> Result<(), QueueError> {
        let queue = self.queue_mut(id)?;
        if position >= queue.len() {
            return Err(QueueError::PositionOutOfRange {
                id,
                position,
                len: queue.len(),
            });
        }

        queue.remove(position);
        Ok(())
    }

    fn unit_outcome(result: Result<(), QueueError>) -> TraceOutcome<'static> {
        match result {
            Ok(()) => TraceOutcome::Done,
            Err(e) => TraceOutcome::Failed(e),
        }
    }

    #[inline]
    fn report<'a>(&self, op: Operation, args: &'a [TraceArg<'a>], outcome: TraceOutcome<'a>) {
        if O::ENABLED {
            self.observer.on_event(&TraceEvent { op, args, outcome });
        }
    }
}

// Byte-wise lexicographic order over elements; a strict prefix sorts first.
fn compare_contents(first: &VecDeque<String>, second: &VecDeque<String>) -> Ordering {
    for (a, b) in first.iter().zip(second.iter()) {
        match a.as_bytes().cmp(b.as_bytes()) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    first.len().cmp(&second.len())
}
