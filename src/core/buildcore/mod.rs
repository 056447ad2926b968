pub use crate::core::{
    array::ArrayRingQueue,
    linked::LinkedRingQueue,
    queue::{shared, BoundedQueue, Item, QueueError, Retention, SafeQueue},
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Backing representation of a queue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    Array,
    Linked,
}

impl Display for QueueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueKind::Array => write!(f, "array"),
            QueueKind::Linked => write!(f, "linked"),
        }
    }
}

/// Either representation behind one contract, without boxing
#[derive(Clone, Debug)]
pub enum AnyQueue<T> {
    Array(ArrayRingQueue<T>),
    Linked(LinkedRingQueue<T>),
}

impl<T> AnyQueue<T> {
    pub fn kind(&self) -> QueueKind {
        match self {
            AnyQueue::Array(_) => QueueKind::Array,
            AnyQueue::Linked(_) => QueueKind::Linked,
        }
    }

    /// Oldest live value without removing it
    pub fn peek(&self) -> Option<&T> {
        match self {
            AnyQueue::Array(queue) => queue.peek(),
            AnyQueue::Linked(queue) => queue.peek(),
        }
    }

    /// Snapshot of the live values, oldest first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            AnyQueue::Array(queue) => queue.iter().cloned().collect(),
            AnyQueue::Linked(queue) => queue.iter().cloned().collect(),
        }
    }
}

impl<T> From<ArrayRingQueue<T>> for AnyQueue<T> {
    fn from(queue: ArrayRingQueue<T>) -> Self {
        AnyQueue::Array(queue)
    }
}

impl<T> From<LinkedRingQueue<T>> for AnyQueue<T> {
    fn from(queue: LinkedRingQueue<T>) -> Self {
        AnyQueue::Linked(queue)
    }
}

impl<T> BoundedQueue<T> for AnyQueue<T> {
    fn len(&self) -> usize {
        match self {
            AnyQueue::Array(queue) => queue.len(),
            AnyQueue::Linked(queue) => queue.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            AnyQueue::Array(queue) => queue.capacity(),
            AnyQueue::Linked(queue) => queue.capacity(),
        }
    }

    fn is_overwritable(&self) -> bool {
        match self {
            AnyQueue::Array(queue) => queue.is_overwritable(),
            AnyQueue::Linked(queue) => queue.is_overwritable(),
        }
    }

    fn set_overwritable(&mut self, overwritable: bool) {
        match self {
            AnyQueue::Array(queue) => queue.set_overwritable(overwritable),
            AnyQueue::Linked(queue) => queue.set_overwritable(overwritable),
        }
    }

    fn append(&mut self, values: Vec<Item<T>>) -> Result<(), QueueError> {
        match self {
            AnyQueue::Array(queue) => queue.append(values),
            AnyQueue::Linked(queue) => queue.append(values),
        }
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        match self {
            AnyQueue::Array(queue) => queue.dequeue(),
            AnyQueue::Linked(queue) => queue.dequeue(),
        }
    }

    fn resize(&mut self, new_capacity: usize, retention: Retention) -> Result<(), QueueError> {
        match self {
            AnyQueue::Array(queue) => queue.resize(new_capacity, retention),
            AnyQueue::Linked(queue) => queue.resize(new_capacity, retention),
        }
    }
}

impl<T> Iterator for AnyQueue<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = BoundedQueue::len(self);
        (len, Some(len))
    }
}

/// Unified Queue Builder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueBuilder {
    kind: QueueKind,
    capacity: usize,
    overwritable: bool,
}

impl QueueBuilder {
    /// Start a builder for `kind`; overwritable by default
    pub fn new(kind: QueueKind, capacity: usize) -> Self {
        Self { kind, capacity, overwritable: true }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn overwritable(mut self, overwritable: bool) -> Self {
        self.overwritable = overwritable;
        self
    }

    /// Build an empty queue
    pub fn build<T>(&self) -> Result<AnyQueue<T>, QueueError> {
        Ok(match self.kind {
            QueueKind::Array => ArrayRingQueue::with_capacity(self.capacity, self.overwritable)?.into(),
            QueueKind::Linked => LinkedRingQueue::with_capacity(self.capacity, self.overwritable)?.into(),
        })
    }

    /// Build a queue and append `values` in order
    pub fn build_with<T>(&self, values: Vec<Item<T>>) -> Result<AnyQueue<T>, QueueError> {
        let mut queue = self.build()?;
        queue.append(values)?;
        Ok(queue)
    }
}
