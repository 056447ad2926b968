use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors shared by every queue representation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("invalid construction: {0}")]
    InvalidConstruction(&'static str),
    #[error("buffer is full ({capacity} slots) and not overwritable")]
    BufferFull { capacity: usize },
    #[error("invalid capacity {0}: capacity must be > 0")]
    InvalidCapacity(usize),
    /// End of drain. Not a misuse of the queue.
    #[error("queue is exhausted")]
    Exhausted,
}

impl QueueError {
    /// True for the end-of-drain signal, false for every real failure
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QueueError::Exhausted)
    }
}

/// Which elements survive when a resize drops below the current length
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Retention {
    /// Keep the oldest elements, drop from the back.
    #[default]
    KeepOldest,
    /// Keep the newest elements, drop from the front.
    KeepNewest,
}

impl From<bool> for Retention {
    fn from(keep_newest: bool) -> Self {
        if keep_newest { Retention::KeepNewest } else { Retention::KeepOldest }
    }
}

/// One argument to `append`. `Many` is flattened one level, never deeper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Item<T> {
    /// Number of values this argument contributes once flattened
    pub fn count(&self) -> usize {
        match self {
            Item::One(_) => 1,
            Item::Many(values) => values.len(),
        }
    }
}

/// Total number of values a batch of `append` arguments expands to
pub fn flattened_len<T>(values: &[Item<T>]) -> usize {
    values.iter().map(Item::count).sum()
}

/// Flatten a batch of `append` arguments in order
pub fn flatten<T>(values: Vec<Item<T>>) -> impl Iterator<Item = T> {
    values.into_iter().flat_map(|item| match item {
        Item::One(value) => vec![value],
        Item::Many(values) => values,
    })
}

/// Bounded FIFO contract implemented by every representation.
///
/// Iterating consumes the queue: each `next()` removes the oldest value and
/// `None` signals that the queue is drained. A drained queue accepts new values
/// exactly like a fresh one of the same capacity.
pub trait BoundedQueue<T>: Iterator<Item = T> {
    /// Current number of live values
    fn len(&self) -> usize;

    /// Maximum number of live values
    fn capacity(&self) -> usize;

    fn is_overwritable(&self) -> bool;

    fn set_overwritable(&mut self, overwritable: bool);

    /// Insert values at the tail in order, flattening `Item::Many` one level.
    ///
    /// A full overwritable queue evicts its oldest value per insertion. A
    /// non-overwritable queue fails with `BufferFull` before touching any state
    /// if the whole batch does not fit.
    fn append(&mut self, values: Vec<Item<T>>) -> Result<(), QueueError>;

    /// Remove and return the oldest value, `Err(Exhausted)` when empty
    fn dequeue(&mut self) -> Result<T, QueueError>;

    /// Change the capacity, trimming per `retention` if the live values no
    /// longer fit. Fails with `InvalidCapacity` on zero and leaves the queue
    /// unchanged.
    fn resize(&mut self, new_capacity: usize, retention: Retention) -> Result<(), QueueError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Append a single value
    fn push(&mut self, value: T) -> Result<(), QueueError> {
        self.append(vec![Item::One(value)])
    }

    /// Drain everything that is left, oldest first
    fn drain_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Ok(value) = self.dequeue() {
            out.push(value);
        }
        // --- post operation assertion
        assert_eq!(self.len(), 0, "Queue must be empty after a full drain");
        out
    }
}

/// Reject a batch that cannot fit into a non-overwritable queue.
pub(crate) fn check_room(
    len: usize,
    capacity: usize,
    overwritable: bool,
    incoming: usize,
) -> Result<(), QueueError> {
    if !overwritable && len + incoming > capacity {
        return Err(QueueError::BufferFull { capacity });
    }
    Ok(())
}

/// Coarse external lock for embedders that share a queue across threads
pub type SafeQueue<Q> = Arc<Mutex<Q>>;

/// Wrap a queue in the coarse external lock
pub fn shared<Q>(queue: Q) -> SafeQueue<Q> {
    Arc::new(Mutex::new(queue))
}
