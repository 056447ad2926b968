use tracing::{debug, trace};

use crate::core::queue::{check_room, flatten, flattened_len, BoundedQueue, Item, QueueError, Retention};

/// Circular FIFO over a fixed array with wrap-around indices.
///
/// Live values occupy `[head, head + len) mod capacity`. `head == tail` holds
/// both when empty and when full, so fullness is always read from `len`.
#[derive(Clone, Debug)]
pub struct ArrayRingQueue<T> {
    storage: Vec<Option<T>>,
    head: usize,
    tail: usize,
    len: usize,
    overwritable: bool,
}

impl<T> ArrayRingQueue<T> {
    /// Create an empty queue with `capacity` slots
    pub fn with_capacity(capacity: usize, overwritable: bool) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidConstruction("capacity must be > 0"));
        }
        debug!(capacity, overwritable, "array ring queue created");
        Ok(Self {
            storage: empty_slots(capacity),
            head: 0,
            tail: 0,
            len: 0,
            overwritable,
        })
    }

    /// Create a queue with `capacity` slots and append `values` in order
    pub fn with_values(capacity: usize, values: Vec<Item<T>>, overwritable: bool) -> Result<Self, QueueError> {
        let mut queue = Self::with_capacity(capacity, overwritable)?;
        queue.append(values)?;
        Ok(queue)
    }

    /// Adopt `values` as a full ring: capacity is `values.len()`
    pub fn from_full(values: Vec<T>, overwritable: bool) -> Result<Self, QueueError> {
        if values.is_empty() {
            return Err(QueueError::InvalidConstruction("initial buffer must not be empty"));
        }
        let len = values.len();
        debug!(capacity = len, overwritable, "array ring queue adopted a full buffer");
        Ok(Self {
            storage: values.into_iter().map(Some).collect(),
            head: 0,
            tail: 0,
            len,
            overwritable,
        })
    }

    /// Oldest live value without removing it
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.storage[self.head].as_ref()
    }

    /// Live values oldest first, without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| self.storage[self.slot(offset)].as_ref())
    }

    /// Physical index of the value `offset` places after head
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.storage.len()
    }

    fn push_one(&mut self, value: T) {
        let capacity = self.storage.len();
        if self.len == capacity {
            // tail has caught up with head: the oldest value makes room
            assert!(self.overwritable, "Full non-overwritable ring must be rejected before insertion");
            self.storage[self.head] = None;
            self.head = (self.head + 1) % capacity;
            self.len -= 1;
            trace!(capacity, "evicted oldest value");
        }
        self.storage[self.tail] = Some(value);
        self.tail = (self.tail + 1) % capacity;
        self.len += 1;
        // -- post op assertion
        assert!(self.len <= capacity, "Length must never exceed capacity");
    }
}

impl<T> BoundedQueue<T> for ArrayRingQueue<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.storage.len()
    }

    fn is_overwritable(&self) -> bool {
        self.overwritable
    }

    fn set_overwritable(&mut self, overwritable: bool) {
        self.overwritable = overwritable;
    }

    fn append(&mut self, values: Vec<Item<T>>) -> Result<(), QueueError> {
        check_room(self.len, self.storage.len(), self.overwritable, flattened_len(&values))?;
        for value in flatten(values) {
            self.push_one(value);
        }
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Exhausted);
        }
        let value = match self.storage[self.head].take() {
            Some(value) => value,
            None => unreachable!("slot at head of a non-empty ring must be occupied"),
        };
        self.head = (self.head + 1) % self.storage.len();
        self.len -= 1;
        Ok(value)
    }

    fn resize(&mut self, new_capacity: usize, retention: Retention) -> Result<(), QueueError> {
        if new_capacity == 0 {
            return Err(QueueError::InvalidCapacity(new_capacity));
        }
        let kept = self.len.min(new_capacity);
        let first = match retention {
            Retention::KeepOldest => 0,
            Retention::KeepNewest => self.len - kept,
        };

        let mut storage = empty_slots(new_capacity);
        for (index, offset) in (first..first + kept).enumerate() {
            let slot = self.slot(offset);
            storage[index] = self.storage[slot].take();
        }
        debug!(
            from = self.storage.len(),
            to = new_capacity,
            dropped = self.len - kept,
            ?retention,
            "array ring queue resized"
        );

        self.storage = storage;
        self.head = 0;
        self.tail = kept % new_capacity;
        self.len = kept;
        Ok(())
    }
}

impl<T> Iterator for ArrayRingQueue<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
