use tracing::{debug, trace};

use crate::core::node::{NodeArena, NodeId};
use crate::core::queue::{check_room, flatten, flattened_len, BoundedQueue, Item, QueueError, Retention};

/// Circular FIFO over a doubly linked chain bounded by a capacity counter.
///
/// The arena owns every node; `head`/`tail` and the node links are indices.
#[derive(Clone, Debug)]
pub struct LinkedRingQueue<T> {
    nodes: NodeArena<T>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    capacity: usize,
    overwritable: bool,
}

impl<T> LinkedRingQueue<T> {
    /// Create an empty chain bounded by `capacity`
    pub fn with_capacity(capacity: usize, overwritable: bool) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidConstruction("capacity must be > 0"));
        }
        debug!(capacity, overwritable, "linked ring queue created");
        Ok(Self {
            nodes: NodeArena::new(),
            head: None,
            tail: None,
            len: 0,
            capacity,
            overwritable,
        })
    }

    /// Oldest live value without removing it
    pub fn peek(&self) -> Option<&T> {
        self.head.map(|id| &self.nodes.get(id).value)
    }

    /// Live values oldest first, without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.nodes.get(cursor?);
            cursor = node.next;
            Some(&node.value)
        })
    }

    fn push_one(&mut self, value: T) {
        if self.len == self.capacity {
            assert!(self.overwritable, "Full non-overwritable chain must be rejected before insertion");
            self.unlink_head();
            trace!(capacity = self.capacity, "evicted oldest node");
        }

        let id = self.nodes.alloc(value);
        match self.tail {
            Some(tail) => {
                self.nodes.get_mut(tail).next = Some(id);
                self.nodes.get_mut(id).prev = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        // -- post op assertion
        assert!(self.len <= self.capacity, "Length must never exceed capacity");
    }

    /// Detach and destroy the oldest node
    fn unlink_head(&mut self) -> Option<T> {
        let node = self.nodes.release(self.head?);
        self.head = node.next;
        match self.head {
            Some(head) => self.nodes.get_mut(head).prev = None,
            None => self.tail = None,
        }
        self.len -= 1;
        self.settle();
        Some(node.value)
    }

    /// Detach and destroy the newest node
    fn unlink_tail(&mut self) -> Option<T> {
        let node = self.nodes.release(self.tail?);
        self.tail = node.prev;
        match self.tail {
            Some(tail) => self.nodes.get_mut(tail).next = None,
            None => self.head = None,
        }
        self.len -= 1;
        self.settle();
        Some(node.value)
    }

    fn settle(&mut self) {
        assert_eq!(self.nodes.live(), self.len, "Chain length must match the live node count");
        if self.len == 0 {
            assert!(self.head.is_none() && self.tail.is_none(), "Empty chain must have no ends");
            self.nodes.reset();
        }
    }
}

impl<T> BoundedQueue<T> for LinkedRingQueue<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_overwritable(&self) -> bool {
        self.overwritable
    }

    fn set_overwritable(&mut self, overwritable: bool) {
        self.overwritable = overwritable;
    }

    fn append(&mut self, values: Vec<Item<T>>) -> Result<(), QueueError> {
        check_room(self.len, self.capacity, self.overwritable, flattened_len(&values))?;
        for value in flatten(values) {
            self.push_one(value);
        }
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        self.unlink_head().ok_or(QueueError::Exhausted)
    }

    fn resize(&mut self, new_capacity: usize, retention: Retention) -> Result<(), QueueError> {
        if new_capacity == 0 {
            return Err(QueueError::InvalidCapacity(new_capacity));
        }
        let dropped = self.len.saturating_sub(new_capacity);
        for _ in 0..dropped {
            match retention {
                Retention::KeepOldest => self.unlink_tail(),
                Retention::KeepNewest => self.unlink_head(),
            };
        }
        debug!(from = self.capacity, to = new_capacity, dropped, ?retention, "linked ring queue resized");
        self.capacity = new_capacity;
        Ok(())
    }
}

impl<T> Iterator for LinkedRingQueue<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_is_head_and_tail() {
        let mut queue = LinkedRingQueue::with_capacity(1, true).unwrap();
        queue.push(1).unwrap();
        assert_eq!(queue.head, queue.tail);

        queue.push(2).unwrap();
        assert_eq!(queue.head, queue.tail);
        assert_eq!(queue.peek(), Some(&2));
        assert_eq!(queue.nodes.live(), 1);
    }

    #[test]
    fn back_links_follow_the_chain() {
        let mut queue = LinkedRingQueue::with_capacity(3, true).unwrap();
        queue.append(vec![Item::Many(vec![1, 2, 3, 4])]).unwrap();

        let head = queue.head.unwrap();
        let tail = queue.tail.unwrap();
        assert!(queue.nodes.get(head).prev.is_none());
        assert!(queue.nodes.get(tail).next.is_none());
        let middle = queue.nodes.get(tail).prev.unwrap();
        assert_eq!(queue.nodes.get(middle).value, 3);
        assert_eq!(queue.nodes.get(middle).prev, Some(head));
    }

    #[test]
    fn drained_chain_releases_storage() {
        let mut queue = LinkedRingQueue::with_capacity(4, true).unwrap();
        queue.append(vec![Item::One(1), Item::One(2)]).unwrap();
        assert_eq!(queue.drain_all(), vec![1, 2]);
        assert!(queue.head.is_none());
        assert!(queue.tail.is_none());
        assert_eq!(queue.nodes.live(), 0);
    }
}
