/// Handle to a node inside a `NodeArena`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// Doubly linked cell. `prev` is a plain index and carries no ownership.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

/// Owns every node of a chain. Releasing a node destroys it and frees its slot.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    /// Store an unlinked node and return its handle
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        let node = Node { value, prev: None, next: None };
        match self.free.pop() {
            Some(index) => {
                assert!(self.slots[index].is_none(), "Free slot must be vacant");
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Remove the node from the arena and hand back its contents
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        match self.slots[id.0].take() {
            Some(node) => {
                self.free.push(id.0);
                node
            }
            None => unreachable!("released node {:?} twice", id),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("node {:?} is not live", id),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("node {:?} is not live", id),
        }
    }

    /// Number of live nodes
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Forget every slot but keep the allocation. Only valid once every node is released.
    pub(crate) fn reset(&mut self) {
        assert_eq!(self.live(), 0, "Arena must be empty before reset");
        self.slots.clear();
        self.free.clear();
    }
}
