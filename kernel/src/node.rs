//! Nodes and the slab arena that owns them.
//!
//! Bucket chains are singly linked through [`NodeId`] indices rather than
//! boxed pointers. A vacant slot records the next free slot, so insertion and
//! removal are O(1) and dropping the slab releases every state iteratively
//! regardless of chain length.

/// Index of a node inside a [`NodeSlab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One link of a bucket chain. Owns exactly one state.
#[derive(Debug)]
pub struct Node<S> {
    /// Next node of the same bucket (`None` at the tail).
    pub next: Option<NodeId>,
    /// The owned state.
    pub state: S,
}

#[derive(Debug)]
enum Slot<S> {
    Occupied(Node<S>),
    Vacant { next_free: Option<usize> },
}

/// Arena owning every node of a table.
#[derive(Debug)]
pub struct NodeSlab<S> {
    slots: Vec<Slot<S>>,
    free_head: Option<usize>,
    live: usize,
}

impl<S> NodeSlab<S> {
    /// Create an empty slab.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    /// Store a node and return its id. Reuses vacant slots first.
    pub fn insert(&mut self, node: Node<S>) -> NodeId {
        self.live += 1;
        if let Some(idx) = self.free_head {
            if let Slot::Vacant { next_free } = self.slots[idx] {
                self.free_head = next_free;
                self.slots[idx] = Slot::Occupied(node);
                return NodeId(idx);
            }
        }
        self.slots.push(Slot::Occupied(node));
        NodeId(self.slots.len() - 1)
    }

    /// Remove a node, handing back ownership of it. `None` if the id is vacant.
    pub fn remove(&mut self, id: NodeId) -> Option<Node<S>> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let taken = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.0);
        self.live -= 1;
        match taken {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Borrow a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        match self.slots.get(id.0)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Relink a node. No-op on a vacant id.
    pub fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(Slot::Occupied(node)) = self.slots.get_mut(id.0) {
            node.next = next;
        }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no node is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop every node and release the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}

impl<S> Default for NodeSlab<S> {
    fn default() -> Self {
        Self::new()
    }
}
