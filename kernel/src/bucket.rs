//! Buckets: FIFO/LIFO chains of equal-priority states.

use crate::dump::StateSink;
use crate::node::{Node, NodeId, NodeSlab};
use crate::state::Priority;

/// A singly-linked chain of nodes sharing one priority.
///
/// The bucket holds only the chain's endpoints; the nodes live in the owning
/// table's [`NodeSlab`], which every operation takes explicitly.
///
/// Invariant: `count` equals the number of nodes reachable from `head`, and an
/// empty bucket has `head == tail == None`.
///
/// A bucket owns its chain, so it is move-only:
///
/// ```compile_fail
/// use boundq_kernel::bucket::Bucket;
/// use boundq_kernel::node::NodeSlab;
///
/// let mut slab = NodeSlab::new();
/// let mut a = Bucket::new();
/// a.push(&mut slab, 1u32);
/// let mut alias = a;
/// let _ = alias.pop(&mut slab);
/// let _ = a.pop(&mut slab);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Bucket {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    count: usize,
}

impl Bucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state as the new tail.
    pub fn push<S>(&mut self, slab: &mut NodeSlab<S>, state: S) {
        let id = slab.insert(Node { next: None, state });
        match self.tail {
            Some(tail) => slab.set_next(tail, Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.count += 1;
    }

    /// Prepend a state as the new head.
    pub fn stack<S>(&mut self, slab: &mut NodeSlab<S>, state: S) {
        let id = slab.insert(Node {
            next: self.head,
            state,
        });
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.count += 1;
    }

    /// Remove and return the head state. `None` on an empty bucket.
    pub fn pop<S>(&mut self, slab: &mut NodeSlab<S>) -> Option<S> {
        let head = self.head?;
        let node = slab.remove(head)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.count -= 1;
        Some(node.state)
    }

    /// Drop every state in the chain. Returns how many were dropped.
    pub fn drain<S>(&mut self, slab: &mut NodeSlab<S>) -> usize {
        let mut dropped = 0;
        while self.pop(slab).is_some() {
            dropped += 1;
        }
        dropped
    }

    /// Head-to-tail traversal.
    #[must_use]
    pub fn iter<'a, S>(&self, slab: &'a NodeSlab<S>) -> BucketIter<'a, S> {
        BucketIter {
            slab,
            next: self.head,
            remaining: self.count,
        }
    }

    /// Hand every state to `sink`, head to tail.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the sink; later states are skipped.
    pub fn dump<S, K: StateSink<S>>(
        &self,
        slab: &NodeSlab<S>,
        priority: Priority,
        sink: &mut K,
    ) -> Result<(), K::Error> {
        for state in self.iter(slab) {
            sink.accept(priority, state)?;
        }
        Ok(())
    }

    /// First node of the chain.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Number of nodes in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Iterator returned by [`Bucket::iter`].
pub struct BucketIter<'a, S> {
    slab: &'a NodeSlab<S>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, S> Iterator for BucketIter<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
