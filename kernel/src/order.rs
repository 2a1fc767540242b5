//! Insertion-order policies distinguishing the two table variants.
//!
//! Both variants select the bucket with the highest priority; the policy only
//! decides where a newly admitted state lands inside its bucket, which is what
//! `pop` sees among ties.

use crate::bucket::Bucket;
use crate::node::NodeSlab;

/// Where `push` places a state within its priority bucket.
pub trait InsertionOrder {
    /// Stable name for logs and snapshots.
    const NAME: &'static str;

    /// Admit `state` into `bucket`.
    fn admit<S>(bucket: &mut Bucket, slab: &mut NodeSlab<S>, state: S);
}

/// Tail append: FIFO among equal priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestFirst;

impl InsertionOrder for BestFirst {
    const NAME: &'static str = "best_first";

    fn admit<S>(bucket: &mut Bucket, slab: &mut NodeSlab<S>, state: S) {
        bucket.push(slab, state);
    }
}

/// Head prepend: the most recently admitted state of the best bucket pops first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthFirst;

impl InsertionOrder for DepthFirst {
    const NAME: &'static str = "depth_first";

    fn admit<S>(bucket: &mut Bucket, slab: &mut NodeSlab<S>, state: S) {
        bucket.stack(slab, state);
    }
}
