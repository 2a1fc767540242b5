//! `PriorityMap`: priority → bucket.

use std::collections::hash_map::{Drain, Entry};
use std::collections::{HashMap, TryReserveError};

use crate::bucket::Bucket;
use crate::hash::BuildWangHasher;
use crate::state::Priority;

/// Hash map from priority to its bucket, hashed with [`crate::hash::WangHasher`].
///
/// The map itself does not enforce "no empty buckets"; the table evicts a
/// bucket as soon as it drains.
#[derive(Debug, Default)]
pub struct PriorityMap {
    buckets: HashMap<Priority, Bucket, BuildWangHasher>,
}

impl PriorityMap {
    /// Create a map sized for about `bucket_hint` distinct priorities.
    #[must_use]
    pub fn with_capacity(bucket_hint: usize) -> Self {
        Self {
            buckets: HashMap::with_capacity_and_hasher(bucket_hint, BuildWangHasher::default()),
        }
    }

    /// Like [`PriorityMap::with_capacity`] but reports allocation failure.
    ///
    /// # Errors
    ///
    /// Returns the allocator's [`TryReserveError`] if the initial table cannot
    /// be allocated.
    pub fn try_with_capacity(bucket_hint: usize) -> Result<Self, TryReserveError> {
        let mut buckets = HashMap::with_hasher(BuildWangHasher::default());
        buckets.try_reserve(bucket_hint)?;
        Ok(Self { buckets })
    }

    /// The bucket for `priority`, inserting an empty one if absent.
    ///
    /// Returns `true` alongside the bucket when it was freshly created.
    pub fn bucket_mut_or_insert(&mut self, priority: Priority) -> (&mut Bucket, bool) {
        match self.buckets.entry(priority) {
            Entry::Occupied(e) => (e.into_mut(), false),
            Entry::Vacant(e) => (e.insert(Bucket::new()), true),
        }
    }

    #[must_use]
    pub fn get(&self, priority: Priority) -> Option<&Bucket> {
        self.buckets.get(&priority)
    }

    pub fn get_mut(&mut self, priority: Priority) -> Option<&mut Bucket> {
        self.buckets.get_mut(&priority)
    }

    /// Remove a key, returning its bucket.
    pub fn remove(&mut self, priority: Priority) -> Option<Bucket> {
        self.buckets.remove(&priority)
    }

    #[must_use]
    pub fn contains(&self, priority: Priority) -> bool {
        self.buckets.contains_key(&priority)
    }

    /// All `(priority, bucket)` pairs in hash order.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &Bucket)> + '_ {
        self.buckets.iter().map(|(&p, b)| (p, b))
    }

    /// All keys in hash order.
    pub fn keys(&self) -> impl Iterator<Item = Priority> + '_ {
        self.buckets.keys().copied()
    }

    /// Greatest key present. Linear in the number of keys.
    #[must_use]
    pub fn max_key(&self) -> Option<Priority> {
        self.buckets.keys().copied().max()
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(Priority, &mut Bucket) -> bool) {
        self.buckets.retain(|&p, b| keep(p, b));
    }

    /// Remove every entry, yielding them in hash order.
    pub fn drain(&mut self) -> Drain<'_, Priority, Bucket> {
        self.buckets.drain()
    }

    /// Number of distinct priorities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Current allocated capacity in keys.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }
}
