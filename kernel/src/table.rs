//! State priority tables: bucketed storage of pending search states.
//!
//! A table keeps one [`Bucket`] per distinct priority plus the current maximum
//! key. Push and pop touch a single bucket; only draining the top bucket costs
//! a rescan of the remaining keys (O(distinct priorities)). Bulk pruning walks
//! the keys once.
//!
//! The two variants differ only in their [`InsertionOrder`]:
//!
//! | alias | order | ties pop |
//! |---|---|---|
//! | [`StatePriorityHashtable`] | [`BestFirst`] | oldest first |
//! | [`StatePriorityHashtableDF`] | [`DepthFirst`] | newest first |

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bucket::Bucket;
use crate::config::TableConfig;
use crate::cursor::Cursor;
use crate::dump::StateSink;
use crate::error::{CursorError, TableError};
use crate::map::PriorityMap;
use crate::node::NodeSlab;
use crate::order::{BestFirst, DepthFirst, InsertionOrder};
use crate::state::{Priority, SearchState};

/// Source of table ids; cursors are bound to the id of their table.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Best-first table: max bucket first, FIFO among ties.
pub type StatePriorityHashtable<S> = StatePriorityTable<S, BestFirst>;

/// Depth-first table: max bucket first, most recent state first among ties.
pub type StatePriorityHashtableDF<S> = StatePriorityTable<S, DepthFirst>;

/// Priority-bucketed store of search states.
///
/// Invariants:
/// - `max` is the greatest key of `map`, or `None` iff `map` is empty.
/// - `len` equals the sum of all bucket lengths and the slab's live count.
/// - No key maps to an empty bucket.
pub struct StatePriorityTable<S, O = BestFirst> {
    map: PriorityMap,
    slab: NodeSlab<S>,
    max: Option<Priority>,
    len: usize,
    /// Unique per table; validates cursors.
    id: u64,
    /// Bumped on every structural mutation; validates cursors.
    generation: u64,
    config: TableConfig,
    _order: PhantomData<O>,
}

impl<S: SearchState, O: InsertionOrder> StatePriorityTable<S, O> {
    /// Create an empty table sized for about `bucket_hint` distinct priorities.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if the map for `bucket_hint` keys cannot
    /// be sized. Use [`StatePriorityTable::with_config`] to get
    /// [`TableError`] instead.
    #[must_use]
    pub fn new(bucket_hint: usize) -> Self {
        Self::from_parts(
            PriorityMap::with_capacity(bucket_hint),
            TableConfig::with_bucket_hint(bucket_hint),
        )
    }

    /// Create an empty table from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BucketHintTooLarge`] if the config is rejected and
    /// [`TableError::AllocationFailed`] if the map cannot be allocated.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let map = PriorityMap::try_with_capacity(config.bucket_hint).map_err(|_| {
            TableError::AllocationFailed {
                requested: config.bucket_hint,
            }
        })?;
        Ok(Self::from_parts(map, config))
    }

    fn from_parts(map: PriorityMap, config: TableConfig) -> Self {
        Self {
            map,
            slab: NodeSlab::new(),
            max: None,
            len: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            config,
            _order: PhantomData,
        }
    }

    /// Store a state under its priority.
    pub fn push(&mut self, state: S) {
        let priority = state.priority();
        let (bucket, _) = self.map.bucket_mut_or_insert(priority);
        O::admit(bucket, &mut self.slab, state);
        match self.max {
            Some(max) if max >= priority => {}
            _ => self.max = Some(priority),
        }
        self.len += 1;
        self.bump();
    }

    /// Remove and return a state of the highest priority, or `None` if empty.
    pub fn pop(&mut self) -> Option<S> {
        let top = self.max?;
        let bucket = self.map.get_mut(top)?;
        let state = bucket.pop(&mut self.slab)?;
        let drained = bucket.is_empty();
        self.len -= 1;
        if drained {
            self.map.remove(top);
            self.max = self.map.max_key();
            if self.map.is_empty() {
                self.slab.clear();
            }
        }
        self.bump();
        Some(state)
    }

    /// The state `pop` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&S> {
        let head = self.map.get(self.max?)?.head()?;
        self.slab.get(head).map(|node| &node.state)
    }

    /// Drop every state with priority `<= curbest`.
    ///
    /// No such state can beat an incumbent of quality `curbest`. Returns the
    /// number of states dropped.
    pub fn prune(&mut self, curbest: Priority) -> usize {
        let slab = &mut self.slab;
        let mut discarded = 0;
        let mut surviving = 0;
        self.map.retain(|priority, bucket| {
            if priority > curbest {
                surviving += bucket.len();
                true
            } else {
                discarded += bucket.drain(slab);
                false
            }
        });
        self.len = surviving;
        self.max = self.map.max_key();
        if self.map.is_empty() {
            self.slab.clear();
        }
        self.bump();
        discarded
    }

    /// Drop every state.
    pub fn clear(&mut self) {
        self.map.retain(|_, _| false);
        self.slab.clear();
        self.max = None;
        self.len = 0;
        self.bump();
    }

    /// Number of stored states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest priority present.
    #[must_use]
    pub fn max_priority(&self) -> Option<Priority> {
        self.max
    }

    /// Number of distinct priorities present.
    #[must_use]
    pub fn distinct_priorities(&self) -> usize {
        self.map.len()
    }

    /// Number of states stored under `priority`.
    #[must_use]
    pub fn bucket_len(&self, priority: Priority) -> usize {
        self.map.get(priority).map_or(0, Bucket::len)
    }

    #[must_use]
    pub fn contains_priority(&self, priority: Priority) -> bool {
        self.map.contains(priority)
    }

    /// Every stored state with its priority, in dump order.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &S)> + '_ {
        self.map
            .iter()
            .flat_map(move |(p, bucket)| bucket.iter(&self.slab).map(move |s| (p, s)))
    }

    /// Send every stored state to `sink`.
    ///
    /// Buckets are visited in map iteration order; states within a bucket
    /// head to tail.
    ///
    /// # Errors
    ///
    /// Returns the sink's first error unchanged.
    pub fn dump<K: StateSink<S>>(&self, sink: &mut K) -> Result<(), K::Error> {
        for (priority, bucket) in self.map.iter() {
            bucket.dump(&self.slab, priority, sink)?;
        }
        Ok(())
    }

    /// Current mutation generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Process-unique id of this table.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> TableConfig {
        self.config
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<S: SearchState> StatePriorityTable<S, BestFirst> {
    /// Move every state with priority `> curbest` into `other`; drop the rest.
    ///
    /// Within-bucket order is preserved and moved states land behind anything
    /// `other` already holds at the same priority. `self` is empty afterwards.
    /// Returns `(moved, discarded)`.
    pub fn prune_and_return(&mut self, curbest: Priority, other: &mut Self) -> (usize, usize) {
        let mut moved = 0;
        let mut discarded = 0;
        let slab = &mut self.slab;
        for (priority, mut bucket) in self.map.drain() {
            if priority > curbest {
                while let Some(state) = bucket.pop(slab) {
                    other.push(state);
                    moved += 1;
                }
            } else {
                discarded += bucket.drain(slab);
            }
        }
        self.slab.clear();
        self.max = None;
        self.len = 0;
        self.bump();
        (moved, discarded)
    }

    /// Cursor at the head of the max-priority bucket.
    #[must_use]
    pub fn init_cursor(&self) -> Cursor {
        Cursor {
            table: self.id,
            generation: self.generation,
            position: self.max.and_then(|top| self.map.get(top)?.head()),
        }
    }

    /// Walk `cursor` forward `steps` links within the max bucket.
    ///
    /// Returns the state at the new position, or `Ok(None)` if the chain ends
    /// first; the cursor then rests on the last node it reached. Zero steps
    /// returns the state under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ForeignTable`] if the cursor came from another
    /// table and [`CursorError::Stale`] if this table was mutated since the
    /// cursor was issued.
    pub fn advance_cursor(
        &self,
        cursor: &mut Cursor,
        steps: usize,
    ) -> Result<Option<&S>, CursorError> {
        if cursor.table != self.id {
            return Err(CursorError::ForeignTable {
                issued_by: cursor.table,
                used_on: self.id,
            });
        }
        if cursor.generation != self.generation {
            return Err(CursorError::Stale {
                issued: cursor.generation,
                current: self.generation,
            });
        }
        let Some(mut at) = cursor.position else {
            return Ok(None);
        };
        for _ in 0..steps {
            match self.slab.get(at).and_then(|node| node.next) {
                Some(next) => at = next,
                None => {
                    cursor.position = Some(at);
                    return Ok(None);
                }
            }
        }
        cursor.position = Some(at);
        Ok(self.slab.get(at).map(|node| &node.state))
    }
}

impl<S: SearchState, O: InsertionOrder> Default for StatePriorityTable<S, O> {
    fn default() -> Self {
        Self::new(TableConfig::default().bucket_hint)
    }
}

impl<S, O: InsertionOrder> std::fmt::Debug for StatePriorityTable<S, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatePriorityTable")
            .field("id", &self.id)
            .field("order", &O::NAME)
            .field("len", &self.len)
            .field("max", &self.max)
            .field("distinct", &self.map.len())
            .field("generation", &self.generation)
            .finish()
    }
}
