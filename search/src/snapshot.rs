//! JSON snapshots of a frontier table.
//!
//! A table dump visits buckets in hash order. The snapshot reorders entries by
//! descending priority with a stable sort, so the result is canonical while
//! keeping head-to-tail order inside each bucket. `serde_json` objects keep
//! sorted keys, so `to_vec` output is byte-stable.

use std::convert::Infallible;

use boundq_kernel::dump::StateSink;
use boundq_kernel::order::InsertionOrder;
use boundq_kernel::state::{Priority, SearchState};
use boundq_kernel::table::StatePriorityTable;

/// JSON view of a stored state.
pub trait SnapshotState {
    fn to_json(&self) -> serde_json::Value;
}

/// Collects `(priority, state)` JSON entries during a dump.
#[derive(Debug, Default)]
pub struct SnapshotSink {
    entries: Vec<(Priority, serde_json::Value)>,
}

impl SnapshotSink {
    /// Number of entries collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical JSON array, best priority first.
    #[must_use]
    pub fn into_json(mut self) -> serde_json::Value {
        self.entries.sort_by(|a, b| b.0.cmp(&a.0));
        serde_json::Value::Array(
            self.entries
                .into_iter()
                .map(|(priority, state)| serde_json::json!({"priority": priority, "state": state}))
                .collect(),
        )
    }
}

impl<S: SnapshotState + ?Sized> StateSink<S> for SnapshotSink {
    type Error = Infallible;

    fn accept(&mut self, priority: Priority, state: &S) -> Result<(), Infallible> {
        self.entries.push((priority, state.to_json()));
        Ok(())
    }
}

/// Snapshot a whole table, including its discipline and size.
#[must_use]
pub fn table_snapshot<S, O>(table: &StatePriorityTable<S, O>) -> serde_json::Value
where
    S: SearchState + SnapshotState,
    O: InsertionOrder,
{
    let mut sink = SnapshotSink::default();
    match table.dump(&mut sink) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    serde_json::json!({
        "len": table.len(),
        "max_priority": table.max_priority(),
        "order": O::NAME,
        "states": sink.into_json(),
    })
}

/// Compact JSON bytes of [`table_snapshot`].
#[must_use]
pub fn table_snapshot_bytes<S, O>(table: &StatePriorityTable<S, O>) -> Vec<u8>
where
    S: SearchState + SnapshotState,
    O: InsertionOrder,
{
    table_snapshot(table).to_string().into_bytes()
}
