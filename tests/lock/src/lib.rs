//! Shared fixtures for the lock tests.
//!
//! Lock tests pin the externally observable behaviour of the tables and the
//! driver: ordering among ties, prune semantics, ownership transfer, dump
//! formats and search results. Fixtures here are deterministic; no test
//! depends on a random seed.

use boundq_kernel::state::{EncodeState, Priority, SearchState};
use boundq_search::snapshot::SnapshotState;

/// A state with a unique identity, for checking moves rather than copies.
#[derive(Debug, PartialEq, Eq)]
pub struct TaggedState {
    pub id: u64,
    pub priority: Priority,
}

impl SearchState for TaggedState {
    fn priority(&self) -> Priority {
        self.priority
    }
}

impl EncodeState for TaggedState {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
    }
}

impl SnapshotState for TaggedState {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"id": self.id})
    }
}

/// Shorthand constructor.
#[must_use]
pub fn tagged(id: u64, priority: Priority) -> TaggedState {
    TaggedState { id, priority }
}

/// Deterministic priorities in `[lo, hi)` from a 64-bit LCG.
///
/// # Panics
///
/// Panics if `lo >= hi`.
#[must_use]
pub fn lcg_priorities(seed: u64, n: usize, lo: Priority, hi: Priority) -> Vec<Priority> {
    assert!(lo < hi, "empty priority range");
    let span = u64::from(hi.abs_diff(lo));
    let mut x = seed;
    (0..n)
        .map(|_| {
            x = x
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let offset = i64::try_from((x >> 33) % span).unwrap_or(0);
            Priority::try_from(i64::from(lo) + offset).unwrap_or(lo)
        })
        .collect()
}

/// Deterministic closed intervals inside `[0, width)`.
#[must_use]
pub fn lcg_intervals(seed: u64, n: usize, width: i32) -> Vec<(i32, i32)> {
    let starts = lcg_priorities(seed, n, 0, width);
    let lens = lcg_priorities(seed ^ 0x9e37_79b9, n, 0, (width / 4).max(1));
    starts
        .into_iter()
        .zip(lens)
        .map(|(s, l)| (s, (s + l).min(width - 1)))
        .collect()
}

/// Best coverage over `[lo, hi]` by exhaustive scan.
#[must_use]
pub fn brute_force_coverage(intervals: &[(i32, i32)], lo: i32, hi: i32) -> Priority {
    (lo..=hi)
        .map(|x| {
            let n = intervals.iter().filter(|&&(a, b)| a <= x && x <= b).count();
            Priority::try_from(n).unwrap_or(Priority::MAX)
        })
        .max()
        .unwrap_or(0)
}
