//! Shared helpers for boundq benchmark suites.
//!
//! Workloads are generated from a fixed-seed LCG so every run measures the
//! same push/pop sequence.

use boundq_kernel::state::{Priority, SearchState};
use boundq_search::consensus::IntervalConsensus;
use boundq_search::error::SearchError;

/// Minimal payload carried by benchmark states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchState {
    pub id: u32,
    pub priority: Priority,
}

impl SearchState for BenchState {
    fn priority(&self) -> Priority {
        self.priority
    }
}

/// `n` states with priorities drawn from `[0, spread)`.
#[must_use]
pub fn workload(seed: u64, n: u32, spread: u32) -> Vec<BenchState> {
    let spread = u64::from(spread.max(1));
    let mut x = seed;
    (0..n)
        .map(|id| {
            x = x
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let priority = Priority::try_from((x >> 33) % spread).unwrap_or(0);
            BenchState { id, priority }
        })
        .collect()
}

/// Named consensus problem sizes for the macro suite.
pub struct Regime {
    pub name: &'static str,
    pub intervals: usize,
    pub width: i32,
}

/// Small, wide and dense regimes.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime { name: "small", intervals: 32, width: 256 },
        Regime { name: "wide", intervals: 64, width: 1 << 16 },
        Regime { name: "dense", intervals: 512, width: 1024 },
    ]
}

/// Build the interval consensus problem for a regime.
///
/// # Errors
///
/// Propagates [`SearchError::InvalidProblem`] from problem construction.
pub fn consensus_problem(seed: u64, regime: &Regime) -> Result<IntervalConsensus, SearchError> {
    let width = regime.width.max(1);
    let span = u32::try_from(width).unwrap_or(u32::MAX);
    let len_span = (span / 8).max(1);
    let n = u32::try_from(regime.intervals).unwrap_or(u32::MAX);
    let starts = workload(seed, n, span);
    let lens = workload(seed ^ 0x5bd1_e995, n, len_span);
    let intervals = starts
        .iter()
        .zip(&lens)
        .map(|(s, l)| (s.priority, s.priority.saturating_add(l.priority).min(width - 1)))
        .collect();
    IntervalConsensus::new(intervals, 0, width - 1)
}
