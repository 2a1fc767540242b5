//! Interval consensus: a reference branch-and-bound problem.
//!
//! Find the integer point covered by the most closed intervals. This is
//! consensus-set maximization in one dimension, the same shape as rotation
//! search for registration: a region's bound counts the intervals that touch
//! it, and a point's quality counts the intervals that contain it.

use boundq_kernel::state::{EncodeState, Priority, SearchState};

use crate::contract::{BranchingProblem, Incumbent};
use crate::error::SearchError;
use crate::snapshot::SnapshotState;

/// Closed integer interval `[lo, hi]` of candidate points with its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub lo: i32,
    pub hi: i32,
    /// Number of input intervals intersecting `[lo, hi]`.
    pub bound: Priority,
}

impl Region {
    /// Floor of the midpoint; always inside `[lo, hi]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn midpoint(&self) -> i32 {
        ((i64::from(self.lo) + i64::from(self.hi)) >> 1) as i32
    }
}

impl SearchState for Region {
    fn priority(&self) -> Priority {
        self.bound
    }
}

impl EncodeState for Region {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.lo.to_le_bytes());
        out.extend_from_slice(&self.hi.to_le_bytes());
    }
}

impl SnapshotState for Region {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"hi": self.hi, "lo": self.lo})
    }
}

/// The consensus problem over a closed domain.
#[derive(Debug, Clone)]
pub struct IntervalConsensus {
    intervals: Vec<(i32, i32)>,
    domain: (i32, i32),
}

impl IntervalConsensus {
    /// Build a problem over `[domain_lo, domain_hi]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidProblem`] if the domain or any interval
    /// has `lo > hi`.
    pub fn new(
        intervals: Vec<(i32, i32)>,
        domain_lo: i32,
        domain_hi: i32,
    ) -> Result<Self, SearchError> {
        if domain_lo > domain_hi {
            return Err(SearchError::InvalidProblem {
                detail: format!("empty domain [{domain_lo}, {domain_hi}]"),
            });
        }
        if let Some((i, &(lo, hi))) = intervals.iter().enumerate().find(|(_, iv)| iv.0 > iv.1) {
            return Err(SearchError::InvalidProblem {
                detail: format!("interval {i} is empty: [{lo}, {hi}]"),
            });
        }
        Ok(Self {
            intervals,
            domain: (domain_lo, domain_hi),
        })
    }

    /// Number of intervals containing `x`.
    #[must_use]
    pub fn coverage(&self, x: i32) -> Priority {
        self.count(|&(lo, hi)| lo <= x && x <= hi)
    }

    fn region(&self, lo: i32, hi: i32) -> Region {
        Region {
            lo,
            hi,
            bound: self.count(|&(a, b)| a <= hi && b >= lo),
        }
    }

    fn count(&self, pred: impl Fn(&(i32, i32)) -> bool) -> Priority {
        let n = self.intervals.iter().filter(|iv| pred(iv)).count();
        Priority::try_from(n).unwrap_or(Priority::MAX)
    }
}

impl BranchingProblem for IntervalConsensus {
    type State = Region;
    type Solution = i32;

    fn root(&self) -> Region {
        self.region(self.domain.0, self.domain.1)
    }

    fn evaluate(&self, state: &Region) -> Incumbent<i32> {
        let x = state.midpoint();
        Incumbent {
            quality: self.coverage(x),
            solution: x,
        }
    }

    fn is_leaf(&self, state: &Region) -> bool {
        state.lo == state.hi
    }

    fn branch(&self, state: &Region) -> Vec<Region> {
        let mid = state.midpoint();
        vec![
            self.region(state.lo, mid),
            self.region(mid + 1, state.hi),
        ]
    }
}
