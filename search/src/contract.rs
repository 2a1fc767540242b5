//! Problem contract trait.

use boundq_kernel::state::{Priority, SearchState};

/// A feasible solution and its quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent<T> {
    /// Quality on the same scale as state bounds.
    pub quality: Priority,
    pub solution: T,
}

/// A maximization problem explorable by branch and bound.
///
/// # Contract
///
/// - A state's `priority()` is an upper bound on the quality of every
///   solution inside it.
/// - `evaluate` returns a solution inside the state; its quality never exceeds
///   the state's bound.
/// - `branch` partitions a non-leaf state; every child's bound is at most its
///   parent's.
/// - All methods are deterministic.
pub trait BranchingProblem {
    /// Frontier state (a region of the search space).
    type State: SearchState;
    /// What the search returns.
    type Solution;

    /// State covering the whole search space.
    fn root(&self) -> Self::State;

    /// A feasible solution witnessed inside `state`.
    fn evaluate(&self, state: &Self::State) -> Incumbent<Self::Solution>;

    /// Whether `state` can no longer be subdivided.
    fn is_leaf(&self, state: &Self::State) -> bool;

    /// Subdivide `state`.
    fn branch(&self, state: &Self::State) -> Vec<Self::State>;
}
