//! Search entry point and expansion loop.

use tracing::{debug, info, trace};

use boundq_kernel::order::{BestFirst, DepthFirst, InsertionOrder};
use boundq_kernel::state::{Priority, SearchState};
use boundq_kernel::table::{StatePriorityHashtable, StatePriorityTable};

use crate::contract::{BranchingProblem, Incumbent};
use crate::error::SearchError;
use crate::policy::{ExpansionOrder, SearchPolicy};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Nothing left that could beat the incumbent; the incumbent is optimal.
    FrontierExhausted,
    /// `max_expansions` reached with states still pending.
    ExpansionBudgetExceeded,
}

/// Counters collected over one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and evaluated.
    pub expansions: u64,
    /// States pushed into the frontier (root included).
    pub pushed: u64,
    /// Children dropped before admission because they could not beat the incumbent.
    pub rejected: u64,
    /// States discarded by bulk prunes.
    pub pruned: u64,
    /// Times the incumbent improved.
    pub incumbent_updates: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    /// Best solution found, if any state was evaluated.
    pub incumbent: Option<Incumbent<T>>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    /// States still pending at termination.
    pub frontier_remaining: usize,
}

impl<T> SearchOutcome<T> {
    /// Returns `true` if the incumbent is proven optimal.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.termination == TerminationReason::FrontierExhausted && self.incumbent.is_some()
    }
}

/// Run branch and bound from the problem's root.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight failures (policy validation,
/// table construction). Budget exhaustion is a normal termination.
pub fn branch_and_bound<P: BranchingProblem>(
    problem: &P,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<P::Solution>, SearchError> {
    policy.validate()?;
    match policy.order {
        ExpansionOrder::BestFirst => run::<P, BestFirst>(problem, policy),
        ExpansionOrder::DepthFirst => run::<P, DepthFirst>(problem, policy),
    }
}

fn run<P: BranchingProblem, O: InsertionOrder>(
    problem: &P,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<P::Solution>, SearchError> {
    let mut frontier: StatePriorityTable<P::State, O> =
        StatePriorityTable::with_config(policy.table_config())?;
    let mut stats = SearchStats::default();
    let mut incumbent: Option<Incumbent<P::Solution>> = None;

    frontier.push(problem.root());
    stats.pushed = 1;
    stats.frontier_high_water = 1;

    let termination = loop {
        if stats.expansions >= policy.max_expansions {
            break TerminationReason::ExpansionBudgetExceeded;
        }
        let Some(state) = frontier.pop() else {
            break TerminationReason::FrontierExhausted;
        };
        stats.expansions += 1;

        let candidate = problem.evaluate(&state);
        if beats(candidate.quality, incumbent.as_ref()) {
            let quality = candidate.quality;
            incumbent = Some(candidate);
            stats.incumbent_updates += 1;
            let pruned = frontier.prune(quality);
            stats.pruned += pruned as u64;
            debug!(
                quality,
                bound = state.priority(),
                pruned,
                remaining = frontier.len(),
                "incumbent improved"
            );
        }

        if problem.is_leaf(&state) {
            continue;
        }

        let threshold = incumbent.as_ref().map(|i| i.quality);
        let mut admitted = 0u64;
        for child in problem.branch(&state) {
            if threshold.is_some_and(|q| child.priority() <= q) {
                stats.rejected += 1;
                continue;
            }
            frontier.push(child);
            admitted += 1;
        }
        stats.pushed += admitted;
        stats.frontier_high_water = stats.frontier_high_water.max(frontier.len() as u64);
        trace!(
            bound = state.priority(),
            admitted,
            frontier = frontier.len(),
            "expanded"
        );
    };

    info!(
        order = O::NAME,
        ?termination,
        expansions = stats.expansions,
        quality = incumbent.as_ref().map(|i| i.quality),
        "search finished"
    );

    Ok(SearchOutcome {
        incumbent,
        termination,
        stats,
        frontier_remaining: frontier.len(),
    })
}

fn beats<T>(quality: Priority, incumbent: Option<&Incumbent<T>>) -> bool {
    match incumbent {
        Some(best) => quality > best.quality,
        None => true,
    }
}

/// Hand every state that can still beat `incumbent` to a fresh table.
///
/// The states are moved, not copied; `frontier` is empty afterwards and the
/// hopeless states are dropped.
///
/// # Errors
///
/// Returns [`SearchError::Table`] if the new table cannot be built.
pub fn split_frontier<S: SearchState>(
    frontier: &mut StatePriorityHashtable<S>,
    incumbent: Priority,
    policy: &SearchPolicy,
) -> Result<StatePriorityHashtable<S>, SearchError> {
    let mut kept = StatePriorityHashtable::with_config(policy.table_config())?;
    let (moved, discarded) = frontier.prune_and_return(incumbent, &mut kept);
    debug!(moved, discarded, incumbent, "frontier split");
    Ok(kept)
}
