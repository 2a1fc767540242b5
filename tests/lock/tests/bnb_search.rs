//! Driver lock tests: optimality against brute force, determinism, and
//! agreement between the two expansion orders.

use boundq_search::consensus::IntervalConsensus;
use boundq_search::policy::{ExpansionOrder, SearchPolicy};
use boundq_search::search::{branch_and_bound, TerminationReason};
use lock_tests::{brute_force_coverage, lcg_intervals};

const WIDTH: i32 = 512;

fn policy(order: ExpansionOrder) -> SearchPolicy {
    SearchPolicy {
        bucket_hint: 64,
        order,
        ..SearchPolicy::default()
    }
}

#[test]
fn both_orders_reach_brute_force_optimum() {
    for seed in 1..=12u64 {
        let intervals = lcg_intervals(seed, 40, WIDTH);
        let expected = brute_force_coverage(&intervals, 0, WIDTH - 1);
        let problem = IntervalConsensus::new(intervals.clone(), 0, WIDTH - 1).unwrap();

        for order in [ExpansionOrder::BestFirst, ExpansionOrder::DepthFirst] {
            let outcome = branch_and_bound(&problem, &policy(order)).unwrap();
            assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
            let best = outcome.incumbent.unwrap();
            assert_eq!(best.quality, expected, "seed {seed}, {order:?}");
            assert_eq!(
                problem.coverage(best.solution),
                best.quality,
                "reported solution must achieve reported quality"
            );
        }
    }
}

#[test]
fn search_is_deterministic() {
    let problem = IntervalConsensus::new(lcg_intervals(77, 60, WIDTH), 0, WIDTH - 1).unwrap();
    let first = branch_and_bound(&problem, &policy(ExpansionOrder::DepthFirst)).unwrap();
    for _ in 0..5 {
        let again = branch_and_bound(&problem, &policy(ExpansionOrder::DepthFirst)).unwrap();
        assert_eq!(again.stats, first.stats);
        assert_eq!(again.incumbent, first.incumbent);
    }
}

#[test]
fn admitted_states_are_expanded_or_pruned() {
    let problem = IntervalConsensus::new(lcg_intervals(5, 50, WIDTH), 0, WIDTH - 1).unwrap();
    let outcome = branch_and_bound(&problem, &policy(ExpansionOrder::BestFirst)).unwrap();
    // Every admitted state is either expanded or pruned.
    let s = &outcome.stats;
    assert_eq!(s.pushed, s.expansions + s.pruned);
    assert_eq!(outcome.frontier_remaining, 0);
}
