//! Table lock tests: tie ordering, max tracking, prune semantics, ownership
//! transfer and cursor bounds for both table variants.

use boundq_kernel::error::CursorError;
use boundq_kernel::state::Priority;
use boundq_kernel::table::{StatePriorityHashtable, StatePriorityHashtableDF};
use lock_tests::{lcg_priorities, tagged, TaggedState};

fn filled_best_first(priorities: &[Priority]) -> StatePriorityHashtable<TaggedState> {
    let mut table = StatePriorityHashtable::new(64);
    for (id, &p) in (0u64..).zip(priorities) {
        table.push(tagged(id, p));
    }
    table
}

fn ids_of(table: &StatePriorityHashtable<TaggedState>) -> Vec<u64> {
    let mut ids: Vec<u64> = table.iter().map(|(_, s)| s.id).collect();
    ids.sort_unstable();
    ids
}

// ---------------------------------------------------------------------------
// Round trip: [3, 7, 7, 1]
// ---------------------------------------------------------------------------

#[test]
fn round_trip_scenario() {
    let mut table = filled_best_first(&[3, 7, 7, 1]);
    assert_eq!(table.len(), 4);

    assert_eq!(table.pop(), Some(tagged(1, 7)));
    assert_eq!(table.pop(), Some(tagged(2, 7)));
    assert_eq!(table.pop(), Some(tagged(0, 3)));

    table.prune(1);
    assert_eq!(table.len(), 0);
    assert_eq!(table.pop(), None);
}

// ---------------------------------------------------------------------------
// Depth-first tie order: A(5), B(5), C(3) pops B, A, C
// ---------------------------------------------------------------------------

#[test]
fn depth_first_tie_order() {
    let mut table = StatePriorityHashtableDF::new(8);
    table.push(tagged(0xA, 5));
    table.push(tagged(0xB, 5));
    table.push(tagged(0xC, 3));

    let order: Vec<u64> = std::iter::from_fn(|| table.pop()).map(|s| s.id).collect();
    assert_eq!(order, vec![0xB, 0xA, 0xC]);
}

// ---------------------------------------------------------------------------
// Size and max invariants over a long mixed workload
// ---------------------------------------------------------------------------

#[test]
fn size_matches_reachable_states_across_mixed_workload() {
    let priorities = lcg_priorities(7, 2_000, -40, 40);
    let mut table = StatePriorityHashtable::new(16);

    for (step, (id, &p)) in (0u64..).zip(&priorities).enumerate() {
        table.push(tagged(id, p));
        if step % 3 == 0 {
            let _ = table.pop();
        }
        if step % 250 == 249 {
            table.prune(p);
        }
        assert_eq!(table.len(), table.iter().count());
    }
}

#[test]
fn max_equals_largest_pushed_priority() {
    let priorities = lcg_priorities(11, 500, i32::MIN / 2, i32::MAX / 2);
    let table = filled_best_first(&priorities);
    assert_eq!(table.max_priority(), priorities.iter().copied().max());
}

#[test]
fn pop_is_monotone_non_increasing() {
    let priorities = lcg_priorities(3, 1_000, -5, 5);
    let mut table = filled_best_first(&priorities);
    let mut last = Priority::MAX;
    while let Some(s) = table.pop() {
        assert!(s.priority <= last, "popped {} after {last}", s.priority);
        last = s.priority;
    }
}

// ---------------------------------------------------------------------------
// Prune correctness
// ---------------------------------------------------------------------------

#[test]
fn prune_drops_exactly_the_hopeless_states() {
    let priorities = lcg_priorities(19, 300, -20, 20);
    let mut table = filled_best_first(&priorities);

    let expected: Vec<u64> = (0u64..)
        .zip(&priorities)
        .filter(|&(_, &p)| p > 4)
        .map(|(id, _)| id)
        .collect();

    let discarded = table.prune(4);
    assert_eq!(discarded, priorities.len() - expected.len());
    assert_eq!(ids_of(&table), expected);
    assert!(table.iter().all(|(p, _)| p > 4));
}

// ---------------------------------------------------------------------------
// Ownership transfer
// ---------------------------------------------------------------------------

#[test]
fn prune_and_return_transfers_by_identity() {
    let priorities = lcg_priorities(23, 200, 0, 10);
    let mut source = filled_best_first(&priorities);
    let mut target = StatePriorityHashtable::new(16);

    let (moved, discarded) = source.prune_and_return(6, &mut target);

    let expected: Vec<u64> = (0u64..)
        .zip(&priorities)
        .filter(|&(_, &p)| p > 6)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(moved, expected.len());
    assert_eq!(moved + discarded, priorities.len());
    assert!(source.is_empty());
    assert_eq!(source.iter().count(), 0);
    assert_eq!(ids_of(&target), expected);
}

#[test]
fn prune_and_return_preserves_fifo_within_bucket() {
    let mut source = filled_best_first(&[9, 9, 9]);
    let mut target = StatePriorityHashtable::new(4);
    source.prune_and_return(0, &mut target);

    let order: Vec<u64> = std::iter::from_fn(|| target.pop()).map(|s| s.id).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

#[test]
fn cursor_samples_top_bucket_in_pop_order() {
    let mut table = filled_best_first(&[4, 8, 8, 8, 2]);
    let mut cursor = table.init_cursor();

    let mut sampled = vec![table.advance_cursor(&mut cursor, 0).unwrap().map(|s| s.id)];
    while let Some(s) = table.advance_cursor(&mut cursor, 1).unwrap() {
        sampled.push(Some(s.id));
    }
    assert_eq!(sampled, vec![Some(1), Some(2), Some(3)]);

    let popped: Vec<u64> = (0..3).filter_map(|_| table.pop()).map(|s| s.id).collect();
    assert_eq!(popped, vec![1, 2, 3]);
}

#[test]
fn cursor_length_boundary() {
    let table = filled_best_first(&[1; 6]);
    for n in 0..12 {
        let mut cursor = table.init_cursor();
        let got = table.advance_cursor(&mut cursor, n).unwrap();
        assert_eq!(got.is_some(), n < 6, "steps = {n}");
    }
}

#[test]
fn cursor_rejected_after_push_or_prune() {
    let mut table = filled_best_first(&[1, 2]);

    let mut cursor = table.init_cursor();
    table.push(tagged(9, 0));
    assert!(matches!(
        table.advance_cursor(&mut cursor, 0),
        Err(CursorError::Stale { .. })
    ));

    let mut cursor = table.init_cursor();
    table.prune(0);
    assert!(matches!(
        table.advance_cursor(&mut cursor, 1),
        Err(CursorError::Stale { .. })
    ));
}
