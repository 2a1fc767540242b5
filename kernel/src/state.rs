//! The search-state contract.

/// Integer bound used to bucket states.
///
/// Typically an upper bound on the solution quality reachable from a state.
/// How a real-valued bound maps onto this integer is the state type's concern.
pub type Priority = i32;

/// A pending search-tree node stored by a table.
///
/// # Contract
///
/// - `priority` must return the same value for as long as the state is stored.
///   Buckets are keyed on the value read at `push` time.
/// - The table takes ownership on `push` and drops the state when it is pruned
///   or when the table itself is dropped.
pub trait SearchState {
    /// The state's bound.
    fn priority(&self) -> Priority;
}

/// Byte encoding used by frame-based dump sinks.
///
/// The table never interprets these bytes.
pub trait EncodeState {
    /// Append this state's encoding to `out`.
    fn encode(&self, out: &mut Vec<u8>);
}

impl<T: SearchState + ?Sized> SearchState for Box<T> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: EncodeState + ?Sized> EncodeState for Box<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        (**self).encode(out);
    }
}
