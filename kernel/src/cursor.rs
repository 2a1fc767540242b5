//! Read-only cursor over the top bucket of a best-first table.
//!
//! A cursor is a plain value: a node position plus the id and generation of the
//! table that issued it. Every structural mutation bumps the generation, so a
//! cursor kept across a mutation is rejected with
//! [`crate::error::CursorError::Stale`] instead of following a freed or reused
//! node. A cursor handed to a different table is rejected with
//! [`crate::error::CursorError::ForeignTable`].

use crate::node::NodeId;

/// Position within the max-priority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) table: u64,
    pub(crate) generation: u64,
    pub(crate) position: Option<NodeId>,
}

impl Cursor {
    /// Id of the table that issued this cursor.
    #[must_use]
    pub fn table_id(&self) -> u64 {
        self.table
    }

    /// Table generation this cursor was issued under.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` when issued on an empty table.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }
}
