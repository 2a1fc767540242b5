//! Typed kernel errors.
//!
//! Routine outcomes are not errors: an empty `pop` returns `None` and a cursor
//! walking past the end of its chain returns `Ok(None)`.

/// Failure to construct a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The bucket hint exceeds [`crate::config::MAX_BUCKET_HINT`].
    BucketHintTooLarge { hint: usize, max: usize },
    /// The allocator could not provide the initial map.
    AllocationFailed { requested: usize },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BucketHintTooLarge { hint, max } => {
                write!(f, "bucket hint {hint} exceeds maximum {max}")
            }
            Self::AllocationFailed { requested } => {
                write!(f, "failed to allocate priority map for {requested} buckets")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Failure to advance a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The table was mutated after the cursor was issued.
    Stale { issued: u64, current: u64 },
    /// The cursor was issued by a different table.
    ForeignTable { issued_by: u64, used_on: u64 },
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stale { issued, current } => write!(
                f,
                "cursor issued at generation {issued} used at generation {current}"
            ),
            Self::ForeignTable { issued_by, used_on } => write!(
                f,
                "cursor issued by table {issued_by} used on table {used_on}"
            ),
        }
    }
}

impl std::error::Error for CursorError {}
