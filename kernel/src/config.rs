//! Table construction parameters.

use crate::error::TableError;

/// Default bucket hint: distinct priorities expected before the map regrows.
pub const DEFAULT_BUCKET_HINT: usize = 1024;

/// Largest accepted bucket hint.
pub const MAX_BUCKET_HINT: usize = 1 << 24;

/// Construction parameters for a state priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Expected number of distinct priorities. A sizing hint, not a limit.
    pub bucket_hint: usize,
}

impl TableConfig {
    /// Config with the given bucket hint.
    #[must_use]
    pub fn with_bucket_hint(bucket_hint: usize) -> Self {
        Self { bucket_hint }
    }

    /// Check the config before any allocation happens.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BucketHintTooLarge`] if `bucket_hint` exceeds
    /// [`MAX_BUCKET_HINT`].
    pub fn validate(&self) -> Result<(), TableError> {
        if self.bucket_hint > MAX_BUCKET_HINT {
            return Err(TableError::BucketHintTooLarge {
                hint: self.bucket_hint,
                max: MAX_BUCKET_HINT,
            });
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_hint: DEFAULT_BUCKET_HINT,
        }
    }
}
