//! Search policy types.

use boundq_kernel::config::{TableConfig, DEFAULT_BUCKET_HINT};

use crate::error::SearchError;

/// Which table variant holds the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOrder {
    /// Best bound first; FIFO among ties.
    BestFirst,
    /// Best bound first; newest child first among ties.
    DepthFirst,
}

impl ExpansionOrder {
    /// Stable name, matching the kernel's `InsertionOrder::NAME`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestFirst => "best_first",
            Self::DepthFirst => "depth_first",
        }
    }
}

/// Budget, sizing and ordering for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Expected distinct bounds in the frontier (table sizing hint).
    pub bucket_hint: usize,
    /// Hard cap on state expansions.
    pub max_expansions: u64,
    /// Frontier discipline.
    pub order: ExpansionOrder,
}

impl SearchPolicy {
    /// The table config this policy builds the frontier with.
    #[must_use]
    pub fn table_config(&self) -> TableConfig {
        TableConfig::with_bucket_hint(self.bucket_hint)
    }

    /// Validate the policy before any state is created.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget and
    /// [`SearchError::Table`] if the table config is rejected.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        self.table_config().validate()?;
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            bucket_hint: DEFAULT_BUCKET_HINT,
            max_expansions: 1_000_000,
            order: ExpansionOrder::BestFirst,
        }
    }
}
