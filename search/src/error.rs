//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Once the loop starts,
//! every termination (including budget exhaustion) is reported through
//! [`crate::search::TerminationReason`] with the stats collected so far.

use boundq_kernel::error::TableError;

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy cannot drive a search.
    InvalidPolicy { detail: String },
    /// The problem definition is malformed.
    InvalidProblem { detail: String },
    /// The frontier table could not be built.
    Table(TableError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::InvalidProblem { detail } => write!(f, "invalid problem: {detail}"),
            Self::Table(e) => write!(f, "frontier table: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for SearchError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
