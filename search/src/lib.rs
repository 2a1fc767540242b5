//! boundq search: a generic branch-and-bound driver over the kernel tables.
//!
//! This crate depends only on `boundq_kernel`. It owns the outer loop the
//! kernel leaves to its caller: pushing children, tracking the incumbent,
//! pruning on improvement and deciding termination.
//!
//! # Crate dependency graph
//!
//! ```text
//! boundq_kernel  ←  boundq_search
//! (tables)          (driver, snapshots, digests)
//! ```
//!
//! # Key types
//!
//! - [`contract::BranchingProblem`] — problem trait the driver explores
//! - [`search::branch_and_bound`] — the search loop
//! - [`policy::SearchPolicy`] — budget, table sizing and expansion order
//! - [`consensus::IntervalConsensus`] — reference 1-D consensus problem
//! - [`snapshot::SnapshotSink`] / [`digest::DigestSink`] — dump sinks

#![forbid(unsafe_code)]

pub mod consensus;
pub mod contract;
pub mod digest;
pub mod error;
pub mod policy;
pub mod search;
pub mod snapshot;
