//! boundq kernel: priority-bucketed state storage for branch-and-bound search.
//!
//! The kernel stores pending search states keyed by an integer upper bound and
//! answers "which pending state has the best bound" without sorting. It has no
//! dependencies and performs no I/O beyond the dump sinks the caller supplies.
//!
//! # Key types
//!
//! - [`table::StatePriorityHashtable`] — best-first table (FIFO among ties)
//! - [`table::StatePriorityHashtableDF`] — depth-first table (LIFO among ties)
//! - [`state::SearchState`] — the contract every stored state satisfies
//! - [`dump::StateSink`] — destination for `dump` snapshots
//!
//! # Module dependency direction
//!
//! `state` ← `hash` ← `node` ← `bucket` ← `map` ← `order` ← `table`
//!
//! One-way only. `table` owns everything below it; `cursor`, `config`, `dump`
//! and `error` are leaf modules shared by the rest.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bucket;
pub mod config;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod hash;
pub mod map;
pub mod node;
pub mod order;
pub mod state;
pub mod table;
