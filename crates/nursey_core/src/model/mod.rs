//! Domain model for residents and caregiving tasks.
//!
//! # Responsibility
//! - Define immutable task values and their recurrence cadence.
//! - Own the sorted task collection and the full book data set.
//!
//! # Invariants
//! - Every value is valid at construction.
//! - State changes produce new values; collections swap them in explicitly.

pub mod book;
pub mod recurrence;
pub mod resident;
pub mod task;
pub mod task_list;
