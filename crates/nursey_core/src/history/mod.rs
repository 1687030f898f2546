//! Linear undo/redo history over whole-book snapshots.
//!
//! # See also
//! - `service::book_service` for the commit-per-command driver.

pub mod versioned;

pub use versioned::{BookState, CommandOutcome, HistoryError, HistoryResult, VersionedBook};
