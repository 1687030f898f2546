//! Time-state engine for the task collection.
//!
//! # Responsibility
//! - Project transient future occurrences for schedule previews.
//! - Re-synchronize overdue flags and recurring due dates with the clock.
//!
//! # Invariants
//! - Both passes take `now` explicitly and never read the system clock.
//! - Projection only inserts ghost tasks; synchronization removes them all.

pub mod ghost;
pub mod sync;

pub use ghost::{project_for_date, ProjectionHorizon, DEFAULT_PROJECTION_HORIZON_DAYS};
pub use sync::{is_overdue, synchronize, SyncReport};
