//! Persistence boundary for the book.
//!
//! # Responsibility
//! - Map real tasks and residents to their persisted record shape.
//! - Save and load whole books through SQLite.
//!
//! # Invariants
//! - Only the real-task view is ever written; ghost tasks are refused.
//! - Loaded records pass the same validation as freshly built tasks.

pub mod book_repo;
pub mod task_record;
