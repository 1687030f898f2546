//! Core domain logic for NurseyBook.
//! This crate owns the task time-state engine and the undo/redo history.

pub mod config;
pub mod db;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use config::{ConfigError, CoreConfig, MAX_PROJECTION_HORIZON_DAYS};
pub use history::{BookState, CommandOutcome, HistoryError, HistoryResult, VersionedBook};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::NurseyBook;
pub use model::recurrence::{next_occurrence, Recurrence};
pub use model::resident::{Resident, ResidentError};
pub use model::task::{Task, TaskDetails, TaskIdentity, TaskStatus, TaskValidationError};
pub use model::task_list::{TaskError, TaskResult, UniqueTaskList};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use repo::task_record::{ResidentRecord, TaskRecord};
pub use schedule::{
    is_overdue, project_for_date, synchronize, ProjectionHorizon, SyncReport,
    DEFAULT_PROJECTION_HORIZON_DAYS,
};
pub use service::book_service::{BookEvent, BookService};

/// Minimal health-check API for collaborator wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
