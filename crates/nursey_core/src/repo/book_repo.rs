//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Replace the stored book with the live one in a single transaction.
//! - Load a stored book back through full task validation.
//!
//! # Invariants
//! - Ghost tasks are filtered out before any SQL runs.
//! - Load rejects invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::NurseyBook;
use crate::model::resident::{Resident, ResidentError};
use crate::model::task::{TaskIdentity, TaskValidationError};
use crate::model::task_list::{TaskError, UniqueTaskList};
use crate::repo::task_record::{task_records, ResidentRecord, TaskRecord};
use log::info;
use rusqlite::{params, Connection};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error(transparent)]
    Resident(#[from] ResidentError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted book data: {0}")]
    InvalidData(String),
    #[error("ghost task cannot be persisted: {0}")]
    GhostTask(TaskIdentity),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-book persistence contract.
pub trait BookRepository {
    /// Replaces the stored book with the real-task view of `book`.
    fn save_book(&mut self, book: &NurseyBook) -> RepoResult<()>;
    /// Loads the stored book. An empty store yields an empty book.
    fn load_book(&self) -> RepoResult<NurseyBook>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - `InvalidData` when the connection has not been migrated.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if version != latest_version() {
            return Err(RepoError::InvalidData(format!(
                "connection schema version {version} does not match {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save_book(&mut self, book: &NurseyBook) -> RepoResult<()> {
        let records = task_records(book.tasks().real_only_view());
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM task_names;
             DELETE FROM tasks;
             DELETE FROM residents;",
        )?;

        for (position, resident) in book.residents().iter().enumerate() {
            let record = ResidentRecord::from_resident(resident);
            tx.execute(
                "INSERT INTO residents (name, position) VALUES (?1, ?2);",
                params![record.name, position as i64],
            )?;
        }

        for record in &records {
            tx.execute(
                "INSERT INTO tasks (
                    description,
                    task_date,
                    task_time,
                    is_done,
                    is_overdue,
                    recurrence
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    record.description,
                    record.date,
                    record.time,
                    record.is_done,
                    record.is_overdue,
                    record.recurrence,
                ],
            )?;
            let task_id = tx.last_insert_rowid();
            for name in &record.related_names {
                tx.execute(
                    "INSERT INTO task_names (task_id, name) VALUES (?1, ?2);",
                    params![task_id, name],
                )?;
            }
        }
        tx.commit()?;

        info!(
            "event=book_save module=repo status=ok residents={} tasks={}",
            book.residents().len(),
            records.len()
        );
        Ok(())
    }

    fn load_book(&self) -> RepoResult<NurseyBook> {
        let mut resident_stmt = self
            .conn
            .prepare("SELECT name FROM residents ORDER BY position ASC;")?;
        let residents = resident_stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|name| -> RepoResult<Resident> {
                Ok(ResidentRecord { name: name? }.into_resident()?)
            })
            .collect::<RepoResult<Vec<_>>>()?;

        let mut task_stmt = self.conn.prepare(
            "SELECT id, description, task_date, task_time, is_done, is_overdue, recurrence
             FROM tasks
             ORDER BY id ASC;",
        )?;
        let mut names_stmt = self
            .conn
            .prepare("SELECT name FROM task_names WHERE task_id = ?1 ORDER BY name ASC;")?;

        let rows = task_stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>("id")?,
                    TaskRecord {
                        description: row.get("description")?,
                        related_names: Vec::new(),
                        date: row.get("task_date")?,
                        time: row.get("task_time")?,
                        is_done: row.get("is_done")?,
                        is_overdue: row.get("is_overdue")?,
                        recurrence: row.get("recurrence")?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tasks = Vec::with_capacity(rows.len());
        for (task_id, mut record) in rows {
            record.related_names = names_stmt
                .query_map([task_id], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            tasks.push(record.into_task()?);
        }

        let book = NurseyBook::from_parts(residents, UniqueTaskList::try_from_tasks(tasks)?)?;
        info!(
            "event=book_load module=repo status=ok residents={} tasks={}",
            book.residents().len(),
            book.tasks().len()
        );
        Ok(book)
    }
}
