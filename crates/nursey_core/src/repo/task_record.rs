//! Persisted record shapes.
//!
//! Dates are `yyyy-mm-dd`, times `HH:mm`, status flags the strings
//! `"true"`/`"false"`, recurrence one of `NONE|DAY|WEEK|MONTH`.

use crate::model::recurrence::Recurrence;
use crate::model::resident::{Resident, ResidentError};
use crate::model::task::{
    parse_date, parse_time, Task, TaskDetails, TaskStatus, DATE_FORMAT, TIME_FORMAT,
};
use crate::repo::book_repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persisted form of one real task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub related_names: Vec<String>,
    pub date: String,
    pub time: String,
    pub is_done: String,
    pub is_overdue: String,
    pub recurrence: String,
}

impl TaskRecord {
    /// Builds the record for a real task.
    ///
    /// # Errors
    /// - `GhostTask` for ghost tasks, which are never persisted.
    pub fn from_task(task: &Task) -> RepoResult<Self> {
        match task {
            Task::Real(details) => Ok(Self::from_details(details)),
            Task::Ghost(_) => Err(RepoError::GhostTask(task.identity())),
        }
    }

    /// Validates every field and rebuilds a real task.
    pub fn into_task(self) -> RepoResult<Task> {
        let when = NaiveDateTime::new(parse_date(&self.date)?, parse_time(&self.time)?);
        let status = TaskStatus::new(
            parse_flag("is_done", &self.is_done)?,
            parse_flag("is_overdue", &self.is_overdue)?,
        );
        let recurrence = Recurrence::parse(&self.recurrence)?;
        let details = TaskDetails::new(
            &self.description,
            when,
            &self.related_names,
            status,
            recurrence,
        )?;
        Ok(Task::Real(details))
    }

    fn from_details(details: &TaskDetails) -> Self {
        let when = details.when();
        Self {
            description: details.description().to_string(),
            related_names: details.related_names().iter().cloned().collect(),
            date: when.format(DATE_FORMAT).to_string(),
            time: when.format(TIME_FORMAT).to_string(),
            is_done: details.status().done.to_string(),
            is_overdue: details.status().overdue.to_string(),
            recurrence: details.recurrence().as_str().to_string(),
        }
    }
}

/// Persisted form of one resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentRecord {
    pub name: String,
}

impl ResidentRecord {
    pub fn from_resident(resident: &Resident) -> Self {
        Self {
            name: resident.name().to_string(),
        }
    }

    pub fn into_resident(self) -> Result<Resident, ResidentError> {
        Resident::new(&self.name)
    }
}

/// Converts the real-task view of `tasks` into records.
pub fn task_records<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<TaskRecord> {
    tasks
        .into_iter()
        .filter_map(|task| TaskRecord::from_task(task).ok())
        .collect()
}

fn parse_flag(field: &str, value: &str) -> RepoResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(RepoError::InvalidData(format!(
            "invalid {field} value `{other}`; expected \"true\" or \"false\""
        ))),
    }
}
