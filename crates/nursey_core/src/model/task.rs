//! Task value model.
//!
//! # Responsibility
//! - Define the immutable caregiving task record and its two variants.
//! - Validate every field at construction so no partial task can exist.
//! - Provide copy-on-write helpers for every state change.
//!
//! # Invariants
//! - `description` is non-blank and trimmed.
//! - `when` has minute precision (seconds and below are always zero).
//! - `related_names` is a set of valid resident names.
//! - A task is never mutated in place; changes produce a new `Task` that the
//!   owning collection swaps in through an explicit replace.
//! - `Ghost` tasks are transient projections and never reach persistence.

use crate::model::recurrence::{next_occurrence, Recurrence};
use crate::model::resident::normalize_name;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Persisted date format (`yyyy-mm-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Persisted time format (`HH:mm`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Construction-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task description cannot be blank")]
    EmptyDescription,
    #[error("invalid task date `{0}`: expected yyyy-mm-dd")]
    InvalidDate(String),
    #[error("invalid task time `{0}`: expected HH:mm")]
    InvalidTime(String),
    #[error("invalid recurrence `{0}`: expected NONE|DAY|WEEK|MONTH")]
    InvalidRecurrence(String),
    #[error("invalid related name `{0}`")]
    InvalidName(String),
}

/// Completion and lateness flags. The two flags are independent: a task
/// marked done after its due time stays overdue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskStatus {
    pub done: bool,
    pub overdue: bool,
}

impl TaskStatus {
    pub const fn new(done: bool, overdue: bool) -> Self {
        Self { done, overdue }
    }
}

/// Uniqueness key of a task inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskIdentity {
    pub description: String,
    pub when: NaiveDateTime,
    pub related_names: BTreeSet<String>,
}

impl Display for TaskIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` at {}",
            self.description,
            self.when.format("%Y-%m-%d %H:%M")
        )?;
        if !self.related_names.is_empty() {
            let names = self.related_names.iter().cloned().collect::<Vec<_>>();
            write!(f, " for [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

/// Field payload shared by both task variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskDetails {
    description: String,
    when: NaiveDateTime,
    related_names: BTreeSet<String>,
    status: TaskStatus,
    recurrence: Recurrence,
}

impl TaskDetails {
    /// Validates and builds a task payload.
    ///
    /// # Errors
    /// - `EmptyDescription` when `description` is blank.
    /// - `InvalidName` when any related name fails the resident name format.
    pub fn new<I, S>(
        description: &str,
        when: NaiveDateTime,
        related_names: I,
        status: TaskStatus,
        recurrence: Recurrence,
    ) -> Result<Self, TaskValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }

        let related_names = related_names
            .into_iter()
            .map(|name| {
                let raw = name.as_ref();
                normalize_name(raw)
                    .ok_or_else(|| TaskValidationError::InvalidName(raw.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            description: description.to_string(),
            when: truncate_to_minute(when),
            related_names,
            status,
            recurrence,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn when(&self) -> NaiveDateTime {
        self.when
    }

    pub fn related_names(&self) -> &BTreeSet<String> {
        &self.related_names
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }
}

/// Caregiving task, either persisted (`Real`) or a transient schedule
/// projection (`Ghost`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Task {
    Real(TaskDetails),
    Ghost(TaskDetails),
}

impl Task {
    /// Builds a real task with a fresh (not done, not overdue) status.
    pub fn real<I, S>(
        description: &str,
        when: NaiveDateTime,
        related_names: I,
        recurrence: Recurrence,
    ) -> Result<Self, TaskValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TaskDetails::new(
            description,
            when,
            related_names,
            TaskStatus::default(),
            recurrence,
        )
        .map(Self::Real)
    }

    /// Builds a real task from textual date (`yyyy-mm-dd`), time (`HH:mm`)
    /// and recurrence keyword input.
    pub fn parse_real<I, S>(
        description: &str,
        date: &str,
        time: &str,
        related_names: I,
        recurrence: &str,
    ) -> Result<Self, TaskValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let when = NaiveDateTime::new(parse_date(date)?, parse_time(time)?);
        let recurrence = Recurrence::parse(recurrence)?;
        Self::real(description, when, related_names, recurrence)
    }

    pub fn details(&self) -> &TaskDetails {
        match self {
            Self::Real(details) | Self::Ghost(details) => details,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    pub fn is_ghost(&self) -> bool {
        matches!(self, Self::Ghost(_))
    }

    pub fn description(&self) -> &str {
        self.details().description()
    }

    pub fn when(&self) -> NaiveDateTime {
        self.details().when()
    }

    pub fn date(&self) -> NaiveDate {
        self.when().date()
    }

    pub fn time(&self) -> NaiveTime {
        self.when().time()
    }

    pub fn related_names(&self) -> &BTreeSet<String> {
        self.details().related_names()
    }

    pub fn status(&self) -> TaskStatus {
        self.details().status()
    }

    pub fn recurrence(&self) -> Recurrence {
        self.details().recurrence()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence().is_recurring()
    }

    /// Key used for duplicate detection.
    pub fn identity(&self) -> TaskIdentity {
        let details = self.details();
        TaskIdentity {
            description: details.description.clone(),
            when: details.when,
            related_names: details.related_names.clone(),
        }
    }

    /// Returns a copy with the given status, same variant.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        self.map_details(|details| details.status = status)
    }

    /// Returns a copy marked done. The overdue flag is left as is.
    pub fn with_done(&self) -> Self {
        self.map_details(|details| details.status.done = true)
    }

    pub fn with_overdue(&self, overdue: bool) -> Self {
        self.map_details(|details| details.status.overdue = overdue)
    }

    /// Returns a copy rescheduled to `when`, truncated to the minute.
    pub fn with_when(&self, when: NaiveDateTime) -> Self {
        self.map_details(|details| details.when = truncate_to_minute(when))
    }

    /// Returns a copy without `name` (ASCII case-insensitive) in its related
    /// names.
    pub fn without_name(&self, name: &str) -> Self {
        let name = name.trim();
        self.map_details(|details| {
            details
                .related_names
                .retain(|existing| !existing.eq_ignore_ascii_case(name))
        })
    }

    /// Returns the next occurrence strictly after `now` with a fresh status.
    ///
    /// One-off tasks and tasks already in the future come back unchanged.
    pub fn rolled_forward(&self, now: NaiveDateTime) -> Self {
        let next = next_occurrence(self.when(), now, self.recurrence());
        if next == self.when() {
            return self.clone();
        }
        self.map_details(|details| {
            details.when = next;
            details.status = TaskStatus::default();
        })
    }

    /// Returns a ghost copy of this task placed on `date`, same time-of-day.
    pub fn as_ghost_on(&self, date: NaiveDate) -> Self {
        let mut details = self.details().clone();
        details.when = NaiveDateTime::new(date, details.when.time());
        Self::Ghost(details)
    }

    /// Converts the task into its real variant.
    pub fn into_real(self) -> Self {
        match self {
            Self::Real(details) | Self::Ghost(details) => Self::Real(details),
        }
    }

    fn map_details(&self, update: impl FnOnce(&mut TaskDetails)) -> Self {
        match self {
            Self::Real(details) => {
                let mut details = details.clone();
                update(&mut details);
                Self::Real(details)
            }
            Self::Ghost(details) => {
                let mut details = details.clone();
                update(&mut details);
                Self::Ghost(details)
            }
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let details = self.details();
        write!(
            f,
            "{} on {}",
            details.description,
            details.when.format("%Y-%m-%d %H:%M")
        )?;
        if !details.related_names.is_empty() {
            let names = details.related_names.iter().cloned().collect::<Vec<_>>();
            write!(f, " for [{}]", names.join(", "))?;
        }
        if details.recurrence.is_recurring() {
            write!(f, " every {}", details.recurrence.as_str().to_ascii_lowercase())?;
        }
        if details.status.done {
            f.write_str(" [done]")?;
        }
        if details.status.overdue {
            f.write_str(" [overdue]")?;
        }
        if self.is_ghost() {
            f.write_str(" (upcoming)")?;
        }
        Ok(())
    }
}

/// Parses a `yyyy-mm-dd` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, TaskValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDate(value.to_string()))
}

/// Parses an `HH:mm` time.
pub fn parse_time(value: &str) -> Result<NaiveTime, TaskValidationError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| TaskValidationError::InvalidTime(value.to_string()))
}

/// Drops seconds and sub-second precision.
pub(crate) fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(value)
}
