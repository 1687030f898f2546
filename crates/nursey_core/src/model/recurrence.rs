//! Recurrence cadence and next-occurrence arithmetic.
//!
//! # Responsibility
//! - Map a recurrence kind to its fixed day stride.
//! - Compute the first occurrence of a recurring task that is no longer due.
//!
//! # Invariants
//! - `Month` is a fixed 28-day stride, not a calendar month.
//! - `next_occurrence` never reads the clock; `now` is always passed in.
//! - The time-of-day of an occurrence never changes when rolling forward.

use crate::model::task::TaskValidationError;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Repeat cadence of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recurrence {
    /// One-off task.
    #[default]
    None,
    /// Repeats every day.
    Day,
    /// Repeats every 7 days.
    Week,
    /// Repeats every 28 days.
    Month,
}

impl Recurrence {
    /// Stable keyword used in persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
        }
    }

    /// Day stride between two occurrences, or `None` for one-off tasks.
    pub fn interval_days(self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Day => Some(1),
            Self::Week => Some(7),
            Self::Month => Some(28),
        }
    }

    pub fn is_recurring(self) -> bool {
        self != Self::None
    }

    /// Parses a recurrence keyword (`NONE|DAY|WEEK|MONTH`, case-insensitive).
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "DAY" => Ok(Self::Day),
            "WEEK" => Ok(Self::Week),
            "MONTH" => Ok(Self::Month),
            _ => Err(TaskValidationError::InvalidRecurrence(value.to_string())),
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Returns the first occurrence of `original` that is strictly after `now`.
///
/// The elapsed whole days between the two calendar dates are rounded up to
/// the next multiple of the recurrence stride, so the result lands on the
/// task's own cadence and keeps its time-of-day.
///
/// # Contract
/// - One-off tasks are returned unchanged.
/// - Occurrences that are not before `now` are returned unchanged.
/// - An occurrence past the last representable date is returned unchanged.
pub fn next_occurrence(
    original: NaiveDateTime,
    now: NaiveDateTime,
    recurrence: Recurrence,
) -> NaiveDateTime {
    let Some(interval) = recurrence.interval_days() else {
        return original;
    };
    if original >= now {
        return original;
    }

    let elapsed = (now.date() - original.date()).num_days();
    let offset = ceil_to_multiple(elapsed + 1, interval);
    Duration::try_days(offset)
        .and_then(|span| original.checked_add_signed(span))
        .unwrap_or(original)
}

fn ceil_to_multiple(value: i64, step: i64) -> i64 {
    ((value + step - 1) / step) * step
}
