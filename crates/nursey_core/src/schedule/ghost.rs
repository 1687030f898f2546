//! Ghost task projection.
//!
//! A ghost is a transient copy of a recurring real task placed on a future
//! occurrence date. Ghosts only answer "what falls on date X" queries and are
//! purged by the next synchronization pass.

use crate::model::task::Task;
use crate::model::task_list::UniqueTaskList;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

/// Default projection window: 12 weeks from today.
pub const DEFAULT_PROJECTION_HORIZON_DAYS: i64 = 84;

/// Number of days ahead of `now` that projection may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionHorizon {
    days: i64,
}

impl ProjectionHorizon {
    pub const fn from_days(days: i64) -> Self {
        Self { days }
    }

    pub const fn days(self) -> i64 {
        self.days
    }
}

impl Default for ProjectionHorizon {
    fn default() -> Self {
        Self::from_days(DEFAULT_PROJECTION_HORIZON_DAYS)
    }
}

/// Inserts ghost occurrences of recurring real tasks that fall on
/// `key_date` and returns how many were inserted.
///
/// For each recurring real task, candidate dates start one stride after the
/// task's date and advance by the stride. The last candidate checked lies
/// `horizon - stride` days after `now`. The first candidate equal to
/// `key_date` is materialized, unless a task with the same identity is
/// already present; scanning for that task stops there.
/// A candidate or window end past the last representable date ends the scan.
pub fn project_for_date(
    tasks: &mut UniqueTaskList,
    key_date: NaiveDate,
    now: NaiveDateTime,
    horizon: ProjectionHorizon,
) -> usize {
    let recurring = tasks
        .real_only_view()
        .filter(|task| task.is_recurring())
        .cloned()
        .collect::<Vec<Task>>();

    let mut inserted = 0;
    for task in recurring {
        let Some(stride) = task.recurrence().interval_days() else {
            continue;
        };
        let Some(step) = Duration::try_days(stride) else {
            continue;
        };
        let last_candidate = horizon
            .days()
            .checked_sub(stride)
            .and_then(Duration::try_days)
            .and_then(|span| now.date().checked_add_signed(span));
        let Some(last_candidate) = last_candidate else {
            continue;
        };

        let mut candidate = task.date().checked_add_signed(step);
        while let Some(date) = candidate {
            if date > last_candidate || date > key_date {
                break;
            }
            if date == key_date {
                let ghost = task.as_ghost_on(date);
                if !tasks.contains_identity(&ghost.identity()) && tasks.add(ghost).is_ok() {
                    inserted += 1;
                }
                break;
            }
            candidate = date.checked_add_signed(step);
        }
    }

    debug!(
        "event=ghost_project module=schedule status=ok key_date={} inserted={}",
        key_date, inserted
    );
    inserted
}

#[cfg(test)]
mod tests {
    use super::{ProjectionHorizon, DEFAULT_PROJECTION_HORIZON_DAYS};

    #[test]
    fn default_horizon_is_twelve_weeks() {
        assert_eq!(ProjectionHorizon::default().days(), 12 * 7);
        assert_eq!(DEFAULT_PROJECTION_HORIZON_DAYS, 84);
    }
}
