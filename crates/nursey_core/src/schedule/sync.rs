//! Per-command time synchronization.
//!
//! # Invariants
//! - Steps run in a fixed order: purge ghosts, fix overdue flags, roll
//!   recurring tasks forward, re-sort.
//! - Running the pass twice with the same `now` leaves the collection as a
//!   single run left it.

use crate::model::task::{truncate_to_minute, Task};
use crate::model::task_list::UniqueTaskList;
use chrono::NaiveDateTime;
use log::{debug, warn};

/// Counters describing what one synchronization pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub ghosts_purged: usize,
    pub marked_overdue: usize,
    pub cleared_overdue: usize,
    pub rolled_forward: usize,
    /// Recurring tasks left overdue because their next occurrence already
    /// exists as another real task.
    pub roll_collisions: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.ghosts_purged
            + self.marked_overdue
            + self.cleared_overdue
            + self.rolled_forward
            > 0
    }
}

/// True when `when` is strictly before `now` truncated to the minute.
pub fn is_overdue(now: NaiveDateTime, when: NaiveDateTime) -> bool {
    when < truncate_to_minute(now)
}

/// Brings the collection in line with `now`.
pub fn synchronize(tasks: &mut UniqueTaskList, now: NaiveDateTime) -> SyncReport {
    let mut report = SyncReport {
        ghosts_purged: tasks.purge_ghosts(),
        ..SyncReport::default()
    };

    let real = tasks.real_only_view().cloned().collect::<Vec<Task>>();
    for task in real {
        let due = is_overdue(now, task.when());
        if due && !task.status().overdue {
            if tasks.mark_overdue(&task).is_ok() {
                report.marked_overdue += 1;
            }
        } else if !due && task.status().overdue && tasks.mark_not_overdue(&task).is_ok() {
            report.cleared_overdue += 1;
        }
    }

    let to_roll = tasks
        .real_only_view()
        .filter(|task| task.is_recurring() && task.status().overdue)
        .cloned()
        .collect::<Vec<Task>>();
    for task in to_roll {
        match tasks.roll_recurring(&task, now) {
            Ok(()) => report.rolled_forward += 1,
            Err(err) => {
                warn!(
                    "event=task_roll module=schedule status=skipped error={}",
                    err
                );
                report.roll_collisions += 1;
            }
        }
    }

    tasks.resort();

    debug!(
        "event=time_sync module=schedule status=ok purged={} overdue={} cleared={} rolled={} collisions={}",
        report.ghosts_purged,
        report.marked_overdue,
        report.cleared_overdue,
        report.rolled_forward,
        report.roll_collisions
    );
    report
}
