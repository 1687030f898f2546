#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use nursey_core::{Recurrence, Task, TaskDetails, TaskStatus};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn task(description: &str, when: NaiveDateTime, recurrence: Recurrence) -> Task {
    Task::real(description, when, ["Alex Yeoh"], recurrence).unwrap()
}

pub fn task_with_status(
    description: &str,
    when: NaiveDateTime,
    recurrence: Recurrence,
    done: bool,
    overdue: bool,
) -> Task {
    Task::Real(
        TaskDetails::new(
            description,
            when,
            ["Alex Yeoh"],
            TaskStatus::new(done, overdue),
            recurrence,
        )
        .unwrap(),
    )
}

pub fn assert_sorted(tasks: &[Task]) {
    assert!(
        tasks.windows(2).all(|pair| pair[0].when() <= pair[1].when()),
        "tasks are not sorted by due time: {tasks:?}"
    );
}
