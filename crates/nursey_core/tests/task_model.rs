mod common;

use common::{at, date, task};
use nursey_core::{Recurrence, Task, TaskStatus, TaskValidationError};

#[test]
fn real_task_is_valid_and_fresh_at_construction() {
    let task = Task::real(
        "  Give insulin  ",
        at(2021, 10, 1, 8, 30),
        ["Alex Yeoh", " Bernice Yu "],
        Recurrence::Day,
    )
    .unwrap();

    assert!(task.is_real());
    assert_eq!(task.description(), "Give insulin");
    assert_eq!(task.status(), TaskStatus::default());
    assert_eq!(
        task.related_names().iter().cloned().collect::<Vec<_>>(),
        vec!["Alex Yeoh".to_string(), "Bernice Yu".to_string()]
    );
}

#[test]
fn construction_rejects_blank_description_and_bad_names() {
    let blank = Task::real("   ", at(2021, 10, 1, 8, 0), ["Alex Yeoh"], Recurrence::None);
    assert_eq!(blank.unwrap_err(), TaskValidationError::EmptyDescription);

    let bad_name = Task::real("Walk", at(2021, 10, 1, 8, 0), ["Alex!"], Recurrence::None);
    assert_eq!(
        bad_name.unwrap_err(),
        TaskValidationError::InvalidName("Alex!".to_string())
    );
}

#[test]
fn parse_real_validates_date_time_and_recurrence() {
    let parsed = Task::parse_real("Walk", "2021-10-01", "14:05", ["Alex Yeoh"], "week").unwrap();
    assert_eq!(parsed.when(), at(2021, 10, 1, 14, 5));
    assert_eq!(parsed.recurrence(), Recurrence::Week);

    let no_names: [&str; 0] = [];
    assert_eq!(
        Task::parse_real("Walk", "2021-02-30", "14:05", no_names, "NONE").unwrap_err(),
        TaskValidationError::InvalidDate("2021-02-30".to_string())
    );
    assert_eq!(
        Task::parse_real("Walk", "2021-10-01", "25:00", no_names, "NONE").unwrap_err(),
        TaskValidationError::InvalidTime("25:00".to_string())
    );
    assert_eq!(
        Task::parse_real("Walk", "2021-10-01", "10:00", no_names, "FORTNIGHT").unwrap_err(),
        TaskValidationError::InvalidRecurrence("FORTNIGHT".to_string())
    );
}

#[test]
fn due_time_is_truncated_to_the_minute() {
    let when = at(2021, 10, 1, 8, 30) + chrono::Duration::seconds(42);
    let task = task("Walk", when, Recurrence::None);
    assert_eq!(task.when(), at(2021, 10, 1, 8, 30));
}

#[test]
fn copy_on_write_helpers_leave_the_original_untouched() {
    let original = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);

    let done = original.with_done();
    let overdue = original.with_overdue(true);
    let moved = original.with_when(at(2021, 10, 2, 9, 0));

    assert_eq!(original.status(), TaskStatus::default());
    assert_eq!(done.status(), TaskStatus::new(true, false));
    assert_eq!(overdue.status(), TaskStatus::new(false, true));
    assert_eq!(moved.when(), at(2021, 10, 2, 9, 0));
    assert_eq!(original.when(), at(2021, 10, 1, 8, 0));
}

#[test]
fn done_task_keeps_overdue_flag() {
    let late = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None).with_overdue(true);
    assert_eq!(late.with_done().status(), TaskStatus::new(true, true));
}

#[test]
fn identity_ignores_status_and_recurrence() {
    let base = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);
    let other = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::Week).with_done();

    assert_ne!(base, other);
    assert_eq!(base.identity(), other.identity());
}

#[test]
fn ghost_copy_moves_date_and_keeps_payload() {
    let original = task("Walk", at(2021, 9, 30, 7, 45), Recurrence::Week).with_done();
    let ghost = original.as_ghost_on(date(2021, 10, 7));

    assert!(ghost.is_ghost());
    assert_eq!(ghost.when(), at(2021, 10, 7, 7, 45));
    assert_eq!(ghost.description(), original.description());
    assert_eq!(ghost.related_names(), original.related_names());
    assert_eq!(ghost.status(), original.status());
    assert_eq!(ghost.recurrence(), Recurrence::Week);
    assert!(ghost.clone().into_real().is_real());
}

#[test]
fn without_name_drops_matching_name_ignoring_case() {
    let shared = Task::real(
        "Bath",
        at(2021, 10, 1, 8, 0),
        ["Alex Yeoh", "Bernice Yu"],
        Recurrence::None,
    )
    .unwrap();

    let stripped = shared.without_name("alex yeoh");
    assert_eq!(
        stripped.related_names().iter().cloned().collect::<Vec<_>>(),
        vec!["Bernice Yu".to_string()]
    );
    assert_eq!(shared.related_names().len(), 2);
}

#[test]
fn display_renders_one_line_summary() {
    let rendered = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::Week)
        .with_overdue(true)
        .to_string();
    assert_eq!(
        rendered,
        "Walk on 2021-10-01 08:00 for [Alex Yeoh] every week [overdue]"
    );

    let ghost =
        task("Walk", at(2021, 10, 1, 8, 0), Recurrence::Week).as_ghost_on(date(2021, 10, 8));
    assert!(ghost.to_string().ends_with("(upcoming)"));
}
