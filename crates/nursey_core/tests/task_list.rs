mod common;

use common::{assert_sorted, at, date, task};
use nursey_core::{Recurrence, TaskError, TaskStatus, UniqueTaskList};

#[test]
fn adding_the_same_task_twice_is_rejected() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);

    list.add(walk.clone()).unwrap();
    let err = list.add(walk.clone()).unwrap_err();

    assert_eq!(err, TaskError::DuplicateTask(walk.identity()));
    assert_eq!(list.len(), 1);
}

#[test]
fn duplicate_detection_ignores_status() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);
    list.add(walk.clone()).unwrap();

    let err = list.add(walk.with_done()).unwrap_err();
    assert!(matches!(err, TaskError::DuplicateTask(_)));
}

#[test]
fn removing_twice_reports_not_found() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);
    list.add(walk.clone()).unwrap();

    assert_eq!(list.remove(&walk).unwrap(), walk);
    assert_eq!(
        list.remove(&walk).unwrap_err(),
        TaskError::TaskNotFound(walk.identity())
    );
}

#[test]
fn iteration_stays_sorted_after_every_mutation() {
    let mut list = UniqueTaskList::new();
    let late = task("Late", at(2021, 10, 3, 8, 0), Recurrence::None);
    let early = task("Early", at(2021, 10, 1, 8, 0), Recurrence::None);
    let middle = task("Middle", at(2021, 10, 2, 8, 0), Recurrence::None);

    list.add(late.clone()).unwrap();
    list.add(early.clone()).unwrap();
    list.add(middle.clone()).unwrap();
    assert_sorted(list.as_slice());
    assert_eq!(list.get(0), Some(&early));

    list.replace(&early, early.with_when(at(2021, 10, 4, 8, 0)))
        .unwrap();
    assert_sorted(list.as_slice());
    assert_eq!(list.get(0), Some(&middle));
    assert_eq!(list.get(2).map(|t| t.description()), Some("Early"));
}

#[test]
fn replace_requires_existing_old_task() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);

    let err = list.replace(&walk, walk.with_done()).unwrap_err();
    assert_eq!(err, TaskError::TaskNotFound(walk.identity()));
}

#[test]
fn replace_rejects_collision_with_another_task() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);
    let bath = task("Bath", at(2021, 10, 1, 9, 0), Recurrence::None);
    list.add(walk.clone()).unwrap();
    list.add(bath.clone()).unwrap();

    let err = list
        .replace(&walk, task("Bath", at(2021, 10, 1, 9, 0), Recurrence::None))
        .unwrap_err();
    assert_eq!(err, TaskError::DuplicateTask(bath.identity()));
    assert!(list.contains(&walk));
}

#[test]
fn replace_with_same_identity_is_allowed() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::None);
    list.add(walk.clone()).unwrap();

    list.replace(&walk, walk.with_done()).unwrap();
    assert_eq!(list.get(0).unwrap().status(), TaskStatus::new(true, false));
}

#[test]
fn mark_helpers_replace_with_updated_copies() {
    let mut list = UniqueTaskList::new();
    let walk = task("Walk", at(2021, 10, 1, 8, 0), Recurrence::Day);
    list.add(walk.clone()).unwrap();

    list.mark_overdue(&walk).unwrap();
    let overdue = list.get(0).unwrap().clone();
    assert!(overdue.status().overdue);

    list.mark_done(&overdue).unwrap();
    let done = list.get(0).unwrap().clone();
    assert_eq!(done.status(), TaskStatus::new(true, true));

    list.roll_recurring(&done, at(2021, 10, 3, 12, 0)).unwrap();
    let rolled = list.get(0).unwrap();
    assert_eq!(rolled.when(), at(2021, 10, 4, 8, 0));
    assert_eq!(rolled.status(), TaskStatus::default());

    assert!(list.mark_not_overdue(&walk).is_err());
}

#[test]
fn ghosts_may_share_payload_with_real_task_and_are_purged() {
    let mut list = UniqueTaskList::new();
    let weekly = task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week);
    list.add(weekly.clone()).unwrap();
    list.add(weekly.as_ghost_on(date(2021, 10, 7))).unwrap();
    list.add(weekly.as_ghost_on(date(2021, 10, 14))).unwrap();

    assert_eq!(list.len(), 3);
    assert_eq!(list.real_only_view().count(), 1);

    assert_eq!(list.purge_ghosts(), 2);
    assert_eq!(list.as_slice(), &[weekly]);
}

#[test]
fn real_task_cannot_duplicate_a_real_one_even_after_ghosts() {
    let mut list = UniqueTaskList::new();
    let weekly = task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week);
    let ghost = weekly.as_ghost_on(date(2021, 10, 7));
    list.add(ghost.clone()).unwrap();

    assert!(list.contains_identity(&ghost.identity()));
    list.add(ghost.clone().into_real()).unwrap();
    assert!(list.add(ghost.into_real()).is_err());
}

#[test]
fn try_from_tasks_sorts_and_rejects_duplicates() {
    let walk = task("Walk", at(2021, 10, 2, 8, 0), Recurrence::None);
    let bath = task("Bath", at(2021, 10, 1, 8, 0), Recurrence::None);

    let list = UniqueTaskList::try_from_tasks([walk.clone(), bath.clone()]).unwrap();
    assert_eq!(list.as_slice(), &[bath, walk.clone()]);

    assert!(UniqueTaskList::try_from_tasks([walk.clone(), walk]).is_err());
}
