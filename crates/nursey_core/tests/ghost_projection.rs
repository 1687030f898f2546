mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{assert_sorted, at, date, task};
use nursey_core::{project_for_date, ProjectionHorizon, Recurrence, UniqueTaskList};

fn list_of(tasks: impl IntoIterator<Item = nursey_core::Task>) -> UniqueTaskList {
    UniqueTaskList::try_from_tasks(tasks).unwrap()
}

fn project_default(list: &mut UniqueTaskList, key: NaiveDate, now: NaiveDateTime) -> usize {
    project_for_date(list, key, now, ProjectionHorizon::default())
}

#[test]
fn weekly_task_projects_one_ghost_on_the_key_date() {
    let weekly = task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week);
    let mut list = list_of([weekly.clone()]);
    let now = at(2021, 10, 1, 10, 0);

    let inserted = project_default(&mut list, date(2021, 10, 7), now);

    assert_eq!(inserted, 1);
    let ghosts = list.iter().filter(|t| t.is_ghost()).collect::<Vec<_>>();
    assert_eq!(ghosts.len(), 1);
    assert_eq!(ghosts[0].when(), at(2021, 10, 7, 8, 0));
    assert_eq!(ghosts[0].description(), "Walk");
    assert_sorted(list.as_slice());
}

#[test]
fn repeated_projection_does_not_duplicate_and_purge_allows_reprojection() {
    let weekly = task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week);
    let mut list = list_of([weekly]);
    let now = at(2021, 10, 1, 10, 0);
    let key = date(2021, 10, 7);

    assert_eq!(project_default(&mut list, key, now), 1);
    assert_eq!(project_default(&mut list, key, now), 0);
    assert_eq!(list.len(), 2);

    list.purge_ghosts();
    assert_eq!(project_default(&mut list, key, now), 1);
    assert_eq!(list.len(), 2);
}

#[test]
fn every_inserted_ghost_lands_on_the_key_date() {
    let mut list = list_of([
        task("Daily", at(2021, 10, 1, 7, 0), Recurrence::Day),
        task("Weekly", at(2021, 9, 24, 9, 0), Recurrence::Week),
        task("Monthly", at(2021, 9, 3, 11, 0), Recurrence::Month),
        task("Once", at(2021, 10, 1, 12, 0), Recurrence::None),
    ]);
    let key = date(2021, 10, 29);

    let inserted = project_default(&mut list, key, at(2021, 10, 1, 6, 0));

    assert_eq!(inserted, 3);
    assert!(list.iter().filter(|t| t.is_ghost()).all(|t| t.date() == key));
    assert_eq!(list.real_only_view().count(), 4);
}

#[test]
fn one_off_tasks_and_anchor_dates_are_never_projected() {
    let mut list = list_of([
        task("Once", at(2021, 10, 7, 8, 0), Recurrence::None),
        task("Weekly", at(2021, 10, 7, 9, 0), Recurrence::Week),
    ]);
    let now = at(2021, 10, 1, 10, 0);

    assert_eq!(project_default(&mut list, date(2021, 10, 7), now), 0);
    assert_eq!(project_default(&mut list, date(2021, 9, 30), now), 0);
}

#[test]
fn horizon_bounds_the_last_candidate_per_stride() {
    let now = at(2021, 10, 1, 9, 0);
    let horizon = ProjectionHorizon::default();

    let mut daily = list_of([task("Daily", at(2021, 10, 1, 8, 0), Recurrence::Day)]);
    assert_eq!(project_for_date(&mut daily, date(2021, 12, 23), now, horizon), 1);
    assert_eq!(project_for_date(&mut daily, date(2021, 12, 24), now, horizon), 0);

    let mut weekly = list_of([task("Weekly", at(2021, 10, 1, 8, 0), Recurrence::Week)]);
    assert_eq!(project_for_date(&mut weekly, date(2021, 12, 17), now, horizon), 1);
    assert_eq!(project_for_date(&mut weekly, date(2021, 12, 24), now, horizon), 0);

    let mut monthly = list_of([task("Monthly", at(2021, 10, 1, 8, 0), Recurrence::Month)]);
    assert_eq!(project_for_date(&mut monthly, date(2021, 11, 26), now, horizon), 1);
    assert_eq!(project_for_date(&mut monthly, date(2021, 12, 24), now, horizon), 0);
}

#[test]
fn shorter_horizon_is_honored() {
    let now = at(2021, 10, 1, 9, 0);
    let mut weekly = list_of([task("Weekly", at(2021, 10, 1, 8, 0), Recurrence::Week)]);

    let horizon = ProjectionHorizon::from_days(28);
    assert_eq!(project_for_date(&mut weekly, date(2021, 10, 29), now, horizon), 0);
    assert_eq!(project_for_date(&mut weekly, date(2021, 10, 22), now, horizon), 1);
}

#[test]
fn stale_anchor_still_projects_onto_cadence() {
    let mut list = list_of([task("Weekly", at(2021, 9, 2, 8, 0), Recurrence::Week)]);
    let inserted = project_for_date(
        &mut list,
        date(2021, 10, 7),
        at(2021, 10, 1, 10, 0),
        ProjectionHorizon::default(),
    );
    assert_eq!(inserted, 1);
}

#[test]
fn existing_real_task_with_same_identity_blocks_the_ghost() {
    let mut list = list_of([
        task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week),
        task("Walk", at(2021, 10, 7, 8, 0), Recurrence::None),
    ]);

    let inserted = project_for_date(
        &mut list,
        date(2021, 10, 7),
        at(2021, 10, 1, 10, 0),
        ProjectionHorizon::default(),
    );
    assert_eq!(inserted, 0);
    assert_eq!(list.len(), 2);
}

#[test]
fn ghosts_are_not_sources_for_further_projection() {
    let mut list = list_of([task("Walk", at(2021, 9, 30, 8, 0), Recurrence::Week)]);
    let now = at(2021, 10, 1, 10, 0);

    project_default(&mut list, date(2021, 10, 7), now);
    let inserted = project_default(&mut list, date(2021, 10, 14), now);

    assert_eq!(inserted, 1);
    assert_eq!(list.iter().filter(|t| t.is_ghost()).count(), 2);
}

#[test]
fn tasks_at_the_end_of_the_calendar_project_nothing() {
    let last_day = NaiveDate::MAX.and_hms_opt(8, 0, 0).unwrap();
    let mut list = list_of([task("Walk", last_day, Recurrence::Week)]);

    let inserted = project_default(&mut list, date(2021, 10, 8), at(2021, 10, 1, 10, 0));

    assert_eq!(inserted, 0);
    assert_eq!(list.len(), 1);
}

#[test]
fn oversized_horizon_projects_nothing() {
    let mut list = list_of([task("Walk", at(2021, 10, 1, 8, 0), Recurrence::Week)]);

    let inserted = project_for_date(
        &mut list,
        date(2021, 10, 8),
        at(2021, 10, 1, 10, 0),
        ProjectionHorizon::from_days(i64::MAX),
    );

    assert_eq!(inserted, 0);
}
