//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `nursey_core` linkage without any UI runtime.
//! - Bootstrap config, logging and storage the way a host application does.
//! - Walk one scripted command cycle against the wall clock and persist it.
//!
//! Usage: `nursey_cli [config.toml]`. Without a config file the defaults
//! apply: no file logging and an in-memory database.

use chrono::{Duration, Local, NaiveDateTime};
use nursey_core::db::{open_db, open_db_in_memory};
use nursey_core::{
    init_logging, BookRepository, BookService, CommandOutcome, CoreConfig, Recurrence, Resident,
    SqliteBookRepository, Task,
};

const DEMO_RESIDENT: &str = "Alex Yeoh";
const DEMO_TASK: &str = "Give medication";

fn main() {
    println!("nursey_core ping={}", nursey_core::ping());
    println!("nursey_core version={}", nursey_core::core_version());

    if let Err(err) = run() {
        eprintln!("nursey_cli failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let mut conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let mut repo = SqliteBookRepository::try_new(&mut conn)?;
    let mut service = BookService::with_config(repo.load_book()?, &config);

    run_cycle(&mut service, Local::now().naive_local())?;

    repo.save_book(service.book())?;
    println!(
        "saved residents={} tasks={}",
        service.residents().len(),
        service.real_tasks().count()
    );
    Ok(())
}

fn run_cycle(
    service: &mut BookService,
    now: NaiveDateTime,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = service.synchronize(now);
    println!(
        "sync rolled={} overdue={} purged={}",
        report.rolled_forward, report.marked_overdue, report.ghosts_purged
    );

    if !service.book().has_resident(DEMO_RESIDENT) {
        service.add_resident(Resident::new(DEMO_RESIDENT)?)?;
        service.synchronize(now);
        service.commit(CommandOutcome::new(format!("New resident added: {DEMO_RESIDENT}")));
    }

    if !service.real_tasks().any(|task| task.description() == DEMO_TASK) {
        let task = Task::real(
            DEMO_TASK,
            now - Duration::days(2),
            [DEMO_RESIDENT],
            Recurrence::Day,
        )?;
        service.add_real_task(task)?;
        service.synchronize(now);
        service.commit(CommandOutcome::new(format!("New task added: {DEMO_TASK}")));
    }

    let next_week = (now + Duration::days(7)).date();
    service.project_for_date(next_week, now);
    for task in service.tasks_on(next_week) {
        println!("{next_week}: {task}");
    }
    service.purge_ghosts();

    if service.can_undo() {
        let undone = service.undo()?;
        println!("undid: {}", undone.feedback());
        let redone = service.redo()?;
        println!("redid: {}", redone.feedback());
    }
    Ok(())
}
