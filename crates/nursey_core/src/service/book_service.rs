//! Book use-case service.
//!
//! # Responsibility
//! - Expose the per-command operations the external command layer drives:
//!   mutate, synchronize, then commit.
//! - Keep queries read-only and notify registered listeners of changes.
//!
//! # Invariants
//! - Only `synchronize` and the explicit mutators change the live book.
//! - One command cycle is mutate -> `synchronize(now)` -> `commit(outcome)`.
//!   Callers that share a service across threads must hold one writer lock
//!   over that whole sequence.

use crate::config::CoreConfig;
use crate::history::{BookState, CommandOutcome, HistoryResult, VersionedBook};
use crate::model::book::NurseyBook;
use crate::model::resident::{Resident, ResidentError};
use crate::model::task::Task;
use crate::model::task_list::TaskResult;
use crate::schedule::{project_for_date, synchronize, ProjectionHorizon, SyncReport};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

/// Change notifications for UI collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    TasksChanged,
    ResidentsChanged,
    Committed { cursor: usize },
    Undone { outcome: CommandOutcome },
    Redone { outcome: CommandOutcome },
}

type Listener = Box<dyn FnMut(&BookEvent)>;

/// Model-layer façade owning the versioned book.
pub struct BookService {
    history: VersionedBook,
    horizon: ProjectionHorizon,
    listeners: Vec<Listener>,
}

impl BookService {
    /// Seeds history with `initial` using default configuration.
    pub fn new(initial: NurseyBook) -> Self {
        Self::with_config(initial, &CoreConfig::default())
    }

    pub fn with_config(initial: NurseyBook, config: &CoreConfig) -> Self {
        Self {
            history: VersionedBook::new(initial),
            horizon: config.projection_horizon(),
            listeners: Vec::new(),
        }
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&BookEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn book(&self) -> &NurseyBook {
        self.history.book()
    }

    /// Live tasks, sorted by due time, including any projected ghosts.
    pub fn tasks(&self) -> &[Task] {
        self.history.book().tasks().as_slice()
    }

    pub fn real_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.history.book().tasks().real_only_view()
    }

    /// Tasks matching `predicate`, in due-time order.
    pub fn filtered_tasks<'a>(
        &'a self,
        predicate: impl Fn(&Task) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks().iter().filter(move |task| predicate(*task))
    }

    /// Tasks, real or ghost, due on `date`.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.filtered_tasks(move |task| task.date() == date).collect()
    }

    pub fn residents(&self) -> &[Resident] {
        self.history.book().residents()
    }

    pub fn history(&self) -> &VersionedBook {
        &self.history
    }

    /// Number of committed states, including the seed.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn add_real_task(&mut self, task: Task) -> TaskResult<()> {
        self.history.book_mut().tasks_mut().add(task.into_real())?;
        debug!("event=task_add module=service status=ok");
        self.notify(BookEvent::TasksChanged);
        Ok(())
    }

    pub fn remove_task(&mut self, task: &Task) -> TaskResult<Task> {
        let removed = self.history.book_mut().tasks_mut().remove(task)?;
        debug!("event=task_remove module=service status=ok");
        self.notify(BookEvent::TasksChanged);
        Ok(removed)
    }

    pub fn replace_task(&mut self, old: &Task, new: Task) -> TaskResult<()> {
        self.history.book_mut().tasks_mut().replace(old, new)?;
        debug!("event=task_replace module=service status=ok");
        self.notify(BookEvent::TasksChanged);
        Ok(())
    }

    pub fn mark_done(&mut self, task: &Task) -> TaskResult<()> {
        self.history.book_mut().tasks_mut().mark_done(task)?;
        debug!("event=task_done module=service status=ok");
        self.notify(BookEvent::TasksChanged);
        Ok(())
    }

    pub fn purge_ghosts(&mut self) -> usize {
        let purged = self.history.book_mut().tasks_mut().purge_ghosts();
        if purged > 0 {
            self.notify(BookEvent::TasksChanged);
        }
        purged
    }

    /// Projects ghost occurrences onto `date` for a schedule preview.
    pub fn project_for_date(&mut self, date: NaiveDate, now: NaiveDateTime) -> usize {
        let horizon = self.horizon;
        let inserted = project_for_date(self.history.book_mut().tasks_mut(), date, now, horizon);
        if inserted > 0 {
            self.notify(BookEvent::TasksChanged);
        }
        inserted
    }

    /// Runs the once-per-command time synchronization pass.
    pub fn synchronize(&mut self, now: NaiveDateTime) -> SyncReport {
        let report = synchronize(self.history.book_mut().tasks_mut(), now);
        if report.changed() {
            self.notify(BookEvent::TasksChanged);
        }
        report
    }

    pub fn add_resident(&mut self, resident: Resident) -> Result<(), ResidentError> {
        self.history.book_mut().add_resident(resident)?;
        self.notify(BookEvent::ResidentsChanged);
        Ok(())
    }

    /// Removes a resident and unlinks the name from every task.
    pub fn remove_resident(&mut self, name: &str) -> Result<Resident, ResidentError> {
        let removed = self.history.book_mut().remove_resident(name)?;
        self.notify(BookEvent::ResidentsChanged);
        self.notify(BookEvent::TasksChanged);
        Ok(removed)
    }

    /// Commits the live book with `outcome` and returns the new state.
    pub fn commit(&mut self, outcome: CommandOutcome) -> &BookState {
        self.history.commit(outcome);
        let cursor = self.history.cursor();
        self.notify(BookEvent::Committed { cursor });
        self.history.current_state()
    }

    /// Restores the previous snapshot; returns the outcome that was undone.
    pub fn undo(&mut self) -> HistoryResult<CommandOutcome> {
        let outcome = self.history.undo()?;
        self.notify(BookEvent::Undone {
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Restores the next snapshot; returns its outcome.
    pub fn redo(&mut self) -> HistoryResult<CommandOutcome> {
        let outcome = self.history.redo()?;
        self.notify(BookEvent::Redone {
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn notify(&mut self, event: BookEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
