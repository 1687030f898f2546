//! Ordered, duplicate-rejecting task collection.
//!
//! # Responsibility
//! - Own the live task sequence for one book.
//! - Reject real tasks that collide on `TaskIdentity`.
//! - Keep iteration order ascending by due date/time after every mutation.
//!
//! # Invariants
//! - No two real tasks share a `TaskIdentity`.
//! - Tasks are sorted by `when`; ties keep insertion order.
//! - Every state change is a whole-value replace of one element.

use crate::model::task::{Task, TaskIdentity};
use chrono::NaiveDateTime;
use log::debug;
use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

/// Collection-level task errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task already exists: {0}")]
    DuplicateTask(TaskIdentity),
    #[error("task not found: {0}")]
    TaskNotFound(TaskIdentity),
}

/// Sorted task collection shared by real and ghost tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTaskList {
    tasks: Vec<Task>,
}

impl UniqueTaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from loaded tasks, rejecting duplicates.
    pub fn try_from_tasks(tasks: impl IntoIterator<Item = Task>) -> TaskResult<Self> {
        let mut list = Self::new();
        for task in tasks {
            list.push_checked(task)?;
        }
        list.resort();
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn contains(&self, task: &Task) -> bool {
        self.tasks.contains(task)
    }

    /// Returns whether any task, real or ghost, carries `identity`.
    pub fn contains_identity(&self, identity: &TaskIdentity) -> bool {
        self.tasks.iter().any(|task| &task.identity() == identity)
    }

    /// Read-only view of persisted tasks. Ghost tasks never appear here.
    pub fn real_only_view(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(|task| task.is_real())
    }

    /// Inserts `task` and restores due-time order.
    ///
    /// # Errors
    /// - `DuplicateTask` when a real task with the same identity exists.
    pub fn add(&mut self, task: Task) -> TaskResult<()> {
        self.push_checked(task)?;
        self.resort();
        Ok(())
    }

    /// Swaps `old` for `new` and restores due-time order.
    ///
    /// # Errors
    /// - `TaskNotFound` when `old` is absent.
    /// - `DuplicateTask` when `new` collides with a real task other than `old`.
    pub fn replace(&mut self, old: &Task, new: Task) -> TaskResult<()> {
        let index = self.position_of(old)?;
        let identity = new.identity();
        let collides = self
            .tasks
            .iter()
            .enumerate()
            .any(|(i, task)| i != index && task.is_real() && task.identity() == identity);
        if collides {
            return Err(TaskError::DuplicateTask(identity));
        }

        debug!(
            "event=task_replace module=task_list status=ok ghost={}",
            new.is_ghost()
        );
        self.tasks[index] = new;
        self.resort();
        Ok(())
    }

    /// Removes `task`.
    ///
    /// # Errors
    /// - `TaskNotFound` when `task` is absent.
    pub fn remove(&mut self, task: &Task) -> TaskResult<Task> {
        let index = self.position_of(task)?;
        Ok(self.tasks.remove(index))
    }

    pub fn mark_done(&mut self, task: &Task) -> TaskResult<()> {
        self.replace(task, task.with_done())
    }

    pub fn mark_overdue(&mut self, task: &Task) -> TaskResult<()> {
        self.replace(task, task.with_overdue(true))
    }

    pub fn mark_not_overdue(&mut self, task: &Task) -> TaskResult<()> {
        self.replace(task, task.with_overdue(false))
    }

    /// Replaces `task` with its next occurrence strictly after `now`.
    pub fn roll_recurring(&mut self, task: &Task, now: NaiveDateTime) -> TaskResult<()> {
        self.replace(task, task.rolled_forward(now))
    }

    /// Removes every ghost task and returns how many were dropped.
    pub fn purge_ghosts(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_real);
        before - self.tasks.len()
    }

    /// Restores ascending due-time order. Stable, so equal times keep their
    /// relative order.
    pub fn resort(&mut self) {
        self.tasks.sort_by_key(Task::when);
    }

    fn push_checked(&mut self, task: Task) -> TaskResult<()> {
        let identity = task.identity();
        let collides = self
            .tasks
            .iter()
            .any(|existing| existing.is_real() && existing.identity() == identity);
        if collides {
            return Err(TaskError::DuplicateTask(identity));
        }
        self.tasks.push(task);
        Ok(())
    }

    fn position_of(&self, task: &Task) -> TaskResult<usize> {
        self.tasks
            .iter()
            .position(|existing| existing == task)
            .ok_or_else(|| TaskError::TaskNotFound(task.identity()))
    }
}

impl<'a> IntoIterator for &'a UniqueTaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
