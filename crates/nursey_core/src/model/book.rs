//! Full data set: resident roster plus task collection.
//!
//! # Invariants
//! - Resident names are unique ignoring ASCII case.
//! - Removing a resident leaves no task referencing that name.

use crate::model::resident::{Resident, ResidentError};
use crate::model::task::Task;
use crate::model::task_list::{TaskError, UniqueTaskList};
use log::warn;

/// One complete snapshot-able data set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NurseyBook {
    residents: Vec<Resident>,
    tasks: UniqueTaskList,
}

impl NurseyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from loaded parts, rejecting duplicate residents.
    pub fn from_parts(
        residents: impl IntoIterator<Item = Resident>,
        tasks: UniqueTaskList,
    ) -> Result<Self, ResidentError> {
        let mut book = Self {
            residents: Vec::new(),
            tasks,
        };
        for resident in residents {
            book.add_resident(resident)?;
        }
        Ok(book)
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn tasks(&self) -> &UniqueTaskList {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut UniqueTaskList {
        &mut self.tasks
    }

    pub fn has_resident(&self, name: &str) -> bool {
        self.residents.iter().any(|resident| resident.has_name(name))
    }

    pub fn add_resident(&mut self, resident: Resident) -> Result<(), ResidentError> {
        if self.has_resident(resident.name()) {
            return Err(ResidentError::DuplicateResident(resident.name().to_string()));
        }
        self.residents.push(resident);
        Ok(())
    }

    /// Removes a resident and strips the name from every task that
    /// references it.
    ///
    /// A stripped task that would collide with another real task is dropped
    /// instead of duplicated.
    pub fn remove_resident(&mut self, name: &str) -> Result<Resident, ResidentError> {
        let index = self
            .residents
            .iter()
            .position(|resident| resident.has_name(name))
            .ok_or_else(|| ResidentError::ResidentNotFound(name.trim().to_string()))?;
        let removed = self.residents.remove(index);

        let referencing = self
            .tasks
            .iter()
            .filter(|task| {
                task.related_names()
                    .iter()
                    .any(|existing| removed.has_name(existing))
            })
            .cloned()
            .collect::<Vec<Task>>();

        for task in referencing {
            let stripped = task.without_name(removed.name());
            match self.tasks.replace(&task, stripped) {
                Ok(()) => {}
                Err(TaskError::DuplicateTask(identity)) => {
                    warn!(
                        "event=resident_remove module=book status=merged task={}",
                        identity
                    );
                    if let Err(err) = self.tasks.remove(&task) {
                        warn!(
                            "event=resident_remove module=book status=error error={}",
                            err
                        );
                    }
                }
                Err(err @ TaskError::TaskNotFound(_)) => {
                    warn!(
                        "event=resident_remove module=book status=error error={}",
                        err
                    );
                }
            }
        }

        Ok(removed)
    }

    /// Copy of this book with every ghost task purged.
    pub fn without_ghosts(&self) -> Self {
        let mut copy = self.clone();
        copy.tasks.purge_ghosts();
        copy
    }
}
