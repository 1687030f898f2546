//! Versioned book store.
//!
//! # Responsibility
//! - Hold the live book plus a linear list of committed snapshots.
//! - Move a cursor over that list for undo/redo.
//!
//! # Invariants
//! - `states` is never empty; index 0 holds the initial book with the
//!   sentinel "initialised" outcome.
//! - `cursor` always lies in `[0, states.len() - 1]`.
//! - Committing after an undo discards every state after the cursor.
//! - Snapshots never contain ghost tasks.

use crate::model::book::NurseyBook;
use log::info;
use thiserror::Error;
use uuid::Uuid;

pub type HistoryResult<T> = Result<T, HistoryError>;

/// History boundary conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("no more commands to undo")]
    NoUndoableState,
    #[error("no more commands to redo")]
    NoRedoableState,
}

const INITIALISED_FEEDBACK: &str = "initialised";

/// Result of the command that produced a snapshot, kept for "undid: X"
/// style messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    feedback: String,
    initial: bool,
}

impl CommandOutcome {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            initial: false,
        }
    }

    /// Sentinel outcome of the seed state.
    pub fn initialised() -> Self {
        Self {
            feedback: INITIALISED_FEEDBACK.to_string(),
            initial: true,
        }
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }
}

/// Immutable pair of a full book snapshot and the outcome that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookState {
    id: Uuid,
    book: NurseyBook,
    outcome: CommandOutcome,
}

impl BookState {
    fn new(book: NurseyBook, outcome: CommandOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            book,
            outcome,
        }
    }

    /// Stable id of this snapshot, for change detection by callers.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn book(&self) -> &NurseyBook {
        &self.book
    }

    pub fn outcome(&self) -> &CommandOutcome {
        &self.outcome
    }
}

/// Live book with linear, truncate-on-branch history.
#[derive(Debug, Clone)]
pub struct VersionedBook {
    live: NurseyBook,
    states: Vec<BookState>,
    cursor: usize,
}

impl VersionedBook {
    /// Seeds history with `initial` as state 0.
    pub fn new(initial: NurseyBook) -> Self {
        let seed = BookState::new(initial.without_ghosts(), CommandOutcome::initialised());
        Self {
            live: initial,
            states: vec![seed],
            cursor: 0,
        }
    }

    pub fn book(&self) -> &NurseyBook {
        &self.live
    }

    pub fn book_mut(&mut self) -> &mut NurseyBook {
        &mut self.live
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the seed state cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn current_state(&self) -> &BookState {
        &self.states[self.cursor]
    }

    pub fn states(&self) -> &[BookState] {
        &self.states
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Snapshots the live book (minus ghosts) with `outcome` and makes it
    /// the current state. Redo history past the cursor is discarded.
    pub fn commit(&mut self, outcome: CommandOutcome) -> &BookState {
        let discarded = self.states.len() - (self.cursor + 1);
        self.states.truncate(self.cursor + 1);
        self.states.push(BookState::new(self.live.without_ghosts(), outcome));
        self.cursor += 1;

        info!(
            "event=history_commit module=history status=ok cursor={} len={} discarded={}",
            self.cursor,
            self.states.len(),
            discarded
        );
        &self.states[self.cursor]
    }

    /// Restores the previous snapshot and returns the outcome of the state
    /// that was left.
    ///
    /// # Errors
    /// - `NoUndoableState` when the cursor is at the seed state.
    pub fn undo(&mut self) -> HistoryResult<CommandOutcome> {
        if !self.can_undo() {
            return Err(HistoryError::NoUndoableState);
        }
        let undone = self.states[self.cursor].outcome.clone();
        self.cursor -= 1;
        self.live = self.states[self.cursor].book.clone();

        info!(
            "event=history_undo module=history status=ok cursor={} len={}",
            self.cursor,
            self.states.len()
        );
        Ok(undone)
    }

    /// Restores the next snapshot and returns its outcome.
    ///
    /// # Errors
    /// - `NoRedoableState` when the cursor is at the newest state.
    pub fn redo(&mut self) -> HistoryResult<CommandOutcome> {
        if !self.can_redo() {
            return Err(HistoryError::NoRedoableState);
        }
        self.cursor += 1;
        self.live = self.states[self.cursor].book.clone();

        info!(
            "event=history_redo module=history status=ok cursor={} len={}",
            self.cursor,
            self.states.len()
        );
        Ok(self.states[self.cursor].outcome.clone())
    }
}
