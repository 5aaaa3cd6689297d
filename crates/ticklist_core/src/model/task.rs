//! Task domain model.
//!
//! # Responsibility
//! - Define the task record owned by the list controller.
//! - Enforce the creation-time text invariant.
//!
//! # Invariants
//! - `text` is trimmed and non-empty at creation; edits replace text
//!   verbatim and may violate this afterwards.
//! - `hidden` is view state: filter passes are the only writers, and it is
//!   excluded from the serialized model shape.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection of raw add input that fails the text invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDraftError {
    /// Input was empty or whitespace-only after trimming.
    EmptyText,
}

impl Display for TaskDraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text is empty after trimming"),
        }
    }
}

impl Error for TaskDraftError {}

/// One entry of the ordered task list.
///
/// Identity is positional: the list index is the only way to address a task,
/// so records deliberately carry no id field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text. Trimmed and non-empty when created through `new`.
    pub text: String,
    /// Completion flag toggled by row interaction.
    pub completed: bool,
    /// View-only visibility state maintained by filter passes.
    #[serde(skip)]
    pub hidden: bool,
}

impl Task {
    /// Creates a task from raw user input.
    ///
    /// # Invariants
    /// - The stored text is the trimmed input.
    /// - Rejects input that trims to the empty string.
    /// - New tasks start not completed and visible.
    pub fn new(raw_text: &str) -> Result<Self, TaskDraftError> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(TaskDraftError::EmptyText);
        }
        Ok(Self {
            text: trimmed.to_string(),
            completed: false,
            hidden: false,
        })
    }

    /// Reconstructs a task from persisted snapshot data.
    ///
    /// Snapshot rows are accepted verbatim: a previously edited row may hold
    /// empty text, and the text invariant applies at creation only.
    pub fn restored(text: impl Into<String>, completed: bool) -> Self {
        Self {
            text: text.into(),
            completed,
            hidden: false,
        }
    }

    /// Replaces the text verbatim. Edit semantics do not re-validate.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Flips the completion flag. Does not touch `hidden`.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task is currently shown by projections.
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskDraftError};

    #[test]
    fn new_trims_input_and_starts_visible() {
        let task = Task::new("  Buy milk  ").unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.is_visible());
    }

    #[test]
    fn new_rejects_whitespace_only_input() {
        assert_eq!(Task::new("   ").unwrap_err(), TaskDraftError::EmptyText);
        assert_eq!(Task::new("").unwrap_err(), TaskDraftError::EmptyText);
    }

    #[test]
    fn replace_text_accepts_empty_verbatim() {
        let mut task = Task::new("draft").unwrap();
        task.replace_text("");
        assert_eq!(task.text, "");
    }

    #[test]
    fn serialized_shape_excludes_view_state() {
        let mut task = Task::new("Buy milk").unwrap();
        task.hidden = true;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Buy milk", "completed": false })
        );
    }
}
