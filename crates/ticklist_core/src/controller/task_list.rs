//! Task-list controller.
//!
//! # Responsibility
//! - Provide the add/toggle/edit/delete/clear/filter operations.
//! - Keep the persisted snapshot a pure projection of the canonical list.
//!
//! # Invariants
//! - Every successful mutation re-serializes the full list and overwrites
//!   the storage slot (last-writer-wins, no incremental writes).
//! - `persist` covers all tasks, hidden rows included; `restore` resets the
//!   filter to `ShowAll` and makes every row visible.
//! - A rejected or cancelled operation leaves list and storage untouched.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::dialog::Dialogs;
use crate::fragment::{self, FragmentError};
use crate::model::filter::FilterMode;
use crate::model::task::{Task, TaskDraftError};
use crate::repo::slot_repo::{SlotStoreError, SnapshotStore};
use crate::view::{self, RowView};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ADD_EMPTY_ALERT: &str = "Please enter a task";
const DELETE_CONFIRM: &str = "Are you sure you want to delete this task?";
const EDIT_PROMPT: &str = "Edit task:";

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Error family for controller operations.
#[derive(Debug)]
pub enum ControllerError {
    /// Add input trimmed to the empty string; the user has been alerted.
    EmptyText,
    /// Positional addressing outside the current list.
    IndexOutOfRange { index: usize, len: usize },
    Store(SlotStoreError),
    Snapshot(FragmentError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text is empty after trimming"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "no task at position {index} (list has {len})")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SlotStoreError> for ControllerError {
    fn from(value: SlotStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<FragmentError> for ControllerError {
    fn from(value: FragmentError) -> Self {
        Self::Snapshot(value)
    }
}

/// Owner of the canonical task list and its projections.
///
/// Constructed once per list with its storage slot and dialog surface;
/// separate instances are fully isolated.
pub struct TaskListController<S: SnapshotStore, D: Dialogs> {
    store: S,
    dialogs: D,
    tasks: Vec<Task>,
    filter: FilterMode,
}

impl<S: SnapshotStore, D: Dialogs> TaskListController<S, D> {
    /// Creates an empty controller. Call `restore` to load persisted state.
    pub fn new(store: S, dialogs: D) -> Self {
        Self {
            store,
            dialogs,
            tasks: Vec::new(),
            filter: FilterMode::ShowAll,
        }
    }

    /// Adds a task from raw input at the head of the list.
    ///
    /// Empty-after-trim input raises one alert through the dialog surface
    /// and fails with `EmptyText`, leaving list and storage unchanged. On
    /// success the caller should clear its input field.
    pub fn add(&mut self, raw_text: &str) -> ControllerResult<()> {
        let task = match Task::new(raw_text) {
            Ok(task) => task,
            Err(TaskDraftError::EmptyText) => {
                self.dialogs.alert(ADD_EMPTY_ALERT);
                return Err(ControllerError::EmptyText);
            }
        };

        self.tasks.insert(0, task);
        self.persist()?;
        info!(
            "event=task_add module=controller status=ok list_len={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Flips the completion flag of the task at `index`.
    ///
    /// Never touches hidden state: under `HideCompleted` a freshly completed
    /// task stays visible until the next filter pass.
    pub fn toggle_completed(&mut self, index: usize) -> ControllerResult<()> {
        self.task_mut(index)?.toggle_completed();
        self.persist()
    }

    /// Edits the task at `index` through the text prompt dialog.
    ///
    /// Returns `false` when the user cancelled (no change, nothing
    /// persisted). Submitted text is applied verbatim, empty included.
    pub fn edit(&mut self, index: usize) -> ControllerResult<bool> {
        let current = self.task(index)?.text.clone();
        let Some(replacement) = self.dialogs.prompt_text(EDIT_PROMPT, &current) else {
            return Ok(false);
        };

        self.task_mut(index)?.replace_text(replacement);
        self.persist()?;
        Ok(true)
    }

    /// Deletes the task at `index` after confirmation.
    ///
    /// Returns `false` when the user declined (no change, nothing
    /// persisted).
    pub fn delete(&mut self, index: usize) -> ControllerResult<bool> {
        self.task(index)?;
        if !self.dialogs.confirm(DELETE_CONFIRM) {
            return Ok(false);
        }

        self.tasks.remove(index);
        self.persist()?;
        info!(
            "event=task_delete module=controller status=ok list_len={}",
            self.tasks.len()
        );
        Ok(true)
    }

    /// Removes every completed task, hidden or not, without confirmation.
    ///
    /// Returns how many tasks were removed.
    pub fn clear_completed(&mut self) -> ControllerResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        self.persist()?;
        if removed > 0 {
            info!("event=tasks_cleared module=controller status=ok removed={removed}");
        }
        Ok(removed)
    }

    /// Applies a filter pass under the given mode.
    ///
    /// `HideCompleted` hides every currently completed task; `ShowAll` makes
    /// every task visible again. Rows are marked, never removed.
    pub fn set_filter(&mut self, mode: FilterMode) -> ControllerResult<()> {
        self.filter = mode;
        let hide = mode.hides_completed();
        for task in &mut self.tasks {
            task.hidden = hide && task.completed;
        }
        self.persist()
    }

    /// Toggles the filter mode and runs a filter pass; returns the new mode.
    pub fn toggle_filter(&mut self) -> ControllerResult<FilterMode> {
        let next = self.filter.toggled();
        self.set_filter(next)?;
        Ok(next)
    }

    /// Serializes the full list and overwrites the storage slot.
    pub fn persist(&self) -> ControllerResult<()> {
        let payload = fragment::serialize_tasks(&self.tasks);
        self.store.save(&payload)?;
        Ok(())
    }

    /// Replaces in-memory state with the persisted snapshot.
    ///
    /// An absent slot yields an empty list. Restored rows are all visible
    /// and the filter resets to `ShowAll`; every row operation works on
    /// restored rows exactly as on fresh ones.
    pub fn restore(&mut self) -> ControllerResult<()> {
        self.tasks = match self.store.load()? {
            Some(payload) => fragment::parse_tasks(&payload)?,
            None => Vec::new(),
        };
        self.filter = FilterMode::ShowAll;
        info!(
            "event=list_restore module=controller status=ok list_len={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Current filter mode.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Canonical ordered task slice.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Projects every row, hidden included.
    pub fn rows(&self) -> Vec<RowView> {
        view::project(&self.tasks)
    }

    /// Projects the rows a surface should display.
    pub fn visible_rows(&self) -> Vec<RowView> {
        view::project_visible(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn task(&self, index: usize) -> ControllerResult<&Task> {
        self.tasks
            .get(index)
            .ok_or(ControllerError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }

    fn task_mut(&mut self, index: usize) -> ControllerResult<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(ControllerError::IndexOutOfRange { index, len })
    }
}
