//! Core task-list logic for TickList.
//! This crate is the single source of truth for list-state invariants.

pub mod controller;
pub mod db;
pub mod dialog;
pub mod fragment;
pub mod logging;
pub mod model;
pub mod repo;
pub mod view;

pub use controller::task_list::{ControllerError, ControllerResult, TaskListController};
pub use dialog::Dialogs;
pub use fragment::{parse_tasks, serialize_tasks, FragmentError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::FilterMode;
pub use model::task::{Task, TaskDraftError};
pub use repo::slot_repo::{
    SlotResult, SlotStoreError, SnapshotStore, SqliteSnapshotStore, DEFAULT_SLOT_KEY,
};
pub use view::{project, project_visible, RowView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
