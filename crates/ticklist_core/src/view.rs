//! Row projection shared by every rendering path.
//!
//! # Responsibility
//! - Project the canonical task list into positional row view-models.
//!
//! # Invariants
//! - Fresh adds and restored snapshots go through the same projection, so a
//!   restored row is operable exactly like a new one.

use crate::model::task::Task;

/// Read model for one on-screen task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position in the canonical list; the row's only identity.
    pub position: usize,
    pub text: String,
    pub completed: bool,
    pub hidden: bool,
}

/// Projects every task, hidden rows included, in list order.
pub fn project(tasks: &[Task]) -> Vec<RowView> {
    tasks
        .iter()
        .enumerate()
        .map(|(position, task)| RowView {
            position,
            text: task.text.clone(),
            completed: task.completed,
            hidden: task.hidden,
        })
        .collect()
}

/// Projects only the rows a surface should display.
///
/// Positions still index the full canonical list, so row operations keep
/// working while the filter hides rows in between.
pub fn project_visible(tasks: &[Task]) -> Vec<RowView> {
    project(tasks)
        .into_iter()
        .filter(|row| !row.hidden)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{project, project_visible};
    use crate::model::task::Task;

    #[test]
    fn visible_projection_keeps_canonical_positions() {
        let mut first = Task::new("one").unwrap();
        first.completed = true;
        first.hidden = true;
        let tasks = vec![first, Task::new("two").unwrap()];

        let all = project(&tasks);
        assert_eq!(all.len(), 2);

        let visible = project_visible(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].position, 1);
        assert_eq!(visible[0].text, "two");
    }
}
