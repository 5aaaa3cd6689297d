//! Filter mode for the completed-task view toggle.
//!
//! Process-wide and never persisted: restore always lands on `ShowAll`.

/// Visibility policy applied by filter passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every task is shown.
    #[default]
    ShowAll,
    /// Completed tasks are marked hidden on the next filter pass.
    HideCompleted,
}

impl FilterMode {
    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::ShowAll => Self::HideCompleted,
            Self::HideCompleted => Self::ShowAll,
        }
    }

    /// Returns whether completed tasks should be hidden under this mode.
    pub fn hides_completed(self) -> bool {
        matches!(self, Self::HideCompleted)
    }

    /// Label for a toggle button: names the action the toggle would perform.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::ShowAll => "Hide Completed",
            Self::HideCompleted => "Show Completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FilterMode;

    #[test]
    fn toggled_flips_between_both_modes() {
        assert_eq!(FilterMode::ShowAll.toggled(), FilterMode::HideCompleted);
        assert_eq!(FilterMode::HideCompleted.toggled(), FilterMode::ShowAll);
    }

    #[test]
    fn button_label_encodes_the_pending_action() {
        assert_eq!(FilterMode::ShowAll.button_label(), "Hide Completed");
        assert_eq!(FilterMode::HideCompleted.button_label(), "Show Completed");
    }
}
