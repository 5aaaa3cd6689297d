//! Blocking dialog contract injected into the controller.
//!
//! # Responsibility
//! - Express the alert/confirm/prompt capability as a trait seam, so real
//!   surfaces and deterministic test fakes are interchangeable.
//!
//! # Invariants
//! - Calls block the current operation until answered; no other operation
//!   interleaves while a dialog is open.

/// Synchronous user-dialog capability.
pub trait Dialogs {
    /// Shows a message requiring acknowledgement only.
    fn alert(&self, message: &str);

    /// Asks a yes/no question; `true` means confirmed.
    fn confirm(&self, message: &str) -> bool;

    /// Asks for a line of text, pre-filled with `default`.
    ///
    /// `None` means the user cancelled; `Some` carries the submitted text
    /// verbatim, which may be empty.
    fn prompt_text(&self, message: &str, default: &str) -> Option<String>;
}

impl<D: Dialogs + ?Sized> Dialogs for &D {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn prompt_text(&self, message: &str, default: &str) -> Option<String> {
        (**self).prompt_text(message, default)
    }
}
