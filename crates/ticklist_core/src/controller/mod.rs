//! Controller layer orchestrating list state, dialogs and persistence.
//!
//! # Responsibility
//! - Own the canonical task sequence and the filter mode.
//! - Run each user operation to completion: mutate, then re-persist.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod task_list;
