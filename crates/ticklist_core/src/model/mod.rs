//! Canonical task-list data model.
//!
//! # Responsibility
//! - Define the plain data structures owned by the list controller.
//! - Keep one canonical record shape; rendering and persistence are
//!   projections computed elsewhere.
//!
//! # Invariants
//! - Task identity is positional; records carry no stable id.
//! - Filter state lives in memory only and is never serialized.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod filter;
pub mod task;
