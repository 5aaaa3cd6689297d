//! Persistence adapter contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the single-slot snapshot access contract.
//! - Isolate SQLite details from controller orchestration.
//!
//! # Invariants
//! - Stores are constructed only over migrated, validated connections.
//! - Slot writes overwrite wholesale; there are no merge semantics.
//!
//! # See also
//! - docs/architecture/persistence.md

pub mod slot_repo;
