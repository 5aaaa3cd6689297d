//! Snapshot slot contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-slot load/save semantics over the `slots` table.
//! - Validate connection readiness at construction time.
//!
//! # Invariants
//! - One named slot holds at most one value; `save` is last-writer-wins.
//! - Read paths surface storage faults instead of masking them.
//!
//! # See also
//! - docs/architecture/persistence.md

use crate::db::{migrations::latest_version, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default slot key used by the task-list controller.
pub const DEFAULT_SLOT_KEY: &str = "tasks";

pub type SlotResult<T> = Result<T, SlotStoreError>;

/// Error family for slot persistence operations.
#[derive(Debug)]
pub enum SlotStoreError {
    Db(DbError),
    /// The connection has not been migrated to the supported schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SlotStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` on table `{table}`")
            }
        }
    }
}

impl Error for SlotStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SlotStoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Single-slot snapshot persistence contract.
///
/// Mirrors a key-value storage cell: `load` returns the last saved payload,
/// `save` overwrites it wholesale.
pub trait SnapshotStore {
    fn load(&self) -> SlotResult<Option<String>>;
    fn save(&self, payload: &str) -> SlotResult<()>;
}

/// SQLite-backed snapshot slot.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Constructs a store over the default `tasks` slot.
    pub fn try_new(conn: &'conn Connection) -> SlotResult<Self> {
        Self::with_key(conn, DEFAULT_SLOT_KEY)
    }

    /// Constructs a store over a caller-named slot.
    ///
    /// Named slots keep independent snapshots on one connection, which is
    /// what allows multiple controller instances to coexist.
    pub fn with_key(conn: &'conn Connection, slot_key: impl Into<String>) -> SlotResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            slot_key: slot_key.into(),
        })
    }

    /// Returns the slot key this store reads and writes.
    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load(&self) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, payload: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.slot_key.as_str(), payload],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> SlotResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SlotStoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "slots")? {
        return Err(SlotStoreError::MissingRequiredTable("slots"));
    }

    for column in ["key", "value", "updated_at"] {
        if !table_has_column(conn, "slots", column)? {
            return Err(SlotStoreError::MissingRequiredColumn {
                table: "slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> SlotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SlotResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
