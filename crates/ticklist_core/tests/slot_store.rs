use rusqlite::Connection;
use ticklist_core::db::migrations::latest_version;
use ticklist_core::db::open_db_in_memory;
use ticklist_core::{SlotStoreError, SnapshotStore, SqliteSnapshotStore, DEFAULT_SLOT_KEY};

#[test]
fn load_absent_slot_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::try_new(&conn).unwrap();

    assert_eq!(store.slot_key(), DEFAULT_SLOT_KEY);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_overwrites_wholesale_last_writer_wins() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::try_new(&conn).unwrap();

    store.save("first snapshot").unwrap();
    store.save("second snapshot").unwrap();

    assert_eq!(store.load().unwrap().as_deref(), Some("second snapshot"));
}

#[test]
fn named_slots_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let work = SqliteSnapshotStore::with_key(&conn, "work").unwrap();
    let home = SqliteSnapshotStore::with_key(&conn, "home").unwrap();

    work.save("work payload").unwrap();
    home.save("home payload").unwrap();

    assert_eq!(work.load().unwrap().as_deref(), Some("work payload"));
    assert_eq!(home.load().unwrap().as_deref(), Some("home payload"));
}

#[test]
fn rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSnapshotStore::try_new(&conn) {
        Err(SlotStoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn rejects_connection_without_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSnapshotStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(SlotStoreError::MissingRequiredTable("slots"))
    ));
}

#[test]
fn rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE slots (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSnapshotStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(SlotStoreError::MissingRequiredColumn {
            table: "slots",
            column: "updated_at"
        })
    ));
}
