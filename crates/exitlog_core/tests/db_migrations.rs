use exitlog_core::db::migrations::{apply_migrations, latest_version, pending_versions};
use exitlog_core::db::{open_db, open_db_in_memory, DbError};
use exitlog_core::{SlotStore, SqliteSlotStore};
use rusqlite::Connection;

#[test]
fn slot_table_has_key_value_and_timestamp_columns() {
    let conn = open_db_in_memory().unwrap();

    let columns = table_columns(&conn, "kv_slots");
    assert_eq!(
        columns,
        vec![
            ("key".to_owned(), "TEXT".to_owned(), true),
            ("value".to_owned(), "TEXT".to_owned(), false),
            ("updated_at".to_owned(), "INTEGER".to_owned(), false),
        ]
    );
    assert!(pending_versions(&conn).unwrap().is_empty());
}

#[test]
fn rewriting_a_slot_keeps_one_row_and_moves_its_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);

    slots.write_slot("registros", "[]").unwrap();
    conn.execute("UPDATE kv_slots SET updated_at = 0 WHERE key = 'registros';", [])
        .unwrap();
    slots.write_slot("registros", "[{\"id\":1}]").unwrap();

    let (rows, value, updated_at): (i64, String, i64) = conn
        .query_row(
            "SELECT COUNT(*), MAX(value), MAX(updated_at) FROM kv_slots;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(value, "[{\"id\":1}]");
    assert!(updated_at > 0, "updated_at stayed at {updated_at}");
}

#[test]
fn unversioned_database_with_foreign_tables_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE visitors (badge TEXT NOT NULL);
             INSERT INTO visitors (badge) VALUES ('B-17');",
        )
        .unwrap();
        assert_eq!(pending_versions(&conn).unwrap(), vec![1]);
    }

    let conn = open_db(&path).unwrap();

    let badge: String = conn
        .query_row("SELECT badge FROM visitors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(badge, "B-17");
    assert_eq!(user_version(&conn), latest_version());
    SqliteSlotStore::new(&conn).write_slot("registros", "[]").unwrap();
}

#[test]
fn migrations_run_once_per_database() {
    let mut conn = Connection::open_in_memory().unwrap();

    assert_eq!(apply_migrations(&mut conn).unwrap(), 1);
    assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
    assert_eq!(user_version(&conn), latest_version());
}

#[test]
fn slot_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exitlog.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqliteSlotStore::new(&conn)
            .write_slot("registros", "[1]")
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let value = SqliteSlotStore::new(&conn).read_slot("registros").unwrap();
    assert_eq!(value.as_deref(), Some("[1]"));
}

#[test]
fn database_from_a_newer_build_is_refused_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let future = latest_version() + 1;
    {
        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", future).unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(
            err,
            DbError::UnsupportedSchemaVersion { db_version, latest_supported }
                if db_version == future && latest_supported == latest_version()
        ),
        "unexpected error: {err}"
    );

    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), future);
    assert!(table_columns(&conn, "kv_slots").is_empty());
}

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

/// `(name, declared type, part of primary key)` per column, in table order.
fn table_columns(conn: &Connection, table: &str) -> Vec<(String, String, bool)> {
    let mut stmt = conn
        .prepare("SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid;")
        .unwrap();
    stmt.query_map([table], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get::<_, i64>(2)? > 0))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}
