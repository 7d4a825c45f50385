use addressbook_core::db::migrations::latest_version;
use addressbook_core::db::{open_db, open_db_in_memory, DbError, CONTACTS_TABLE};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_contact_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        column_names(&conn, CONTACTS_TABLE),
        vec!["id", "name", "number", "email"]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("addressbook.sqlite");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO address_book (name, number, email) VALUES ('Ann', '555', '');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM address_book;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("book.sqlite");

    open_db(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_rejects_null_number_but_accepts_empty_string() {
    let conn = open_db_in_memory().unwrap();

    let null_insert = conn.execute(
        "INSERT INTO address_book (name, number, email) VALUES ('Ann', NULL, 'a@b.co');",
        [],
    );
    assert!(null_insert.is_err());

    conn.execute(
        "INSERT INTO address_book (name, number, email) VALUES ('Ann', '', 'a@b.co');",
        [],
    )
    .unwrap();
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn column_names(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        let column_name: String = row.get(1).unwrap();
        columns.push(column_name);
    }
    columns
}
