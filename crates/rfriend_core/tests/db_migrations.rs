use rfriend_core::db::migrations::{current_version, latest_version};
use rfriend_core::db::{open_db, open_db_in_memory, DbError};
use rfriend_core::{RepoError, SqliteActivityRepository, SqliteRecordRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    for table in [
        "places",
        "researchers",
        "activities",
        "searches",
        "sources",
        "repository_sources",
        "source_source_groups",
        "assertions",
        "person_groups",
        "research_objective_activities",
    ] {
        assert_table_exists(&conn, table);
    }
    let triggers: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'trigger'
               AND name IN ('trg_administrative_tasks_delete_activity', 'trg_searches_delete_activity');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(triggers, 2);
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rfriend.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(current_version(&conn_first).unwrap(), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(current_version(&conn_second).unwrap(), latest_version());
    assert_table_exists(&conn_second, "places");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    assert!(matches!(
        SqliteRecordRepository::try_new(&conn),
        Err(RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));
    assert!(matches!(
        SqliteActivityRepository::try_new(&conn),
        Err(RepoError::UninitializedConnection { .. })
    ));
}

#[test]
fn repositories_reject_missing_tables() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE person_groups;").unwrap();

    assert!(matches!(
        SqliteRecordRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("person_groups"))
    ));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
