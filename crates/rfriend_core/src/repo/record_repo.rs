//! Generic record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD for every table-backed record through one `Record` trait.
//! - Keep SQL text and row decoding inside the persistence boundary.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths call `Validate::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing follows storage order (`rowid ASC`).
//! - Column names interpolated into SQL come from `Record::COLUMNS` only.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::validation::{Validate, ValidationError};
use crate::model::{RecordId, SortOrder};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{
    ffi, params_from_iter, Connection, ErrorCode, OptionalExtension, Row, Transaction,
    TransactionBehavior,
};
use std::collections::HashSet;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tables every repository expects after migrations.
const REQUIRED_TABLES: &[&str] = &[
    "places",
    "place_part_types",
    "place_parts",
    "researchers",
    "projects",
    "researcher_projects",
    "surety_schemes",
    "surety_scheme_parts",
    "activities",
    "administrative_tasks",
    "searches",
    "research_objectives",
    "research_objective_activities",
    "source_groups",
    "sources",
    "source_source_groups",
    "repositories",
    "repository_sources",
    "representation_types",
    "representations",
    "citation_part_types",
    "citation_parts",
    "assertions",
    "assertion_assertions",
    "personas",
    "events",
    "event_types",
    "event_type_roles",
    "characteristics",
    "characteristic_parts",
    "characteristic_part_types",
    "person_groups",
    "group_types",
    "group_type_roles",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: RecordId,
    },
    /// A written row names a related record that does not exist.
    #[error("{entity} references a record that does not exist")]
    ForeignKeyViolation { entity: &'static str },
    #[error("{entity} violates a storage constraint: {message}")]
    ConstraintViolation {
        entity: &'static str,
        message: String,
    },
    #[error("{entity} has no column `{column}`")]
    UnknownColumn {
        entity: &'static str,
        column: &'static str,
    },
    /// A submitted inline child id is already stored under another parent.
    #[error("{entity} {child_id} belongs to parent {parent_id}")]
    ChildOfOtherParent {
        entity: &'static str,
        child_id: RecordId,
        parent_id: RecordId,
    },
    #[error("activity {id} is stored with typecode `{stored}` and cannot become `{requested}`")]
    TypecodeChanged {
        id: RecordId,
        stored: String,
        requested: &'static str,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A record stored as one row of one table.
///
/// `to_values` must return exactly one value per entry of `COLUMNS`, in the
/// same order. The `id` column is handled by the repository.
pub trait Record: Validate + Sized {
    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> RecordId;
    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Pagination options for listing records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for generic record CRUD.
pub trait RecordRepository {
    fn create<T: Record>(&self, record: &T) -> RepoResult<RecordId>;
    fn update<T: Record>(&self, record: &T) -> RepoResult<()>;
    fn get<T: Record>(&self, id: RecordId) -> RepoResult<Option<T>>;
    fn list<T: Record>(&self, query: &ListQuery) -> RepoResult<Vec<T>>;
    /// Lists records whose reference `column` equals `id`.
    fn list_by<T: Record>(&self, column: &'static str, id: RecordId) -> RepoResult<Vec<T>>;
    fn count<T: Record>(&self) -> RepoResult<u64>;
    fn delete<T: Record>(&self, id: RecordId) -> RepoResult<()>;
    /// Upserts `parent` and replaces its children (rows of `C` whose
    /// `fk_column` names the parent) with `children`, in one transaction.
    fn save_with_children<P: Record, C: Record>(
        &self,
        parent: &P,
        fk_column: &'static str,
        children: &[C],
    ) -> RepoResult<()>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn create<T: Record>(&self, record: &T) -> RepoResult<RecordId> {
        record.validate()?;
        insert_record(self.conn, record)?;
        Ok(record.id())
    }

    fn update<T: Record>(&self, record: &T) -> RepoResult<()> {
        record.validate()?;
        let changed = update_record(self.conn, record)?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: T::ENTITY,
                id: record.id(),
            });
        }
        Ok(())
    }

    fn get<T: Record>(&self, id: RecordId) -> RepoResult<Option<T>> {
        load_record(self.conn, id)
    }

    fn list<T: Record>(&self, query: &ListQuery) -> RepoResult<Vec<T>> {
        let mut sql = format!("{} ORDER BY rowid ASC", select_sql::<T>());
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }
        Ok(records)
    }

    fn list_by<T: Record>(&self, column: &'static str, id: RecordId) -> RepoResult<Vec<T>> {
        list_records_by(self.conn, column, id)
    }

    fn count<T: Record>(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count in {}", T::TABLE)))
    }

    fn delete<T: Record>(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
                [id.to_string()],
            )
            .map_err(|err| write_error(err, T::ENTITY))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: T::ENTITY,
                id,
            });
        }
        Ok(())
    }

    fn save_with_children<P: Record, C: Record>(
        &self,
        parent: &P,
        fk_column: &'static str,
        children: &[C],
    ) -> RepoResult<()> {
        parent.validate()?;
        for child in children {
            child.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        upsert_record(&tx, parent)?;

        let kept: HashSet<RecordId> = children.iter().map(Record::id).collect();
        let existing: Vec<C> = list_records_by(&tx, fk_column, parent.id())?;
        let owned: HashSet<RecordId> = existing.iter().map(Record::id).collect();
        for child in children.iter().filter(|child| !owned.contains(&child.id())) {
            if let Some(parent_id) = stored_parent::<C>(&tx, fk_column, child.id())? {
                return Err(RepoError::ChildOfOtherParent {
                    entity: C::ENTITY,
                    child_id: child.id(),
                    parent_id,
                });
            }
        }

        for stale in existing.iter().filter(|child| !kept.contains(&child.id())) {
            tx.execute(
                &format!("DELETE FROM {} WHERE id = ?1;", C::TABLE),
                [stale.id().to_string()],
            )
            .map_err(|err| write_error(err, C::ENTITY))?;
        }

        for child in children {
            upsert_record(&tx, child)?;
        }

        tx.commit()?;
        Ok(())
    }
}

/// Parent id stored on an existing child row, if the row exists.
fn stored_parent<C: Record>(
    conn: &Connection,
    fk_column: &'static str,
    child_id: RecordId,
) -> RepoResult<Option<RecordId>> {
    let value: Option<String> = conn
        .query_row(
            &format!("SELECT {fk_column} FROM {} WHERE id = ?1;", C::TABLE),
            [child_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    value
        .map(|value| parse_uuid(&value, C::TABLE, fk_column))
        .transpose()
}

fn select_sql<T: Record>() -> String {
    format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn bind_values<T: Record>(record: &T) -> RepoResult<Vec<Value>> {
    let mut values = Vec::with_capacity(T::COLUMNS.len() + 1);
    values.push(id_value(record.id()));
    values.extend(record.to_values());
    if values.len() != T::COLUMNS.len() + 1 {
        return Err(RepoError::InvalidData(format!(
            "{} produced {} values for {} columns",
            T::ENTITY,
            values.len() - 1,
            T::COLUMNS.len()
        )));
    }
    Ok(values)
}

pub(crate) fn insert_record<T: Record>(conn: &Connection, record: &T) -> RepoResult<()> {
    let sql = format!(
        "INSERT INTO {} (id, {}) VALUES ({});",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders(T::COLUMNS.len() + 1)
    );
    conn.execute(&sql, params_from_iter(bind_values(record)?))
        .map_err(|err| write_error(err, T::ENTITY))?;
    Ok(())
}

pub(crate) fn update_record<T: Record>(conn: &Connection, record: &T) -> RepoResult<usize> {
    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 2))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {} SET {assignments} WHERE id = ?1;", T::TABLE);
    let changed = conn
        .execute(&sql, params_from_iter(bind_values(record)?))
        .map_err(|err| write_error(err, T::ENTITY))?;
    Ok(changed)
}

/// Inserts or updates in place. Never deletes the existing row, so
/// cascading references to it survive.
pub(crate) fn upsert_record<T: Record>(conn: &Connection, record: &T) -> RepoResult<()> {
    let updates = T::COLUMNS
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} (id, {}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {updates};",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders(T::COLUMNS.len() + 1)
    );
    conn.execute(&sql, params_from_iter(bind_values(record)?))
        .map_err(|err| write_error(err, T::ENTITY))?;
    Ok(())
}

pub(crate) fn load_record<T: Record>(conn: &Connection, id: RecordId) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1;", select_sql::<T>()))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(T::from_row(row)?));
    }
    Ok(None)
}

pub(crate) fn list_records_by<T: Record>(
    conn: &Connection,
    column: &'static str,
    id: RecordId,
) -> RepoResult<Vec<T>> {
    if !T::COLUMNS.contains(&column) {
        return Err(RepoError::UnknownColumn {
            entity: T::ENTITY,
            column,
        });
    }

    let mut stmt = conn.prepare(&format!(
        "{} WHERE {column} = ?1 ORDER BY rowid ASC;",
        select_sql::<T>()
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(T::from_row(row)?);
    }
    Ok(records)
}

/// Maps constraint failures on writes to semantic errors.
pub(crate) fn write_error(err: rusqlite::Error, entity: &'static str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                RepoError::ForeignKeyViolation { entity }
            } else {
                RepoError::ConstraintViolation {
                    entity,
                    message: message.clone().unwrap_or_else(|| failure.to_string()),
                }
            }
        }
        _ => err.into(),
    }
}

pub(crate) fn id_value(id: RecordId) -> Value {
    Value::Text(id.to_string())
}

pub(crate) fn opt_id_value(id: Option<RecordId>) -> Value {
    id.map_or(Value::Null, id_value)
}

pub(crate) fn text_value(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn opt_text_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text_value)
}

pub(crate) fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format(DATE_FORMAT).to_string())
}

pub(crate) fn opt_date_value(date: Option<NaiveDate>) -> Value {
    date.map_or(Value::Null, date_value)
}

pub(crate) fn uint_value(value: u16) -> Value {
    Value::Integer(i64::from(value))
}

pub(crate) fn bool_value(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub(crate) fn sort_order_value(order: SortOrder) -> Value {
    text_value(order.code())
}

pub(crate) fn parse_uuid(value: &str, table: &str, column: &str) -> RepoResult<RecordId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid `{value}` in {table}.{column}"))
    })
}

pub(crate) fn read_id(row: &Row<'_>, table: &str, column: &str) -> RepoResult<RecordId> {
    let value: String = row.get(column)?;
    parse_uuid(&value, table, column)
}

pub(crate) fn read_opt_id(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> RepoResult<Option<RecordId>> {
    row.get::<_, Option<String>>(column)?
        .map(|value| parse_uuid(&value, table, column))
        .transpose()
}

fn parse_date(value: &str, table: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in {table}.{column}"))
    })
}

pub(crate) fn read_date(row: &Row<'_>, table: &str, column: &str) -> RepoResult<NaiveDate> {
    let value: String = row.get(column)?;
    parse_date(&value, table, column)
}

pub(crate) fn read_opt_date(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> RepoResult<Option<NaiveDate>> {
    row.get::<_, Option<String>>(column)?
        .map(|value| parse_date(&value, table, column))
        .transpose()
}

pub(crate) fn read_u16(row: &Row<'_>, table: &str, column: &str) -> RepoResult<u16> {
    let value: i64 = row.get(column)?;
    u16::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid small integer `{value}` in {table}.{column}"))
    })
}

pub(crate) fn read_bool(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn read_sort_order(row: &Row<'_>, table: &str, column: &str) -> RepoResult<SortOrder> {
    let value: String = row.get(column)?;
    SortOrder::from_code(&value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid sort order `{value}` in {table}.{column}"))
    })
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
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

#[cfg(test)]
mod tests {
    use super::{placeholders, write_error, RepoError};
    use rusqlite::Connection;

    #[test]
    fn placeholders_are_numbered_from_one() {
        assert_eq!(placeholders(3), "?1, ?2, ?3");
    }

    #[test]
    fn foreign_key_failures_map_to_semantic_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id TEXT PRIMARY KEY);
             CREATE TABLE child (id TEXT PRIMARY KEY, parent_id TEXT NOT NULL REFERENCES parent (id));",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO child (id, parent_id) VALUES ('c', 'missing');", [])
            .unwrap_err();
        assert!(matches!(
            write_error(err, "child"),
            RepoError::ForeignKeyViolation { entity: "child" }
        ));

        let err = conn
            .execute("INSERT INTO parent (id) VALUES ('p'), ('p');", [])
            .unwrap_err();
        assert!(matches!(
            write_error(err, "parent"),
            RepoError::ConstraintViolation { entity: "parent", .. }
        ));
    }
}
