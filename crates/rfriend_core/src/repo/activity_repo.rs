//! Activity repository.
//!
//! # Responsibility
//! - Persist an `Activity` as its base row in `activities` plus exactly one
//!   subtype row in `administrative_tasks` or `searches`.
//!
//! # Invariants
//! - Base and subtype rows are written in one immediate transaction.
//! - The stored typecode always agrees with the subtype row present; reads
//!   reject rows where it does not.
//! - The typecode is fixed at creation. Updates never move an activity to
//!   the other subtype.
//! - Deleting a subtype row deletes its activity (migration 4 triggers).

use crate::model::administrative::{
    Activity, ActivityKind, SearchDetails, ADMINISTRATIVE_TASK_TYPECODE, SEARCH_TYPECODE,
};
use crate::model::validation::Validate;
use crate::model::RecordId;
use crate::repo::record_repo::{
    date_value, ensure_connection_ready, id_value, read_date, read_id, read_u16, text_value,
    uint_value, write_error, ListQuery, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

const ENTITY: &str = "activity";

const SELECT_ACTIVITY_SQL: &str = "SELECT
    a.id,
    a.researcher_id,
    a.scheduled_date,
    a.completed_date,
    a.typecode,
    a.status,
    a.description,
    a.priority,
    a.comments,
    t.activity_id AS task_id,
    s.activity_id AS search_id,
    s.source_id AS search_source_id,
    s.repository_id AS search_repository_id,
    s.searched_for AS search_searched_for
FROM activities a
LEFT JOIN administrative_tasks t ON t.activity_id = a.id
LEFT JOIN searches s ON s.activity_id = a.id";

/// Repository interface for activities and their subtypes.
pub trait ActivityRepository {
    fn create_activity(&self, activity: &Activity) -> RepoResult<RecordId>;
    /// Rewrites base and subtype rows. The stored kind must not change.
    fn update_activity(&self, activity: &Activity) -> RepoResult<()>;
    fn get_activity(&self, id: RecordId) -> RepoResult<Option<Activity>>;
    /// Lists activities in storage order, optionally only one typecode.
    fn list_activities(
        &self,
        typecode: Option<&str>,
        query: &ListQuery,
    ) -> RepoResult<Vec<Activity>>;
    fn count_activities(&self, typecode: Option<&str>) -> RepoResult<u64>;
    fn delete_activity(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(&self, activity: &Activity) -> RepoResult<RecordId> {
        activity.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO activities (
                id, researcher_id, scheduled_date, completed_date,
                typecode, status, description, priority, comments
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params_from_iter(base_values(activity)),
        )
        .map_err(|err| write_error(err, ENTITY))?;
        write_subtype_row(&tx, activity)?;
        tx.commit()?;

        Ok(activity.id)
    }

    fn update_activity(&self, activity: &Activity) -> RepoResult<()> {
        activity.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let stored: Option<String> = tx
            .query_row(
                "SELECT typecode FROM activities WHERE id = ?1;",
                [activity.id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            None => {
                return Err(RepoError::NotFound {
                    entity: ENTITY,
                    id: activity.id,
                })
            }
            Some(stored) if stored != activity.typecode() => {
                return Err(RepoError::TypecodeChanged {
                    id: activity.id,
                    stored,
                    requested: activity.typecode(),
                });
            }
            Some(_) => {}
        }

        tx.execute(
            "UPDATE activities
             SET researcher_id = ?2,
                 scheduled_date = ?3,
                 completed_date = ?4,
                 typecode = ?5,
                 status = ?6,
                 description = ?7,
                 priority = ?8,
                 comments = ?9
             WHERE id = ?1;",
            params_from_iter(base_values(activity)),
        )
        .map_err(|err| write_error(err, ENTITY))?;
        write_subtype_row(&tx, activity)?;
        tx.commit()?;

        Ok(())
    }

    fn get_activity(&self, id: RecordId) -> RepoResult<Option<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_ACTIVITY_SQL} WHERE a.id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }
        Ok(None)
    }

    fn list_activities(
        &self,
        typecode: Option<&str>,
        query: &ListQuery,
    ) -> RepoResult<Vec<Activity>> {
        let mut sql = SELECT_ACTIVITY_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(typecode) = typecode {
            sql.push_str(" WHERE a.typecode = ?");
            bind_values.push(Value::Text(checked_typecode(typecode)?.to_string()));
        }
        sql.push_str(" ORDER BY a.rowid ASC");
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1");
        }
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        Ok(activities)
    }

    fn count_activities(&self, typecode: Option<&str>) -> RepoResult<u64> {
        let count: i64 = match typecode {
            Some(typecode) => self.conn.query_row(
                "SELECT COUNT(*) FROM activities WHERE typecode = ?1;",
                [checked_typecode(typecode)?],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM activities;", [], |row| row.get(0))?,
        };
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData("negative row count in activities".to_string()))
    }

    fn delete_activity(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1;", [id.to_string()])
            .map_err(|err| write_error(err, ENTITY))?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }
        Ok(())
    }
}

fn checked_typecode(typecode: &str) -> RepoResult<&str> {
    match typecode {
        ADMINISTRATIVE_TASK_TYPECODE | SEARCH_TYPECODE => Ok(typecode),
        other => Err(RepoError::InvalidData(format!(
            "unknown activity typecode `{other}`"
        ))),
    }
}

fn base_values(activity: &Activity) -> Vec<Value> {
    vec![
        id_value(activity.id),
        id_value(activity.researcher_id),
        date_value(activity.scheduled_date),
        date_value(activity.completed_date),
        text_value(activity.typecode()),
        text_value(&activity.status),
        text_value(&activity.description),
        uint_value(activity.priority),
        text_value(&activity.comments),
    ]
}

/// Inserts or refreshes the subtype row matching `activity.kind`.
fn write_subtype_row(tx: &Transaction<'_>, activity: &Activity) -> RepoResult<()> {
    let activity_id = activity.id.to_string();
    match activity.kind() {
        ActivityKind::AdministrativeTask => {
            tx.execute(
                "INSERT OR IGNORE INTO administrative_tasks (activity_id) VALUES (?1);",
                [activity_id.as_str()],
            )
            .map_err(|err| write_error(err, "administrative task"))?;
        }
        ActivityKind::Search(details) => {
            tx.execute(
                "INSERT INTO searches (activity_id, source_id, repository_id, searched_for)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(activity_id) DO UPDATE SET
                    source_id = excluded.source_id,
                    repository_id = excluded.repository_id,
                    searched_for = excluded.searched_for;",
                params![
                    activity_id.as_str(),
                    details.source_id.to_string(),
                    details.repository_id.to_string(),
                    details.searched_for.as_str(),
                ],
            )
            .map_err(|err| write_error(err, "search"))?;
        }
    }
    Ok(())
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let id = read_id(row, "activities", "id")?;
    let typecode: String = row.get("typecode")?;
    let task_id: Option<String> = row.get("task_id")?;
    let search_id: Option<String> = row.get("search_id")?;

    let kind = match (typecode.as_str(), task_id, search_id) {
        (ADMINISTRATIVE_TASK_TYPECODE, Some(_), None) => ActivityKind::AdministrativeTask,
        (SEARCH_TYPECODE, None, Some(_)) => ActivityKind::Search(SearchDetails {
            source_id: read_id(row, "searches", "search_source_id")?,
            repository_id: read_id(row, "searches", "search_repository_id")?,
            searched_for: row.get("search_searched_for")?,
        }),
        (typecode, task_id, search_id) => {
            return Err(RepoError::InvalidData(format!(
                "activity {id} has typecode `{typecode}` but task row present={} and search row present={}",
                task_id.is_some(),
                search_id.is_some()
            )));
        }
    };

    Ok(Activity {
        id,
        researcher_id: read_id(row, "activities", "researcher_id")?,
        scheduled_date: read_date(row, "activities", "scheduled_date")?,
        completed_date: read_date(row, "activities", "completed_date")?,
        status: row.get("status")?,
        description: row.get("description")?,
        priority: read_u16(row, "activities", "priority")?,
        comments: row.get("comments")?,
        kind,
    })
}
