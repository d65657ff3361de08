//! Many-to-many link tables.
//!
//! # Responsibility
//! - Maintain pair rows in `source_source_groups` and
//!   `research_objective_activities`.
//!
//! # Invariants
//! - A pair is stored at most once; re-adding an existing pair is a no-op.
//! - `replace_links` swaps the whole link set of one owner atomically.

use crate::model::RecordId;
use crate::repo::record_repo::{parse_uuid, write_error, RepoResult, SqliteRecordRepository};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Static description of one link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTable {
    pub name: &'static str,
    pub table: &'static str,
    /// Column holding the side the link is edited from.
    pub owner_column: &'static str,
    pub target_column: &'static str,
}

/// Source ↔ SourceGroup, edited from the source.
pub const SOURCE_SOURCE_GROUPS: LinkTable = LinkTable {
    name: "source groups",
    table: "source_source_groups",
    owner_column: "source_id",
    target_column: "source_group_id",
};

/// ResearchObjective ↔ Activity, edited from the research objective.
pub const RESEARCH_OBJECTIVE_ACTIVITIES: LinkTable = LinkTable {
    name: "activities",
    table: "research_objective_activities",
    owner_column: "research_objective_id",
    target_column: "activity_id",
};

/// Repository interface for link table maintenance.
pub trait LinkRepository {
    fn add_link(&self, link: LinkTable, owner: RecordId, target: RecordId) -> RepoResult<()>;
    /// Returns whether a pair was removed.
    fn remove_link(&self, link: LinkTable, owner: RecordId, target: RecordId)
        -> RepoResult<bool>;
    /// Targets linked to `owner`, in link insertion order.
    fn linked_targets(&self, link: LinkTable, owner: RecordId) -> RepoResult<Vec<RecordId>>;
    /// Owners linked to `target`, in link insertion order.
    fn linked_owners(&self, link: LinkTable, target: RecordId) -> RepoResult<Vec<RecordId>>;
    fn replace_links(&self, link: LinkTable, owner: RecordId, targets: &[RecordId])
        -> RepoResult<()>;
}

impl LinkRepository for SqliteRecordRepository<'_> {
    fn add_link(&self, link: LinkTable, owner: RecordId, target: RecordId) -> RepoResult<()> {
        insert_link(self.conn, link, owner, target)
    }

    fn remove_link(
        &self,
        link: LinkTable,
        owner: RecordId,
        target: RecordId,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1 AND {} = ?2;",
                link.table, link.owner_column, link.target_column
            ),
            params![owner.to_string(), target.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn linked_targets(&self, link: LinkTable, owner: RecordId) -> RepoResult<Vec<RecordId>> {
        select_side(self.conn, link, link.owner_column, link.target_column, owner)
    }

    fn linked_owners(&self, link: LinkTable, target: RecordId) -> RepoResult<Vec<RecordId>> {
        select_side(self.conn, link, link.target_column, link.owner_column, target)
    }

    fn replace_links(
        &self,
        link: LinkTable,
        owner: RecordId,
        targets: &[RecordId],
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?1;", link.table, link.owner_column),
            [owner.to_string()],
        )?;
        for target in targets {
            insert_link(&tx, link, owner, *target)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn insert_link(
    conn: &Connection,
    link: LinkTable,
    owner: RecordId,
    target: RecordId,
) -> RepoResult<()> {
    conn.execute(
        &format!(
            "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2);",
            link.table, link.owner_column, link.target_column
        ),
        params![owner.to_string(), target.to_string()],
    )
    .map_err(|err| write_error(err, link.name))?;
    Ok(())
}

fn select_side(
    conn: &Connection,
    link: LinkTable,
    match_column: &str,
    select_column: &str,
    id: RecordId,
) -> RepoResult<Vec<RecordId>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {select_column} FROM {} WHERE {match_column} = ?1 ORDER BY rowid ASC;",
        link.table
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        ids.push(parse_uuid(&value, link.table, select_column)?);
    }
    Ok(ids)
}
