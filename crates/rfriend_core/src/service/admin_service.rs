//! Admin use-case service.
//!
//! # Responsibility
//! - Provide the generic create/read/update/delete entry points every entity
//!   is edited through.
//! - Save a parent together with its inline children.
//! - Maintain many-to-many links.
//!
//! # Invariants
//! - An inline save never writes a child whose foreign key names a
//!   different parent.
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::admin::InlineOf;
use crate::model::RecordId;
use crate::repo::link_repo::{LinkRepository, LinkTable};
use crate::repo::record_repo::{ListQuery, Record, RecordRepository, RepoError};
use log::{debug, info, warn};

/// Errors from admin service operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    /// An inline child submitted on a parent form points at another parent.
    #[error("{entity} {child_id} belongs to {actual_parent_id}, not {expected_parent_id}")]
    InlineParentMismatch {
        entity: &'static str,
        child_id: RecordId,
        expected_parent_id: RecordId,
        actual_parent_id: RecordId,
    },
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Admin service facade over record and link repositories.
pub struct AdminService<R: RecordRepository + LinkRepository> {
    repo: R,
}

impl<R: RecordRepository + LinkRepository> AdminService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create<T: Record>(&self, record: &T) -> AdminResult<RecordId> {
        let id = self.repo.create(record).inspect_err(|err| {
            warn!(
                "event=record_create module=admin status=error entity={} error={err}",
                T::ENTITY
            );
        })?;
        info!(
            "event=record_create module=admin status=ok entity={} id={id}",
            T::ENTITY
        );
        Ok(id)
    }

    pub fn get<T: Record>(&self, id: RecordId) -> AdminResult<Option<T>> {
        Ok(self.repo.get(id)?)
    }

    /// Loads one record or fails with `RepoError::NotFound`.
    pub fn require<T: Record>(&self, id: RecordId) -> AdminResult<T> {
        self.repo.get(id)?.ok_or(AdminError::Repo(RepoError::NotFound {
            entity: T::ENTITY,
            id,
        }))
    }

    pub fn list<T: Record>(&self, query: &ListQuery) -> AdminResult<Vec<T>> {
        Ok(self.repo.list(query)?)
    }

    pub fn count<T: Record>(&self) -> AdminResult<u64> {
        Ok(self.repo.count::<T>()?)
    }

    pub fn update<T: Record>(&self, record: &T) -> AdminResult<()> {
        self.repo.update(record)?;
        info!(
            "event=record_update module=admin status=ok entity={} id={}",
            T::ENTITY,
            record.id()
        );
        Ok(())
    }

    pub fn delete<T: Record>(&self, id: RecordId) -> AdminResult<()> {
        self.repo.delete::<T>(id)?;
        info!(
            "event=record_delete module=admin status=ok entity={} id={id}",
            T::ENTITY
        );
        Ok(())
    }

    /// Saves `parent` and makes `children` its complete inline set.
    ///
    /// # Contract
    /// - Existing children not in `children` are deleted.
    /// - A child already stored under another parent is rejected, not moved.
    /// - Either everything is written or nothing is.
    pub fn save_with_inlines<P: Record, C: InlineOf<P>>(
        &self,
        parent: &P,
        children: &[C],
    ) -> AdminResult<()> {
        for child in children {
            let actual_parent_id = child.parent_id();
            if actual_parent_id != parent.id() {
                return Err(AdminError::InlineParentMismatch {
                    entity: C::ENTITY,
                    child_id: child.id(),
                    expected_parent_id: parent.id(),
                    actual_parent_id,
                });
            }
        }

        self.repo
            .save_with_children(parent, C::FK_COLUMN, children)
            .map_err(|err| match err {
                RepoError::ChildOfOtherParent {
                    entity,
                    child_id,
                    parent_id,
                } => AdminError::InlineParentMismatch {
                    entity,
                    child_id,
                    expected_parent_id: parent.id(),
                    actual_parent_id: parent_id,
                },
                other => AdminError::Repo(other),
            })
            .inspect_err(|err| {
                warn!(
                    "event=inline_save module=admin status=error entity={} child={} error={err}",
                    P::ENTITY,
                    C::ENTITY
                );
            })?;
        info!(
            "event=inline_save module=admin status=ok entity={} id={} child={} children={}",
            P::ENTITY,
            parent.id(),
            C::ENTITY,
            children.len()
        );
        Ok(())
    }

    /// Lists the inline children of one parent in storage order.
    pub fn list_inlines<P: Record, C: InlineOf<P>>(
        &self,
        parent_id: RecordId,
    ) -> AdminResult<Vec<C>> {
        Ok(self.repo.list_by::<C>(C::FK_COLUMN, parent_id)?)
    }

    pub fn add_link(&self, link: LinkTable, owner: RecordId, target: RecordId) -> AdminResult<()> {
        self.repo.add_link(link, owner, target)?;
        debug!(
            "event=link_add module=admin status=ok link={} owner={owner} target={target}",
            link.table
        );
        Ok(())
    }

    pub fn remove_link(
        &self,
        link: LinkTable,
        owner: RecordId,
        target: RecordId,
    ) -> AdminResult<bool> {
        Ok(self.repo.remove_link(link, owner, target)?)
    }

    pub fn linked_targets(&self, link: LinkTable, owner: RecordId) -> AdminResult<Vec<RecordId>> {
        Ok(self.repo.linked_targets(link, owner)?)
    }

    pub fn linked_owners(&self, link: LinkTable, target: RecordId) -> AdminResult<Vec<RecordId>> {
        Ok(self.repo.linked_owners(link, target)?)
    }

    /// Makes `targets` the complete link set of `owner`.
    pub fn replace_links(
        &self,
        link: LinkTable,
        owner: RecordId,
        targets: &[RecordId],
    ) -> AdminResult<()> {
        self.repo.replace_links(link, owner, targets)?;
        debug!(
            "event=link_replace module=admin status=ok link={} owner={owner} targets={}",
            link.table,
            targets.len()
        );
        Ok(())
    }
}
