//! Source hierarchy use-case service.
//!
//! # Responsibility
//! - Walk the `higher_source` chain of a source.
//! - Re-parent a source without introducing a cycle.
//!
//! # Invariants
//! - `set_higher_source` never stores a self-reference or a cycle.
//! - Walks terminate on stored cycles, which the generic update path can
//!   still produce.

use crate::model::evidence::Source;
use crate::model::RecordId;
use crate::repo::record_repo::{RecordRepository, RepoError};
use log::info;
use std::collections::HashSet;

/// Errors from source hierarchy operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceServiceError {
    #[error("source not found: {0}")]
    SourceNotFound(RecordId),
    #[error("higher source not found: {0}")]
    HigherSourceNotFound(RecordId),
    /// Re-parenting would make a source its own ancestor.
    #[error("placing source {source_id} under {higher_source_id} would create a cycle")]
    CycleDetected {
        source_id: RecordId,
        higher_source_id: RecordId,
    },
    /// A stored chain loops back on itself.
    #[error("source hierarchy above {0} contains a cycle")]
    StoredCycle(RecordId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for SourceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "source",
                id,
            } => Self::SourceNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Source hierarchy service facade.
pub struct SourceService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> SourceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the chain of containing sources, nearest first.
    pub fn ancestors(&self, source_id: RecordId) -> Result<Vec<Source>, SourceServiceError> {
        let source = self.load(source_id)?;
        let mut visited = HashSet::from([source.id]);
        let mut chain = Vec::new();
        let mut cursor = source.higher_source_id;

        while let Some(current) = cursor {
            if !visited.insert(current) {
                return Err(SourceServiceError::StoredCycle(source_id));
            }
            let higher = self
                .repo
                .get::<Source>(current)?
                .ok_or(SourceServiceError::HigherSourceNotFound(current))?;
            cursor = higher.higher_source_id;
            chain.push(higher);
        }
        Ok(chain)
    }

    /// Sources directly contained in `source_id`, in storage order.
    pub fn children(&self, source_id: RecordId) -> Result<Vec<Source>, SourceServiceError> {
        self.load(source_id)?;
        Ok(self.repo.list_by::<Source>("higher_source_id", source_id)?)
    }

    /// Moves a source under `higher_source_id`, or to the top level.
    pub fn set_higher_source(
        &self,
        source_id: RecordId,
        higher_source_id: Option<RecordId>,
    ) -> Result<Source, SourceServiceError> {
        let mut source = self.load(source_id)?;

        if let Some(higher_source_id) = higher_source_id {
            if higher_source_id == source_id {
                return Err(SourceServiceError::CycleDetected {
                    source_id,
                    higher_source_id,
                });
            }
            if self.repo.get::<Source>(higher_source_id)?.is_none() {
                return Err(SourceServiceError::HigherSourceNotFound(higher_source_id));
            }
            if self.would_create_cycle(source_id, higher_source_id)? {
                return Err(SourceServiceError::CycleDetected {
                    source_id,
                    higher_source_id,
                });
            }
        }

        source.higher_source_id = higher_source_id;
        self.repo.update(&source)?;
        info!(
            "event=source_reparent module=source status=ok id={source_id} higher={}",
            higher_source_id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        Ok(source)
    }

    fn load(&self, source_id: RecordId) -> Result<Source, SourceServiceError> {
        self.repo
            .get::<Source>(source_id)?
            .ok_or(SourceServiceError::SourceNotFound(source_id))
    }

    fn would_create_cycle(
        &self,
        source_id: RecordId,
        candidate_higher_id: RecordId,
    ) -> Result<bool, SourceServiceError> {
        let mut visited = HashSet::new();
        let mut cursor = Some(candidate_higher_id);
        while let Some(current) = cursor {
            if current == source_id {
                return Ok(true);
            }
            if !visited.insert(current) {
                // Pre-existing loop above the candidate that does not pass
                // through `source_id`.
                return Ok(false);
            }
            cursor = match self.repo.get::<Source>(current)? {
                Some(source) => source.higher_source_id,
                None => None,
            };
        }
        Ok(false)
    }
}
