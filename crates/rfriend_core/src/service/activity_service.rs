//! Activity use-case service.
//!
//! # Responsibility
//! - Provide creation entry points for the two activity subtypes.
//! - Delegate persistence to `ActivityRepository`.
//!
//! # Invariants
//! - Administrative tasks are always stored with typecode `A`, searches with
//!   typecode `S`; callers cannot choose the typecode.

use crate::model::administrative::{
    Activity, SearchDetails, ADMINISTRATIVE_TASK_TYPECODE, SEARCH_TYPECODE,
};
use crate::model::RecordId;
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::record_repo::{ListQuery, RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;

/// Use-case service wrapper for activities.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an administrative task.
    pub fn create_administrative_task(
        &self,
        researcher_id: RecordId,
        scheduled_date: NaiveDate,
        completed_date: NaiveDate,
        description: impl Into<String>,
    ) -> RepoResult<Activity> {
        let activity = Activity::administrative_task(
            researcher_id,
            scheduled_date,
            completed_date,
            description,
        );
        self.create(&activity)?;
        Ok(activity)
    }

    /// Creates a search of one source/repository pairing.
    pub fn create_search(
        &self,
        researcher_id: RecordId,
        scheduled_date: NaiveDate,
        completed_date: NaiveDate,
        description: impl Into<String>,
        details: SearchDetails,
    ) -> RepoResult<Activity> {
        let activity = Activity::search(
            researcher_id,
            scheduled_date,
            completed_date,
            description,
            details,
        );
        self.create(&activity)?;
        Ok(activity)
    }

    /// Stores a fully built activity of either kind.
    pub fn create(&self, activity: &Activity) -> RepoResult<RecordId> {
        let id = self.repo.create_activity(activity)?;
        info!(
            "event=activity_create module=activity status=ok typecode={} id={id}",
            activity.typecode()
        );
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> RepoResult<Option<Activity>> {
        self.repo.get_activity(id)
    }

    /// Loads an activity of one kind; an activity of the other kind is
    /// reported as not found.
    pub fn require_kind(&self, typecode: &str, id: RecordId) -> RepoResult<Activity> {
        match self.repo.get_activity(id)? {
            Some(activity) if activity.typecode() == typecode => Ok(activity),
            _ => Err(RepoError::NotFound {
                entity: entity_name(typecode),
                id,
            }),
        }
    }

    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Activity>> {
        self.repo.list_activities(None, query)
    }

    pub fn list_administrative_tasks(&self, query: &ListQuery) -> RepoResult<Vec<Activity>> {
        self.repo
            .list_activities(Some(ADMINISTRATIVE_TASK_TYPECODE), query)
    }

    pub fn list_searches(&self, query: &ListQuery) -> RepoResult<Vec<Activity>> {
        self.repo.list_activities(Some(SEARCH_TYPECODE), query)
    }

    pub fn count(&self, typecode: Option<&str>) -> RepoResult<u64> {
        self.repo.count_activities(typecode)
    }

    pub fn update(&self, activity: &Activity) -> RepoResult<()> {
        self.repo.update_activity(activity)?;
        info!(
            "event=activity_update module=activity status=ok typecode={} id={}",
            activity.typecode(),
            activity.id
        );
        Ok(())
    }

    pub fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_activity(id)?;
        info!("event=activity_delete module=activity status=ok id={id}");
        Ok(())
    }
}

fn entity_name(typecode: &str) -> &'static str {
    match typecode {
        ADMINISTRATIVE_TASK_TYPECODE => "administrative task",
        SEARCH_TYPECODE => "search",
        _ => "activity",
    }
}
