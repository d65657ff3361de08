//! Core domain logic for Researcher's Friend.
//!
//! Records of genealogical research (who researched what, which sources
//! say what, and what the researcher concluded) stored in SQLite and edited
//! through a generic admin layer.

pub mod admin;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use admin::{AdminGroup, EntityKind, InlineOf, InlineSpec};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::validation::{Validate, ValidationError};
pub use model::{RecordId, SortOrder};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::link_repo::{
    LinkRepository, LinkTable, RESEARCH_OBJECTIVE_ACTIVITIES, SOURCE_SOURCE_GROUPS,
};
pub use repo::record_repo::{
    ListQuery, Record, RecordRepository, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::activity_service::ActivityService;
pub use service::admin_service::{AdminError, AdminResult, AdminService};
pub use service::place_service::PlaceService;
pub use service::source_service::{SourceService, SourceServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
