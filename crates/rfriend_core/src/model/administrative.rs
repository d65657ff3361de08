//! Administrative records: researchers, projects, surety schemes, activities.
//!
//! # Invariants
//! - `Activity::typecode()` is derived from `ActivityKind` and cannot be set
//!   independently of the subtype payload.
//! - Optional references (`Option<RecordId>`) may be absent; every other
//!   reference must name an existing record when written.

use crate::model::validation::{Fields, Validate, ValidationError};
use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// The person gathering data.
///
/// Every source, assertion and activity is attributed to one researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
    /// Place the researcher can be reached at.
    #[serde(default)]
    pub address_id: Option<RecordId>,
    #[serde(default)]
    pub comments: String,
}

impl Researcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address_id: None,
            comments: String::new(),
        }
    }
}

impl Validate for Researcher {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("researcher").required("name", &self.name, Some(128))?;
        Ok(())
    }
}

impl Display for Researcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A research effort, possibly shared by several researchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form client details for commissioned research.
    #[serde(default)]
    pub client_data: String,
    #[serde(default)]
    pub surety_scheme_id: Option<RecordId>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            client_data: String::new(),
            surety_scheme_id: None,
        }
    }
}

impl Validate for Project {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("project").required("name", &self.name, Some(128))?;
        Ok(())
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Membership of one researcher in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherProject {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub researcher_id: RecordId,
    pub project_id: RecordId,
    #[serde(default)]
    pub role: String,
}

impl ResearcherProject {
    pub fn new(researcher_id: RecordId, project_id: RecordId) -> Self {
        Self {
            id: Uuid::new_v4(),
            researcher_id,
            project_id,
            role: String::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

impl Validate for ResearcherProject {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("researcher project").bounded("role", &self.role, 64)?;
        Ok(())
    }
}

/// A researcher-defined confidence scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuretyScheme {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl SuretyScheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
        }
    }
}

impl Validate for SuretyScheme {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("surety scheme").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for SuretyScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// One level of a surety scheme, named by a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuretySchemePart {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub surety_scheme_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sequence_number: u16,
}

impl SuretySchemePart {
    pub fn new(surety_scheme_id: RecordId, name: impl Into<String>, sequence_number: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            surety_scheme_id,
            name: name.into(),
            description: String::new(),
            sequence_number,
        }
    }
}

impl Validate for SuretySchemePart {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("surety scheme part")
            .required("name", &self.name, Some(1))?
            .small_uint("sequence_number", self.sequence_number)?;
        Ok(())
    }
}

impl Display for SuretySchemePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Payload of a search activity.
///
/// Both references point at repository/source pairings: `source_id` names
/// the pairing for the source searched, `repository_id` the pairing for the
/// repository searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDetails {
    pub source_id: RecordId,
    pub repository_id: RecordId,
    pub searched_for: String,
}

/// Subtype of an activity, stored as a one-character typecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "typecode")]
pub enum ActivityKind {
    #[serde(rename = "A")]
    AdministrativeTask,
    #[serde(rename = "S")]
    Search(SearchDetails),
}

impl ActivityKind {
    pub fn typecode(&self) -> &'static str {
        match self {
            Self::AdministrativeTask => ADMINISTRATIVE_TASK_TYPECODE,
            Self::Search(_) => SEARCH_TYPECODE,
        }
    }
}

pub const ADMINISTRATIVE_TASK_TYPECODE: &str = "A";
pub const SEARCH_TYPECODE: &str = "S";

/// A researcher's task: either administrative work or a search of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub researcher_id: RecordId,
    pub scheduled_date: NaiveDate,
    pub completed_date: NaiveDate,
    pub status: String,
    pub description: String,
    pub priority: u16,
    #[serde(default)]
    pub comments: String,
    #[serde(flatten)]
    pub(crate) kind: ActivityKind,
}

impl Activity {
    /// Creates an administrative task (typecode `A`).
    pub fn administrative_task(
        researcher_id: RecordId,
        scheduled_date: NaiveDate,
        completed_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            researcher_id,
            scheduled_date,
            completed_date,
            description.into(),
            ActivityKind::AdministrativeTask,
        )
    }

    /// Creates a search (typecode `S`).
    pub fn search(
        researcher_id: RecordId,
        scheduled_date: NaiveDate,
        completed_date: NaiveDate,
        description: impl Into<String>,
        details: SearchDetails,
    ) -> Self {
        Self::with_kind(
            researcher_id,
            scheduled_date,
            completed_date,
            description.into(),
            ActivityKind::Search(details),
        )
    }

    fn with_kind(
        researcher_id: RecordId,
        scheduled_date: NaiveDate,
        completed_date: NaiveDate,
        description: String,
        kind: ActivityKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            researcher_id,
            scheduled_date,
            completed_date,
            status: "open".to_string(),
            description,
            priority: 0,
            comments: String::new(),
            kind,
        }
    }

    pub fn kind(&self) -> &ActivityKind {
        &self.kind
    }

    pub fn typecode(&self) -> &'static str {
        self.kind.typecode()
    }

    pub fn search_details(&self) -> Option<&SearchDetails> {
        match &self.kind {
            ActivityKind::Search(details) => Some(details),
            ActivityKind::AdministrativeTask => None,
        }
    }

    /// Replaces the search payload. Has no effect on administrative tasks.
    pub fn set_search_details(&mut self, details: SearchDetails) {
        if let ActivityKind::Search(current) = &mut self.kind {
            *current = details;
        }
    }
}

impl Validate for Activity {
    fn validate(&self) -> Result<(), ValidationError> {
        let fields = Fields::of("activity")
            .required("status", &self.status, Some(64))?
            .required("description", &self.description, None)?
            .small_uint("priority", self.priority)?;
        if let ActivityKind::Search(details) = &self.kind {
            fields.required("searched_for", &details.searched_for, None)?;
        }
        Ok(())
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ActivityKind::Search(details) => f.write_str(&details.searched_for),
            ActivityKind::AdministrativeTask => f.write_str(&self.description),
        }
    }
}

/// A stated goal within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchObjective {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub project_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sequence_number: u16,
    pub priority: u16,
    pub status: String,
}

impl ResearchObjective {
    pub fn new(project_id: RecordId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            description: String::new(),
            sequence_number: 0,
            priority: 0,
            status: status.into(),
        }
    }
}

impl Validate for ResearchObjective {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("research objective")
            .required("name", &self.name, Some(128))?
            .required("status", &self.status, Some(64))?
            .small_uint("sequence_number", self.sequence_number)?
            .small_uint("priority", self.priority)?;
        Ok(())
    }
}

impl Display for ResearchObjective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A category label for sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl SourceGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for SourceGroup {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("source group").required("name", &self.name, Some(128))?;
        Ok(())
    }
}

impl Display for SourceGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, SearchDetails};
    use crate::model::validation::{Validate, ValidationError};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, d).unwrap()
    }

    fn details(searched_for: &str) -> SearchDetails {
        SearchDetails {
            source_id: Uuid::new_v4(),
            repository_id: Uuid::new_v4(),
            searched_for: searched_for.to_string(),
        }
    }

    #[test]
    fn constructors_fix_the_typecode() {
        let task = Activity::administrative_task(Uuid::new_v4(), day(1), day(2), "order records");
        let search = Activity::search(Uuid::new_v4(), day(1), day(2), "census", details("Smith"));

        assert_eq!(task.typecode(), "A");
        assert_eq!(search.typecode(), "S");
        assert!(task.search_details().is_none());
        assert_eq!(search.to_string(), "Smith");
        assert_eq!(task.to_string(), "order records");
    }

    #[test]
    fn serialized_activity_carries_typecode_and_flattened_payload() {
        let search = Activity::search(Uuid::new_v4(), day(1), day(2), "census", details("Smith"));
        let json = serde_json::to_value(&search).unwrap();

        assert_eq!(json["typecode"], "S");
        assert_eq!(json["searched_for"], "Smith");
        assert_eq!(json["scheduled_date"], "2015-01-01");

        let back: Activity = serde_json::from_value(json).unwrap();
        assert_eq!(back, search);
    }

    #[test]
    fn set_search_details_ignores_administrative_tasks() {
        let mut task = Activity::administrative_task(Uuid::new_v4(), day(1), day(2), "file");
        task.set_search_details(details("ignored"));
        assert_eq!(task.typecode(), "A");
    }

    #[test]
    fn search_requires_searched_for_text() {
        let search = Activity::search(Uuid::new_v4(), day(1), day(2), "census", details(" "));
        assert!(matches!(
            search.validate(),
            Err(ValidationError::Blank {
                field: "searched_for",
                ..
            })
        ));
    }
}
