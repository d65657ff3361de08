//! Evidence records: sources, the repositories holding them, and the
//! representations and citations attached to a source.
//!
//! # Invariants
//! - `Source::higher_source_id` may point at any source, including one of its
//!   own descendants; storage does not guard against cycles.

use crate::model::validation::{Fields, Validate, ValidationError};
use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A document or collection of documents that yields evidence.
///
/// Sources nest: a page sits in a volume, the volume in a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    /// Containing source, if any.
    #[serde(default)]
    pub higher_source_id: Option<RecordId>,
    /// Place the source describes.
    pub subject_place_id: RecordId,
    /// Place the source was created or is kept.
    pub jurisdiction_place_id: RecordId,
    /// Researcher who recorded the source.
    pub researcher_id: RecordId,
    pub subject_date_start: NaiveDate,
    pub subject_date_end: NaiveDate,
    #[serde(default)]
    pub comment: String,
}

impl Source {
    pub fn new(
        subject_place_id: RecordId,
        jurisdiction_place_id: RecordId,
        researcher_id: RecordId,
        subject_date_start: NaiveDate,
        subject_date_end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            higher_source_id: None,
            subject_place_id,
            jurisdiction_place_id,
            researcher_id,
            subject_date_start,
            subject_date_end,
            comment: String::new(),
        }
    }

    pub fn within(mut self, higher_source_id: RecordId) -> Self {
        self.higher_source_id = Some(higher_source_id);
        self
    }
}

/// Sources carry no free text with bounds; references are checked by storage.
impl Validate for Source {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// An archive, library or other holder of sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub place_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub comments: String,
}

impl Repository {
    pub fn new(place_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id,
            name: name.into(),
            address: String::new(),
            phone: String::new(),
            hours: String::new(),
            comments: String::new(),
        }
    }
}

impl Validate for Repository {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("repository")
            .required("name", &self.name, Some(128))?
            .bounded("phone", &self.phone, 64)?;
        Ok(())
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where one source can be found in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySource {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub repository_id: RecordId,
    pub source_id: RecordId,
    /// Search activity that covered this pairing.
    #[serde(default)]
    pub search_id: Option<RecordId>,
    #[serde(default)]
    pub call_number: String,
    #[serde(default)]
    pub description: String,
}

impl RepositorySource {
    pub fn new(repository_id: RecordId, source_id: RecordId) -> Self {
        Self {
            id: Uuid::new_v4(),
            repository_id,
            source_id,
            search_id: None,
            call_number: String::new(),
            description: String::new(),
        }
    }

    pub fn with_call_number(mut self, call_number: impl Into<String>) -> Self {
        self.call_number = call_number.into();
        self
    }
}

impl Validate for RepositorySource {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("repository source").bounded("call_number", &self.call_number, 64)?;
        Ok(())
    }
}

/// Kind of copy kept of a source (photocopy, transcript, image, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl RepresentationType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for RepresentationType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("representation type").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for RepresentationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A stored excerpt or copy of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub source_id: RecordId,
    pub representation_type_id: RecordId,
    /// Shelf or folder code of the physical copy.
    #[serde(default)]
    pub physical_file_code: String,
    pub medium: String,
    /// Location of the stored digital copy.
    #[serde(default)]
    pub content_path: Option<String>,
    #[serde(default)]
    pub comments: String,
}

impl Representation {
    pub fn new(
        source_id: RecordId,
        representation_type_id: RecordId,
        medium: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            representation_type_id,
            physical_file_code: String::new(),
            medium: medium.into(),
            content_path: None,
            comments: String::new(),
        }
    }
}

impl Validate for Representation {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("representation")
            .bounded("physical_file_code", &self.physical_file_code, 256)?
            .required("medium", &self.medium, Some(64))?;
        Ok(())
    }
}

/// Label for one fragment of a bibliographic citation ("Author", "Page").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPartType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl CitationPartType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for CitationPartType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("citation part type").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for CitationPartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// One fragment of a source's citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPart {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub source_id: RecordId,
    pub citation_part_type_id: RecordId,
    pub value: String,
}

impl CitationPart {
    pub fn new(
        source_id: RecordId,
        citation_part_type_id: RecordId,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            citation_part_type_id,
            value: value.into(),
        }
    }
}

impl Validate for CitationPart {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("citation part").required("value", &self.value, Some(256))?;
        Ok(())
    }
}

impl Display for CitationPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
