//! Conclusion records: assertions and the subjects they describe, plus the
//! places every other submodel points at.
//!
//! # Invariants
//! - An assertion subject always carries both its type and its id.
//! - Part records (`PlacePart`, `CharacteristicPart`, `GroupTypeRole`) are
//!   ordered within their owner by `sequence_number` per the owner's
//!   `SortOrder`.

use crate::model::validation::{Fields, Validate, ValidationError};
use crate::model::{RecordId, SequencedPart, SortOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// What an assertion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum AssertionSubject {
    Persona(RecordId),
    Event(RecordId),
    Characteristic(RecordId),
    Group(RecordId),
}

impl AssertionSubject {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Persona(_) => "P",
            Self::Event(_) => "E",
            Self::Characteristic(_) => "C",
            Self::Group(_) => "G",
        }
    }

    pub fn id(&self) -> RecordId {
        match *self {
            Self::Persona(id) | Self::Event(id) | Self::Characteristic(id) | Self::Group(id) => id,
        }
    }

    pub fn from_code(code: &str, id: RecordId) -> Option<Self> {
        match code {
            "P" => Some(Self::Persona(id)),
            "E" => Some(Self::Event(id)),
            "C" => Some(Self::Characteristic(id)),
            "G" => Some(Self::Group(id)),
            _ => None,
        }
    }
}

/// A researcher's conclusion about up to two subjects.
///
/// An assertion is prompted either by a source or by lower-level assertions
/// linked through `AssertionAssertion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    /// Confidence level from the project's surety scheme.
    #[serde(default)]
    pub surety_scheme_part_id: Option<RecordId>,
    pub researcher_id: RecordId,
    #[serde(default)]
    pub source_id: Option<RecordId>,
    #[serde(default)]
    pub subject1: Option<AssertionSubject>,
    #[serde(default)]
    pub subject2: Option<AssertionSubject>,
    /// Value or role linking the subjects ("father", "1850", ...).
    #[serde(default)]
    pub value_role: String,
    pub rationale: String,
    #[serde(default)]
    pub disproved: bool,
}

impl Assertion {
    pub fn new(researcher_id: RecordId, rationale: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            surety_scheme_part_id: None,
            researcher_id,
            source_id: None,
            subject1: None,
            subject2: None,
            value_role: String::new(),
            rationale: rationale.into(),
            disproved: false,
        }
    }

    pub fn from_source(mut self, source_id: RecordId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    pub fn about(mut self, subject: AssertionSubject) -> Self {
        self.subject1 = Some(subject);
        self
    }
}

impl Validate for Assertion {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("assertion")
            .bounded("value_role", &self.value_role, 64)?
            .required("rationale", &self.rationale, None)?;
        Ok(())
    }
}

/// Links a lower-level (input) assertion to a higher-level (output) one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionAssertion {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub assertion_low_id: RecordId,
    pub assertion_high_id: RecordId,
    #[serde(default)]
    pub sequence_number: u16,
}

impl AssertionAssertion {
    pub fn new(assertion_low_id: RecordId, assertion_high_id: RecordId, sequence_number: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            assertion_low_id,
            assertion_high_id,
            sequence_number,
        }
    }
}

impl Validate for AssertionAssertion {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("assertion assertion").small_uint("sequence_number", self.sequence_number)?;
        Ok(())
    }
}

/// A researcher's working identity for a real individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
    pub description_comments: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, description_comments: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description_comments: description_comments.into(),
        }
    }
}

impl Validate for Persona {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("persona")
            .required("name", &self.name, Some(256))?
            .required("description_comments", &self.description_comments, None)?;
        Ok(())
    }
}

impl Display for Persona {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub event_type_id: RecordId,
    pub place_id: RecordId,
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

impl Event {
    pub fn new(
        event_type_id: RecordId,
        place_id: RecordId,
        name: impl Into<String>,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type_id,
            place_id,
            name: name.into(),
            date_start,
            date_end,
        }
    }
}

impl Validate for Event {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("event").required("name", &self.name, Some(256))?;
        Ok(())
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl EventType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for EventType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("event type").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A role a persona can play in an event of one type ("bride", "witness").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeRole {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub event_type_id: RecordId,
    pub name: String,
}

impl EventTypeRole {
    pub fn new(event_type_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type_id,
            name: name.into(),
        }
    }
}

impl Validate for EventTypeRole {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("event type role").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for EventTypeRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A trait observed about a persona at a place and time, built from parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub place_id: RecordId,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub sort_order: SortOrder,
}

impl Characteristic {
    pub fn new(place_id: RecordId, date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id,
            date_start,
            date_end,
            sort_order: SortOrder::Ascending,
        }
    }
}

impl Validate for Characteristic {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicPart {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub characteristic_id: RecordId,
    pub characteristic_part_type_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub sequence_number: u16,
}

impl CharacteristicPart {
    pub fn new(
        characteristic_id: RecordId,
        characteristic_part_type_id: RecordId,
        name: impl Into<String>,
        sequence_number: u16,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            characteristic_id,
            characteristic_part_type_id,
            name: name.into(),
            sequence_number,
        }
    }
}

impl Validate for CharacteristicPart {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("characteristic part")
            .required("name", &self.name, Some(64))?
            .small_uint("sequence_number", self.sequence_number)?;
        Ok(())
    }
}

impl SequencedPart for CharacteristicPart {
    fn part_name(&self) -> &str {
        &self.name
    }

    fn sequence_number(&self) -> u16 {
        self.sequence_number
    }
}

impl Display for CharacteristicPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicPartType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl CharacteristicPartType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for CharacteristicPartType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("characteristic part type").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for CharacteristicPartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A set of personas sharing membership criteria (a household, a regiment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub group_type_id: RecordId,
    #[serde(default)]
    pub place_id: Option<RecordId>,
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    /// Criteria for admission to the group.
    pub criteria: String,
}

impl Group {
    pub fn new(
        group_type_id: RecordId,
        name: impl Into<String>,
        date_start: NaiveDate,
        date_end: NaiveDate,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_type_id,
            place_id: None,
            name: name.into(),
            date_start,
            date_end,
            criteria: criteria.into(),
        }
    }
}

impl Validate for Group {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("group")
            .required("name", &self.name, Some(128))?
            .required("criteria", &self.criteria, None)?;
        Ok(())
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
    /// Order in which the type's roles are listed.
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl GroupType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sort_order: SortOrder::Ascending,
        }
    }
}

impl Validate for GroupType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("group type").required("name", &self.name, Some(128))?;
        Ok(())
    }
}

impl Display for GroupType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTypeRole {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub group_type_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub sequence_number: u16,
}

impl GroupTypeRole {
    pub fn new(group_type_id: RecordId, name: impl Into<String>, sequence_number: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_type_id,
            name: name.into(),
            sequence_number,
        }
    }
}

impl Validate for GroupTypeRole {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("group type role")
            .required("name", &self.name, Some(64))?
            .small_uint("sequence_number", self.sequence_number)?;
        Ok(())
    }
}

impl SequencedPart for GroupTypeRole {
    fn part_name(&self) -> &str {
        &self.name
    }

    fn sequence_number(&self) -> u16 {
        self.sequence_number
    }
}

impl Display for GroupTypeRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A geographic location. Its name is assembled from `PlacePart` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    #[serde(default)]
    pub existence_date_start: Option<NaiveDate>,
    #[serde(default)]
    pub existence_date_end: Option<NaiveDate>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Place {
    pub fn new(sort_order: SortOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            existence_date_start: None,
            existence_date_end: None,
            sort_order,
        }
    }
}

impl Validate for Place {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// One named level of a place ("Franklin County").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePart {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub place_part_type_id: RecordId,
    pub place_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub sequence_number: u16,
}

impl PlacePart {
    pub fn new(
        place_id: RecordId,
        place_part_type_id: RecordId,
        name: impl Into<String>,
        sequence_number: u16,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_part_type_id,
            place_id,
            name: name.into(),
            sequence_number,
        }
    }
}

impl Validate for PlacePart {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("place part")
            .required("name", &self.name, Some(128))?
            .small_uint("sequence_number", self.sequence_number)?;
        Ok(())
    }
}

impl SequencedPart for PlacePart {
    fn part_name(&self) -> &str {
        &self.name
    }

    fn sequence_number(&self) -> u16 {
        self.sequence_number
    }
}

impl Display for PlacePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Level label for place parts ("County", "State").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePartType {
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    pub name: String,
}

impl PlacePartType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Validate for PlacePartType {
    fn validate(&self) -> Result<(), ValidationError> {
        Fields::of("place part type").required("name", &self.name, Some(64))?;
        Ok(())
    }
}

impl Display for PlacePartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Assertion, AssertionSubject};
    use uuid::Uuid;

    #[test]
    fn subject_codes_round_trip() {
        let id = Uuid::new_v4();
        for subject in [
            AssertionSubject::Persona(id),
            AssertionSubject::Event(id),
            AssertionSubject::Characteristic(id),
            AssertionSubject::Group(id),
        ] {
            assert_eq!(AssertionSubject::from_code(subject.code(), id), Some(subject));
            assert_eq!(subject.id(), id);
        }
        assert_eq!(AssertionSubject::from_code("X", id), None);
    }

    #[test]
    fn assertion_subject_serializes_as_type_and_id() {
        let persona_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let assertion = Assertion::new(Uuid::new_v4(), "named in will")
            .about(AssertionSubject::Persona(persona_id));

        let json = serde_json::to_value(&assertion).unwrap();
        assert_eq!(json["subject1"]["type"], "persona");
        assert_eq!(json["subject1"]["id"], persona_id.to_string());
        assert!(json["subject2"].is_null());
        assert_eq!(json["disproved"], false);
    }
}
