//! Admin registry: which entities are editable, how they are grouped, and
//! which child records are edited inline on which parent form.
//!
//! # Responsibility
//! - Bind each inline child type to its parent through `InlineOf`.
//! - Describe every entity for listing surfaces (`EntityKind`).
//!
//! # Invariants
//! - `EntityKind::inlines()` is derived from the `InlineOf` impls, so the
//!   registry and the typed save path agree on foreign-key columns.

use crate::model::administrative::{
    Project, Researcher, ResearcherProject, SuretyScheme, SuretySchemePart,
};
use crate::model::conclusions::{
    Assertion, AssertionAssertion, Characteristic, CharacteristicPart, EventType, EventTypeRole,
    GroupType, GroupTypeRole, Place, PlacePart,
};
use crate::model::evidence::{CitationPart, Repository, RepositorySource, Source};
use crate::model::RecordId;
use crate::repo::link_repo::{LinkTable, RESEARCH_OBJECTIVE_ACTIVITIES};
use crate::repo::record_repo::Record;
use std::fmt::{Display, Formatter};

pub const SITE_HEADER: &str = "Researcher's Friend";
pub const SITE_TITLE: &str = "Site Admin | Researcher's Friend";
pub const INDEX_TITLE: &str = "Administration";

/// A child record edited inline on the form of parent `P`.
pub trait InlineOf<P: Record>: Record {
    /// Column of `Self` that references the parent.
    const FK_COLUMN: &'static str;
    /// Blank rows offered on the parent form.
    const EXTRA: u8 = 0;

    fn parent_id(&self) -> RecordId;
}

impl InlineOf<Researcher> for ResearcherProject {
    const FK_COLUMN: &'static str = "researcher_id";

    fn parent_id(&self) -> RecordId {
        self.researcher_id
    }
}

impl InlineOf<Project> for ResearcherProject {
    const FK_COLUMN: &'static str = "project_id";

    fn parent_id(&self) -> RecordId {
        self.project_id
    }
}

impl InlineOf<SuretyScheme> for SuretySchemePart {
    const FK_COLUMN: &'static str = "surety_scheme_id";
    const EXTRA: u8 = 1;

    fn parent_id(&self) -> RecordId {
        self.surety_scheme_id
    }
}

impl InlineOf<Repository> for RepositorySource {
    const FK_COLUMN: &'static str = "repository_id";

    fn parent_id(&self) -> RecordId {
        self.repository_id
    }
}

impl InlineOf<Source> for RepositorySource {
    const FK_COLUMN: &'static str = "source_id";

    fn parent_id(&self) -> RecordId {
        self.source_id
    }
}

impl InlineOf<Source> for CitationPart {
    const FK_COLUMN: &'static str = "source_id";

    fn parent_id(&self) -> RecordId {
        self.source_id
    }
}

/// Links are edited from the higher-level (output) assertion.
impl InlineOf<Assertion> for AssertionAssertion {
    const FK_COLUMN: &'static str = "assertion_high_id";

    fn parent_id(&self) -> RecordId {
        self.assertion_high_id
    }
}

impl InlineOf<Characteristic> for CharacteristicPart {
    const FK_COLUMN: &'static str = "characteristic_id";

    fn parent_id(&self) -> RecordId {
        self.characteristic_id
    }
}

impl InlineOf<EventType> for EventTypeRole {
    const FK_COLUMN: &'static str = "event_type_id";

    fn parent_id(&self) -> RecordId {
        self.event_type_id
    }
}

impl InlineOf<GroupType> for GroupTypeRole {
    const FK_COLUMN: &'static str = "group_type_id";

    fn parent_id(&self) -> RecordId {
        self.group_type_id
    }
}

impl InlineOf<Place> for PlacePart {
    const FK_COLUMN: &'static str = "place_id";

    fn parent_id(&self) -> RecordId {
        self.place_id
    }
}

/// Section of the admin index an entity is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminGroup {
    Administrative,
    Evidence,
    Conclusions,
}

impl AdminGroup {
    pub const ALL: [AdminGroup; 3] = [Self::Administrative, Self::Evidence, Self::Conclusions];

    pub fn label(self) -> &'static str {
        match self {
            Self::Administrative => "Administrative",
            Self::Evidence => "Evidence",
            Self::Conclusions => "Conclusions",
        }
    }
}

impl Display for AdminGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inline child shown on a parent form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSpec {
    pub child: EntityKind,
    pub fk_column: &'static str,
    pub extra: u8,
}

const fn inline<P: Record, C: InlineOf<P>>(child: EntityKind) -> InlineSpec {
    InlineSpec {
        child,
        fk_column: C::FK_COLUMN,
        extra: C::EXTRA,
    }
}

const RESEARCHER_INLINES: &[InlineSpec] =
    &[inline::<Researcher, ResearcherProject>(EntityKind::ResearcherProject)];
const PROJECT_INLINES: &[InlineSpec] =
    &[inline::<Project, ResearcherProject>(EntityKind::ResearcherProject)];
const SURETY_SCHEME_INLINES: &[InlineSpec] =
    &[inline::<SuretyScheme, SuretySchemePart>(EntityKind::SuretySchemePart)];
const REPOSITORY_INLINES: &[InlineSpec] =
    &[inline::<Repository, RepositorySource>(EntityKind::RepositorySource)];
const SOURCE_INLINES: &[InlineSpec] = &[
    inline::<Source, RepositorySource>(EntityKind::RepositorySource),
    inline::<Source, CitationPart>(EntityKind::CitationPart),
];
const ASSERTION_INLINES: &[InlineSpec] =
    &[inline::<Assertion, AssertionAssertion>(EntityKind::AssertionAssertion)];
const CHARACTERISTIC_INLINES: &[InlineSpec] =
    &[inline::<Characteristic, CharacteristicPart>(EntityKind::CharacteristicPart)];
const EVENT_TYPE_INLINES: &[InlineSpec] =
    &[inline::<EventType, EventTypeRole>(EntityKind::EventTypeRole)];
const GROUP_TYPE_INLINES: &[InlineSpec] =
    &[inline::<GroupType, GroupTypeRole>(EntityKind::GroupTypeRole)];
const PLACE_INLINES: &[InlineSpec] = &[inline::<Place, PlacePart>(EntityKind::PlacePart)];

const RESEARCH_OBJECTIVE_FILTERS: &[LinkTable] = &[RESEARCH_OBJECTIVE_ACTIVITIES];

/// Every entity the admin layer can edit.
///
/// Activities are exposed through their two concrete subtypes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Researcher,
    Project,
    ResearcherProject,
    SuretyScheme,
    SuretySchemePart,
    AdministrativeTask,
    Search,
    ResearchObjective,
    SourceGroup,
    Source,
    Repository,
    RepositorySource,
    Representation,
    RepresentationType,
    CitationPart,
    CitationPartType,
    Assertion,
    AssertionAssertion,
    Characteristic,
    CharacteristicPart,
    CharacteristicPartType,
    Event,
    EventType,
    EventTypeRole,
    Group,
    GroupType,
    GroupTypeRole,
    Persona,
    Place,
    PlacePart,
    PlacePartType,
}

impl EntityKind {
    pub const ALL: [EntityKind; 31] = [
        Self::Researcher,
        Self::Project,
        Self::ResearcherProject,
        Self::SuretyScheme,
        Self::SuretySchemePart,
        Self::AdministrativeTask,
        Self::Search,
        Self::ResearchObjective,
        Self::SourceGroup,
        Self::Source,
        Self::Repository,
        Self::RepositorySource,
        Self::Representation,
        Self::RepresentationType,
        Self::CitationPart,
        Self::CitationPartType,
        Self::Assertion,
        Self::AssertionAssertion,
        Self::Characteristic,
        Self::CharacteristicPart,
        Self::CharacteristicPartType,
        Self::Event,
        Self::EventType,
        Self::EventTypeRole,
        Self::Group,
        Self::GroupType,
        Self::GroupTypeRole,
        Self::Persona,
        Self::Place,
        Self::PlacePart,
        Self::PlacePartType,
    ];

    /// Stable snake_case name used by command-line surfaces.
    pub fn name(self) -> &'static str {
        match self {
            Self::Researcher => "researcher",
            Self::Project => "project",
            Self::ResearcherProject => "researcher_project",
            Self::SuretyScheme => "surety_scheme",
            Self::SuretySchemePart => "surety_scheme_part",
            Self::AdministrativeTask => "administrative_task",
            Self::Search => "search",
            Self::ResearchObjective => "research_objective",
            Self::SourceGroup => "source_group",
            Self::Source => "source",
            Self::Repository => "repository",
            Self::RepositorySource => "repository_source",
            Self::Representation => "representation",
            Self::RepresentationType => "representation_type",
            Self::CitationPart => "citation_part",
            Self::CitationPartType => "citation_part_type",
            Self::Assertion => "assertion",
            Self::AssertionAssertion => "assertion_assertion",
            Self::Characteristic => "characteristic",
            Self::CharacteristicPart => "characteristic_part",
            Self::CharacteristicPartType => "characteristic_part_type",
            Self::Event => "event",
            Self::EventType => "event_type",
            Self::EventTypeRole => "event_type_role",
            Self::Group => "group",
            Self::GroupType => "group_type",
            Self::GroupTypeRole => "group_type_role",
            Self::Persona => "persona",
            Self::Place => "place",
            Self::PlacePart => "place_part",
            Self::PlacePartType => "place_part_type",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
    }

    pub fn group(self) -> AdminGroup {
        match self {
            Self::Researcher
            | Self::Project
            | Self::ResearcherProject
            | Self::SuretyScheme
            | Self::SuretySchemePart
            | Self::AdministrativeTask
            | Self::Search
            | Self::ResearchObjective
            | Self::SourceGroup => AdminGroup::Administrative,
            Self::Source
            | Self::Repository
            | Self::RepositorySource
            | Self::Representation
            | Self::RepresentationType
            | Self::CitationPart
            | Self::CitationPartType => AdminGroup::Evidence,
            _ => AdminGroup::Conclusions,
        }
    }

    pub fn verbose_name_plural(self) -> &'static str {
        match self {
            Self::Researcher => "researchers",
            Self::Project => "projects",
            Self::ResearcherProject => "researcher projects",
            Self::SuretyScheme => "surety schemes",
            Self::SuretySchemePart => "surety scheme parts",
            Self::AdministrativeTask => "administrative tasks",
            Self::Search => "searches",
            Self::ResearchObjective => "research objectives",
            Self::SourceGroup => "source groups",
            Self::Source => "sources",
            Self::Repository => "repositories",
            Self::RepositorySource => "repository sources",
            Self::Representation => "representations",
            Self::RepresentationType => "representation types",
            Self::CitationPart => "citation parts",
            Self::CitationPartType => "citation part types",
            Self::Assertion => "assertions",
            Self::AssertionAssertion => "assertion assertions",
            Self::Characteristic => "characteristics",
            Self::CharacteristicPart => "characteristic parts",
            Self::CharacteristicPartType => "characteristic part types",
            Self::Event => "events",
            Self::EventType => "event types",
            Self::EventTypeRole => "event type roles",
            Self::Group => "groups",
            Self::GroupType => "group types",
            Self::GroupTypeRole => "group type roles",
            Self::Persona => "personas",
            Self::Place => "places",
            Self::PlacePart => "place parts",
            Self::PlacePartType => "place part types",
        }
    }

    /// Whether the entity has its own page on the admin index. Unregistered
    /// entities are edited inline on a parent form.
    pub fn is_registered(self) -> bool {
        !matches!(
            self,
            Self::ResearcherProject
                | Self::SuretySchemePart
                | Self::RepositorySource
                | Self::CitationPart
                | Self::AssertionAssertion
                | Self::CharacteristicPart
                | Self::EventTypeRole
                | Self::GroupTypeRole
                | Self::PlacePart
        )
    }

    pub fn inlines(self) -> &'static [InlineSpec] {
        match self {
            Self::Researcher => RESEARCHER_INLINES,
            Self::Project => PROJECT_INLINES,
            Self::SuretyScheme => SURETY_SCHEME_INLINES,
            Self::Repository => REPOSITORY_INLINES,
            Self::Source => SOURCE_INLINES,
            Self::Assertion => ASSERTION_INLINES,
            Self::Characteristic => CHARACTERISTIC_INLINES,
            Self::EventType => EVENT_TYPE_INLINES,
            Self::GroupType => GROUP_TYPE_INLINES,
            Self::Place => PLACE_INLINES,
            _ => &[],
        }
    }

    /// Many-to-many fields edited with a two-pane picker.
    pub fn filter_horizontal(self) -> &'static [LinkTable] {
        match self {
            Self::ResearchObjective => RESEARCH_OBJECTIVE_FILTERS,
            _ => &[],
        }
    }

    /// Registered entities of one group, in registration order.
    pub fn registered_in(group: AdminGroup) -> Vec<EntityKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_registered() && kind.group() == group)
            .collect()
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
