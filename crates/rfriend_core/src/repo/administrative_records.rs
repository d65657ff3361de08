//! Row mappings for administrative records.

use crate::model::administrative::{
    Project, ResearchObjective, Researcher, ResearcherProject, SourceGroup, SuretyScheme,
    SuretySchemePart,
};
use crate::model::RecordId;
use crate::repo::record_repo::{
    id_value, opt_id_value, read_id, read_opt_id, read_u16, text_value, uint_value, Record,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::Row;

impl Record for Researcher {
    const ENTITY: &'static str = "researcher";
    const TABLE: &'static str = "researchers";
    const COLUMNS: &'static [&'static str] = &["name", "address_id", "comments"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            opt_id_value(self.address_id),
            text_value(&self.comments),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            address_id: read_opt_id(row, Self::TABLE, "address_id")?,
            comments: row.get("comments")?,
        })
    }
}

impl Record for Project {
    const ENTITY: &'static str = "project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "client_data", "surety_scheme_id"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            text_value(&self.description),
            text_value(&self.client_data),
            opt_id_value(self.surety_scheme_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            client_data: row.get("client_data")?,
            surety_scheme_id: read_opt_id(row, Self::TABLE, "surety_scheme_id")?,
        })
    }
}

impl Record for ResearcherProject {
    const ENTITY: &'static str = "researcher project";
    const TABLE: &'static str = "researcher_projects";
    const COLUMNS: &'static [&'static str] = &["researcher_id", "project_id", "role"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.researcher_id),
            id_value(self.project_id),
            text_value(&self.role),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            researcher_id: read_id(row, Self::TABLE, "researcher_id")?,
            project_id: read_id(row, Self::TABLE, "project_id")?,
            role: row.get("role")?,
        })
    }
}

impl Record for SuretyScheme {
    const ENTITY: &'static str = "surety scheme";
    const TABLE: &'static str = "surety_schemes";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![text_value(&self.name), text_value(&self.description)]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }
}

impl Record for SuretySchemePart {
    const ENTITY: &'static str = "surety scheme part";
    const TABLE: &'static str = "surety_scheme_parts";
    const COLUMNS: &'static [&'static str] =
        &["surety_scheme_id", "name", "description", "sequence_number"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.surety_scheme_id),
            text_value(&self.name),
            text_value(&self.description),
            uint_value(self.sequence_number),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            surety_scheme_id: read_id(row, Self::TABLE, "surety_scheme_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
        })
    }
}

impl Record for ResearchObjective {
    const ENTITY: &'static str = "research objective";
    const TABLE: &'static str = "research_objectives";
    const COLUMNS: &'static [&'static str] = &[
        "project_id",
        "name",
        "description",
        "sequence_number",
        "priority",
        "status",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.project_id),
            text_value(&self.name),
            text_value(&self.description),
            uint_value(self.sequence_number),
            uint_value(self.priority),
            text_value(&self.status),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            project_id: read_id(row, Self::TABLE, "project_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
            priority: read_u16(row, Self::TABLE, "priority")?,
            status: row.get("status")?,
        })
    }
}

impl Record for SourceGroup {
    const ENTITY: &'static str = "source group";
    const TABLE: &'static str = "source_groups";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![text_value(&self.name)]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
        })
    }
}
