//! Row mappings for evidence records.

use crate::model::evidence::{
    CitationPart, CitationPartType, Repository, RepositorySource, Representation,
    RepresentationType, Source,
};
use crate::model::RecordId;
use crate::repo::record_repo::{
    date_value, id_value, opt_id_value, opt_text_value, read_date, read_id, read_opt_id,
    text_value, Record, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::Row;

impl Record for Source {
    const ENTITY: &'static str = "source";
    const TABLE: &'static str = "sources";
    const COLUMNS: &'static [&'static str] = &[
        "higher_source_id",
        "subject_place_id",
        "jurisdiction_place_id",
        "researcher_id",
        "subject_date_start",
        "subject_date_end",
        "comment",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            opt_id_value(self.higher_source_id),
            id_value(self.subject_place_id),
            id_value(self.jurisdiction_place_id),
            id_value(self.researcher_id),
            date_value(self.subject_date_start),
            date_value(self.subject_date_end),
            text_value(&self.comment),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            higher_source_id: read_opt_id(row, Self::TABLE, "higher_source_id")?,
            subject_place_id: read_id(row, Self::TABLE, "subject_place_id")?,
            jurisdiction_place_id: read_id(row, Self::TABLE, "jurisdiction_place_id")?,
            researcher_id: read_id(row, Self::TABLE, "researcher_id")?,
            subject_date_start: read_date(row, Self::TABLE, "subject_date_start")?,
            subject_date_end: read_date(row, Self::TABLE, "subject_date_end")?,
            comment: row.get("comment")?,
        })
    }
}

impl Record for Repository {
    const ENTITY: &'static str = "repository";
    const TABLE: &'static str = "repositories";
    const COLUMNS: &'static [&'static str] =
        &["place_id", "name", "address", "phone", "hours", "comments"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.place_id),
            text_value(&self.name),
            text_value(&self.address),
            text_value(&self.phone),
            text_value(&self.hours),
            text_value(&self.comments),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            place_id: read_id(row, Self::TABLE, "place_id")?,
            name: row.get("name")?,
            address: row.get("address")?,
            phone: row.get("phone")?,
            hours: row.get("hours")?,
            comments: row.get("comments")?,
        })
    }
}

impl Record for RepositorySource {
    const ENTITY: &'static str = "repository source";
    const TABLE: &'static str = "repository_sources";
    const COLUMNS: &'static [&'static str] = &[
        "repository_id",
        "source_id",
        "search_id",
        "call_number",
        "description",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.repository_id),
            id_value(self.source_id),
            opt_id_value(self.search_id),
            text_value(&self.call_number),
            text_value(&self.description),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            repository_id: read_id(row, Self::TABLE, "repository_id")?,
            source_id: read_id(row, Self::TABLE, "source_id")?,
            search_id: read_opt_id(row, Self::TABLE, "search_id")?,
            call_number: row.get("call_number")?,
            description: row.get("description")?,
        })
    }
}

impl Record for RepresentationType {
    const ENTITY: &'static str = "representation type";
    const TABLE: &'static str = "representation_types";
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

impl Record for Representation {
    const ENTITY: &'static str = "representation";
    const TABLE: &'static str = "representations";
    const COLUMNS: &'static [&'static str] = &[
        "source_id",
        "representation_type_id",
        "physical_file_code",
        "medium",
        "content_path",
        "comments",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.source_id),
            id_value(self.representation_type_id),
            text_value(&self.physical_file_code),
            text_value(&self.medium),
            opt_text_value(self.content_path.as_deref()),
            text_value(&self.comments),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            source_id: read_id(row, Self::TABLE, "source_id")?,
            representation_type_id: read_id(row, Self::TABLE, "representation_type_id")?,
            physical_file_code: row.get("physical_file_code")?,
            medium: row.get("medium")?,
            content_path: row.get("content_path")?,
            comments: row.get("comments")?,
        })
    }
}

impl Record for CitationPartType {
    const ENTITY: &'static str = "citation part type";
    const TABLE: &'static str = "citation_part_types";
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

impl Record for CitationPart {
    const ENTITY: &'static str = "citation part";
    const TABLE: &'static str = "citation_parts";
    const COLUMNS: &'static [&'static str] = &["source_id", "citation_part_type_id", "value"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.source_id),
            id_value(self.citation_part_type_id),
            text_value(&self.value),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            source_id: read_id(row, Self::TABLE, "source_id")?,
            citation_part_type_id: read_id(row, Self::TABLE, "citation_part_type_id")?,
            value: row.get("value")?,
        })
    }
}
