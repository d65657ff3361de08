//! Row mappings for conclusion records and places.

use crate::model::conclusions::{
    Assertion, AssertionAssertion, AssertionSubject, Characteristic, CharacteristicPart,
    CharacteristicPartType, Event, EventType, EventTypeRole, Group, GroupType, GroupTypeRole,
    Persona, Place, PlacePart, PlacePartType,
};
use crate::model::RecordId;
use crate::repo::record_repo::{
    bool_value, date_value, id_value, opt_date_value, opt_id_value, parse_uuid, read_bool,
    read_date, read_id, read_opt_date, read_opt_id, read_sort_order, read_u16, sort_order_value,
    text_value, uint_value, Record, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::Row;

fn subject_values(subject: Option<AssertionSubject>) -> [Value; 2] {
    match subject {
        Some(subject) => [text_value(subject.code()), id_value(subject.id())],
        None => [Value::Null, Value::Null],
    }
}

fn read_subject(
    row: &Row<'_>,
    type_column: &str,
    id_column: &str,
) -> RepoResult<Option<AssertionSubject>> {
    let code: Option<String> = row.get(type_column)?;
    let id: Option<String> = row.get(id_column)?;
    match (code, id) {
        (None, None) => Ok(None),
        (Some(code), Some(id)) => {
            let id = parse_uuid(&id, Assertion::TABLE, id_column)?;
            AssertionSubject::from_code(&code, id).map(Some).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid subject type `{code}` in {}.{type_column}",
                    Assertion::TABLE
                ))
            })
        }
        _ => Err(RepoError::InvalidData(format!(
            "half-set subject in {}.{type_column}/{id_column}",
            Assertion::TABLE
        ))),
    }
}

impl Record for Assertion {
    const ENTITY: &'static str = "assertion";
    const TABLE: &'static str = "assertions";
    const COLUMNS: &'static [&'static str] = &[
        "surety_scheme_part_id",
        "researcher_id",
        "source_id",
        "subject1_type",
        "subject1_id",
        "subject2_type",
        "subject2_id",
        "value_role",
        "rationale",
        "disproved",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        let mut values = vec![
            opt_id_value(self.surety_scheme_part_id),
            id_value(self.researcher_id),
            opt_id_value(self.source_id),
        ];
        values.extend(subject_values(self.subject1));
        values.extend(subject_values(self.subject2));
        values.push(text_value(&self.value_role));
        values.push(text_value(&self.rationale));
        values.push(bool_value(self.disproved));
        values
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            surety_scheme_part_id: read_opt_id(row, Self::TABLE, "surety_scheme_part_id")?,
            researcher_id: read_id(row, Self::TABLE, "researcher_id")?,
            source_id: read_opt_id(row, Self::TABLE, "source_id")?,
            subject1: read_subject(row, "subject1_type", "subject1_id")?,
            subject2: read_subject(row, "subject2_type", "subject2_id")?,
            value_role: row.get("value_role")?,
            rationale: row.get("rationale")?,
            disproved: read_bool(row, Self::TABLE, "disproved")?,
        })
    }
}

impl Record for AssertionAssertion {
    const ENTITY: &'static str = "assertion link";
    const TABLE: &'static str = "assertion_assertions";
    const COLUMNS: &'static [&'static str] =
        &["assertion_low_id", "assertion_high_id", "sequence_number"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.assertion_low_id),
            id_value(self.assertion_high_id),
            uint_value(self.sequence_number),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            assertion_low_id: read_id(row, Self::TABLE, "assertion_low_id")?,
            assertion_high_id: read_id(row, Self::TABLE, "assertion_high_id")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
        })
    }
}

impl Record for Persona {
    const ENTITY: &'static str = "persona";
    const TABLE: &'static str = "personas";
    const COLUMNS: &'static [&'static str] = &["name", "description_comments"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            text_value(&self.description_comments),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            description_comments: row.get("description_comments")?,
        })
    }
}

impl Record for EventType {
    const ENTITY: &'static str = "event type";
    const TABLE: &'static str = "event_types";
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

impl Record for EventTypeRole {
    const ENTITY: &'static str = "event type role";
    const TABLE: &'static str = "event_type_roles";
    const COLUMNS: &'static [&'static str] = &["event_type_id", "name"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![id_value(self.event_type_id), text_value(&self.name)]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            event_type_id: read_id(row, Self::TABLE, "event_type_id")?,
            name: row.get("name")?,
        })
    }
}

impl Record for Event {
    const ENTITY: &'static str = "event";
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] =
        &["event_type_id", "place_id", "name", "date_start", "date_end"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.event_type_id),
            id_value(self.place_id),
            text_value(&self.name),
            date_value(self.date_start),
            date_value(self.date_end),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            event_type_id: read_id(row, Self::TABLE, "event_type_id")?,
            place_id: read_id(row, Self::TABLE, "place_id")?,
            name: row.get("name")?,
            date_start: read_date(row, Self::TABLE, "date_start")?,
            date_end: read_date(row, Self::TABLE, "date_end")?,
        })
    }
}

impl Record for CharacteristicPartType {
    const ENTITY: &'static str = "characteristic part type";
    const TABLE: &'static str = "characteristic_part_types";
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

impl Record for Characteristic {
    const ENTITY: &'static str = "characteristic";
    const TABLE: &'static str = "characteristics";
    const COLUMNS: &'static [&'static str] = &["place_id", "date_start", "date_end", "sort_order"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.place_id),
            date_value(self.date_start),
            date_value(self.date_end),
            sort_order_value(self.sort_order),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            place_id: read_id(row, Self::TABLE, "place_id")?,
            date_start: read_date(row, Self::TABLE, "date_start")?,
            date_end: read_date(row, Self::TABLE, "date_end")?,
            sort_order: read_sort_order(row, Self::TABLE, "sort_order")?,
        })
    }
}

impl Record for CharacteristicPart {
    const ENTITY: &'static str = "characteristic part";
    const TABLE: &'static str = "characteristic_parts";
    const COLUMNS: &'static [&'static str] = &[
        "characteristic_id",
        "characteristic_part_type_id",
        "name",
        "sequence_number",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.characteristic_id),
            id_value(self.characteristic_part_type_id),
            text_value(&self.name),
            uint_value(self.sequence_number),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            characteristic_id: read_id(row, Self::TABLE, "characteristic_id")?,
            characteristic_part_type_id: read_id(row, Self::TABLE, "characteristic_part_type_id")?,
            name: row.get("name")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
        })
    }
}

impl Record for GroupType {
    const ENTITY: &'static str = "group type";
    const TABLE: &'static str = "group_types";
    const COLUMNS: &'static [&'static str] = &["name", "sort_order"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![text_value(&self.name), sort_order_value(self.sort_order)]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            sort_order: read_sort_order(row, Self::TABLE, "sort_order")?,
        })
    }
}

impl Record for GroupTypeRole {
    const ENTITY: &'static str = "group type role";
    const TABLE: &'static str = "group_type_roles";
    const COLUMNS: &'static [&'static str] = &["group_type_id", "name", "sequence_number"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.group_type_id),
            text_value(&self.name),
            uint_value(self.sequence_number),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            group_type_id: read_id(row, Self::TABLE, "group_type_id")?,
            name: row.get("name")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
        })
    }
}

impl Record for Group {
    const ENTITY: &'static str = "group";
    const TABLE: &'static str = "person_groups";
    const COLUMNS: &'static [&'static str] = &[
        "group_type_id",
        "place_id",
        "name",
        "date_start",
        "date_end",
        "criteria",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.group_type_id),
            opt_id_value(self.place_id),
            text_value(&self.name),
            date_value(self.date_start),
            date_value(self.date_end),
            text_value(&self.criteria),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            group_type_id: read_id(row, Self::TABLE, "group_type_id")?,
            place_id: read_opt_id(row, Self::TABLE, "place_id")?,
            name: row.get("name")?,
            date_start: read_date(row, Self::TABLE, "date_start")?,
            date_end: read_date(row, Self::TABLE, "date_end")?,
            criteria: row.get("criteria")?,
        })
    }
}

impl Record for Place {
    const ENTITY: &'static str = "place";
    const TABLE: &'static str = "places";
    const COLUMNS: &'static [&'static str] =
        &["existence_date_start", "existence_date_end", "sort_order"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            opt_date_value(self.existence_date_start),
            opt_date_value(self.existence_date_end),
            sort_order_value(self.sort_order),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            existence_date_start: read_opt_date(row, Self::TABLE, "existence_date_start")?,
            existence_date_end: read_opt_date(row, Self::TABLE, "existence_date_end")?,
            sort_order: read_sort_order(row, Self::TABLE, "sort_order")?,
        })
    }
}

impl Record for PlacePartType {
    const ENTITY: &'static str = "place part type";
    const TABLE: &'static str = "place_part_types";
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

impl Record for PlacePart {
    const ENTITY: &'static str = "place part";
    const TABLE: &'static str = "place_parts";
    const COLUMNS: &'static [&'static str] =
        &["place_part_type_id", "place_id", "name", "sequence_number"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.place_part_type_id),
            id_value(self.place_id),
            text_value(&self.name),
            uint_value(self.sequence_number),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            place_part_type_id: read_id(row, Self::TABLE, "place_part_type_id")?,
            place_id: read_id(row, Self::TABLE, "place_id")?,
            name: row.get("name")?,
            sequence_number: read_u16(row, Self::TABLE, "sequence_number")?,
        })
    }
}
