//! Command handlers.
//!
//! Every record command is dispatched to a handler typed by the entity's
//! model struct. Activities go through the activity service so the stored
//! typecode always matches the entity named on the command line.

use crate::cli::PageArgs;
use anyhow::{bail, Context};
use rfriend_core::db::migrations::{current_version, latest_version};
use rfriend_core::db::Connection;
use rfriend_core::model::administrative::{
    Activity, Project, ResearchObjective, Researcher, ResearcherProject, SourceGroup,
    SuretyScheme, SuretySchemePart, ADMINISTRATIVE_TASK_TYPECODE, SEARCH_TYPECODE,
};
use rfriend_core::model::conclusions::{
    Assertion, AssertionAssertion, Characteristic, CharacteristicPart, CharacteristicPartType,
    Event, EventType, EventTypeRole, Group, GroupType, GroupTypeRole, Persona, Place, PlacePart,
    PlacePartType,
};
use rfriend_core::model::evidence::{
    CitationPart, CitationPartType, Repository, RepositorySource, Representation,
    RepresentationType, Source,
};
use rfriend_core::{
    admin, ActivityService, AdminGroup, AdminService, EntityKind, ListQuery, PlaceService, Record,
    SqliteActivityRepository, SqliteRecordRepository,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// One record-level command, independent of the entity it targets.
#[derive(Debug)]
pub enum RecordAction {
    List(PageArgs),
    Show(Uuid),
    Add(String),
    Update(String),
    Delete(Uuid),
}

pub fn init(conn: &Connection) -> anyhow::Result<()> {
    println!(
        "schema_version={} latest={}",
        current_version(conn)?,
        latest_version()
    );
    Ok(())
}

pub fn models() {
    println!("{}", admin::SITE_HEADER);
    println!("{}", admin::INDEX_TITLE);
    for group in AdminGroup::ALL {
        println!();
        println!("{group}");
        for kind in EntityKind::registered_in(group) {
            println!("  {}", describe_entity(kind));
        }
    }
}

fn describe_entity(kind: EntityKind) -> String {
    let mut line = format!("{:<26} {}", kind.name(), kind.verbose_name_plural());
    let inlines = kind
        .inlines()
        .iter()
        .map(|inline| inline.child.name())
        .collect::<Vec<_>>();
    if !inlines.is_empty() {
        line.push_str(&format!(" inlines=[{}]", inlines.join(", ")));
    }
    let filters = kind
        .filter_horizontal()
        .iter()
        .map(|link| link.name)
        .collect::<Vec<_>>();
    if !filters.is_empty() {
        line.push_str(&format!(" filter_horizontal=[{}]", filters.join(", ")));
    }
    line
}

pub fn place(conn: &Connection, id: Uuid) -> anyhow::Result<()> {
    let service = PlaceService::new(SqliteRecordRepository::try_new(conn)?);
    println!("{}", service.display_name(id)?);
    Ok(())
}

pub fn record(conn: &Connection, entity: EntityKind, action: RecordAction) -> anyhow::Result<()> {
    match entity {
        EntityKind::AdministrativeTask => {
            run_activity(conn, ADMINISTRATIVE_TASK_TYPECODE, action)
        }
        EntityKind::Search => run_activity(conn, SEARCH_TYPECODE, action),
        EntityKind::Researcher => run_record::<Researcher>(conn, action),
        EntityKind::Project => run_record::<Project>(conn, action),
        EntityKind::ResearcherProject => run_record::<ResearcherProject>(conn, action),
        EntityKind::SuretyScheme => run_record::<SuretyScheme>(conn, action),
        EntityKind::SuretySchemePart => run_record::<SuretySchemePart>(conn, action),
        EntityKind::ResearchObjective => run_record::<ResearchObjective>(conn, action),
        EntityKind::SourceGroup => run_record::<SourceGroup>(conn, action),
        EntityKind::Source => run_record::<Source>(conn, action),
        EntityKind::Repository => run_record::<Repository>(conn, action),
        EntityKind::RepositorySource => run_record::<RepositorySource>(conn, action),
        EntityKind::Representation => run_record::<Representation>(conn, action),
        EntityKind::RepresentationType => run_record::<RepresentationType>(conn, action),
        EntityKind::CitationPart => run_record::<CitationPart>(conn, action),
        EntityKind::CitationPartType => run_record::<CitationPartType>(conn, action),
        EntityKind::Assertion => run_record::<Assertion>(conn, action),
        EntityKind::AssertionAssertion => run_record::<AssertionAssertion>(conn, action),
        EntityKind::Characteristic => run_record::<Characteristic>(conn, action),
        EntityKind::CharacteristicPart => run_record::<CharacteristicPart>(conn, action),
        EntityKind::CharacteristicPartType => run_record::<CharacteristicPartType>(conn, action),
        EntityKind::Event => run_record::<Event>(conn, action),
        EntityKind::EventType => run_record::<EventType>(conn, action),
        EntityKind::EventTypeRole => run_record::<EventTypeRole>(conn, action),
        EntityKind::Group => run_record::<Group>(conn, action),
        EntityKind::GroupType => run_record::<GroupType>(conn, action),
        EntityKind::GroupTypeRole => run_record::<GroupTypeRole>(conn, action),
        EntityKind::Persona => run_record::<Persona>(conn, action),
        EntityKind::Place => run_record::<Place>(conn, action),
        EntityKind::PlacePart => run_record::<PlacePart>(conn, action),
        EntityKind::PlacePartType => run_record::<PlacePartType>(conn, action),
    }
}

fn run_record<T>(conn: &Connection, action: RecordAction) -> anyhow::Result<()>
where
    T: Record + Serialize + DeserializeOwned,
{
    let service = AdminService::new(SqliteRecordRepository::try_new(conn)?);
    match action {
        RecordAction::List(page) => print_json(&service.list::<T>(&list_query(page))?),
        RecordAction::Show(id) => print_json(&service.require::<T>(id)?),
        RecordAction::Add(json) => {
            let record: T = serde_json::from_value(parse_object(&json)?)
                .with_context(|| format!("invalid {} record", T::ENTITY))?;
            service.create(&record)?;
            print_json(&record)
        }
        RecordAction::Update(json) => {
            let value = parse_object(&json)?;
            require_id(&value)?;
            let record: T = serde_json::from_value(value)
                .with_context(|| format!("invalid {} record", T::ENTITY))?;
            service.update(&record)?;
            print_json(&record)
        }
        RecordAction::Delete(id) => {
            service.delete::<T>(id)?;
            println!("deleted {} {id}", T::ENTITY);
            Ok(())
        }
    }
}

fn run_activity(
    conn: &Connection,
    typecode: &'static str,
    action: RecordAction,
) -> anyhow::Result<()> {
    let service = ActivityService::new(SqliteActivityRepository::try_new(conn)?);
    match action {
        RecordAction::List(page) => {
            let query = list_query(page);
            let activities = if typecode == SEARCH_TYPECODE {
                service.list_searches(&query)?
            } else {
                service.list_administrative_tasks(&query)?
            };
            print_json(&activities)
        }
        RecordAction::Show(id) => print_json(&service.require_kind(typecode, id)?),
        RecordAction::Add(json) => {
            let activity = parse_activity(&json, typecode)?;
            service.create(&activity)?;
            print_json(&activity)
        }
        RecordAction::Update(json) => {
            let activity = parse_activity(&json, typecode)?;
            service.require_kind(typecode, activity.id)?;
            service.update(&activity)?;
            print_json(&activity)
        }
        RecordAction::Delete(id) => {
            service.require_kind(typecode, id)?;
            service.delete(id)?;
            println!("deleted activity {id}");
            Ok(())
        }
    }
}

/// Parses an activity, filling in the typecode of the entity named on the
/// command line and rejecting a conflicting one.
fn parse_activity(json: &str, typecode: &'static str) -> anyhow::Result<Activity> {
    let mut value = parse_object(json)?;
    if let Value::Object(object) = &mut value {
        let stored = object
            .entry("typecode")
            .or_insert_with(|| Value::String(typecode.to_string()));
        if stored.as_str() != Some(typecode) {
            bail!("record typecode {stored} does not match `{typecode}`");
        }
    }
    serde_json::from_value(value).context("invalid activity record")
}

fn parse_object(json: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(json).context("record is not valid JSON")?;
    if !value.is_object() {
        bail!("record must be a JSON object");
    }
    Ok(value)
}

fn require_id(value: &Value) -> anyhow::Result<()> {
    if value.get("id").is_none() {
        bail!("update requires the record `id`");
    }
    Ok(())
}

fn list_query(page: PageArgs) -> ListQuery {
    ListQuery {
        limit: page.limit,
        offset: page.offset,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
