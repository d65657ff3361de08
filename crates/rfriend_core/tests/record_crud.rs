use chrono::NaiveDate;
use rfriend_core::db::open_db_in_memory;
use rfriend_core::model::administrative::{Project, Researcher, SuretyScheme};
use rfriend_core::model::conclusions::{
    Assertion, AssertionSubject, GroupType, Persona, Place,
};
use rfriend_core::model::evidence::{Representation, RepresentationType, Source};
use rfriend_core::{
    AdminError, AdminService, ListQuery, RecordRepository, RepoError, SortOrder,
    SqliteRecordRepository, ValidationError,
};
use uuid::Uuid;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn create_get_update_delete_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let mut researcher = Researcher::new("Ada Example");
    researcher.comments = "prefers census records".to_string();
    let id = repo.create(&researcher).unwrap();
    assert_eq!(id, researcher.id);

    let loaded: Researcher = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded, researcher);

    researcher.name = "Ada E. Example".to_string();
    repo.update(&researcher).unwrap();
    let loaded: Researcher = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ada E. Example");

    repo.delete::<Researcher>(id).unwrap();
    assert!(repo.get::<Researcher>(id).unwrap().is_none());
    assert_eq!(repo.count::<Researcher>().unwrap(), 0);
}

#[test]
fn update_and_delete_report_missing_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let ghost = Project::new("Never saved");
    assert!(matches!(
        repo.update(&ghost),
        Err(RepoError::NotFound { entity: "project", id }) if id == ghost.id
    ));

    let missing = Uuid::new_v4();
    assert!(matches!(
        repo.delete::<Project>(missing),
        Err(RepoError::NotFound { entity: "project", id }) if id == missing
    ));
}

#[test]
fn list_follows_storage_order_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let names = ["Zeta", "Alpha", "Mu", "Beta"];
    for name in names {
        repo.create(&SuretyScheme::new(name)).unwrap();
    }

    let all: Vec<SuretyScheme> = repo.list(&ListQuery::default()).unwrap();
    let listed: Vec<_> = all.iter().map(|scheme| scheme.name.as_str()).collect();
    assert_eq!(listed, names);

    let page: Vec<SuretyScheme> = repo
        .list(&ListQuery {
            limit: Some(2),
            offset: 1,
        })
        .unwrap();
    let paged: Vec<_> = page.iter().map(|scheme| scheme.name.as_str()).collect();
    assert_eq!(paged, ["Alpha", "Mu"]);

    let tail: Vec<SuretyScheme> = repo
        .list(&ListQuery {
            limit: None,
            offset: 3,
        })
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].name, "Beta");

    assert_eq!(repo.count::<SuretyScheme>().unwrap(), 4);
}

#[test]
fn validation_runs_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let service = AdminService::new(SqliteRecordRepository::try_new(&conn).unwrap());

    let blank = Persona::new("   ", "unknown");
    assert!(matches!(
        service.create(&blank),
        Err(AdminError::Repo(RepoError::Validation(ValidationError::Blank {
            field: "name",
            ..
        })))
    ));

    let too_long = Researcher::new("x".repeat(129));
    assert!(matches!(
        service.create(&too_long),
        Err(AdminError::Repo(RepoError::Validation(ValidationError::TooLong {
            max: 128,
            actual: 129,
            ..
        })))
    ));

    assert_eq!(service.count::<Persona>().unwrap(), 0);
    assert_eq!(service.count::<Researcher>().unwrap(), 0);
}

#[test]
fn optional_fields_and_enumerations_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let mut place = Place::new(SortOrder::Descending);
    place.existence_date_start = Some(day(1803, 3, 1));
    repo.create(&place).unwrap();
    let loaded: Place = repo.get(place.id).unwrap().unwrap();
    assert_eq!(loaded.sort_order, SortOrder::Descending);
    assert_eq!(loaded.existence_date_start, Some(day(1803, 3, 1)));
    assert_eq!(loaded.existence_date_end, None);

    let mut group_type = GroupType::new("Household");
    group_type.sort_order = SortOrder::None;
    repo.create(&group_type).unwrap();
    let loaded: GroupType = repo.get(group_type.id).unwrap().unwrap();
    assert_eq!(loaded.sort_order, SortOrder::None);

    let researcher = Researcher::new("Ada");
    repo.create(&researcher).unwrap();
    let source = Source::new(place.id, place.id, researcher.id, day(1850, 1, 1), day(1850, 12, 31));
    repo.create(&source).unwrap();
    let kind = RepresentationType::new("Photocopy");
    repo.create(&kind).unwrap();

    let representation = Representation::new(source.id, kind.id, "paper");
    repo.create(&representation).unwrap();
    let loaded: Representation = repo.get(representation.id).unwrap().unwrap();
    assert_eq!(loaded.content_path, None);
    assert_eq!(loaded, representation);
}

#[test]
fn assertion_subjects_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let researcher = Researcher::new("Ada");
    repo.create(&researcher).unwrap();
    let persona = Persona::new("John Smith", "farmer in the 1850 census");
    repo.create(&persona).unwrap();

    let mut assertion = Assertion::new(researcher.id, "same household, same age")
        .about(AssertionSubject::Persona(persona.id));
    assertion.subject2 = Some(AssertionSubject::Group(Uuid::new_v4()));
    assertion.value_role = "head".to_string();
    assertion.disproved = true;
    repo.create(&assertion).unwrap();

    let loaded: Assertion = repo.get(assertion.id).unwrap().unwrap();
    assert_eq!(loaded, assertion);
    assert_eq!(loaded.subject1.map(|subject| subject.code()), Some("P"));

    let bare = Assertion::new(researcher.id, "no subject yet");
    repo.create(&bare).unwrap();
    let loaded: Assertion = repo.get(bare.id).unwrap().unwrap();
    assert_eq!(loaded.subject1, None);
    assert_eq!(loaded.subject2, None);
}

#[test]
fn corrupted_rows_are_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let place = Place::new(SortOrder::Ascending);
    repo.create(&place).unwrap();
    conn.execute(
        "UPDATE places SET existence_date_start = 'sometime' WHERE id = ?1;",
        [place.id.to_string()],
    )
    .unwrap();

    assert!(matches!(
        repo.get::<Place>(place.id),
        Err(RepoError::InvalidData(message)) if message.contains("places.existence_date_start")
    ));
}

#[test]
fn duplicate_ids_are_constraint_violations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let persona = Persona::new("Mary", "baptized 1851");
    repo.create(&persona).unwrap();
    assert!(matches!(
        repo.create(&persona),
        Err(RepoError::ConstraintViolation {
            entity: "persona",
            ..
        })
    ));
}
