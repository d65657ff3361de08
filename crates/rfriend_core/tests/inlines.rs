use chrono::NaiveDate;
use rfriend_core::db::open_db_in_memory;
use rfriend_core::model::administrative::{
    Project, Researcher, ResearcherProject, SuretyScheme, SuretySchemePart,
};
use rfriend_core::model::conclusions::{Assertion, AssertionAssertion, Place, PlacePart, PlacePartType};
use rfriend_core::model::evidence::{
    CitationPart, CitationPartType, Repository, RepositorySource, Source,
};
use rfriend_core::{
    AdminError, AdminService, RepoError, SortOrder, SqliteRecordRepository, ValidationError,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> AdminService<SqliteRecordRepository<'_>> {
    AdminService::new(SqliteRecordRepository::try_new(conn).unwrap())
}

#[test]
fn saving_a_new_parent_with_children_writes_everything() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let scheme = SuretyScheme::new("Three level");
    let parts = vec![
        SuretySchemePart::new(scheme.id, "3", 3),
        SuretySchemePart::new(scheme.id, "2", 2),
        SuretySchemePart::new(scheme.id, "1", 1),
    ];
    admin.save_with_inlines(&scheme, &parts).unwrap();

    let stored: Vec<SuretySchemePart> = admin
        .list_inlines::<SuretyScheme, SuretySchemePart>(scheme.id)
        .unwrap();
    assert_eq!(stored, parts);
    assert_eq!(admin.require::<SuretyScheme>(scheme.id).unwrap(), scheme);
}

#[test]
fn saving_replaces_the_child_set() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let part_type = PlacePartType::new("Jurisdiction");
    admin.create(&part_type).unwrap();
    let mut place = Place::new(SortOrder::Ascending);
    let county = PlacePart::new(place.id, part_type.id, "Franklin County", 2);
    let state = PlacePart::new(place.id, part_type.id, "Ohio", 1);
    admin
        .save_with_inlines(&place, &[county.clone(), state.clone()])
        .unwrap();

    place.sort_order = SortOrder::Descending;
    let mut renamed = state.clone();
    renamed.name = "State of Ohio".to_string();
    let city = PlacePart::new(place.id, part_type.id, "Columbus", 3);
    admin
        .save_with_inlines(&place, &[renamed.clone(), city.clone()])
        .unwrap();

    let stored: Vec<PlacePart> = admin.list_inlines::<Place, PlacePart>(place.id).unwrap();
    assert_eq!(stored, vec![renamed, city]);
    assert!(admin.get::<PlacePart>(county.id).unwrap().is_none());
    assert_eq!(
        admin.require::<Place>(place.id).unwrap().sort_order,
        SortOrder::Descending
    );
}

#[test]
fn failing_child_rolls_back_the_whole_save() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let researcher = Researcher::new("Ada");
    let project = Project::new("Smith family");
    admin.create(&project).unwrap();
    let membership = ResearcherProject::new(researcher.id, project.id).with_role("lead");
    admin
        .save_with_inlines(&researcher, std::slice::from_ref(&membership))
        .unwrap();

    let mut renamed = researcher.clone();
    renamed.name = "Ada Renamed".to_string();
    let orphan = ResearcherProject::new(researcher.id, uuid::Uuid::new_v4());
    let err = admin
        .save_with_inlines(&renamed, &[orphan])
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::Repo(RepoError::ForeignKeyViolation {
            entity: "researcher project"
        })
    ));

    assert_eq!(admin.require::<Researcher>(researcher.id).unwrap().name, "Ada");
    let memberships: Vec<ResearcherProject> = admin
        .list_inlines::<Researcher, ResearcherProject>(researcher.id)
        .unwrap();
    assert_eq!(memberships, vec![membership]);
}

#[test]
fn invalid_child_is_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let scheme = SuretyScheme::new("Letters");
    let err = admin
        .save_with_inlines(&scheme, &[SuretySchemePart::new(scheme.id, "AB", 1)])
        .unwrap_err();

    assert!(matches!(
        err,
        AdminError::Repo(RepoError::Validation(ValidationError::TooLong { max: 1, .. }))
    ));
    assert!(admin.get::<SuretyScheme>(scheme.id).unwrap().is_none());
}

#[test]
fn shared_inline_is_scoped_by_the_parent_it_is_edited_from() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let first = Researcher::new("Ada");
    let second = Researcher::new("Grace");
    admin.create(&first).unwrap();
    admin.create(&second).unwrap();
    let project = Project::new("Smith family");
    let memberships = vec![
        ResearcherProject::new(first.id, project.id),
        ResearcherProject::new(second.id, project.id),
    ];
    admin.save_with_inlines(&project, &memberships).unwrap();

    let on_first: Vec<ResearcherProject> = admin
        .list_inlines::<Researcher, ResearcherProject>(first.id)
        .unwrap();
    assert_eq!(on_first, vec![memberships[0].clone()]);

    // Saving the researcher form with no memberships drops only its own row.
    admin
        .save_with_inlines::<Researcher, ResearcherProject>(&first, &[])
        .unwrap();
    let on_project: Vec<ResearcherProject> = admin
        .list_inlines::<Project, ResearcherProject>(project.id)
        .unwrap();
    assert_eq!(on_project, vec![memberships[1].clone()]);
}

#[test]
fn source_form_edits_pairings_and_citation_parts_independently() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let place = Place::new(SortOrder::Ascending);
    admin.create(&place).unwrap();
    let researcher = Researcher::new("Ada");
    admin.create(&researcher).unwrap();
    let repository = Repository::new(place.id, "County Archive");
    admin.create(&repository).unwrap();
    let page = CitationPartType::new("Page");
    admin.create(&page).unwrap();

    let date = NaiveDate::from_ymd_opt(1850, 1, 1).unwrap();
    let source = Source::new(place.id, place.id, researcher.id, date, date);
    let pairing = RepositorySource::new(repository.id, source.id).with_call_number("A-12");
    admin
        .save_with_inlines(&source, std::slice::from_ref(&pairing))
        .unwrap();
    let citation = CitationPart::new(source.id, page.id, "p. 4");
    admin
        .save_with_inlines(&source, std::slice::from_ref(&citation))
        .unwrap();

    let pairings: Vec<RepositorySource> = admin
        .list_inlines::<Source, RepositorySource>(source.id)
        .unwrap();
    assert_eq!(pairings, vec![pairing.clone()]);
    let from_repository: Vec<RepositorySource> = admin
        .list_inlines::<Repository, RepositorySource>(repository.id)
        .unwrap();
    assert_eq!(from_repository, vec![pairing]);
    let citations: Vec<CitationPart> = admin
        .list_inlines::<Source, CitationPart>(source.id)
        .unwrap();
    assert_eq!(citations, vec![citation]);
}

#[test]
fn assertion_links_are_listed_on_the_output_assertion() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let researcher = Researcher::new("Ada");
    admin.create(&researcher).unwrap();
    let input = Assertion::new(researcher.id, "census lists John, 10");
    admin.create(&input).unwrap();
    let output = Assertion::new(researcher.id, "John born about 1840");
    let link = AssertionAssertion::new(input.id, output.id, 1);
    admin
        .save_with_inlines(&output, std::slice::from_ref(&link))
        .unwrap();

    let on_output: Vec<AssertionAssertion> = admin
        .list_inlines::<Assertion, AssertionAssertion>(output.id)
        .unwrap();
    assert_eq!(on_output, vec![link]);
    let on_input: Vec<AssertionAssertion> = admin
        .list_inlines::<Assertion, AssertionAssertion>(input.id)
        .unwrap();
    assert!(on_input.is_empty());
}

#[test]
fn child_pointing_at_another_parent_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let scheme = SuretyScheme::new("Three level");
    let other = SuretyScheme::new("Other");
    admin.create(&other).unwrap();
    let stray = SuretySchemePart::new(other.id, "1", 1);

    assert!(matches!(
        admin.save_with_inlines(&scheme, &[stray]),
        Err(AdminError::InlineParentMismatch {
            entity: "surety scheme part",
            ..
        })
    ));
}

#[test]
fn child_stored_under_another_parent_is_not_moved() {
    let conn = open_db_in_memory().unwrap();
    let admin = service(&conn);

    let part_type = PlacePartType::new("Jurisdiction");
    admin.create(&part_type).unwrap();
    let home = Place::new(SortOrder::Ascending);
    let other = Place::new(SortOrder::Ascending);
    admin.create(&other).unwrap();
    let ohio = PlacePart::new(other.id, part_type.id, "Ohio", 1);
    admin.create(&ohio).unwrap();

    let mut claimed = ohio.clone();
    claimed.place_id = home.id;
    let err = admin
        .save_with_inlines(&home, std::slice::from_ref(&claimed))
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::InlineParentMismatch {
            entity: "place part",
            child_id,
            expected_parent_id,
            actual_parent_id,
        } if child_id == ohio.id && expected_parent_id == home.id && actual_parent_id == other.id
    ));

    assert!(admin.get::<Place>(home.id).unwrap().is_none());
    assert_eq!(admin.require::<PlacePart>(ohio.id).unwrap(), ohio);
    let on_other: Vec<PlacePart> = admin.list_inlines::<Place, PlacePart>(other.id).unwrap();
    assert_eq!(on_other, vec![ohio]);
}
