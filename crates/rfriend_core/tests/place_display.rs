use chrono::NaiveDate;
use rfriend_core::db::open_db_in_memory;
use rfriend_core::model::conclusions::{
    Characteristic, CharacteristicPart, CharacteristicPartType, GroupType, GroupTypeRole, Place,
    PlacePart, PlacePartType,
};
use rfriend_core::{
    PlaceService, RecordRepository, RepoError, SortOrder, SqliteRecordRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

/// Stores a place whose parts are "County" (seq 2) then "State" (seq 1).
fn seed_place(conn: &Connection, sort_order: SortOrder) -> Uuid {
    let repo = SqliteRecordRepository::try_new(conn).unwrap();
    let part_type = PlacePartType::new("Jurisdiction");
    repo.create(&part_type).unwrap();
    let place = Place::new(sort_order);
    repo.create(&place).unwrap();
    repo.create(&PlacePart::new(place.id, part_type.id, "County", 2))
        .unwrap();
    repo.create(&PlacePart::new(place.id, part_type.id, "State", 1))
        .unwrap();
    place.id
}

fn display(conn: &Connection, place_id: Uuid) -> String {
    PlaceService::new(SqliteRecordRepository::try_new(conn).unwrap())
        .display_name(place_id)
        .unwrap()
}

#[test]
fn ascending_places_render_lowest_sequence_first() {
    let conn = open_db_in_memory().unwrap();
    let place_id = seed_place(&conn, SortOrder::Ascending);
    assert_eq!(display(&conn, place_id), "State, County");
}

#[test]
fn descending_places_render_highest_sequence_first() {
    let conn = open_db_in_memory().unwrap();
    let place_id = seed_place(&conn, SortOrder::Descending);
    assert_eq!(display(&conn, place_id), "County, State");
}

#[test]
fn unsorted_places_render_in_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let place_id = seed_place(&conn, SortOrder::None);
    assert_eq!(display(&conn, place_id), "County, State");
}

#[test]
fn equal_sequence_numbers_keep_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let part_type = PlacePartType::new("Locality");
    repo.create(&part_type).unwrap();
    let place = Place::new(SortOrder::Descending);
    repo.create(&place).unwrap();
    for (name, seq) in [("Smithville", 1), ("Mill Road", 3), ("Lot 4", 3)] {
        repo.create(&PlacePart::new(place.id, part_type.id, name, seq))
            .unwrap();
    }

    assert_eq!(display(&conn, place.id), "Mill Road, Lot 4, Smithville");
}

#[test]
fn place_without_parts_renders_empty_and_missing_place_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let place = Place::new(SortOrder::Ascending);
    repo.create(&place).unwrap();

    let service = PlaceService::new(repo);
    assert_eq!(service.display_name(place.id).unwrap(), "");
    assert!(matches!(
        service.display_name(Uuid::new_v4()),
        Err(RepoError::NotFound { entity: "place", .. })
    ));
}

#[test]
fn characteristics_and_group_roles_follow_the_same_ordering() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let place = Place::new(SortOrder::Ascending);
    repo.create(&place).unwrap();
    let date = NaiveDate::from_ymd_opt(1850, 6, 1).unwrap();
    let mut characteristic = Characteristic::new(place.id, date, date);
    characteristic.sort_order = SortOrder::Descending;
    repo.create(&characteristic).unwrap();
    let name_part = CharacteristicPartType::new("Name");
    repo.create(&name_part).unwrap();
    repo.create(&CharacteristicPart::new(characteristic.id, name_part.id, "John", 1))
        .unwrap();
    repo.create(&CharacteristicPart::new(characteristic.id, name_part.id, "Smith", 2))
        .unwrap();

    let household = GroupType::new("Household");
    repo.create(&household).unwrap();
    repo.create(&GroupTypeRole::new(household.id, "Child", 3))
        .unwrap();
    repo.create(&GroupTypeRole::new(household.id, "Head", 1))
        .unwrap();
    repo.create(&GroupTypeRole::new(household.id, "Spouse", 2))
        .unwrap();

    let service = PlaceService::new(repo);
    assert_eq!(
        service.characteristic_display(characteristic.id).unwrap(),
        "Smith, John"
    );
    let roles: Vec<_> = service
        .group_type_roles(household.id)
        .unwrap()
        .into_iter()
        .map(|role| role.name)
        .collect();
    assert_eq!(roles, ["Head", "Spouse", "Child"]);
}
