//! File-level behavior of the delimited store as seen through the facade.

use zoo_core::{DelimitedStore, Zoo};
use zoo_types::{Animal, AnimalId, AnimalKind, Settings, Species};

use crate::common::TestZoo;

#[test]
fn rows_survive_a_reload_unchanged() {
    let t = TestZoo::seeded();
    let first = t.animals_file();

    let rows: Vec<String> = t.zoo.list_animals().unwrap().iter().map(Animal::to_row).collect();
    let reparsed: Vec<String> = rows
        .iter()
        .map(|row| Animal::from_row(row).unwrap().to_row())
        .collect();
    assert_eq!(rows, reparsed);

    let expected = format!("Id,Type,Name,Weight,Extra\n{}\n", rows.join("\n"));
    assert_eq!(first, expected);
}

#[test]
fn hand_edited_ids_drive_next_id() {
    let t = TestZoo::empty();
    t.write_animals(
        "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n3,Lion,Marty,300,\n7,Penguin,Rico,14,Private\n",
    );

    assert_eq!(DelimitedStore::next_id(&t.animals_path()).unwrap(), 8);
    let added = t
        .zoo
        .add_animal(AnimalKind::Parrot, "Iago", 0.6, "Red")
        .unwrap();
    assert_eq!(added.id(), AnimalId::new(8));
}

#[test]
fn malformed_rows_are_skipped_on_load() {
    let t = TestZoo::empty();
    t.write_animals("Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n2,Lion,Marty,heavy,\n");

    let animals = t.zoo.list_animals().unwrap();
    assert_eq!(animals.len(), 1);
    assert_eq!(animals[0].name().as_str(), "Alex");
}

#[test]
fn unparseable_extras_fall_back_to_defaults() {
    let t = TestZoo::empty();
    t.write_animals("Id,Type,Name,Weight,Extra\n1,Giraffe,Melman,1200,tall\n2,Penguin,Kowalski,14\n");

    let animals = t.zoo.list_animals().unwrap();
    assert_eq!(animals[0].species(), &Species::Giraffe { neck_length: 0.0 });
    assert_eq!(animals[1].species().extra_cell(), "");
}

#[test]
fn delete_of_unknown_id_keeps_file_bytes() {
    let t = TestZoo::seeded();
    let before = t.animals_file();

    assert!(t.zoo.delete_animal(AnimalId::new(42)).unwrap().is_none());
    assert_eq!(t.animals_file(), before);
}

#[test]
fn reopening_does_not_reseed_or_reset_users() {
    let t = TestZoo::seeded();
    t.zoo.register("kim", "pw").unwrap();
    t.zoo.delete_animal(AnimalId::new(1)).unwrap();

    let settings = Settings {
        paths: t.zoo.store().paths().clone(),
        seed_demo_data: true,
    };
    let reopened = Zoo::open(&settings).unwrap();

    assert_eq!(reopened.list_animals().unwrap().len(), 4);
    assert!(reopened.login("kim", "pw").unwrap());
}
