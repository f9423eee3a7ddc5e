//! End-to-end inventory flows through the facade.

use zoo_core::{AnimalEdit, DEMO_CAST, Registration, ZooError};
use zoo_types::{AnimalId, AnimalKind, CellText, Species};

use crate::common::{TestZoo, assert_close};

#[test]
fn fresh_store_accepts_default_admin() {
    let t = TestZoo::empty();
    assert!(t.zoo.login("admin", "admin").unwrap());
    assert!(!t.zoo.login("admin", "Admin").unwrap());
    assert!(!t.zoo.login("ghost", "admin").unwrap());
}

#[test]
fn seeded_zoo_lists_the_demo_cast() {
    let t = TestZoo::seeded();
    let animals = t.zoo.list_animals().unwrap();

    assert_eq!(animals.len(), DEMO_CAST.len());
    let kinds: Vec<AnimalKind> = animals.iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, AnimalKind::ALL.to_vec());
    assert_eq!(
        animals[2].species(),
        &Species::Parrot {
            color: CellText::new("Red").unwrap()
        }
    );
}

#[test]
fn seeded_statistics() {
    let t = TestZoo::seeded();
    let stats = t.zoo.statistics().unwrap();

    assert_eq!(stats.count, 5);
    assert_close(stats.total_weight, 1635.6);
    assert_close(stats.total_daily_food, 129.35);
    assert_close(stats.average_daily_food, 25.87);
}

#[test]
fn add_edit_delete_cycle() {
    let t = TestZoo::seeded();

    let marty = t
        .zoo
        .add_animal(AnimalKind::Lion, "Marty", 300.0, "")
        .unwrap();
    assert_eq!(marty.id(), AnimalId::new(6));

    let renamed = t
        .zoo
        .edit_animal(
            marty.id(),
            AnimalEdit {
                name: Some("Marty Jr"),
                ..AnimalEdit::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.weight(), marty.weight());

    let removed = t.zoo.delete_animal(marty.id()).unwrap();
    assert_eq!(removed.map(|a| a.name().to_string()), Some("Marty Jr".to_string()));
    assert!(t.zoo.find_animal(marty.id()).unwrap().is_none());

    let again = t
        .zoo
        .add_animal(AnimalKind::Lion, "Marty", 300.0, "")
        .unwrap();
    assert_eq!(again.id(), AnimalId::new(6));
}

#[test]
fn editing_only_the_name_preserves_weight_and_extra() {
    let t = TestZoo::seeded();
    let dumbo = t.zoo.find_animal(AnimalId::new(2)).unwrap().unwrap();

    t.zoo
        .edit_animal(
            dumbo.id(),
            AnimalEdit {
                name: Some("Jumbo"),
                ..AnimalEdit::default()
            },
        )
        .unwrap();

    assert!(t.animals_file().contains("\n2,Elephant,Jumbo,200,0.5\n"));
    let jumbo = t.zoo.find_animal(dumbo.id()).unwrap().unwrap();
    assert_eq!(jumbo.weight(), dumbo.weight());
    assert_eq!(jumbo.species(), dumbo.species());
}

#[test]
fn missing_ids_are_outcomes_not_panics() {
    let t = TestZoo::seeded();
    let before = t.animals_file();

    assert!(t.zoo.delete_animal(AnimalId::new(99)).unwrap().is_none());
    let err = t
        .zoo
        .edit_animal(AnimalId::new(99), AnimalEdit::default())
        .unwrap_err();
    assert!(matches!(err, ZooError::AnimalNotFound(_)));
    assert_eq!(t.animals_file(), before);
}

#[test]
fn registration_round_trip() {
    let t = TestZoo::empty();

    let Registration::Registered(user) = t.zoo.register("keeper@zoo", "banana").unwrap() else {
        panic!("expected a new account");
    };
    assert_eq!(user.identifier(), "keeper@zoo");
    assert_eq!(
        t.zoo.register("keeper@zoo", "other").unwrap(),
        Registration::Duplicate
    );
    assert_eq!(
        t.users_file(),
        "Id,Email,Password\n1,admin,admin\n2,keeper@zoo,banana\n"
    );
    assert!(t.zoo.login("keeper@zoo", "banana").unwrap());
}

#[test]
fn validation_errors_name_the_attribute() {
    let t = TestZoo::empty();

    let err = t
        .zoo
        .add_animal(AnimalKind::Elephant, "Dumbo", 200.0, "long")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid trunk length (m) for Elephant: \"long\""
    );
}
