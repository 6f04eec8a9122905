//! Integration tests: validated person record
//!
//! Verifies the age floor on mutation, the unvalidated constructor and the
//! attribute view of the record.
//!
//! Author: ALICE-BIND contributors

mod common;

use alice_bind::prelude::*;
use common::*;

// ============================================================================
// Setter
// ============================================================================

#[test]
fn set_age_accepts_every_adult_age() {
    for age in adult_ages() {
        let mut person = test_person();
        person.set_age(age).expect("adult age rejected");
        assert_eq!(person.age(), age);
    }
}

#[test]
fn set_age_rejects_every_minor_age_and_keeps_state() {
    let mut person = test_person();
    for age in minor_ages() {
        let err = person.set_age(age).unwrap_err();
        assert_eq!(err, BindError::TooYoung { age, min: MIN_AGE });
        assert_eq!(person.age(), 30);
        assert_eq!(person.name(), "Ann");
    }
}

// ============================================================================
// Constructor
// ============================================================================

#[test]
fn constructor_accepts_under_age_record() {
    // The constructor stores values verbatim; the floor applies to the setter only.
    let mut person = AdultPerson::new(5, "Tim");
    assert_eq!(person.age(), 5);
    assert!(!person.is_valid());

    // Still cannot be lowered further or kept under-age through the setter
    assert!(person.set_age(6).is_err());
    person.set_age(MIN_AGE).unwrap();
    assert!(person.is_valid());
}

#[test]
fn try_new_applies_the_floor() {
    assert!(matches!(AdultPerson::try_new(17, "Tim"), Err(BindError::TooYoung { .. })));
    assert_eq!(AdultPerson::try_new(18, "Tim").unwrap().age(), 18);
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn describe_embeds_current_fields() {
    let mut person = test_person();
    assert_eq!(person.describe(), "AdultPerson(age=30, name=Ann)");
    person.set_age(31).unwrap();
    assert_eq!(person.to_string(), "AdultPerson(age=31, name=Ann)");
}

#[test]
fn attribute_view_tracks_mutation() {
    let mut person = test_person();
    assert_eq!(get_attribute(&person, "age").unwrap(), Value::Int(30));
    person.set_age(50).unwrap();
    assert_eq!(get_attribute(&person, "age").unwrap(), Value::Int(50));
    assert_eq!(get_attribute(&person, "name").unwrap(), Value::from("Ann"));
}

#[test]
fn accessors_read_back_every_accepted_age() {
    let mut person = test_person();
    for age in adult_ages() {
        person.set_age(age).unwrap();
        let plain = get_attribute(&person, "age").unwrap();
        let detached = get_attribute_detached(&NoInterpreterLock, &person, "age").unwrap();
        assert_eq!(plain, detached);
        assert_eq!(plain.as_count("age").unwrap(), age, "age {} read back as {:?}", age, plain);
    }
}

#[test]
fn greeting_has_two_arities() {
    assert_eq!(AdultPerson::greeting(Some("Ann")), "Hello, Ann!");
    assert_eq!(AdultPerson::greeting(None), "Hello!");
}
