//! Tests for persisted and long-lived record sets
//!
//! These tests verify:
//! - A YAML-backed set keeps records across reopen
//! - Sequential ids through Config
//! - A lazily initialized static set shared for the process lifetime

use once_cell::sync::Lazy;
use record_repo::config::{Config, IdStrategy};
use record_repo::{Query, RecordExt, RecordSet};
use tempfile::TempDir;

use crate::fixtures::{Person, PersonPatch};

#[test]
fn test_yaml_set_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder().yaml(temp.path()).build();

    let id = {
        let people: RecordSet<Person> = RecordSet::open(&config).unwrap();
        let mut person = people.create(Person::named("ThatGuy")).unwrap();
        person.update(&people, &PersonPatch::junk(3)).unwrap();
        people.create(Person::named("SomeGuy")).unwrap();
        person.id.unwrap()
    };

    assert!(temp.path().join("people.yml").exists());

    let people: RecordSet<Person> = RecordSet::open(&config).unwrap();
    assert_eq!(people.count(&Query::all()), 2);
    let person = people.find(&id).unwrap();
    assert_eq!(person.name, "ThatGuy");
    assert_eq!(person.junk, 3);
}

#[test]
fn test_sequential_ids_from_config() {
    let config = Config::builder().id_strategy(IdStrategy::Sequential).build();
    let people: RecordSet<Person> = RecordSet::open(&config).unwrap();

    let first = people.create(Person::named("ThatGuy")).unwrap();
    let second = people.create(Person::named("SomeGuy")).unwrap();

    assert_eq!(first.id.as_deref(), Some("1"));
    assert_eq!(second.id.as_deref(), Some("2"));
}

#[test]
fn test_with_repository_reaches_rows() {
    let people: RecordSet<Person> = RecordSet::memory();
    people.create(Person::with_id("1", "ThatGuy")).unwrap();

    let name = people.with_repository(|repo| repo.fetch("1").unwrap()["name"].clone());

    assert_eq!(name.as_str(), Some("ThatGuy"));
}

static LIFETIME_PEOPLE: Lazy<RecordSet<Person>> = Lazy::new(RecordSet::memory);

#[test]
fn test_static_set_lives_for_process() {
    let created = LIFETIME_PEOPLE
        .create(Person::named("Static"))
        .unwrap();
    let id = created.id.unwrap();

    // Same instance on every access
    assert!(LIFETIME_PEOPLE.exists(&id));
    let found = LIFETIME_PEOPLE.find(&id).unwrap();
    assert_eq!(found.name, "Static");
}
