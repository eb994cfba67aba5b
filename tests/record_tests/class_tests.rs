//! Tests for class-level RecordSet operations
//!
//! These tests verify:
//! - create assigns ids and rejects duplicates
//! - find / find_by / filter / all / count
//! - update_all / destroy_all / delete_all / clear_all affect exactly the matches

use record_repo::{Query, RepoError};

use crate::fixtures::{people, Person, PersonPatch};

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_assigns_id() {
    let people = people();

    let person = people.create(Person::default()).unwrap();

    let id = person.id.clone().unwrap();
    assert!(!id.is_empty());
    assert!(people.exists(&id));
}

#[test]
fn test_create_keeps_caller_id() {
    let people = people();

    let person = people.create(Person::with_id("p-1", "ThatGuy")).unwrap();

    assert_eq!(person.id.as_deref(), Some("p-1"));
    assert!(people.exists("p-1"));
}

#[test]
fn test_create_duplicate_id_fails() {
    let people = people();
    people.create(Person::with_id("p-1", "ThatGuy")).unwrap();

    let err = people.create(Person::with_id("p-1", "SomeGuy")).unwrap_err();

    assert!(matches!(err, RepoError::EntryExists { ref id } if id == "p-1"));
    assert_eq!(people.find("p-1").unwrap().name, "ThatGuy");
}

#[test]
fn test_create_runs_hooks() {
    let people = people();

    let person = people.create(Person::named("ThatGuy")).unwrap();

    assert_eq!(person.events, vec!["pre_save", "on_create", "on_save"]);
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_by_id() {
    let people = people();
    let expected = people.create(Person::named("ThatGuy")).unwrap();

    let actual = people.find(expected.id.as_deref().unwrap()).unwrap();

    assert_eq!(actual.id, expected.id);
    assert_eq!(actual.name, expected.name);
}

#[test]
fn test_find_missing_fails() {
    let people = people();

    let err = people.find("nobody").unwrap_err();

    assert!(matches!(err, RepoError::RecordNotFound { ref id } if id == "nobody"));
    assert!(people.get("nobody").unwrap().is_none());
}

#[test]
fn test_find_by_criteria() {
    let people = people();
    people.create(Person::named("Superman")).unwrap();
    let expected = people.create(Person::named("Batman")).unwrap();
    people.create(Person::named("Wonderman")).unwrap();

    let actual = people.find_by(&Query::new().eq("name", "Batman")).unwrap();

    assert_eq!(actual.id, expected.id);
    assert_eq!(actual.name, "Batman");
}

#[test]
fn test_find_by_returns_first_in_id_order() {
    let people = people();
    people.create(Person::with_id("b", "Twin")).unwrap();
    people.create(Person::with_id("a", "Twin")).unwrap();

    let found = people.find_by(&Query::new().eq("name", "Twin")).unwrap();

    assert_eq!(found.id.as_deref(), Some("a"));
}

#[test]
fn test_find_by_without_match_fails() {
    let people = people();
    people.create(Person::named("Superman")).unwrap();

    let err = people.find_by(&Query::new().eq("name", "Batman")).unwrap_err();

    assert!(matches!(err, RepoError::NoMatch { .. }));
    assert!(err.is_not_found());
}

// =============================================================================
// Filter / All / Count Tests
// =============================================================================

#[test]
fn test_all_returns_every_record() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();

    let all = people.all();

    assert_eq!(all.count(), 2);
    let mut names: Vec<String> = all.to_vec().unwrap().into_iter().map(|p| p.name).collect();
    names.sort();
    assert_eq!(names, vec!["SomeGuy", "ThatGuy"]);

    people.clear_all().unwrap();
    assert!(people.all().is_empty());
}

#[test]
fn test_filter_is_restartable_snapshot() {
    let people = people();
    people.create(Person::with_id("1", "ThatGuy")).unwrap();
    people.create(Person::with_id("2", "SomeGuy")).unwrap();

    let matches = people.filter(&Query::new().eq("name", "ThatGuy"));
    people.create(Person::with_id("3", "ThatGuy")).unwrap();

    assert_eq!(matches.ids(), vec!["1".to_string()]);
    let first: Vec<Person> = matches.iter().collect::<Result<_, _>>().unwrap();
    let second: Vec<Person> = matches.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(matches.first().unwrap().unwrap().name, "ThatGuy");
}

#[test]
fn test_count_with_query() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();

    assert_eq!(people.count(&Query::all()), 3);
    assert_eq!(people.count(&Query::new().eq("name", "SomeGuy")), 2);
    assert_eq!(people.count(&Query::new().eq("name", "Nobody")), 0);
}

// =============================================================================
// Bulk Operation Tests
// =============================================================================

#[test]
fn test_update_all() {
    let people = people();
    let p1 = people.create(Person::named("ThatGuy")).unwrap();
    let p2 = people.create(Person::named("SomeGuy")).unwrap();
    assert_eq!(p1.junk, 0);
    assert_eq!(p2.junk, 0);

    let updated = people.update_all(&Query::all(), &PersonPatch::junk(2)).unwrap();

    assert_eq!(updated, 2);
    let p1 = people.get(p1.id.as_deref().unwrap()).unwrap().unwrap();
    let p2 = people.get(p2.id.as_deref().unwrap()).unwrap().unwrap();
    assert_eq!(p1.junk, 2);
    assert_eq!(p2.junk, 2);
}

#[test]
fn test_update_all_only_touches_matches() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();

    let updated = people
        .update_all(&Query::new().eq("name", "SomeGuy"), &PersonPatch::junk(7))
        .unwrap();

    assert_eq!(updated, 2);
    assert_eq!(people.count(&Query::new().eq("junk", 7)), 2);
    assert_eq!(people.count(&Query::new().eq("junk", 0)), 1);
}

#[test]
fn test_destroy_all() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();
    assert_eq!(people.count(&Query::all()), 2);

    let destroyed = people.destroy_all(&Query::all()).unwrap();

    assert_eq!(destroyed, 2);
    assert_eq!(people.count(&Query::all()), 0);
}

#[test]
fn test_destroy_all_only_touches_matches() {
    let people = people();
    people.create(Person::named("Superman")).unwrap();
    people.create(Person::named("Batman")).unwrap();
    people.create(Person::named("Batman")).unwrap();

    let destroyed = people.destroy_all(&Query::new().eq("name", "Batman")).unwrap();

    assert_eq!(destroyed, 2);
    assert_eq!(people.count(&Query::all()), 1);
    assert!(people.find_by(&Query::new().eq("name", "Superman")).is_ok());
}

#[test]
fn test_delete_all() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();
    people.create(Person::named("SomeGuy")).unwrap();

    let removed = people.delete_all(&Query::new().eq("name", "ThatGuy")).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(people.count(&Query::all()), 1);

    let removed = people.delete_all(&Query::all()).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(people.count(&Query::all()), 0);
}

#[test]
fn test_clear_all() {
    let people = people();
    people.create(Person::named("ThatGuy")).unwrap();

    people.clear_all().unwrap();

    assert_eq!(people.count(&Query::all()), 0);
}
