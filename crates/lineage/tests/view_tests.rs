//! Session, tree source and view dispatch tests

use std::cell::Cell;
use std::io::Write;

use lineage::*;
use pretty_assertions::assert_eq;

/// Source that counts fetches and serves a fixed list.
struct CountingSource {
    persons: Vec<PersonRecord>,
    fetches: Cell<usize>,
}

impl CountingSource {
    fn new(persons: Vec<PersonRecord>) -> Self {
        Self {
            persons,
            fetches: Cell::new(0),
        }
    }
}

impl TreeSource for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn fetch_tree(&self) -> Result<Vec<PersonRecord>> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.persons.clone())
    }
}

fn family() -> Vec<PersonRecord> {
    vec![
        PersonRecord::new(1, "Ana").with_birth_place("Treviso"),
        PersonRecord::new(2, "Bia").with_father(1),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_tree_view_fetches_on_every_activation() {
    let registry = ViewRegistry::standard();
    let source = CountingSource::new(family());
    let mut session = Session::default();

    let output = registry
        .dispatch(&ViewId::Tree, &mut session, &source)
        .unwrap();
    registry
        .dispatch(&ViewId::Tree, &mut session, &source)
        .unwrap();

    assert_eq!(source.fetches.get(), 2);
    assert_eq!(
        output,
        "Generation 0\n  [1] Ana - Unknown date, Treviso\nGeneration 1\n  [2] Bia - Unknown date"
    );
}

#[test]
fn test_person_view_after_tree_view_reuses_snapshot() {
    let registry = ViewRegistry::standard();
    let source = CountingSource::new(family());
    let mut session = Session::default();

    registry
        .dispatch_command("tree", &mut session, &source)
        .unwrap();
    let output = registry
        .dispatch_command("person 2", &mut session, &source)
        .unwrap();

    assert_eq!(source.fetches.get(), 1);
    assert_eq!(
        output,
        "Name: Bia\nBorn: Unknown\nPlace: Unknown\nNotes: None"
    );
}

#[test]
fn test_person_view_loads_when_nothing_loaded() {
    let registry = ViewRegistry::standard();
    let source = CountingSource::new(family());
    let mut session = Session::default();

    let output = registry
        .dispatch(&ViewId::Person(PersonId(1)), &mut session, &source)
        .unwrap();
    assert!(output.contains("Place: Treviso"));
    assert_eq!(source.fetches.get(), 1);
}

#[test]
fn test_person_view_unknown_id() {
    let registry = ViewRegistry::standard();
    let mut session = Session::default();
    let err = registry
        .dispatch_command("person 77", &mut session, &StaticSource::new(family()))
        .unwrap_err();
    assert!(matches!(err, LineageError::PersonNotFound(PersonId(77))));
}

#[test]
fn test_statistics_view() {
    let registry = ViewRegistry::standard();
    let mut session = Session::default().with_user("bia");
    let output = registry
        .dispatch_command("stats", &mut session, &StaticSource::new(family()))
        .unwrap();
    assert_eq!(output, "Persons: 2\nGenerations: 2\nRoots: 1");
    assert_eq!(session.user(), Some("bia"));
}

#[test]
fn test_custom_handler_registration() {
    struct Greeting;

    impl ViewHandler for Greeting {
        fn load_and_render(
            &self,
            _view: &ViewId,
            session: &mut Session,
            _source: &dyn TreeSource,
        ) -> Result<String> {
            Ok(format!("Hello, {}", session.user().unwrap_or("guest")))
        }
    }

    let registry = ViewRegistry::new().with_handler(ViewKind::Statistics, Greeting);
    let mut session = Session::default();
    let output = registry
        .dispatch(&ViewId::Statistics, &mut session, &StaticSource::default())
        .unwrap();
    assert_eq!(output, "Hello, guest");
    assert!(!registry.contains(ViewKind::Tree));
}

#[test]
fn test_views_refuse_anonymous_when_sign_in_required() {
    let registry = ViewRegistry::standard();
    let source = CountingSource::new(family());
    let mut session = Session::default().require_sign_in();

    for command in ["tree", "stats", "person 1"] {
        let err = registry
            .dispatch_command(command, &mut session, &source)
            .unwrap_err();
        assert!(matches!(err, LineageError::NotSignedIn), "{}", command);
    }
    assert_eq!(source.fetches.get(), 0);

    let mut signed_in = Session::default().require_sign_in().with_user("ana");
    assert!(registry
        .dispatch(&ViewId::Tree, &mut signed_in, &source)
        .is_ok());
}

// ═══════════════════════════════════════════════════════════════════════
// Source failures
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_malformed_file_fails_whole_view() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"id": 1, "name": "Ana"}}, {{"name": "no id"}}]"#).unwrap();

    let registry = ViewRegistry::standard();
    let mut session = Session::default();
    let err = registry
        .dispatch(&ViewId::Tree, &mut session, &JsonFileSource::new(file.path()))
        .unwrap_err();

    assert!(matches!(err, LineageError::InvalidInput { .. }));
    assert!(!session.is_loaded());
}

#[test]
fn test_file_source_tree_view() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tree": [
            {{"id": 1, "name": "Ana", "father_id": null, "mother_id": null}},
            {{"id": 2, "name": "Bia", "father_id": 1, "mother_id": 50}}
        ]}}"#
    )
    .unwrap();

    let source = JsonFileSource::new(file.path());
    let mut session = Session::default();
    let output = ViewRegistry::standard()
        .dispatch(&ViewId::Tree, &mut session, &source)
        .unwrap();

    assert!(output.starts_with("Generation 0\n  [1] Ana"));
    assert_eq!(session.statistics().unwrap().unresolved_references, 1);
}

#[test]
fn test_duplicate_ids_from_source_leave_snapshot_intact() {
    let registry = ViewRegistry::standard();
    let mut session = Session::default();
    session.replace_tree(vec![PersonRecord::new(1, "Ana")]);

    let duplicates = CountingSource::new(vec![
        PersonRecord::new(9, "X"),
        PersonRecord::new(9, "Y"),
    ]);
    let err = registry
        .dispatch(&ViewId::Tree, &mut session, &duplicates)
        .unwrap_err();
    assert!(matches!(err, LineageError::InvalidInput { .. }));
    assert_eq!(session.persons().len(), 1);

    let err = registry
        .dispatch_command("person 9", &mut session, &duplicates)
        .unwrap_err();
    assert!(matches!(err, LineageError::PersonNotFound(PersonId(9))));
}
