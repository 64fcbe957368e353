//! End-to-end scheme management scenarios
//!
//! Each test drives the full flow a host IDE goes through: storage config
//! from disk, cold load of a project, user edits, and persistence.

use std::fs;

use pretty_assertions::assert_eq;
use scheme_fs::{NormalizedPath, ProjectLayout, StorageConfig};
use scheme_management::{Error, Management, UserStateEntry};
use scheme_model::{FsRegistry, Provenance, Target};
use scheme_test_utils::documents::management_document;
use scheme_test_utils::project::TestProject;

fn app_targets() -> Vec<Target> {
    vec![
        Target::new("App", "App::App"),
        Target::new("AppTests", "App::AppTests"),
        Target::aggregate("Docs", "App::Docs"),
    ]
}

#[test]
fn test_first_open_then_hide_and_reopen() {
    let _ = scheme_management::logging::init();
    let project = TestProject::new();
    project
        .shared_scheme("App", &[("A1", "App"), ("T1", "AppTests")])
        .shared_scheme("Docs", &[])
        .user_scheme("alice", "Scratch");
    let layout = ProjectLayout::new(project.root(), StorageConfig::for_user("alice"));
    let registry = FsRegistry::with_targets(app_targets());

    // First open derives the record
    assert!(!Management::exists(&layout));
    let mut management = Management::load(&layout, &registry).unwrap();
    let names: Vec<_> = management.user_state().names().collect();
    assert_eq!(names, vec!["App", "Docs"]);
    let suppressed: Vec<_> = management.suppress_buildable_autocreation().iter().collect();
    assert_eq!(suppressed, vec!["App::AppTests"]);

    // The user hides a scheme and stops generating one for a test target
    assert!(management.user_state_mut().set_shown("Docs", false));
    management.suppress_buildable_autocreation_mut().remove("App::AppTests");
    management.write(&layout, false).unwrap();

    // Reopening reads the persisted choice
    let reopened = Management::load(&layout, &registry).unwrap();
    assert_eq!(reopened, management);
    assert_eq!(reopened.user_state().is_shown("Docs"), Some(false));
    assert!(reopened.suppress_buildable_autocreation().is_empty());
}

#[test]
fn test_storage_config_from_toml() {
    let project = TestProject::new();
    let config_path = project.root().join("schemes.toml");
    fs::write(&config_path, "user = \"bob\"\n").unwrap();
    let config = StorageConfig::load(&NormalizedPath::new(&config_path)).unwrap();
    let layout = ProjectLayout::new(project.root(), config);

    project.write_management(
        "bob",
        &management_document(&[("Tool.xcscheme", Some(2), Some(false))], &["App::Tool"]),
    );

    let management = Management::load(&layout, &FsRegistry::new()).unwrap();
    let entry = management.user_state().get("Tool").unwrap();
    assert_eq!(
        *entry,
        UserStateEntry::new("Tool", Provenance::UserPrivate)
            .with_order_hint(2)
            .with_shown(false)
    );
}

#[test]
fn test_two_users_keep_separate_records() {
    let project = TestProject::new();
    project.shared_scheme("App", &[("A1", "App")]);
    let registry = FsRegistry::with_targets(app_targets());
    let alice = ProjectLayout::new(project.root(), StorageConfig::for_user("alice"));
    let bob = ProjectLayout::new(project.root(), StorageConfig::for_user("bob"));

    let mut for_alice = Management::load(&alice, &registry).unwrap();
    for_alice.user_state_mut().set_shown("App", false);
    for_alice.write(&alice, false).unwrap();

    let for_bob = Management::load(&bob, &registry).unwrap();
    assert_eq!(for_bob.user_state().is_shown("App"), Some(true));
    project.assert_file_exists("xcuserdata/alice.xcuserdatad/xcschemes/xcschememanagement.plist");
    project.assert_file_not_exists("xcuserdata/bob.xcuserdatad/xcschemes/xcschememanagement.plist");
}

#[test]
fn test_refusing_to_clobber_then_overriding() {
    let project = TestProject::new();
    project.shared_scheme("App", &[("A1", "App")]);
    let layout = ProjectLayout::new(project.root(), StorageConfig::for_user("alice"));
    let registry = FsRegistry::with_targets(app_targets());

    let derived = Management::load(&layout, &registry).unwrap();
    derived.write(&layout, false).unwrap();

    let mut edited = derived.clone();
    edited.user_state_mut().set_shown("App", false);
    match edited.write(&layout, false) {
        Err(Error::WriteConflict { path }) => {
            assert_eq!(path, project.management_path("alice"));
        }
        other => panic!("expected WriteConflict, got {other:?}"),
    }
    assert_eq!(Management::load(&layout, &registry).unwrap(), derived);

    edited.write(&layout, true).unwrap();
    assert_eq!(Management::load(&layout, &registry).unwrap(), edited);
}

#[test]
fn test_document_survives_plist_tree_edit() {
    let project = TestProject::new();
    project.write_management(
        "alice",
        &management_document(&[("App.xcscheme_^#shared#^_", Some(0), Some(true))], &[]),
    );
    let layout = ProjectLayout::new(project.root(), StorageConfig::for_user("alice"));

    let bytes = fs::read(project.management_path("alice")).unwrap();
    let tree = scheme_plist::from_slice(&bytes).unwrap();
    let management = Management::from_document(&tree).unwrap();

    assert_eq!(Management::load(&layout, &FsRegistry::new()).unwrap(), management);
    assert_eq!(Management::from_document(&management.to_document()).unwrap(), management);
}
