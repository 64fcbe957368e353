//! Loading and writing management records against real project trees

use pretty_assertions::assert_eq;
use rstest::rstest;
use scheme_fs::{ProjectLayout, StorageConfig};
use scheme_management::{
    Error, Management, SchemeUserState, SuppressBuildableAutocreation, UserStateEntry,
};
use scheme_model::{FsRegistry, Provenance, Target};
use scheme_test_utils::documents::management_document;
use scheme_test_utils::project::TestProject;

const USER: &str = "dev";

fn layout(project: &TestProject) -> ProjectLayout {
    ProjectLayout::new(project.root(), StorageConfig::for_user(USER))
}

fn sample_record() -> Management {
    let mut user_state = SchemeUserState::new();
    user_state.insert(UserStateEntry::new("App", Provenance::Shared).with_order_hint(0));
    user_state.insert(
        UserStateEntry::new("Scratch", Provenance::UserPrivate)
            .with_order_hint(1)
            .with_shown(false),
    );
    Management::from_parts(
        user_state,
        SuppressBuildableAutocreation::from_target_names(["X::Tests", "X::Tool"]),
    )
}

#[test]
fn test_load_reads_persisted_record() {
    let project = TestProject::new();
    project.write_management(
        USER,
        &management_document(
            &[
                ("App.xcscheme_^#shared#^_", Some(0), Some(true)),
                ("Scratch.xcscheme", Some(1), Some(false)),
            ],
            &["X::Tests"],
        ),
    );

    let management = Management::load(&layout(&project), &FsRegistry::new()).unwrap();

    let entries: Vec<_> = management.user_state().iter().cloned().collect();
    assert_eq!(
        entries,
        vec![
            UserStateEntry::new("App", Provenance::Shared).with_order_hint(0),
            UserStateEntry::new("Scratch", Provenance::UserPrivate)
                .with_order_hint(1)
                .with_shown(false),
        ]
    );
    let suppressed: Vec<_> = management.suppress_buildable_autocreation().iter().collect();
    assert_eq!(suppressed, vec!["X::Tests"]);
}

#[test]
fn test_persisted_record_wins_over_storage() {
    let project = TestProject::new();
    project
        .shared_scheme("Other", &[("O1", "Other")])
        .write_management(USER, &management_document(&[("App.xcscheme", None, None)], &[]));

    let management = Management::load(&layout(&project), &FsRegistry::new()).unwrap();

    let names: Vec<_> = management.user_state().names().collect();
    assert_eq!(names, vec!["App"]);
}

#[test]
fn test_missing_is_shown_defaults_to_visible() {
    let project = TestProject::new();
    project.write_management(
        USER,
        &management_document(&[("App.xcscheme_^#shared#^_", Some(3), None)], &[]),
    );

    let management = Management::load(&layout(&project), &FsRegistry::new()).unwrap();

    let entry = management.user_state().get("App").unwrap();
    assert!(entry.is_shown);
    assert_eq!(entry.order_hint, Some(3));
}

#[rstest]
#[case::root_is_array("<plist version=\"1.0\"><array/></plist>")]
#[case::section_is_array(
    "<plist version=\"1.0\"><dict><key>SchemeUserState</key><array/></dict></plist>"
)]
#[case::entry_is_string(
    "<plist version=\"1.0\"><dict><key>SchemeUserState</key><dict><key>App.xcscheme</key><string>x</string></dict></dict></plist>"
)]
#[case::order_hint_is_string(
    "<plist version=\"1.0\"><dict><key>SchemeUserState</key><dict><key>App.xcscheme</key><dict><key>orderHint</key><string>1</string></dict></dict></dict></plist>"
)]
#[case::is_shown_is_integer(
    "<plist version=\"1.0\"><dict><key>SchemeUserState</key><dict><key>App.xcscheme</key><dict><key>isShown</key><integer>1</integer></dict></dict></dict></plist>"
)]
#[case::empty_scheme_name(
    "<plist version=\"1.0\"><dict><key>SchemeUserState</key><dict><key>.xcscheme</key><dict/></dict></dict></plist>"
)]
#[case::suppression_is_array(
    "<plist version=\"1.0\"><dict><key>SuppressBuildableAutocreation</key><array/></dict></plist>"
)]
#[case::suppression_marker_is_bool(
    "<plist version=\"1.0\"><dict><key>SuppressBuildableAutocreation</key><dict><key>X::App</key><true/></dict></dict></plist>"
)]
fn test_schema_violations_are_malformed(#[case] document: &str) {
    let project = TestProject::new();
    project
        .shared_scheme("App", &[("A1", "App")])
        .write_management(USER, document);

    let result = Management::load(&layout(&project), &FsRegistry::new());

    assert!(
        matches!(result, Err(Error::MalformedRecord { .. })),
        "expected MalformedRecord, got {result:?}"
    );
}

#[rstest]
#[case::not_xml("this is not a property list")]
#[case::truncated("<plist version=\"1.0\"><dict><key>SchemeUserState</key>")]
#[case::empty("")]
fn test_unparseable_record_is_rederived(#[case] document: &str) {
    let project = TestProject::new();
    project
        .shared_scheme("App", &[("A1", "App")])
        .write_management(USER, document);
    let registry = FsRegistry::with_targets([Target::new("App", "X::App"), Target::new("Tests", "X::Tests")]);

    let management = Management::load(&layout(&project), &registry).unwrap();

    let names: Vec<_> = management.user_state().names().collect();
    assert_eq!(names, vec!["App"]);
    let suppressed: Vec<_> = management.suppress_buildable_autocreation().iter().collect();
    assert_eq!(suppressed, vec!["X::Tests"]);
}

#[test]
fn test_load_without_record_does_not_write() {
    let project = TestProject::new();
    project.shared_scheme("App", &[("A1", "App")]);
    let layout = layout(&project);

    Management::load(&layout, &FsRegistry::new()).unwrap();

    assert!(!Management::exists(&layout));
}

#[test]
fn test_write_then_load_roundtrip() {
    let project = TestProject::new();
    let layout = layout(&project);
    let record = sample_record();

    record.write(&layout, false).unwrap();
    let loaded = Management::load(&layout, &FsRegistry::new()).unwrap();

    assert_eq!(loaded, record);
}

#[test]
fn test_write_creates_user_storage() {
    let project = TestProject::new();
    let layout = layout(&project);

    sample_record().write(&layout, false).unwrap();

    assert!(Management::exists(&layout));
    project.assert_file_exists("xcuserdata/dev.xcuserdatad/xcschemes/xcschememanagement.plist");
}

#[test]
fn test_write_conflict_then_override() {
    let project = TestProject::new();
    let layout = layout(&project);
    project.write_management(USER, &management_document(&[("Old.xcscheme", Some(0), Some(true))], &[]));
    let before = project.read_management(USER);

    let record = sample_record();
    let result = record.write(&layout, false);
    assert!(
        matches!(result, Err(Error::WriteConflict { .. })),
        "expected WriteConflict, got {result:?}"
    );
    assert_eq!(project.read_management(USER), before);

    record.write(&layout, true).unwrap();
    let loaded = Management::load(&layout, &FsRegistry::new()).unwrap();
    assert_eq!(loaded, record);
    assert!(loaded.user_state().get("Old").is_none());
}

#[test]
fn test_written_document_shape() {
    let project = TestProject::new();
    let layout = layout(&project);

    sample_record().write(&layout, false).unwrap();
    let written = project.read_management(USER);

    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(written.contains("<!DOCTYPE plist PUBLIC"));
    assert!(written.contains("<key>App.xcscheme_^#shared#^_</key>"));
    assert!(written.contains("<key>Scratch.xcscheme</key>"));
    assert!(written.contains("<key>X::Tests</key>"));
    assert!(written.contains("<key>primary</key>"));
    let user_state = written.find("SchemeUserState").unwrap();
    let suppression = written.find("SuppressBuildableAutocreation").unwrap();
    assert!(user_state < suppression);
}

#[test]
fn test_users_are_isolated() {
    let project = TestProject::new();
    sample_record().write(&layout(&project), false).unwrap();

    let other = ProjectLayout::new(project.root(), StorageConfig::for_user("other"));
    assert!(!Management::exists(&other));
    let management = Management::load(&other, &FsRegistry::new()).unwrap();
    assert_eq!(management, Management::default());
}

#[test]
fn test_layout_from_user_schemes_dir() {
    let project = TestProject::new();
    sample_record().write(&layout(&project), false).unwrap();

    let layout = ProjectLayout::from_path(project.user_schemes_dir(USER), StorageConfig::for_user(USER));

    assert!(Management::exists(&layout));
    assert_eq!(Management::load(&layout, &FsRegistry::new()).unwrap(), sample_record());
}
