//! [`TestProject`] builder for scheme management test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use scheme_fs::StoragePath;
use tempfile::TempDir;

use crate::documents::scheme_document;

/// File name of the management document inside user scheme storage.
pub const MANAGEMENT_FILE: &str = "xcschememanagement.plist";

/// A temporary project bundle with helpers for laying out scheme storage.
///
/// # Example
///
/// ```rust,no_run
/// use scheme_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.shared_scheme("App", &[("A1", "App")]);
/// project.user_scheme("dev", "Scratch");
/// project.assert_file_exists("xcshareddata/xcschemes/App.xcscheme");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding shared schemes.
    pub fn shared_schemes_dir(&self) -> PathBuf {
        self.root()
            .join(StoragePath::SharedData)
            .join(StoragePath::Schemes)
    }

    /// Directory holding `user`'s private schemes.
    pub fn user_schemes_dir(&self, user: &str) -> PathBuf {
        self.root()
            .join(StoragePath::UserData)
            .join(format!("{user}{}", StoragePath::UserDataSuffix))
            .join(StoragePath::Schemes)
    }

    /// Path of `user`'s management document.
    pub fn management_path(&self, user: &str) -> PathBuf {
        self.user_schemes_dir(user).join(MANAGEMENT_FILE)
    }

    /// Write a shared scheme whose build action references `build_entries`.
    pub fn shared_scheme(&self, name: &str, build_entries: &[(&str, &str)]) -> &Self {
        let dir = self.shared_schemes_dir();
        write(&dir.join(format!("{name}.{}", StoragePath::SchemeExtension)), &scheme_document(build_entries));
        self
    }

    /// Write a private scheme for `user`.
    pub fn user_scheme(&self, user: &str, name: &str) -> &Self {
        let dir = self.user_schemes_dir(user);
        write(&dir.join(format!("{name}.{}", StoragePath::SchemeExtension)), &scheme_document(&[]));
        self
    }

    /// Write raw content to `user`'s management document.
    pub fn write_management(&self, user: &str, content: &str) -> &Self {
        write(&self.management_path(user), content);
        self
    }

    /// Read `user`'s management document.
    ///
    /// # Panics
    /// Panics if the document does not exist.
    pub fn read_management(&self, user: &str) -> String {
        let path = self.management_path(user);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Could not create {}: {e}", parent.display()));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
}
