//! Fixed directory and file names used by project scheme storage.

use std::path::Path;

/// Well-known storage names inside a project bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePath {
    /// Team-visible data directory (`xcshareddata`)
    SharedData,
    /// Per-user data root (`xcuserdata`)
    UserData,
    /// Directory holding scheme documents (`xcschemes`)
    Schemes,
    /// Suffix of a single user's data directory (`.xcuserdatad`)
    UserDataSuffix,
    /// Extension of scheme documents (`xcscheme`)
    SchemeExtension,
}

impl StoragePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SharedData => "xcshareddata",
            Self::UserData => "xcuserdata",
            Self::Schemes => "xcschemes",
            Self::UserDataSuffix => ".xcuserdatad",
            Self::SchemeExtension => "xcscheme",
        }
    }
}

impl AsRef<Path> for StoragePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for StoragePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
