//! Storage configuration for locating scheme data inside a project
//!
//! The defaults match the IDE's on-disk conventions; a TOML file can
//! override any of them:
//!
//! ```toml
//! user = "alice"
//! shared_dir = "xcshareddata"
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, NormalizedPath, Result, StoragePath, io};

/// Fallback user name when none is configured or found in the environment.
const DEFAULT_USER: &str = "user";

/// Directory conventions for shared and per-user scheme storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// User whose private storage is read and written
    pub user: String,
    /// Team-visible data directory under the project root
    pub shared_dir: String,
    /// Per-user data root under the project root
    pub user_dir: String,
    /// Scheme directory name inside shared and user data
    pub schemes_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            shared_dir: StoragePath::SharedData.as_str().to_string(),
            user_dir: StoragePath::UserData.as_str().to_string(),
            schemes_dir: StoragePath::Schemes.as_str().to_string(),
        }
    }
}

fn default_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|user| !user.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string())
}

impl StorageConfig {
    /// Default conventions for an explicit user.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }

    /// Load a storage configuration from a TOML file.
    ///
    /// Keys missing from the file fall back to their defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::from_toml(&content).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            message,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.user.trim().is_empty() {
            return Err("user must not be empty".to_string());
        }
        Ok(config)
    }

    /// Name of this user's data directory (`<user>.xcuserdatad`).
    pub fn user_data_dir_name(&self) -> String {
        format!("{}{}", self.user, StoragePath::UserDataSuffix.as_str())
    }
}
