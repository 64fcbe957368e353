//! Project storage layout
//!
//! Composes the locations of shared scheme data, the current user's scheme
//! data and the scheme management document beneath a project root.

use crate::{NormalizedPath, StorageConfig};

/// Resolved storage locations for one project and one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: NormalizedPath,
    config: StorageConfig,
}

impl ProjectLayout {
    /// Layout rooted at `root` (the project bundle directory).
    pub fn new(root: impl Into<NormalizedPath>, config: StorageConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Layout for a path that is either the project root or the user's
    /// scheme directory inside it.
    ///
    /// The user scheme storage suffix is stripped when present.
    pub fn from_path(path: impl Into<NormalizedPath>, config: StorageConfig) -> Self {
        let path = path.into();
        let suffix = Self::user_schemes_suffix(&config);
        let root = match path.strip_suffix(&suffix) {
            Some(root) => {
                tracing::debug!(%path, %root, "stripped user scheme storage suffix");
                root
            }
            None => path,
        };
        Self { root, config }
    }

    fn user_schemes_suffix(config: &StorageConfig) -> String {
        format!(
            "{}/{}/{}",
            config.user_dir,
            config.user_data_dir_name(),
            config.schemes_dir
        )
    }

    /// Project root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Storage configuration in effect.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Directory holding team-visible schemes.
    pub fn shared_schemes_dir(&self) -> NormalizedPath {
        self.root
            .join(&self.config.shared_dir)
            .join(&self.config.schemes_dir)
    }

    /// Directory holding the current user's private schemes.
    pub fn user_schemes_dir(&self) -> NormalizedPath {
        self.root.join(&Self::user_schemes_suffix(&self.config))
    }
}
