//! Scheme and target registries
//!
//! A registry answers three questions for a project: which schemes are
//! shared, which belong to the current user, and which targets exist.
//! Missing storage is reported as `Ok(None)` so callers can tell absence
//! apart from corruption.

use std::fs;

use scheme_fs::{NormalizedPath, ProjectLayout, StoragePath};

use crate::error::{Error, Result};
use crate::scheme::{Provenance, Scheme};
use crate::target::Target;

/// Source of schemes and targets for a project.
pub trait Registry {
    /// Schemes in team-visible storage, or `None` if there is no such storage.
    fn shared_schemes(&self, layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>>;

    /// Schemes in the configured user's storage, or `None` if there is none.
    fn user_schemes(&self, layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>>;

    /// Native and aggregate targets in project declaration order.
    fn targets(&self, layout: &ProjectLayout) -> Result<Vec<Target>>;
}

/// Registry backed by scheme documents on disk.
///
/// Scheme documents are read from the layout's shared and user scheme
/// directories in file name order. Targets come from the host project
/// model and are handed in at construction.
#[derive(Debug, Clone, Default)]
pub struct FsRegistry {
    targets: Vec<Target>,
}

impl FsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    fn read_schemes(dir: &NormalizedPath, provenance: Provenance) -> Result<Option<Vec<Scheme>>> {
        let native = dir.to_native();
        if !native.exists() {
            tracing::debug!(dir = %dir, ?provenance, "no scheme storage");
            return Ok(None);
        }
        if !native.is_dir() {
            return Err(Error::NotADirectory { path: native });
        }

        let entries = fs::read_dir(&native).map_err(|e| scheme_fs::Error::io(&native, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| scheme_fs::Error::io(&native, e))?;
            let path = NormalizedPath::new(entry.path());
            if path.extension() == Some(StoragePath::SchemeExtension.as_str()) && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let schemes = paths
            .iter()
            .map(|path| Scheme::from_file(path, provenance))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(dir = %dir, count = schemes.len(), ?provenance, "read schemes");
        Ok(Some(schemes))
    }
}

impl Registry for FsRegistry {
    fn shared_schemes(&self, layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>> {
        Self::read_schemes(&layout.shared_schemes_dir(), Provenance::Shared)
    }

    fn user_schemes(&self, layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>> {
        Self::read_schemes(&layout.user_schemes_dir(), Provenance::UserPrivate)
    }

    fn targets(&self, _layout: &ProjectLayout) -> Result<Vec<Target>> {
        Ok(self.targets.clone())
    }
}

/// Registry holding already-resolved schemes and targets.
///
/// Useful when the host has parsed the project itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    shared: Option<Vec<Scheme>>,
    user: Option<Vec<Scheme>>,
    targets: Vec<Target>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared(mut self, schemes: impl IntoIterator<Item = Scheme>) -> Self {
        self.shared = Some(schemes.into_iter().collect());
        self
    }

    pub fn with_user(mut self, schemes: impl IntoIterator<Item = Scheme>) -> Self {
        self.user = Some(schemes.into_iter().collect());
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }
}

impl Registry for MemoryRegistry {
    fn shared_schemes(&self, _layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>> {
        Ok(self.shared.clone())
    }

    fn user_schemes(&self, _layout: &ProjectLayout) -> Result<Option<Vec<Scheme>>> {
        Ok(self.user.clone())
    }

    fn targets(&self, _layout: &ProjectLayout) -> Result<Vec<Target>> {
        Ok(self.targets.clone())
    }
}
