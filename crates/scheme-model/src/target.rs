//! Buildable targets

use serde::{Deserialize, Serialize};

/// Separator between a target reference's qualifier and its short name.
pub const QUALIFIER_SEPARATOR: &str = "::";

/// Kind of buildable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Compiles sources into a product
    #[default]
    Native,
    /// Groups other targets without a product of its own
    Aggregate,
}

/// A buildable unit of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Display name
    pub name: String,
    /// Reference identifier, optionally qualified (`Project::Name`)
    pub reference: String,
    #[serde(default)]
    pub kind: TargetKind,
}

impl Target {
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            kind: TargetKind::Native,
        }
    }

    pub fn aggregate(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Aggregate,
            ..Self::new(name, reference)
        }
    }

    /// The last segment of the reference identifier.
    ///
    /// An unqualified reference is its own short name.
    pub fn short_name(&self) -> &str {
        short_name(&self.reference)
    }
}

/// Short name of a possibly qualified reference identifier.
pub fn short_name(reference: &str) -> &str {
    reference
        .rsplit(QUALIFIER_SEPARATOR)
        .next()
        .unwrap_or(reference)
}
