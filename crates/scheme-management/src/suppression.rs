//! Targets whose automatic scheme creation is suppressed

use indexmap::IndexSet;
use scheme_plist::{Dictionary, Value};

use crate::error::{Error, Result};

const PRIMARY_KEY: &str = "primary";

/// Set of target identifiers the IDE must not create schemes for.
///
/// Semantically a set: equality ignores order. Insertion order is kept so
/// the written document is stable for an unchanged input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressBuildableAutocreation {
    targets: IndexSet<String>,
}

impl SuppressBuildableAutocreation {
    /// Document key of this section.
    pub const SECTION_KEY: &'static str = "SuppressBuildableAutocreation";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_target_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `false` if the target was already suppressed.
    pub fn insert(&mut self, target: impl Into<String>) -> bool {
        self.targets.insert(target.into())
    }

    /// Returns `false` if the target was not suppressed.
    pub fn remove(&mut self, target: &str) -> bool {
        self.targets.shift_remove(target)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.targets.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let dict: Dictionary = self
            .targets
            .iter()
            .map(|target| {
                let marker: Dictionary = [(PRIMARY_KEY, true)].into_iter().collect();
                (target.clone(), Value::Dictionary(marker))
            })
            .collect();
        Value::Dictionary(dict)
    }

    /// Decode the section. The content of each marker is not inspected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let dict = value.as_dictionary().ok_or_else(|| {
            Error::malformed(format!(
                "{} must be a dict, found {}",
                Self::SECTION_KEY,
                value.kind()
            ))
        })?;

        let mut suppression = Self::new();
        for (target, marker) in dict.iter() {
            if marker.as_dictionary().is_none() {
                return Err(Error::malformed(format!(
                    "suppression marker for {target:?} must be a dict, found {}",
                    marker.kind()
                )));
            }
            suppression.insert(target);
        }
        Ok(suppression)
    }
}
