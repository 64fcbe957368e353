//! Per-scheme visibility records (`SchemeUserState`)
//!
//! Each entry is stored under a key derived from the scheme name and its
//! provenance: `App.xcscheme` for a private scheme and
//! `App.xcscheme_^#shared#^_` for a shared one. Entry order is the order of
//! the IDE's scheme picker and survives load and save.

use scheme_model::{Provenance, Scheme};
use scheme_plist::{Dictionary, Value};

use crate::error::{Error, Result};

const SCHEME_KEY_EXTENSION: &str = ".xcscheme";
const SHARED_KEY_SUFFIX: &str = "_^#shared#^_";
const ORDER_HINT_KEY: &str = "orderHint";
const IS_SHOWN_KEY: &str = "isShown";

/// Visibility state of one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStateEntry {
    pub name: String,
    pub provenance: Provenance,
    pub order_hint: Option<i64>,
    pub is_shown: bool,
}

impl UserStateEntry {
    /// A visible entry with no order hint.
    pub fn new(name: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            provenance,
            order_hint: None,
            is_shown: true,
        }
    }

    pub fn for_scheme(scheme: &Scheme) -> Self {
        Self::new(scheme.name.clone(), scheme.provenance)
    }

    pub fn with_order_hint(mut self, order_hint: i64) -> Self {
        self.order_hint = Some(order_hint);
        self
    }

    pub fn with_shown(mut self, is_shown: bool) -> Self {
        self.is_shown = is_shown;
        self
    }

    /// Key under which this entry is stored in the document.
    pub fn document_key(&self) -> String {
        match self.provenance {
            Provenance::Shared => format!("{}{SCHEME_KEY_EXTENSION}{SHARED_KEY_SUFFIX}", self.name),
            Provenance::UserPrivate => format!("{}{SCHEME_KEY_EXTENSION}", self.name),
        }
    }

    /// Split a document key into scheme name and provenance.
    ///
    /// Keys without the scheme extension are taken as bare private names.
    pub fn parse_key(key: &str) -> (&str, Provenance) {
        let (rest, provenance) = match key.strip_suffix(SHARED_KEY_SUFFIX) {
            Some(rest) => (rest, Provenance::Shared),
            None => (key, Provenance::UserPrivate),
        };
        match rest.strip_suffix(SCHEME_KEY_EXTENSION) {
            Some(name) => (name, provenance),
            None => (rest, provenance),
        }
    }

    fn to_value(&self) -> Value {
        let mut dict = Dictionary::new();
        dict.insert(IS_SHOWN_KEY, self.is_shown);
        if let Some(order_hint) = self.order_hint {
            dict.insert(ORDER_HINT_KEY, order_hint);
        }
        Value::Dictionary(dict)
    }

    fn from_document_entry(key: &str, value: &Value) -> Result<Self> {
        let (name, provenance) = Self::parse_key(key);
        if name.is_empty() {
            return Err(Error::malformed(format!(
                "scheme user state key {key:?} has no scheme name"
            )));
        }
        let dict = value.as_dictionary().ok_or_else(|| {
            Error::malformed(format!(
                "scheme user state for {name:?} must be a dict, found {}",
                value.kind()
            ))
        })?;

        let order_hint = match dict.get(ORDER_HINT_KEY) {
            None => None,
            Some(hint) => Some(hint.as_integer().ok_or_else(|| {
                Error::malformed(format!(
                    "{ORDER_HINT_KEY} of {name:?} must be an integer, found {}",
                    hint.kind()
                ))
            })?),
        };

        // records written before visibility was tracked are visible
        let is_shown = match dict.get(IS_SHOWN_KEY) {
            None => true,
            Some(shown) => shown.as_boolean().ok_or_else(|| {
                Error::malformed(format!(
                    "{IS_SHOWN_KEY} of {name:?} must be a boolean, found {}",
                    shown.kind()
                ))
            })?,
        };

        Ok(Self {
            name: name.to_string(),
            provenance,
            order_hint,
            is_shown,
        })
    }
}

/// Ordered visibility records, unique by scheme name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeUserState {
    entries: Vec<UserStateEntry>,
}

impl SchemeUserState {
    /// Document key of this section.
    pub const SECTION_KEY: &'static str = "SchemeUserState";

    pub fn new() -> Self {
        Self::default()
    }

    /// One visible entry per scheme, in the given order.
    pub fn from_schemes<'a>(schemes: impl IntoIterator<Item = &'a Scheme>) -> Self {
        let mut state = Self::new();
        for scheme in schemes {
            state.insert(UserStateEntry::for_scheme(scheme));
        }
        state
    }

    /// Add an entry, keeping scheme names unique.
    ///
    /// When the name is already present, a shared entry replaces a private
    /// one in place; otherwise the existing entry wins. Returns whether the
    /// state changed.
    pub fn insert(&mut self, entry: UserStateEntry) -> bool {
        match self.entries.iter().position(|e| e.name == entry.name) {
            None => {
                self.entries.push(entry);
                true
            }
            Some(index)
                if entry.provenance.is_shared() && !self.entries[index].provenance.is_shared() =>
            {
                self.entries[index] = entry;
                true
            }
            Some(_) => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&UserStateEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn is_shown(&self, name: &str) -> Option<bool> {
        self.get(name).map(|e| e.is_shown)
    }

    /// Show or hide a scheme. Returns `false` if the scheme has no entry.
    pub fn set_shown(&mut self, name: &str, is_shown: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.is_shown = is_shown;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserStateEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let dict: Dictionary = self
            .entries
            .iter()
            .map(|entry| (entry.document_key(), entry.to_value()))
            .collect();
        Value::Dictionary(dict)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let dict = value.as_dictionary().ok_or_else(|| {
            Error::malformed(format!(
                "{} must be a dict, found {}",
                Self::SECTION_KEY,
                value.kind()
            ))
        })?;

        let mut state = Self::new();
        for (key, entry) in dict.iter() {
            let entry = UserStateEntry::from_document_entry(key, entry)?;
            let name = entry.name.clone();
            if !state.insert(entry) {
                tracing::warn!(scheme = %name, key, "ignoring duplicate scheme user state entry");
            }
        }
        Ok(state)
    }
}

impl<'a> IntoIterator for &'a SchemeUserState {
    type Item = &'a UserStateEntry;
    type IntoIter = std::slice::Iter<'a, UserStateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("App.xcscheme", "App", Provenance::UserPrivate)]
    #[case("App.xcscheme_^#shared#^_", "App", Provenance::Shared)]
    #[case("App", "App", Provenance::UserPrivate)]
    #[case("My.App.xcscheme", "My.App", Provenance::UserPrivate)]
    #[case("App.xcscheme.xcscheme", "App.xcscheme", Provenance::UserPrivate)]
    fn test_parse_key(#[case] key: &str, #[case] name: &str, #[case] provenance: Provenance) {
        assert_eq!(UserStateEntry::parse_key(key), (name, provenance));
    }

    #[test]
    fn test_document_keys() {
        insta::assert_snapshot!(
            UserStateEntry::new("App", Provenance::Shared).document_key(),
            @"App.xcscheme_^#shared#^_"
        );
        insta::assert_snapshot!(
            UserStateEntry::new("Scratch", Provenance::UserPrivate).document_key(),
            @"Scratch.xcscheme"
        );
    }

    #[test]
    fn test_missing_is_shown_defaults_to_visible() {
        let value = Value::Dictionary([(ORDER_HINT_KEY, Value::Integer(3))].into_iter().collect());
        let entry = UserStateEntry::from_document_entry("Old.xcscheme", &value).unwrap();

        assert!(entry.is_shown);
        assert_eq!(entry.order_hint, Some(3));
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let value = Value::Dictionary(Dictionary::new());
        let result = UserStateEntry::from_document_entry(".xcscheme_^#shared#^_", &value);
        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }

    #[rstest]
    #[case::entry_not_dict(Value::from("yes"))]
    #[case::order_hint_not_integer(Value::Dictionary(
        [(ORDER_HINT_KEY, Value::from("1"))].into_iter().collect()
    ))]
    #[case::is_shown_not_boolean(Value::Dictionary(
        [(IS_SHOWN_KEY, Value::Integer(0))].into_iter().collect()
    ))]
    fn test_wrong_node_kinds_are_malformed(#[case] value: Value) {
        let result = UserStateEntry::from_document_entry("App.xcscheme", &value);
        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn test_shared_entry_replaces_private_in_place() {
        let mut state = SchemeUserState::new();
        state.insert(UserStateEntry::new("First", Provenance::UserPrivate));
        state.insert(UserStateEntry::new("App", Provenance::UserPrivate));
        state.insert(UserStateEntry::new("Last", Provenance::Shared));

        assert!(state.insert(UserStateEntry::new("App", Provenance::Shared)));
        assert!(!state.insert(UserStateEntry::new("App", Provenance::UserPrivate)));

        let names: Vec<_> = state.names().collect();
        assert_eq!(names, vec!["First", "App", "Last"]);
        assert_eq!(state.get("App").unwrap().provenance, Provenance::Shared);
    }

    #[test]
    fn test_set_shown() {
        let mut state = SchemeUserState::from_schemes(&[Scheme::shared("App")]);
        assert_eq!(state.is_shown("App"), Some(true));

        assert!(state.set_shown("App", false));
        assert_eq!(state.is_shown("App"), Some(false));
        assert!(!state.set_shown("Missing", false));
    }

    #[test]
    fn test_order_hint_omitted_when_absent() {
        let state = SchemeUserState::from_schemes(&[Scheme::user("Scratch")]);
        let value = state.to_value();
        let entry = value
            .as_dictionary()
            .and_then(|d| d.get("Scratch.xcscheme"))
            .and_then(Value::as_dictionary)
            .unwrap();

        assert!(!entry.contains_key(ORDER_HINT_KEY));
        assert_eq!(entry.get(IS_SHOWN_KEY), Some(&Value::Boolean(true)));
    }
}
