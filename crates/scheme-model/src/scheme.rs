//! Schemes and where they are stored

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

use scheme_fs::{NormalizedPath, io};

use crate::error::{Error, Result};

/// Where a scheme is stored, and therefore who can see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Team-visible storage, versioned with the project
    Shared,
    /// Per-user storage, typically unversioned
    #[default]
    UserPrivate,
}

impl Provenance {
    pub fn is_shared(&self) -> bool {
        matches!(self, Provenance::Shared)
    }
}

/// A target referenced from a scheme's build action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildableReference {
    pub blueprint_identifier: String,
    pub buildable_name: String,
    pub blueprint_name: String,
    pub referenced_container: String,
}

/// A named build configuration.
///
/// Only the parts scheme management needs are modelled: the name, the
/// provenance assigned by whoever read it, and the build action entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub provenance: Provenance,
    #[serde(default)]
    pub build_entries: Vec<BuildableReference>,
}

impl Scheme {
    pub fn new(name: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            provenance,
            build_entries: Vec::new(),
        }
    }

    pub fn shared(name: impl Into<String>) -> Self {
        Self::new(name, Provenance::Shared)
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, Provenance::UserPrivate)
    }

    pub fn with_build_entry(mut self, reference: BuildableReference) -> Self {
        self.build_entries.push(reference);
        self
    }

    /// The same scheme classified with a different provenance.
    pub fn with_provenance(self, provenance: Provenance) -> Self {
        Self { provenance, ..self }
    }

    pub fn is_shared(&self) -> bool {
        self.provenance.is_shared()
    }

    /// Read a scheme document; the scheme name is the file stem.
    pub fn from_file(path: &NormalizedPath, provenance: Provenance) -> Result<Self> {
        let name = path.file_stem().unwrap_or_default().to_string();
        let source = io::read_text(path)?;
        Self::parse(name, &source, provenance).map_err(|message| Error::InvalidScheme {
            path: path.to_native(),
            message,
        })
    }

    /// Parse the XML body of a scheme document.
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        provenance: Provenance,
    ) -> std::result::Result<Self, String> {
        let mut reader = Reader::from_str(source);
        let mut scheme = Self::new(name, provenance);
        let mut seen_root = false;
        let mut build_action_depth = 0usize;

        loop {
            match reader.read_event().map_err(|e| e.to_string())? {
                Event::Start(e) => {
                    check_root(&e, &mut seen_root)?;
                    match e.name().as_ref() {
                        b"BuildAction" => build_action_depth += 1,
                        b"BuildableReference" if build_action_depth > 0 => {
                            scheme.build_entries.push(buildable_reference(&e)?);
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    check_root(&e, &mut seen_root)?;
                    if build_action_depth > 0 && e.name().as_ref() == b"BuildableReference" {
                        scheme.build_entries.push(buildable_reference(&e)?);
                    }
                }
                Event::End(e) if e.name().as_ref() == b"BuildAction" => {
                    build_action_depth = build_action_depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err("missing <Scheme> root element".to_string());
        }
        Ok(scheme)
    }
}

fn check_root(element: &BytesStart<'_>, seen_root: &mut bool) -> std::result::Result<(), String> {
    if *seen_root {
        return Ok(());
    }
    if element.name().as_ref() != b"Scheme" {
        return Err(format!(
            "expected <Scheme> root element, found <{}>",
            String::from_utf8_lossy(element.name().as_ref())
        ));
    }
    *seen_root = true;
    Ok(())
}

fn buildable_reference(element: &BytesStart<'_>) -> std::result::Result<BuildableReference, String> {
    let mut reference = BuildableReference::default();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map_err(|e| e.to_string())?.into_owned();
        match attr.key.as_ref() {
            b"BlueprintIdentifier" => reference.blueprint_identifier = value,
            b"BuildableName" => reference.buildable_name = value,
            b"BlueprintName" => reference.blueprint_name = value,
            b"ReferencedContainer" => reference.referenced_container = value,
            _ => {}
        }
    }
    Ok(reference)
}
