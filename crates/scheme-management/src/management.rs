//! The scheme management record
//!
//! Pairs the visibility records with the autocreation suppression set and
//! persists both, together, as one property list in the user's scheme
//! storage.

use scheme_fs::{NormalizedPath, ProjectLayout, io};
use scheme_model::{Registry, Scheme, Target};
use scheme_plist::{Dictionary, Value};

use crate::error::{Error, Result};
use crate::reconcile::{self, Reconciliation};
use crate::suppression::SuppressBuildableAutocreation;
use crate::user_state::SchemeUserState;

/// Type tag of a scheme document.
pub const SCHEME_TYPE_TAG: &str = "XCScheme";

/// Visibility records and suppression set for one user of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Management {
    user_state: SchemeUserState,
    suppress_buildable_autocreation: SuppressBuildableAutocreation,
}

impl Management {
    /// Type tag of the management record.
    pub const TYPE_TAG: &'static str = "Management";

    /// Record for a fresh project: every scheme visible, every target
    /// suppressed by name.
    pub fn new(schemes: &[Scheme], targets: &[Target]) -> Self {
        Self {
            user_state: SchemeUserState::from_schemes(schemes),
            suppress_buildable_autocreation: SuppressBuildableAutocreation::from_target_names(
                targets.iter().map(|t| t.name.clone()),
            ),
        }
    }

    pub fn from_parts(
        user_state: SchemeUserState,
        suppress_buildable_autocreation: SuppressBuildableAutocreation,
    ) -> Self {
        Self {
            user_state,
            suppress_buildable_autocreation,
        }
    }

    pub fn user_state(&self) -> &SchemeUserState {
        &self.user_state
    }

    pub fn user_state_mut(&mut self) -> &mut SchemeUserState {
        &mut self.user_state
    }

    pub fn suppress_buildable_autocreation(&self) -> &SuppressBuildableAutocreation {
        &self.suppress_buildable_autocreation
    }

    pub fn suppress_buildable_autocreation_mut(&mut self) -> &mut SuppressBuildableAutocreation {
        &mut self.suppress_buildable_autocreation
    }

    /// Location of the management document (`xcschememanagement.plist`).
    pub fn document_path(layout: &ProjectLayout) -> NormalizedPath {
        let file_name = format!(
            "{}{}.plist",
            SCHEME_TYPE_TAG.to_lowercase(),
            Self::TYPE_TAG.to_lowercase()
        );
        layout.user_schemes_dir().join(&file_name)
    }

    /// Whether a management document is present for this layout.
    pub fn exists(layout: &ProjectLayout) -> bool {
        Self::document_path(layout).is_file()
    }

    /// Load the persisted record, or derive one if there is none.
    ///
    /// A missing document, or one that is not a valid property list, is
    /// replaced by [`Management::reconcile`]. A valid property list that
    /// violates the record schema fails with [`Error::MalformedRecord`].
    pub fn load<R: Registry + ?Sized>(layout: &ProjectLayout, registry: &R) -> Result<Self> {
        let path = Self::document_path(layout);

        let Some(bytes) = io::read_if_exists(&path)? else {
            tracing::info!(%path, "no scheme management record, deriving one");
            return Ok(Self::reconcile(layout, registry)?.management);
        };

        let document = match scheme_plist::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(%path, error = %e, "unreadable scheme management record, deriving one");
                return Ok(Self::reconcile(layout, registry)?.management);
            }
        };

        let management = Self::from_document(&document).inspect_err(|e| {
            tracing::error!(%path, error = %e, "rejecting scheme management record");
        })?;
        tracing::debug!(
            %path,
            schemes = management.user_state.len(),
            suppressed = management.suppress_buildable_autocreation.len(),
            "loaded scheme management record"
        );
        Ok(management)
    }

    /// Derive a record from the registry's shared schemes, user schemes
    /// and targets.
    pub fn reconcile<R: Registry + ?Sized>(
        layout: &ProjectLayout,
        registry: &R,
    ) -> Result<Reconciliation> {
        reconcile::reconcile(layout, registry)
    }

    /// Write the record to the layout's management document.
    ///
    /// Fails with [`Error::WriteConflict`] if a document exists and
    /// `override_existing` is false. Missing directories are created.
    pub fn write(&self, layout: &ProjectLayout, override_existing: bool) -> Result<()> {
        let path = Self::document_path(layout);
        let bytes = scheme_plist::to_vec(&self.to_document())?;

        io::write_file(&path, &bytes, override_existing).map_err(|e| match e {
            scheme_fs::Error::AlreadyExists { path } => Error::WriteConflict { path },
            other => Error::StorageIoFailure(other),
        })?;

        tracing::info!(
            %path,
            schemes = self.user_state.len(),
            suppressed = self.suppress_buildable_autocreation.len(),
            "wrote scheme management record"
        );
        Ok(())
    }

    /// The record as a property list tree: visibility first, then
    /// suppression.
    pub fn to_document(&self) -> Value {
        let mut root = Dictionary::new();
        root.insert(SchemeUserState::SECTION_KEY, self.user_state.to_value());
        root.insert(
            SuppressBuildableAutocreation::SECTION_KEY,
            self.suppress_buildable_autocreation.to_value(),
        );
        Value::Dictionary(root)
    }

    /// Decode a record from a property list tree.
    ///
    /// Absent sections decode as empty.
    pub fn from_document(document: &Value) -> Result<Self> {
        let root = document.as_dictionary().ok_or_else(|| {
            Error::malformed(format!(
                "document root must be a dict, found {}",
                document.kind()
            ))
        })?;

        let user_state = match root.get(SchemeUserState::SECTION_KEY) {
            Some(section) => SchemeUserState::from_value(section)?,
            None => SchemeUserState::new(),
        };
        let suppress_buildable_autocreation =
            match root.get(SuppressBuildableAutocreation::SECTION_KEY) {
                Some(section) => SuppressBuildableAutocreation::from_value(section)?,
                None => SuppressBuildableAutocreation::new(),
            };

        Ok(Self {
            user_state,
            suppress_buildable_autocreation,
        })
    }
}
