//! Deriving a management record when none is persisted
//!
//! Reproduces the state the IDE would have written on first run: every
//! shared scheme gets a visibility entry, and every target not already
//! covered by a shared scheme of the same short name is suppressed so no
//! phantom scheme is generated for it.

use std::collections::HashSet;

use scheme_fs::ProjectLayout;
use scheme_model::{Provenance, Registry, Scheme};

use crate::error::{Error, Result};
use crate::management::Management;
use crate::suppression::SuppressBuildableAutocreation;
use crate::user_state::SchemeUserState;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The derived record
    pub management: Management,
    /// Shared schemes followed by user schemes, each classified by where
    /// it was read from
    pub schemes: Vec<Scheme>,
}

impl Reconciliation {
    pub fn shared_schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.schemes.iter().filter(|s| s.is_shared())
    }

    pub fn user_schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.schemes.iter().filter(|s| !s.is_shared())
    }
}

/// Derive a management record from the registry.
///
/// Absent shared or user storage counts as no schemes. Unreadable shared
/// storage fails with [`Error::MissingSharedData`].
pub fn reconcile<R: Registry + ?Sized>(layout: &ProjectLayout, registry: &R) -> Result<Reconciliation> {
    let shared = registry
        .shared_schemes(layout)
        .map_err(|source| Error::MissingSharedData {
            path: layout.shared_schemes_dir().to_native(),
            source,
        })?;
    let shared = classify(present_or_empty(shared, "shared"), Provenance::Shared);

    let user = registry.user_schemes(layout)?;
    let user = classify(present_or_empty(user, "user"), Provenance::UserPrivate);

    let targets = registry.targets(layout)?;

    let shared_names: HashSet<&str> = shared.iter().map(|s| s.name.as_str()).collect();
    let user_state = SchemeUserState::from_schemes(&shared);
    let suppressed = SuppressBuildableAutocreation::from_target_names(
        targets
            .iter()
            .filter(|target| !shared_names.contains(target.short_name()))
            .map(|target| target.reference.clone()),
    );

    tracing::info!(
        root = %layout.root(),
        shared = shared.len(),
        user = user.len(),
        targets = targets.len(),
        suppressed = suppressed.len(),
        "derived scheme management record"
    );

    let management = Management::from_parts(user_state, suppressed);
    let mut schemes = shared;
    schemes.extend(user);
    Ok(Reconciliation {
        management,
        schemes,
    })
}

fn present_or_empty(schemes: Option<Vec<Scheme>>, storage: &str) -> Vec<Scheme> {
    match schemes {
        Some(schemes) => schemes,
        None => {
            tracing::debug!(storage, "scheme storage absent, treating as empty");
            Vec::new()
        }
    }
}

fn classify(schemes: Vec<Scheme>, provenance: Provenance) -> Vec<Scheme> {
    schemes
        .into_iter()
        .map(|scheme| scheme.with_provenance(provenance))
        .collect()
}
