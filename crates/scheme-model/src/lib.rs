//! Scheme and target model for scheme management.
//!
//! This crate describes the inputs reconciliation works from: schemes
//! (with their shared or private provenance), buildable targets, and the
//! [`Registry`] seam that supplies both for a project root.

pub mod error;
pub mod registry;
pub mod scheme;
pub mod target;

pub use error::{Error, Result};
pub use registry::{FsRegistry, MemoryRegistry, Registry};
pub use scheme::{BuildableReference, Provenance, Scheme};
pub use target::{QUALIFIER_SEPARATOR, Target, TargetKind};
