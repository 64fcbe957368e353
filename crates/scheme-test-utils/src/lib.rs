//! Shared test utilities for the scheme management workspace.
//!
//! Dev-dependency only. Never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for project
//!   trees with shared and per-user scheme storage
//! - [`documents`]: canned scheme and management documents

pub mod documents;
pub mod project;
