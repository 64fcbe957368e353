//! Filesystem abstraction for scheme management
//!
//! Provides normalized paths, the project storage layout used by shared and
//! per-user scheme data, and guarded atomic I/O.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::StorageConfig;
pub use constants::StoragePath;
pub use error::{Error, Result};
pub use layout::ProjectLayout;
pub use path::NormalizedPath;
