//! Error types for scheme-management

use std::path::PathBuf;

/// Result type for scheme-management operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, reconciling or writing a
/// management record
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document parsed but does not follow the record schema
    #[error("Malformed scheme management record: {message}")]
    MalformedRecord { message: String },

    /// Shared scheme storage exists but could not be read
    #[error("Failed to read shared schemes at {path}: {source}")]
    MissingSharedData {
        path: PathBuf,
        #[source]
        source: scheme_model::Error,
    },

    /// A record already exists and overwriting was not requested
    #[error("Scheme management record already exists at {path}")]
    WriteConflict { path: PathBuf },

    /// Filesystem error from scheme-fs
    #[error(transparent)]
    StorageIoFailure(#[from] scheme_fs::Error),

    /// User schemes or targets could not be read
    #[error("Registry error: {0}")]
    Registry(#[from] scheme_model::Error),

    /// Property list error from scheme-plist
    #[error("Property list error: {0}")]
    Plist(#[from] scheme_plist::Error),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }
}
