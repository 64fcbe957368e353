//! Error types for scheme-model

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] scheme_fs::Error),

    #[error("Invalid scheme document at {path}: {message}")]
    InvalidScheme { path: PathBuf, message: String },

    #[error("Scheme storage at {path} is not a directory")]
    NotADirectory { path: PathBuf },
}
