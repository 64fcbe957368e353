//! Error types for scheme-plist

/// Result type for scheme-plist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a property list
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid property list: {message}")]
    Syntax { message: String },

    #[error("Unsupported property list element <{name}>")]
    UnsupportedElement { name: String },

    #[error("Duplicate dictionary key: {key}")]
    DuplicateKey { key: String },
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }
}
