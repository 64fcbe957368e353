//! Slash-normalized paths for scheme storage

use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem location held as a `/`-separated string.
///
/// Scheme storage locations are compared and stripped as strings, so all
/// separators are folded to `/` and trailing separators are dropped. The
/// platform-native form is only produced at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let folded = path.as_ref().to_string_lossy().replace('\\', "/");
        let inner = match folded.trim_end_matches('/') {
            "" if folded.starts_with('/') => "/".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The path in the platform's own form, for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        self.inner.clone().into()
    }

    /// Append one or more components. Empty segments leave the path as is.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_matches('/');
        let inner = match (self.inner.as_str(), segment) {
            (_, "") => self.inner.clone(),
            ("", _) => segment.to_string(),
            ("/", _) => format!("/{segment}"),
            (base, _) => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    pub fn parent(&self) -> Option<Self> {
        let (head, tail) = self.inner.rsplit_once('/')?;
        if tail.is_empty() {
            return None;
        }
        let inner = if head.is_empty() { "/" } else { head };
        Some(Self {
            inner: inner.to_string(),
        })
    }

    /// Last component, if any.
    pub fn file_name(&self) -> Option<&str> {
        let name = match self.inner.rsplit_once('/') {
            Some((_, name)) => name,
            None => self.inner.as_str(),
        };
        (!name.is_empty()).then_some(name)
    }

    /// Split the file name at its last dot. Dot files have no extension.
    fn split_extension(&self) -> Option<(&str, Option<&str>)> {
        let name = self.file_name()?;
        Some(match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (name, None),
        })
    }

    pub fn file_stem(&self) -> Option<&str> {
        self.split_extension().map(|(stem, _)| stem)
    }

    pub fn extension(&self) -> Option<&str> {
        self.split_extension().and_then(|(_, ext)| ext)
    }

    /// Remove a trailing sequence of whole components.
    ///
    /// Returns `None` when the path does not end with `suffix` on a component
    /// boundary. Stripping the entire path yields `.`.
    pub fn strip_suffix(&self, suffix: &str) -> Option<Self> {
        let suffix = Self::new(suffix);
        let suffix = suffix.as_str().trim_start_matches('/');
        if suffix.is_empty() {
            return None;
        }
        match self.inner.strip_suffix(suffix)? {
            "" => Some(Self::new(".")),
            "/" => Some(Self::new("/")),
            head => head.strip_suffix('/').map(Self::new),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

macro_rules! normalized_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for NormalizedPath {
                fn from(path: $source) -> Self {
                    Self::new(path)
                }
            }
        )*
    };
}

normalized_from!(&str, String, &String, PathBuf, &Path, &PathBuf);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_separators_are_dropped() {
        assert_eq!(NormalizedPath::new("a/b/").as_str(), "a/b");
        assert_eq!(NormalizedPath::new("/").as_str(), "/");
        assert_eq!(NormalizedPath::new("a\\b\\").as_str(), "a/b");
    }

    #[test]
    fn test_file_stem() {
        let path = NormalizedPath::new("dir/App.xcscheme");
        assert_eq!(path.file_stem(), Some("App"));
        assert_eq!(path.extension(), Some("xcscheme"));

        let path = NormalizedPath::new("dir/My.App.xcscheme");
        assert_eq!(path.file_stem(), Some("My.App"));
    }

    #[test]
    fn test_strip_suffix_on_component_boundary() {
        let path = NormalizedPath::new("/p/App.xcodeproj/xcuserdata/me.xcuserdatad/xcschemes");
        let root = path
            .strip_suffix("xcuserdata/me.xcuserdatad/xcschemes")
            .unwrap();
        assert_eq!(root.as_str(), "/p/App.xcodeproj");

        // "schemes" is not a whole component of "xcschemes"
        assert!(path.strip_suffix("schemes").is_none());
    }

    #[test]
    fn test_strip_suffix_whole_path() {
        let path = NormalizedPath::new("xcuserdata/me.xcuserdatad/xcschemes");
        let root = path
            .strip_suffix("xcuserdata/me.xcuserdatad/xcschemes")
            .unwrap();
        assert_eq!(root.as_str(), ".");
    }

    #[test]
    fn test_parent_of_root_child() {
        assert_eq!(
            NormalizedPath::new("/file").parent(),
            Some(NormalizedPath::new("/"))
        );
        assert_eq!(NormalizedPath::new("file").parent(), None);
    }
}
