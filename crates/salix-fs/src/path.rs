//! Segment-based path composition for the byte store
//!
//! Callers address content by an ordered list of segments
//! (`scope`, kind folder, key). Segments are joined with `/`, blank
//! segments are dropped and a single redundant delimiter at either end of a
//! segment is trimmed, so `["site", "/urls/", "a/index.yml"]` composes to
//! `site/urls/a/index.yml`. The composed path is always relative to the
//! store root and is only turned into a native path at the I/O boundary.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Delimiter used between segments in a composed path.
pub const DELIMITER: char = '/';

/// Join segments using the store composition rule.
///
/// Backslashes are normalized to `/` before trimming.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for segment in segments {
        let normalized = segment.as_ref().replace('\\', "/");
        if normalized.trim().is_empty() {
            continue;
        }
        let trimmed = trim_delimiter(&normalized);
        if trimmed.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(DELIMITER);
        }
        joined.push_str(trimmed);
    }
    joined
}

fn trim_delimiter(raw: &str) -> &str {
    let raw = raw.strip_prefix(DELIMITER).unwrap_or(raw);
    raw.strip_suffix(DELIMITER).unwrap_or(raw)
}

/// Reject identifiers that could escape the store root.
///
/// `..` and `.` components, empty inner components and NUL bytes are not
/// allowed anywhere in a composed path.
pub fn validate_path_identifier(value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::InvalidSegment {
            segment: value.to_string(),
            reason: "contains a NUL byte".into(),
        });
    }
    for component in value.split(DELIMITER) {
        let reason = match component {
            ".." => "parent directory traversal",
            "." => "current directory component",
            "" => "empty component",
            _ => continue,
        };
        return Err(Error::InvalidSegment {
            segment: value.to_string(),
            reason: reason.into(),
        });
    }
    Ok(())
}

/// A validated path relative to the store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorePath {
    /// Always uses `/` and never starts or ends with it
    inner: String,
}

impl StorePath {
    /// The store root itself.
    pub fn root() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Compose and validate a path from segments.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        let inner = join_segments(segments);
        if !inner.is_empty() {
            validate_path_identifier(&inner)?;
        }
        Ok(Self { inner })
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Resolve against a root directory into a native path.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.is_root() {
            return root.to_path_buf();
        }
        self.inner
            .split(DELIMITER)
            .fold(root.to_path_buf(), |acc, part| acc.join(part))
    }

    /// Get the last component, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.inner.rsplit(DELIMITER).next()
    }

    /// Get the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let inner = match self.inner.rfind(DELIMITER) {
            Some(idx) => self.inner[..idx].to_string(),
            None => String::new(),
        };
        Some(Self { inner })
    }

    /// Get the extension of the last component if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }
}

impl std::fmt::Display for StorePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_drops_blank_segments() {
        assert_eq!(join_segments(&["a", "", "  ", "b"]), "a/b");
    }

    #[test]
    fn join_trims_redundant_delimiters() {
        assert_eq!(join_segments(&["/a/", "/b", "c/"]), "a/b/c");
    }

    #[test]
    fn join_keeps_inner_delimiters() {
        assert_eq!(join_segments(&["s", "urls", "a/b/index.yml"]), "s/urls/a/b/index.yml");
    }

    #[test]
    fn single_delimiter_segment_is_dropped() {
        assert_eq!(join_segments(&["a", "/", "b"]), "a/b");
    }

    #[test]
    fn root_resolves_to_root() {
        let path = StorePath::from_segments(&[""]).unwrap();
        assert!(path.is_root());
        assert_eq!(path.resolve(Path::new("/tmp/store")), PathBuf::from("/tmp/store"));
    }

    #[test]
    fn parent_of_single_component_is_root() {
        let path = StorePath::from_segments(&["scope"]).unwrap();
        assert_eq!(path.parent(), Some(StorePath::root()));
        assert_eq!(StorePath::root().parent(), None);
    }

    #[test]
    fn extension_ignores_dotfiles() {
        let path = StorePath::from_segments(&["s", ".hidden"]).unwrap();
        assert_eq!(path.extension(), None);
        let path = StorePath::from_segments(&["s", "page.html"]).unwrap();
        assert_eq!(path.extension(), Some("html"));
    }

    #[test]
    fn traversal_is_rejected() {
        assert!(StorePath::from_segments(&["s", "../etc/passwd"]).is_err());
        assert!(StorePath::from_segments(&["s", "a//b"]).is_err());
        assert!(StorePath::from_segments(&["s", "./a"]).is_err());
    }
}
