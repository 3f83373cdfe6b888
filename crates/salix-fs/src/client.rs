//! Path-addressed byte store
//!
//! [`FsClient`] is the seam between entity repositories and the place bytes
//! actually live. [`LocalFsClient`] stores everything under a root directory
//! on the local filesystem.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::io::{self as store_io, RobustnessConfig};
use crate::path::{DELIMITER, StorePath};
use crate::{Error, Result};

/// A store addressed by ordered path segments.
///
/// Reads report a missing entry as `Ok(None)`; listings report a missing
/// directory as an empty set. Only genuine failures surface as errors.
pub trait FsClient: Send + Sync + std::fmt::Debug {
    /// Write the whole stream to the composed location, replacing any
    /// previous content. Returns the number of bytes written.
    fn write(&self, reader: &mut dyn Read, segments: &[&str]) -> Result<u64>;

    /// Open the composed location for reading.
    fn read(&self, segments: &[&str]) -> Result<Option<Box<dyn Read + Send>>>;

    /// True iff the composed location exists.
    fn exists(&self, segments: &[&str]) -> bool;

    /// Names of the immediate subdirectories.
    fn list_directories(&self, segments: &[&str]) -> Result<BTreeSet<String>>;

    /// Names of the immediate regular files.
    fn list_files(&self, segments: &[&str]) -> Result<BTreeSet<String>>;

    /// Every regular file below the composed directory, as `/`-prefixed
    /// paths relative to it (e.g. `/blog/index.yml`).
    fn list_files_recursive(&self, segments: &[&str]) -> Result<BTreeSet<String>>;

    fn write_bytes(&self, content: &[u8], segments: &[&str]) -> Result<()> {
        let mut reader = content;
        self.write(&mut reader, segments).map(|_| ())
    }

    fn read_bytes(&self, segments: &[&str]) -> Result<Option<Vec<u8>>> {
        let path = StorePath::from_segments(segments)?;
        let Some(mut reader) = self.read(segments)? else {
            return Ok(None);
        };
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| Error::io(path.as_str(), e))?;
        Ok(Some(content))
    }
}

/// [`FsClient`] backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFsClient {
    root: PathBuf,
    robustness: RobustnessConfig,
}

impl LocalFsClient {
    /// Create a client rooted at `root` with default robustness settings.
    ///
    /// An existing root is canonicalized; a missing one is used as given and
    /// created lazily by the first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_robustness(root, RobustnessConfig::default())
    }

    pub fn with_robustness(root: impl AsRef<Path>, robustness: RobustnessConfig) -> Self {
        let root = root.as_ref();
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Self { root, robustness }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compose, validate and resolve segments to a native path.
    pub fn resolve(&self, segments: &[&str]) -> Result<PathBuf> {
        Ok(StorePath::from_segments(segments)?.resolve(&self.root))
    }

    fn list_children(&self, segments: &[&str], want_dirs: bool) -> Result<BTreeSet<String>> {
        let dir = self.resolve(segments)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if is_missing_dir(&e) => return Ok(BTreeSet::new()),
            Err(e) => return Err(Error::io(&dir, e)),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            let file_type = if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(meta) => meta.file_type(),
                    Err(_) => continue,
                }
            } else {
                file_type
            };
            if want_dirs && file_type.is_dir() {
                names.insert(name);
            } else if !want_dirs && file_type.is_file() && !store_io::is_sidecar(&name) {
                names.insert(name);
            }
        }
        Ok(names)
    }
}

fn is_missing_dir(e: &io::Error) -> bool {
    // Listing a plain file is treated like listing a missing directory
    e.kind() == io::ErrorKind::NotFound || e.kind() == io::ErrorKind::NotADirectory
}

fn walk_files(dir: &Path, prefix: &str, out: &mut BTreeSet<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = format!("{prefix}{DELIMITER}{name}");
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            walk_files(&entry.path(), &relative, out)?;
        } else if file_type.is_symlink() {
            // Linked files are listed, linked directories are not followed
            if !store_io::is_sidecar(&name) && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
                out.insert(relative);
            }
        } else if file_type.is_file() && !store_io::is_sidecar(&name) {
            out.insert(relative);
        }
    }
    Ok(())
}

impl FsClient for LocalFsClient {
    fn write(&self, reader: &mut dyn Read, segments: &[&str]) -> Result<u64> {
        let store_path = StorePath::from_segments(segments)?;
        let Some(name) = store_path.file_name() else {
            return Err(Error::InvalidSegment {
                segment: String::new(),
                reason: "cannot write to the store root".into(),
            });
        };
        if store_io::is_sidecar(name) {
            return Err(Error::InvalidSegment {
                segment: store_path.as_str().to_string(),
                reason: "name is reserved for lock and temp files".into(),
            });
        }
        let path = store_path.resolve(&self.root);
        let written = store_io::write_atomic(&path, reader, self.robustness)?;
        tracing::debug!(path = %store_path, bytes = written, "Wrote store entry");
        Ok(written)
    }

    fn read(&self, segments: &[&str]) -> Result<Option<Box<dyn Read + Send>>> {
        let path = self.resolve(segments)?;
        if path.is_dir() {
            return Ok(None);
        }
        Ok(store_io::open_read(&path)?.map(|file| Box::new(file) as Box<dyn Read + Send>))
    }

    fn exists(&self, segments: &[&str]) -> bool {
        self.resolve(segments).is_ok_and(|path| path.exists())
    }

    fn list_directories(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
        self.list_children(segments, true)
    }

    fn list_files(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
        self.list_children(segments, false)
    }

    fn list_files_recursive(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
        let dir = self.resolve(segments)?;
        let mut files = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(files);
        }
        walk_files(&dir, "", &mut files)?;
        Ok(files)
    }

    fn read_bytes(&self, segments: &[&str]) -> Result<Option<Vec<u8>>> {
        let path = self.resolve(segments)?;
        if path.is_dir() {
            return Ok(None);
        }
        store_io::read_bytes(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());

        client.write_bytes(b"hello", &["site", "resources", "a.txt"]).unwrap();

        let content = client.read_bytes(&["site", "resources", "a.txt"]).unwrap();
        assert_eq!(content.as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn read_of_directory_is_absent() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());
        fs::create_dir_all(temp.path().join("site/urls")).unwrap();

        assert!(client.read(&["site", "urls"]).unwrap().is_none());
    }

    #[test]
    fn write_to_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());
        assert!(client.write_bytes(b"x", &["", "/"]).is_err());
    }

    /// Implements only the required methods so the provided ones run.
    #[derive(Debug)]
    struct StreamOnly(LocalFsClient);

    impl FsClient for StreamOnly {
        fn write(&self, reader: &mut dyn Read, segments: &[&str]) -> Result<u64> {
            self.0.write(reader, segments)
        }
        fn read(&self, segments: &[&str]) -> Result<Option<Box<dyn Read + Send>>> {
            self.0.read(segments)
        }
        fn exists(&self, segments: &[&str]) -> bool {
            self.0.exists(segments)
        }
        fn list_directories(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
            self.0.list_directories(segments)
        }
        fn list_files(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
            self.0.list_files(segments)
        }
        fn list_files_recursive(&self, segments: &[&str]) -> Result<BTreeSet<String>> {
            self.0.list_files_recursive(segments)
        }
    }

    #[test]
    fn provided_byte_helpers_round_trip() {
        let temp = TempDir::new().unwrap();
        let client = StreamOnly(LocalFsClient::new(temp.path()));

        client.write_bytes(b"streamed", &["site", "resources", "s.bin"]).unwrap();

        let content = client.read_bytes(&["site", "resources", "s.bin"]).unwrap();
        assert_eq!(content.as_deref(), Some(&b"streamed"[..]));
        assert_eq!(client.read_bytes(&["site", "resources", "none.bin"]).unwrap(), None);
        assert!(client.read_bytes(&["..", "outside.bin"]).is_err());
    }

    #[test]
    fn dot_files_are_listed() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());
        client.write_bytes(b"deny from all", &["site", "resources", ".htaccess"]).unwrap();

        let files = client.list_files(&["site", "resources"]).unwrap();
        assert_eq!(files.into_iter().collect::<Vec<_>>(), vec![".htaccess".to_string()]);
    }

    #[test]
    fn sidecar_names_cannot_be_written() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());
        let result = client.write_bytes(b"x", &["site", "resources", ".logo.png.lock"]);
        assert!(matches!(result, Err(Error::InvalidSegment { .. })));
    }

    #[test]
    fn lock_files_are_not_listed() {
        let temp = TempDir::new().unwrap();
        let client = LocalFsClient::new(temp.path());
        client.write_bytes(b"{}", &["site", "configurations", "a.json"]).unwrap();

        let files = client.list_files(&["site", "configurations"]).unwrap();
        assert_eq!(files.into_iter().collect::<Vec<_>>(), vec!["a.json".to_string()]);
    }
}
