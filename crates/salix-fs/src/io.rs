//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Tuning knobs for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobustnessConfig {
    /// How long a writer waits for the sidecar lock before giving up.
    #[serde(with = "millis", rename = "lock_timeout_ms")]
    pub lock_timeout: Duration,
    /// Flush file contents to disk before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Path of the hidden sidecar lock guarding writes to `path`.
pub fn lock_path(path: &Path) -> PathBuf {
    hidden_sibling(path, "lock")
}

/// True for names of the lock and temp files [`write_atomic`] places next
/// to an entry: `.{name}.lock` and `.{name}.{pid}.{n}.tmp`.
pub fn is_sidecar(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('.') else {
        return false;
    };
    if let Some(target) = rest.strip_suffix(".lock") {
        return !target.is_empty();
    }
    let Some(rest) = rest.strip_suffix(".tmp") else {
        return false;
    };
    let mut parts = rest.rsplitn(3, '.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(counter), Some(pid), Some(target)) => {
            !target.is_empty() && is_number(pid) && is_number(counter)
        }
        _ => false,
    }
}

fn is_number(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

fn hidden_sibling(path: &Path, tag: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{tag}"))
}

fn acquire_lock(path: &Path, timeout: Duration) -> Result<File> {
    let lock_path = lock_path(path);
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(5))
        .with_max_interval(Duration::from_millis(100))
        .with_max_elapsed_time(Some(timeout))
        .build();

    backoff::retry(policy, || lock_file.try_lock_exclusive().map_err(backoff::Error::transient))
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    Ok(lock_file)
}

/// Write a stream atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe partial content.
/// Writers to the same file serialize on an advisory sidecar lock; the last
/// rename wins. Missing parent directories are created.
///
/// The lock sidecar stays in place after the write. Removing it would let a
/// waiting writer hold a lock on an unlinked file while a newcomer locks a
/// fresh one. Store listings skip sidecars (see [`is_sidecar`]).
///
/// Returns the number of bytes written.
pub fn write_atomic(path: &Path, reader: &mut dyn Read, config: RobustnessConfig) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock = acquire_lock(path, config.lock_timeout)?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = hidden_sibling(
        path,
        &format!(
            "{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ),
    );

    let result = write_temp(&temp_path, reader, config).and_then(|written| {
        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;
        Ok(written)
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    lock.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    result
}

fn write_temp(temp_path: &Path, reader: &mut dyn Read, config: RobustnessConfig) -> Result<u64> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    let written = io::copy(reader, &mut temp_file).map_err(|e| Error::io(temp_path, e))?;
    temp_file.flush().map_err(|e| Error::io(temp_path, e))?;

    if config.enable_fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(written)
}

/// Write a byte slice atomically.
pub fn write_bytes(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let mut reader = content;
    write_atomic(path, &mut reader, config).map(|_| ())
}

/// Open a file for reading.
///
/// Returns `Ok(None)` when the file does not exist, so callers can tell a
/// missing entry apart from a genuine I/O failure.
pub fn open_read(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Read a whole file, `Ok(None)` when it does not exist.
pub fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
