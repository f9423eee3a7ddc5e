//! Atomic file write helpers.
//!
//! Whole-file rewrites go through a temp file in the destination directory
//! that is renamed over the target, so readers see either the old rows or
//! the new rows and never a truncated mix. Where rename-over-existing fails,
//! the old file is parked as `<file>.bak` and restored on failure.

use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Allow the file to inherit the default umask.
    #[default]
    Default,
    /// Owner-only read/write (0o600 on Unix). Ignored elsewhere.
    OwnerOnly,
}

impl PersistMode {
    #[cfg(unix)]
    fn mode(self) -> Option<u32> {
        match self {
            Self::Default => None,
            Self::OwnerOnly => Some(0o600),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncPolicy {
    SyncAll,
    SkipSync,
}

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    /// File sync policy for the temp file before persisting.
    pub file_sync: FileSyncPolicy,
    /// Permission policy for the created file.
    pub mode: PersistMode,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            file_sync: FileSyncPolicy::SyncAll,
            mode: PersistMode::Default,
        }
    }
}

impl AtomicWriteOptions {
    #[must_use]
    pub fn owner_only() -> Self {
        Self {
            mode: PersistMode::OwnerOnly,
            ..Self::default()
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn apply_mode(path: &Path, mode: PersistMode) -> io::Result<()> {
    #[cfg(unix)]
    if let Some(mode) = mode.mode() {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

fn staged(path: &Path, bytes: &[u8], options: AtomicWriteOptions) -> io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    apply_mode(tmp.path(), options.mode)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    if matches!(options.file_sync, FileSyncPolicy::SyncAll) {
        tmp.as_file().sync_all()?;
    }
    Ok(tmp)
}

/// Recover from an interrupted rewrite by restoring `<file>.bak`.
///
/// Only acts when the canonical file is missing and the backup exists.
/// Returns `true` when a backup was restored.
pub fn recover_bak_file(path: &Path) -> bool {
    let backup = path.with_extension("bak");
    if path.exists() || !backup.exists() {
        return false;
    }
    match fs::rename(&backup, path) {
        Ok(()) => {
            tracing::warn!(
                path = %path.display(),
                "Recovered .bak file from interrupted atomic write"
            );
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to recover .bak file: {e}");
            false
        }
    }
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with_options(path, bytes, AtomicWriteOptions::default())
}

/// Replace `path` with `bytes`, creating it if needed.
pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = staged(path, bytes, options)?;

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        // Rename-over-existing refused: park the old file and retry.
        let backup = path.with_extension("bak");
        let _ = fs::remove_file(&backup);
        fs::rename(path, &backup)?;

        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            tracing::warn!(
                path = %backup.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    apply_mode(path, options.mode)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Atomically replaced file");
    Ok(())
}

/// Create `path` with `bytes`, failing with `AlreadyExists` if it is present.
///
/// The file appears fully written or not at all.
pub fn atomic_create_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = staged(path, bytes, options)?;

    tmp.persist_noclobber(path).map_err(|err| err.error)?;

    apply_mode(path, options.mode)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Created file");
    Ok(())
}

/// Append one newline-terminated line to an existing file.
///
/// A file whose last byte is not `\n` gets one first, so the new line never
/// joins the previous one. The handle is flushed and closed before returning,
/// on every path.
pub fn append_line(path: impl AsRef<Path>, line: &str) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = fs::OpenOptions::new().read(true).append(true).open(path)?;
    let mut buf = String::with_capacity(line.len() + 2);
    if !ends_with_newline(&mut file)? {
        debug!(path = %path.display(), "Terminating unterminated last line before append");
        buf.push('\n');
    }
    buf.push_str(line);
    buf.push('\n');
    file.write_all(buf.as_bytes())?;
    file.flush()?;
    file.sync_data()?;
    Ok(())
}

/// `true` for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut fs::File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
