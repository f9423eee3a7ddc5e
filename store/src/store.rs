//! The store handle, file bootstrap and id assignment.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use zoo_types::{ANIMAL_HEADER, StorePaths, USER_HEADER, UserId, leading_id};
use zoo_utils::{AtomicWriteOptions, atomic_create_with_options, recover_bak_file};

use crate::error::{Result, StoreError};

/// Default account written when the user file is first created.
pub const DEFAULT_ADMIN: (&str, &str) = ("admin", "admin");

/// What [`DelimitedStore::initialize`] had to create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Initialized {
    pub animals_created: bool,
    pub users_created: bool,
}

/// File-backed storage for the animal and user collections.
///
/// Every call re-reads the files; nothing is cached between calls. A single
/// process is assumed to own the files.
#[derive(Debug, Clone)]
pub struct DelimitedStore {
    paths: StorePaths,
}

impl DelimitedStore {
    #[must_use]
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Create whichever store files are missing.
    ///
    /// The animal file starts with its header only. The user file starts with
    /// its header and the default `admin`/`admin` account.
    pub fn initialize(&self) -> Result<Initialized> {
        Ok(Initialized {
            animals_created: self.ensure_animal_file()?,
            users_created: self.ensure_user_file()?,
        })
    }

    pub(crate) fn ensure_animal_file(&self) -> Result<bool> {
        let contents = format!("{ANIMAL_HEADER}\n");
        create_if_missing(self.paths.animals(), &contents, AtomicWriteOptions::default())
    }

    pub(crate) fn ensure_user_file(&self) -> Result<bool> {
        let (identifier, secret) = DEFAULT_ADMIN;
        let contents = format!("{USER_HEADER}\n{},{identifier},{secret}\n", UserId::ADMIN);
        create_if_missing(self.paths.users(), &contents, AtomicWriteOptions::owner_only())
    }

    /// Next free id for the rows of `path`: the largest leading id plus one.
    ///
    /// Returns 1 for a missing or header-only file. Rows whose first column
    /// is not an integer are ignored. Fails with [`StoreError::IdsExhausted`]
    /// rather than reuse `u64::MAX`.
    pub fn next_id(path: &Path) -> Result<u64> {
        let Some(content) = read_optional(path)? else {
            return Ok(1);
        };
        let max = data_lines(&content).filter_map(|(_, line)| leading_id(line)).max();
        match max {
            None => Ok(1),
            Some(id) => id.checked_add(1).ok_or_else(|| StoreError::IdsExhausted {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn create_if_missing(path: &Path, contents: &str, options: AtomicWriteOptions) -> Result<bool> {
    recover_bak_file(path);
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::write(parent, e))?;
    }

    match atomic_create_with_options(path, contents.as_bytes(), options) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Created store file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(StoreError::write(path, e)),
    }
}

/// Whole file contents, or `None` when the file does not exist.
///
/// Invalid UTF-8 is replaced with U+FFFD so one damaged row cannot make the
/// rest of the file unreadable.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::read(path, e)),
    };
    let content = String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "Replacing invalid UTF-8: {}", e.utf8_error());
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    });
    Ok(Some(content))
}

/// Non-blank lines after the header, paired with their 1-based line number.
pub(crate) fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
}
