//! Storage error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// IO failures while touching a store file, or a file whose ids are used up.
///
/// Missing records, duplicate identifiers and rejected credentials are not
/// errors; those come back as ordinary return values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("no ids left in {}", path.display())]
    IdsExhausted { path: PathBuf },
}

impl StoreError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::IdsExhausted { path } => {
                path
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
