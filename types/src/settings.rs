//! Resolved configuration types shared across crates.
//!
//! Raw TOML structs (all `Option` fields) stay in `zoo-config`; the loader
//! resolves them into these types so downstream code never re-checks
//! defaults.

use std::path::{Path, PathBuf};

pub const DEFAULT_ANIMALS_FILE: &str = "animals.csv";
pub const DEFAULT_USERS_FILE: &str = "users.csv";

/// Locations of the two delimited store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    animals: PathBuf,
    users: PathBuf,
}

impl StorePaths {
    #[must_use]
    pub fn new(animals: impl Into<PathBuf>, users: impl Into<PathBuf>) -> Self {
        Self {
            animals: animals.into(),
            users: users.into(),
        }
    }

    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_ANIMALS_FILE), dir.join(DEFAULT_USERS_FILE))
    }

    #[must_use]
    pub fn animals(&self) -> &Path {
        &self.animals
    }

    #[must_use]
    pub fn users(&self) -> &Path {
        &self.users
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub paths: StorePaths,
    /// Populate an empty animal store with the demo cast on startup.
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: StorePaths::in_dir("."),
            seed_demo_data: true,
        }
    }
}
