//! Shared test utilities and fixtures
//!
//! A throwaway data directory with a facade opened on top of it.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use zoo_core::{DelimitedStore, Zoo};
use zoo_types::{Settings, StorePaths};

pub struct TestZoo {
    pub dir: TempDir,
    pub zoo: Zoo,
}

impl TestZoo {
    /// Initialized store with only the header rows and the default admin.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let zoo = Zoo::new(DelimitedStore::new(StorePaths::in_dir(dir.path())));
        zoo.initialize().expect("initialize store");
        Self { dir, zoo }
    }

    /// Opened through settings with demo seeding on.
    pub fn seeded() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = Settings {
            paths: StorePaths::in_dir(dir.path()),
            seed_demo_data: true,
        };
        let zoo = Zoo::open(&settings).expect("open zoo");
        Self { dir, zoo }
    }

    pub fn animals_path(&self) -> PathBuf {
        self.zoo.store().paths().animals().to_path_buf()
    }

    pub fn users_path(&self) -> PathBuf {
        self.zoo.store().paths().users().to_path_buf()
    }

    pub fn animals_file(&self) -> String {
        fs::read_to_string(self.animals_path()).expect("read animals file")
    }

    pub fn users_file(&self) -> String {
        fs::read_to_string(self.users_path()).expect("read users file")
    }

    pub fn write_animals(&self, content: &str) {
        fs::write(self.animals_path(), content).expect("write animals file");
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
