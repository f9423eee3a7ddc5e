//! Configuration loading for the zoo inventory.
//!
//! The optional file lives at `~/.zoo/config.toml`:
//!
//! ```toml
//! [storage]
//! data_dir = "~/zoo-data"
//! animals_file = "animals.csv"
//! users_file = "users.csv"
//!
//! [app]
//! seed_demo_data = true
//! ```
//!
//! `ZOO_DATA_DIR` and `ZOO_SEED_DEMO` override the file. Everything resolves
//! into [`zoo_types::Settings`].

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use zoo_types::{DEFAULT_ANIMALS_FILE, DEFAULT_USERS_FILE, Settings, StorePaths};

pub const DATA_DIR_ENV: &str = "ZOO_DATA_DIR";
pub const SEED_DEMO_ENV: &str = "ZOO_SEED_DEMO";

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct ZooConfig {
    pub storage: Option<StorageConfig>,
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding both store files. Supports `~/` and `${VAR}`.
    pub data_dir: Option<String>,
    pub animals_file: Option<String>,
    pub users_file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

impl ZooConfig {
    /// Load `~/.zoo/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Resolve against the process environment.
    #[must_use]
    pub fn resolve(&self) -> Settings {
        self.resolve_with(|key| env::var(key).ok())
    }

    /// Resolve with an explicit variable lookup.
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let storage = self.storage.as_ref();

        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .or_else(|| storage.and_then(|s| s.data_dir.clone()))
            .map(|raw| expand_path(&raw, &lookup))
            .unwrap_or_else(|| PathBuf::from("."));

        let file = |configured: Option<&String>, default: &str| {
            configured
                .filter(|name| !name.trim().is_empty())
                .map_or_else(|| data_dir.join(default), |name| data_dir.join(name))
        };
        let paths = StorePaths::new(
            file(storage.and_then(|s| s.animals_file.as_ref()), DEFAULT_ANIMALS_FILE),
            file(storage.and_then(|s| s.users_file.as_ref()), DEFAULT_USERS_FILE),
        );

        let seed_demo_data = match lookup(SEED_DEMO_ENV) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring unrecognized {SEED_DEMO_ENV} value: {raw}");
                self.seed_from_file()
            }),
            None => self.seed_from_file(),
        };

        Settings {
            paths,
            seed_demo_data,
        }
    }

    fn seed_from_file(&self) -> bool {
        self.app.as_ref().is_none_or(|app| app.seed_demo_data)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand `${VAR}` references and a leading `~/`.
///
/// Missing variables become empty; an unclosed `${` is kept verbatim.
pub fn expand_path(value: &str, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let (before, after) = rest.split_at(start);
        out.push_str(before);
        let body = &after[2..];
        match body.find('}') {
            Some(end) => {
                let var = &body[..end];
                if !var.is_empty() {
                    out.push_str(&lookup(var).unwrap_or_default());
                }
                rest = &body[end + 1..];
            }
            None => {
                out.push_str(after);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    if let Some(tail) = out.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(tail);
    }
    PathBuf::from(out)
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".zoo").join("config.toml"))
}
