//! Zoo CLI - binary entry point.
//!
//! ```text
//! main() -> init_tracing() -> ZooConfig::load().resolve() -> Zoo::open() -> Console::run()
//! ```
//!
//! Logs go to a file so they never interleave with the menu on stdout.

mod console;
mod render;

use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use zoo_config::{ZooConfig, config_path};
use zoo_core::Zoo;

use crate::console::Console;

/// Route `tracing` output to the first writable log file.
///
/// `RUST_LOG` wins over the `info` default. Without a log file events are
/// filtered but never printed, since stdout belongs to the menus.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let LogTarget { file, skipped } = LogTarget::open(&log_paths());
    let Some((path, file)) = file else {
        tracing_subscriber::registry().with(env_filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    tracing::info!(path = %path.display(), "Logging to file");
    for (candidate, err) in skipped {
        tracing::warn!(path = %candidate.display(), "Log location unusable: {err}");
    }
}

/// Result of walking the log locations in order.
struct LogTarget {
    file: Option<(PathBuf, File)>,
    /// Locations tried before `file`, replayed once logging is up.
    skipped: Vec<(PathBuf, io::Error)>,
}

impl LogTarget {
    fn open(paths: &[PathBuf]) -> Self {
        let mut skipped = Vec::new();
        for path in paths {
            let opened = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| OpenOptions::new().create(true).append(true).open(path));
            match opened {
                Ok(file) => {
                    return Self {
                        file: Some((path.clone(), file)),
                        skipped,
                    };
                }
                Err(err) => skipped.push((path.clone(), err)),
            }
        }
        Self {
            file: None,
            skipped,
        }
    }
}

/// `~/.zoo/logs/zoo.log`, then `./.zoo/logs/zoo.log`.
fn log_paths() -> Vec<PathBuf> {
    let home = config_path()
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| dir.join("logs").join("zoo.log"));
    home.into_iter()
        .chain([Path::new(".zoo").join("logs").join("zoo.log")])
        .collect()
}

fn main() -> Result<()> {
    init_tracing();

    let config = match ZooConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Ignoring config at {}: {e}", e.path().display());
            ZooConfig::default()
        }
    };
    let settings = config.resolve();
    tracing::info!(
        animals = %settings.paths.animals().display(),
        users = %settings.paths.users().display(),
        seed_demo_data = settings.seed_demo_data,
        "Resolved settings"
    );

    let zoo = Zoo::open(&settings).with_context(|| {
        format!(
            "failed to open the zoo store at {}",
            settings.paths.animals().display()
        )
    })?;

    let color = io::stdout().is_terminal();
    let mut console = Console::new(zoo, io::stdin().lock(), io::stdout().lock(), color);
    console.run()
}
