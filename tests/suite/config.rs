//! Config file to running facade.

use std::fs;

use zoo_config::{DATA_DIR_ENV, StorageConfig, ZooConfig};
use zoo_core::Zoo;

#[test]
fn config_file_places_store_files() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let data_dir = dir.path().join("data");
    fs::write(
        &config_path,
        format!(
            "[storage]\ndata_dir = '{}'\nanimals_file = \"beasts.csv\"\n\n[app]\nseed_demo_data = false\n",
            data_dir.display()
        ),
    )
    .unwrap();

    let config = ZooConfig::load_from(&config_path).unwrap().unwrap();
    let settings = config.resolve_with(|_| None);
    let zoo = Zoo::open(&settings).unwrap();

    assert!(data_dir.join("beasts.csv").exists());
    assert!(data_dir.join("users.csv").exists());
    assert!(zoo.list_animals().unwrap().is_empty());
}

#[test]
fn data_dir_variable_wins_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let from_env = dir.path().join("env");
    let config = config_with_data_dir("/nonexistent/zoo");

    let settings = config.resolve_with(|key| {
        (key == DATA_DIR_ENV).then(|| from_env.display().to_string())
    });
    assert_eq!(settings.paths.animals(), from_env.join("animals.csv").as_path());

    let zoo = Zoo::open(&settings).unwrap();
    assert_eq!(zoo.list_animals().unwrap().len(), 5);
    assert!(from_env.join("users.csv").exists());
}

fn config_with_data_dir(data_dir: &str) -> ZooConfig {
    ZooConfig {
        storage: Some(StorageConfig {
            data_dir: Some(data_dir.to_string()),
            ..Default::default()
        }),
        app: None,
    }
}
