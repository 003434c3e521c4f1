use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use fleet_ledger::{
    config::ConfigManager,
    core::fleet_manager::{FleetManager, FleetSettings},
    services::FixedClock,
};
use fleet_storage_json::JsonSnapshotStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

/// Opens a manager over the snapshot files in `data_dir`.
#[allow(dead_code)]
pub fn open_manager(data_dir: &Path) -> FleetManager {
    let store = JsonSnapshotStore::new(data_dir.to_path_buf()).expect("create json snapshot store");
    FleetManager::load(
        Box::new(store),
        Box::new(FixedClock::on(today())),
        FleetSettings::default(),
    )
    .expect("load fleet manager")
}

/// Creates an isolated manager and config manager backed by a unique directory.
///
/// Returns the base directory; snapshots live under `<base>/data`.
#[allow(dead_code)]
pub fn setup_test_env() -> (FleetManager, ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = open_manager(&base.join("data"));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");

    (manager, config_manager, base)
}
