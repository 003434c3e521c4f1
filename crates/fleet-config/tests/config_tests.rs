use std::fs;

use fleet_config::{Config, ConfigError, ConfigManager};
use fleet_domain::{MileagePolicy, VehicleId, WeekStart};
use tempfile::tempdir;

#[test]
fn default_config_matches_source_fleet() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "zł");
    assert_eq!(cfg.currency_precision, 2);
    assert_eq!(cfg.week_start, WeekStart::Sunday);
    assert_eq!(cfg.mileage_policy, MileagePolicy::Unrestricted);
    assert_eq!(cfg.maintenance.interval, 10_000);
    assert_eq!(cfg.fleet.len(), 4);
    assert_eq!(cfg.fleet[3].id, VehicleId(4));
    assert_eq!(cfg.fleet[3].plate, "WD1123V");
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set_value("week_start", "monday").expect("week start");
    cfg.set_value("mileage_policy", "reject-decrease").expect("policy");
    cfg.set_value("oil_interval.0W-20", "15000").expect("override");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.maintenance.interval_for("0w-20"), 15_000);
    assert_eq!(
        manager.config_path(),
        dir.path().join("config").join("config.json")
    );
    assert!(!dir.path().join("config").join("config.json.tmp").exists());
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));

    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn partial_config_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "currency": "EUR", "maintenance": { "interval": 8000 } }"#)
        .expect("seed config");

    let loaded = ConfigManager::new(path).load().expect("load");

    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.maintenance.interval, 8_000);
    assert_eq!(loaded.fleet.len(), 4);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{ nope").expect("seed config");

    let err = ConfigManager::new(path).load().expect_err("malformed");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn set_value_rejects_unknown_keys_and_bad_values() {
    let mut cfg = Config::default();

    assert!(matches!(
        cfg.set_value("theme", "dark"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(cfg.set_value("maintenance_interval", "0").is_err());
    assert!(cfg.set_value("week_start", "friday").is_err());
    assert!(cfg.set_value("ui_color_enabled", "maybe").is_err());
    assert_eq!(cfg, Config::default());
}

#[test]
fn resetting_oil_interval_restores_default() {
    let mut cfg = Config::default();
    cfg.set_value("oil_interval.5W-30", "12000").expect("override");
    cfg.set_value("oil_interval.5w-30", "default").expect("reset");

    assert!(cfg.maintenance.oil_type_intervals.is_empty());
    assert_eq!(cfg.maintenance.interval_for("5W-30"), 10_000);
}

#[test]
fn oil_interval_override_replaces_differently_cased_key() {
    let mut cfg = Config::default();
    cfg.set_value("oil_interval.5W-30", "8000").expect("first override");
    cfg.set_value("oil_interval.5w-30", "12000").expect("second override");

    assert_eq!(cfg.maintenance.oil_type_intervals.len(), 1);
    assert_eq!(cfg.maintenance.interval_for("5W-30"), 12_000);
    assert_eq!(cfg.maintenance.interval_for("5w-30"), 12_000);
}

#[test]
fn currency_settings_are_validated() {
    let mut cfg = Config::default();
    cfg.set_value("currency_precision", "0").expect("precision");
    cfg.set_value("currency", "EUR").expect("currency");

    assert_eq!(cfg.currency_precision, 0);
    assert_eq!(cfg.currency, "EUR");
    assert!(cfg.set_value("currency_precision", "9").is_err());
    assert!(cfg.set_value("currency", "  ").is_err());
}

#[test]
fn data_root_defaults_under_base() {
    let mut cfg = Config::default();
    let base = std::path::Path::new("/tmp/fleet");
    assert_eq!(cfg.resolve_data_root(base), base.join("data"));

    cfg.set_value("data_root", "/srv/snapshots").expect("data root");
    assert_eq!(
        cfg.resolve_data_root(base),
        std::path::PathBuf::from("/srv/snapshots")
    );
}
