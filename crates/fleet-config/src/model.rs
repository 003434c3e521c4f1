use std::path::{Path, PathBuf};

use fleet_domain::{default_fleet, MaintenancePolicy, MileagePolicy, Vehicle, WeekStart};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Prefix for per-oil-type interval keys accepted by [`Config::set_value`].
pub const OIL_INTERVAL_PREFIX: &str = "oil_interval.";

/// Keys accepted by [`Config::set_value`], besides `oil_interval.<type>`.
pub const SETTING_KEYS: &[&str] = &[
    "locale",
    "currency",
    "currency_precision",
    "week_start",
    "maintenance_interval",
    "mileage_policy",
    "data_root",
    "ui_color_enabled",
];

/// Stores user-configurable preferences, the vehicle fleet and ledger policies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub currency_precision: u8,
    pub week_start: WeekStart,
    pub maintenance: MaintenancePolicy,
    pub mileage_policy: MileagePolicy,
    pub fleet: Vec<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional directory for snapshot files. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pl-PL".into(),
            currency: "zł".into(),
            currency_precision: 2,
            week_start: WeekStart::default(),
            maintenance: MaintenancePolicy::default(),
            mileage_policy: MileagePolicy::default(),
            fleet: default_fleet(),
            data_root: None,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    /// Default base directory when no override is supplied.
    pub fn default_base_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fleet-ledger")
    }

    /// Directory holding the snapshot files, relative to `base` unless overridden.
    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    /// Applies a `config set <key> <value>` style update.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        if let Some(oil_type) = key.strip_prefix(OIL_INTERVAL_PREFIX) {
            return self.set_oil_interval(oil_type, value);
        }
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?,
            "currency_precision" => {
                self.currency_precision = value
                    .parse::<u8>()
                    .ok()
                    .filter(|precision| *precision <= 6)
                    .ok_or_else(|| invalid(key, value, "expected 0-6"))?
            }
            "week_start" => self.week_start = value.parse().map_err(ConfigError::Invalid)?,
            "maintenance_interval" => {
                self.maintenance.interval = parse_interval(key, value)?;
            }
            "mileage_policy" => {
                self.mileage_policy = value.parse().map_err(ConfigError::Invalid)?
            }
            "data_root" => {
                self.data_root = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                }
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid(key, value, "expected on or off")),
                }
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown setting `{other}`"
                )))
            }
        }
        Ok(())
    }

    fn set_oil_interval(&mut self, oil_type: &str, value: &str) -> Result<(), ConfigError> {
        let oil_type = oil_type.trim();
        if oil_type.is_empty() {
            return Err(ConfigError::Invalid(
                "oil type missing from interval key".into(),
            ));
        }
        let interval = if value.eq_ignore_ascii_case("default") {
            None
        } else {
            Some(parse_interval(OIL_INTERVAL_PREFIX, value)?)
        };
        // Oil types match case-insensitively, so one entry per type.
        let intervals = &mut self.maintenance.oil_type_intervals;
        intervals.retain(|name, _| !name.eq_ignore_ascii_case(oil_type));
        if let Some(interval) = interval {
            intervals.insert(oil_type.to_string(), interval);
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str, hint: &str) -> ConfigError {
    ConfigError::Invalid(format!("`{value}` is not valid for {key} ({hint})"))
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, value, "value required"))
    } else {
        Ok(value.to_string())
    }
}

fn parse_interval(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|interval| *interval > 0)
        .ok_or_else(|| invalid(key, value, "expected a positive distance"))
}
