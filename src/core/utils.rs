use std::{env, path::PathBuf};

use fleet_config::Config;

/// Environment variable overriding the application base directory.
pub const HOME_ENV: &str = "FLEET_LEDGER_HOME";

/// Resolves the directories the application reads and writes.
pub struct PathResolver;

impl PathResolver {
    /// `FLEET_LEDGER_HOME` when set, otherwise the platform data directory.
    pub fn base_dir() -> PathBuf {
        match env::var_os(HOME_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => Config::default_base_dir(),
        }
    }
}
