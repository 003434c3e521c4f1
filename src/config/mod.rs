use std::path::PathBuf;

pub use fleet_config::{Config, ConfigError, ConfigManager};

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}
