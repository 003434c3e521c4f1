//! Shared runtime state for CLI interactions and command execution.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use dialoguer::theme::ColorfulTheme;
use fleet_storage_json::JsonSnapshotStore;

use crate::{
    config::{self, Config, ConfigManager},
    core::{
        errors::CliError,
        fleet_manager::{FleetManager, FleetSettings},
        utils::PathResolver,
    },
};

use super::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    system_clock::SystemClock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub fleet_manager: Arc<RwLock<FleetManager>>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Arc<RwLock<Config>>,
    pub data_dir: Option<PathBuf>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and snapshots from the resolved base directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config_manager = config::manager_with_base(base.clone())?;
        let config = config_manager.load()?;
        let data_dir = config.resolve_data_root(&base);
        let store = JsonSnapshotStore::new(data_dir.clone())?;
        let manager = FleetManager::load(
            Box::new(store),
            Box::new(SystemClock),
            FleetSettings::from_config(&config),
        )?;
        tracing::info!(
            base = %base.display(),
            data = %data_dir.display(),
            ?mode,
            "shell context ready"
        );

        let mut context = Self::with_parts(mode, manager, config, config_manager);
        context.data_dir = Some(data_dir);
        Ok(context)
    }

    /// Assembles a context around an already loaded manager.
    pub fn with_parts(
        mode: CliMode,
        manager: FleetManager,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        Self {
            mode,
            registry,
            fleet_manager: Arc::new(RwLock::new(manager)),
            theme: ColorfulTheme::default(),
            config_manager,
            config: Arc::new(RwLock::new(config)),
            data_dir: None,
            last_command: None,
            running: true,
        }
    }
}
