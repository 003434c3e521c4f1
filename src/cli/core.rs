//! Dispatch, error reporting, and shell context helpers.

use std::{
    io,
    sync::{RwLockReadGuard, RwLockWriteGuard},
};

use dialoguer::{Confirm, Input};
use fleet_config::ConfigError;
use fleet_domain::VehicleId;
use strsim::levenshtein;

pub use crate::core::errors::CliError;
use crate::{
    config::Config,
    core::{errors::FleetError, fleet_manager::FleetManager},
};

use super::output;
use super::registry::CommandEntry;
pub use super::shell_context::{CliMode, ShellContext};
use super::ui::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FleetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(FleetError::from(err))
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Command(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn manager(&self) -> RwLockReadGuard<'_, FleetManager> {
        self.fleet_manager
            .read()
            .expect("FleetManager lock poisoned")
    }

    pub(crate) fn manager_mut(&self) -> RwLockWriteGuard<'_, FleetManager> {
        self.fleet_manager
            .write()
            .expect("FleetManager lock poisoned")
    }

    pub(crate) fn config_read(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().expect("Config lock poisoned")
    }

    pub(crate) fn config_write(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().expect("Config lock poisoned")
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        let config = self.config_read();
        self.config_manager.save(&config)?;
        Ok(())
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config_read())
    }

    /// Registry display name for `id`, or `Unknown` for ids outside the fleet.
    pub(crate) fn vehicle_name(&self, id: VehicleId) -> String {
        self.manager().registry().name_of(id).to_string()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        "fleet> ".to_string()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    /// Asks for a value in interactive mode, starting from `initial`.
    pub(crate) fn prompt_with_initial(
        &self,
        prompt: &str,
        initial: &str,
    ) -> Result<String, CommandError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .interact_text()
            .map_err(CommandError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(FleetError::Validation(message)) => {
                self.print_error(&message);
                Ok(())
            }
            CommandError::Core(err @ FleetError::StorageError(_)) => {
                self.print_error(&err.to_string());
                self.print_hint("The change was not saved; nothing was modified.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        output::hint(message);
    }
}

/// Splits `args` into a subcommand and its arguments, or reports `usage`.
pub(crate) fn split_action<'a>(
    args: &'a [&'a str],
    usage: &str,
) -> Result<(String, &'a [&'a str]), CommandError> {
    match args.split_first() {
        Some((action, rest)) => Ok((action.to_lowercase(), rest)),
        None => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

pub(crate) fn parse_record_id(input: &str) -> Result<u64, CommandError> {
    input.trim().parse::<u64>().map_err(|_| {
        CommandError::InvalidArguments(format!("record id `{}` must be a number", input))
    })
}

#[cfg(test)]
pub(crate) fn process_script(context: &mut ShellContext, lines: &[&str]) -> CommandResult {
    for line in lines {
        match context.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleet_config::ConfigManager;
    use fleet_core::{
        storage::{MemoryStore, CURRENT_MILEAGE_KEY, OIL_RECORDS_KEY, RENTAL_RECORDS_KEY},
        FixedClock,
    };
    use fleet_domain::{MileagePolicy, RecordKind, WeekStart};
    use tempfile::TempDir;

    use crate::core::fleet_manager::FleetSettings;

    struct Harness {
        context: ShellContext,
        store: MemoryStore,
        dir: TempDir,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().expect("tempdir");
        let store = MemoryStore::new();
        let manager = FleetManager::load(
            Box::new(store.clone()),
            Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap())),
            FleetSettings::default(),
        )
        .expect("load manager");
        let config_manager = ConfigManager::new(dir.path().join("config.json"));
        let context =
            ShellContext::with_parts(CliMode::Script, manager, Config::default(), config_manager);
        Harness {
            context,
            store,
            dir,
        }
    }

    #[test]
    fn rental_commands_update_ledger() {
        let mut h = harness();
        process_script(
            &mut h.context,
            &[
                "rental add 1 income 150.00 \"Weekly rental\"",
                "rental add 2 expense 40 Fuel 2024-05-12",
                "rental stats",
                "rental list",
            ],
        )
        .expect("script runs");

        let manager = h.context.manager();
        assert_eq!(manager.rentals().len(), 2);
        let stats = manager.rental_stats();
        assert_eq!(stats.week.income, 150.0);
        assert_eq!(stats.week.expense, 40.0);
        assert_eq!(stats.week.profit, 110.0);
        assert!(h.store.raw(RENTAL_RECORDS_KEY).is_some());
        let first = &manager.rentals().records()[0];
        assert_eq!(first.kind, RecordKind::Income);
        assert_eq!(first.description, "Weekly rental");
    }

    #[test]
    fn invalid_rental_reports_validation_error() {
        let mut h = harness();
        let err = process_script(&mut h.context, &["rental add 1 income abc Rent"])
            .expect_err("invalid amount");

        assert!(matches!(err, CommandError::Core(FleetError::Validation(_))));
        assert!(h.context.manager().rentals().is_empty());
        assert_eq!(h.store.write_count(), 0);
    }

    #[test]
    fn rental_add_requires_all_arguments() {
        let mut h = harness();
        let err = process_script(&mut h.context, &["rental add 1 income"])
            .expect_err("missing arguments");
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn rental_delete_by_id() {
        let mut h = harness();
        process_script(&mut h.context, &["rental add 3 income 99 Rent"]).expect("add");
        let id = h.context.manager().rentals().records()[0].id;

        let delete = format!("rental delete {id}");
        process_script(&mut h.context, &[delete.as_str(), "rental delete 1"]).expect("delete");

        assert!(h.context.manager().rentals().is_empty());
    }

    #[test]
    fn oil_and_mileage_commands_drive_projection() {
        let mut h = harness();
        process_script(
            &mut h.context,
            &[
                "oil add 2 30000 5W-30 2024-01-01 \"Castrol Edge\"",
                "mileage set 2 39500",
                "oil status",
                "oil list",
                "mileage show",
                "mileage show 2",
            ],
        )
        .expect("script runs");

        let manager = h.context.manager();
        let projection = manager.next_change(VehicleId(2)).expect("projection");
        assert_eq!(projection.next_due_mileage, 40_000);
        assert_eq!(projection.remaining_distance, 500);
        assert!(!projection.is_overdue);
        assert_eq!(manager.oil().records()[0].notes(), Some("Castrol Edge"));
        assert_eq!(
            h.store.raw(CURRENT_MILEAGE_KEY).as_deref(),
            Some(r#"{"2":39500}"#)
        );
        assert!(h.store.raw(OIL_RECORDS_KEY).is_some());
    }

    #[test]
    fn mileage_set_without_value_fails_in_script_mode() {
        let mut h = harness();
        let err = process_script(&mut h.context, &["mileage set 2"]).expect_err("needs value");
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn config_set_persists_and_applies() {
        let mut h = harness();
        process_script(
            &mut h.context,
            &[
                "config set week_start monday",
                "config set mileage_policy reject-decrease",
                "config show",
            ],
        )
        .expect("config updates");

        assert_eq!(
            h.context.manager().settings().week_start,
            WeekStart::Monday
        );
        assert_eq!(
            h.context.manager().settings().mileage_policy,
            MileagePolicy::RejectDecrease
        );
        let saved = ConfigManager::new(h.dir.path().join("config.json"))
            .load()
            .expect("saved config");
        assert_eq!(saved.week_start, WeekStart::Monday);

        process_script(&mut h.context, &["mileage set 1 5000"]).expect("first reading");
        let err = process_script(&mut h.context, &["mileage set 1 4000"])
            .expect_err("decrease rejected");
        assert!(matches!(err, CommandError::Core(FleetError::Validation(_))));
    }

    #[test]
    fn config_set_rejects_unknown_key() {
        let mut h = harness();
        let err = process_script(&mut h.context, &["config set theme dark"])
            .expect_err("unknown key");
        assert!(matches!(err, CommandError::Core(FleetError::ConfigError(_))));
        assert_eq!(*h.context.config_read(), Config::default());
    }

    #[test]
    fn unknown_command_is_not_fatal() {
        let mut h = harness();
        process_script(&mut h.context, &["rentl list", "fleet", "version", "help", "help oil"])
            .expect("script runs");
    }

    #[test]
    fn exit_stops_processing() {
        let mut h = harness();
        process_script(&mut h.context, &["exit", "rental add 1 income 10 Late"])
            .expect("script runs");
        assert!(h.context.manager().rentals().is_empty());
    }
}
