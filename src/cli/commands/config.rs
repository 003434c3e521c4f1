use fleet_config::model::{OIL_INTERVAL_PREFIX, SETTING_KEYS};

use crate::cli::core::{split_action, CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::core::fleet_manager::FleetSettings;

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        USAGE,
        cmd_config,
    )
    .with_subcommands(&["show", "set"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return show(context);
    }
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "show" => show(context),
        "set" => {
            if rest.len() < 2 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}|{}<type>> <value>",
                    SETTING_KEYS.join("|"),
                    OIL_INTERVAL_PREFIX
                )));
            }
            let value = rest[1..].join(" ");
            set(context, rest[0], value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let formatter = context.formatter();
    let config = context.config_read();
    output_section("Configuration");

    let mut rows = vec![
        ("locale", config.locale.clone()),
        ("currency", config.currency.clone()),
        ("currency_precision", config.currency_precision.to_string()),
        ("week_start", config.week_start.to_string()),
        ("maintenance_interval", config.maintenance.interval.to_string()),
        ("mileage_policy", config.mileage_policy.to_string()),
        (
            "data_root",
            match (&config.data_root, &context.data_dir) {
                (Some(root), _) => root.display().to_string(),
                (None, Some(dir)) => format!("{} (default)", dir.display()),
                (None, None) => "default".to_string(),
            },
        ),
        ("ui_color_enabled", config.ui_color_enabled.to_string()),
    ];
    let overrides: Vec<(String, String)> = config
        .maintenance
        .oil_type_intervals
        .iter()
        .map(|(oil, interval)| (format!("{OIL_INTERVAL_PREFIX}{oil}"), interval.to_string()))
        .collect();
    rows.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone())),
    );

    formatter.print_two_column(&rows);
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let previous = context.config_read().clone();
    let mut updated = previous.clone();
    updated.set_value(key, value)?;

    *context.config_write() = updated;
    if let Err(err) = context.persist_config() {
        *context.config_write() = previous;
        return Err(err);
    }

    let (settings, prefs) = {
        let config = context.config_read();
        (
            FleetSettings::from_config(&config),
            OutputPreferences {
                color_enabled: config.ui_color_enabled,
            },
        )
    };
    context.manager_mut().apply_settings(settings);
    output::set_preferences(prefs);
    tracing::info!(key, value, "configuration updated");

    output::success(format!("{key} set to {value}"));
    if key.eq_ignore_ascii_case("data_root") {
        output::hint("The new data directory is used from the next start.");
    }
    Ok(())
}
