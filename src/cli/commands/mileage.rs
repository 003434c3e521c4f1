use fleet_domain::VehicleId;

use crate::cli::core::{split_action, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer};

const USAGE: &str = "mileage <set|show> ...";
const SET_USAGE: &str = "mileage set <car> <km>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "mileage",
        "Show or update current odometer readings",
        "mileage set <car> [km] | mileage show [car]",
        cmd_mileage,
    )
    .with_subcommands(&["set", "show"])]
}

fn cmd_mileage(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "set" => set(context, rest),
        "show" => show(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut form = match args {
        [car, km] => {
            let mut form = context.manager().mileage_form_for(car);
            form.mileage = km.to_string();
            form
        }
        [car] if context.mode() == CliMode::Interactive => {
            let form = context.manager().mileage_form_for(car);
            let value = context.prompt_with_initial("Current mileage (km)", &form.mileage)?;
            let mut form = form;
            form.mileage = value;
            form
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {SET_USAGE}"
            )))
        }
    };

    let change = context.manager_mut().update_mileage(&mut form)?;
    let formatter = context.formatter();
    match change.previous {
        Some(previous) if previous != change.current => output::success(format!(
            "Mileage for {} updated: {} -> {}",
            context.vehicle_name(change.vehicle),
            formatter.mileage(previous),
            formatter.mileage(change.current)
        )),
        _ => output::success(format!(
            "Mileage for {} set to {}",
            context.vehicle_name(change.vehicle),
            formatter.mileage(change.current)
        )),
    }
    Ok(())
}

fn show(context: &ShellContext, args: &[&str]) -> CommandResult {
    let formatter = context.formatter();
    let manager = context.manager();

    let vehicles: Vec<VehicleId> = match args {
        [] => manager.registry().vehicles().iter().map(|v| v.id).collect(),
        [car] => vec![car
            .parse::<VehicleId>()
            .map_err(CommandError::InvalidArguments)?],
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: mileage show [car]".into(),
            ))
        }
    };

    let mut table = Table::new(
        Some("Current mileage"),
        vec![
            TableColumn::new("Vehicle", 12),
            TableColumn::numeric("Mileage", 10),
        ],
    );
    for vehicle in vehicles {
        table.add_row(vec![
            manager.registry().name_of(vehicle).to_string(),
            formatter.mileage(manager.oil().current_mileage(vehicle)),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}
