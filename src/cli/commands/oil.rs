use colored::Colorize;
use fleet_domain::VehicleStatus;

use crate::cli::core::{
    parse_record_id, split_action, CommandError, CommandResult, ShellContext,
};
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Formatter, Table, TableColumn, TableRenderer};

const USAGE: &str = "oil <add|delete|list|status> ...";
const ADD_USAGE: &str = "oil add <car> <mileage> <oil type> [date] [notes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "oil",
        "Track oil changes and upcoming service",
        "oil add <car> <mileage> <oil type> [date] [notes] | oil delete <id> | oil list | oil status",
        cmd_oil,
    )
    .with_subcommands(&["add", "delete", "list", "status"])]
}

fn cmd_oil(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => add(context, rest),
        "delete" | "rm" => delete(context, rest),
        "list" | "ls" => list(context),
        "status" => status(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(3..=5).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {ADD_USAGE}"
        )));
    }

    let mut manager = context.manager_mut();
    let mut form = manager.blank_oil_change_form();
    form.car_id = args[0].to_string();
    form.mileage = args[1].to_string();
    form.oil_type = args[2].to_string();
    if let Some(date) = args.get(3) {
        form.date = date.to_string();
    }
    if let Some(notes) = args.get(4) {
        form.notes = notes.to_string();
    }

    let id = manager.submit_oil_change(&mut form)?;
    output::success(format!("Oil change {id} recorded"));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: oil delete <id>".into(),
        ));
    };
    let id = parse_record_id(raw)?;
    if context.manager_mut().delete_oil_change(id)? {
        output::success(format!("Oil change {id} deleted"));
    } else {
        context.print_warning(&format!("No oil change with id {id}"));
    }
    Ok(())
}

fn list(context: &ShellContext) -> CommandResult {
    let formatter = context.formatter();
    let manager = context.manager();
    let mut table = Table::new(
        Some("Oil changes"),
        vec![
            TableColumn::numeric("ID", 13),
            TableColumn::new("Date", 10),
            TableColumn::new("Vehicle", 12),
            TableColumn::numeric("Mileage", 10),
            TableColumn::new("Oil", 8),
            TableColumn::new("Notes", 12),
        ],
    )
    .with_empty_message("No oil changes recorded yet.");

    for record in manager.oil().sorted_for_display() {
        table.add_row(vec![
            record.id.to_string(),
            formatter.date(record.date),
            manager.registry().name_of(record.car_id).to_string(),
            formatter.mileage(record.mileage),
            record.oil_type.clone(),
            record.notes().unwrap_or("-").to_string(),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn status(context: &ShellContext) -> CommandResult {
    let formatter = context.formatter();
    let statuses = context.manager().vehicle_statuses();
    if statuses.is_empty() {
        output::info("No vehicles configured.");
        return Ok(());
    }
    for status in &statuses {
        print_card(&formatter, status);
    }
    Ok(())
}

fn print_card(formatter: &Formatter, status: &VehicleStatus) {
    output_section(status.vehicle.label());
    let mut rows = vec![("Current mileage", formatter.mileage(status.current_mileage))];

    match (&status.last_change, &status.projection) {
        (Some(last), Some(projection)) => {
            rows.push((
                "Last change",
                format!(
                    "{} at {} ({})",
                    formatter.date(last.date),
                    formatter.mileage(last.mileage),
                    last.oil_type
                ),
            ));
            rows.push((
                "Next change",
                formatter.mileage(projection.next_due_mileage),
            ));
            let remaining =
                formatter.remaining(projection.remaining_distance, projection.is_overdue);
            let remaining = if projection.is_overdue {
                remaining.red().bold().to_string()
            } else {
                remaining
            };
            rows.push(("Remaining", remaining));
        }
        _ => rows.push(("Last change", "no oil change recorded".to_string())),
    }
    formatter.print_two_column(&rows);
}
