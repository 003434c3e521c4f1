use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "fleet",
        "List the vehicles in the fleet",
        "fleet",
        cmd_fleet,
    )]
}

fn cmd_fleet(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let formatter = context.formatter();
    let manager = context.manager();
    let mut table = Table::new(
        Some("Fleet"),
        vec![
            TableColumn::numeric("ID", 2),
            TableColumn::new("Name", 12),
            TableColumn::new("Plate", 8),
            TableColumn::numeric("Mileage", 8),
        ],
    )
    .with_empty_message("No vehicles configured.");

    for vehicle in manager.registry().vehicles() {
        table.add_row(vec![
            vehicle.id.to_string(),
            vehicle.name.clone(),
            vehicle.plate.clone(),
            formatter.mileage(manager.oil().current_mileage(vehicle.id)),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}
