use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::{Formatter, Table, TableColumn, TableRenderer};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    let mut table = Table::new(
        None::<String>,
        vec![
            TableColumn::new("Command", 10),
            TableColumn::new("Description", 24),
        ],
    );
    for entry in registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    TableRenderer::render(&table);
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    let mut rows = vec![
        ("Description", entry.description.to_string()),
        ("Usage", entry.usage.to_string()),
    ];
    if !entry.subcommands.is_empty() {
        rows.push(("Subcommands", entry.subcommands.join(", ")));
    }
    Formatter::default().print_two_column(&rows);
}
