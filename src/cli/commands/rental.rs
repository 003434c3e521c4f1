use fleet_domain::{month_start_for, PeriodStats, RecordKind};

use crate::cli::core::{
    parse_record_id, split_action, CommandError, CommandResult, ShellContext,
};
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Formatter, Table, TableColumn, TableRenderer};

const USAGE: &str = "rental <add|delete|list|stats> ...";
const ADD_USAGE: &str = "rental add <car> <income|expense> <amount> <description> [date]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "rental",
        "Record rental income and expenses",
        "rental add <car> <income|expense> <amount> <description> [date] | rental delete <id> | rental list | rental stats",
        cmd_rental,
    )
    .with_subcommands(&["add", "delete", "list", "stats"])]
}

fn cmd_rental(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => add(context, rest),
        "delete" | "rm" => delete(context, rest),
        "list" | "ls" => list(context),
        "stats" => stats(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(4..=5).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {ADD_USAGE}"
        )));
    }

    let mut manager = context.manager_mut();
    let mut form = manager.blank_rental_form();
    form.car_id = args[0].to_string();
    form.kind = args[1].to_lowercase();
    form.amount = args[2].to_string();
    form.description = args[3].to_string();
    if let Some(date) = args.get(4) {
        form.date = date.to_string();
    }

    let id = manager.submit_rental(&mut form)?;
    output::success(format!("Rental record {id} added"));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: rental delete <id>".into(),
        ));
    };
    let id = parse_record_id(raw)?;
    if context.manager_mut().delete_rental(id)? {
        output::success(format!("Rental record {id} deleted"));
    } else {
        context.print_warning(&format!("No rental record with id {id}"));
    }
    Ok(())
}

fn list(context: &ShellContext) -> CommandResult {
    let formatter = context.formatter();
    let manager = context.manager();
    let mut table = Table::new(
        Some("Rental records"),
        vec![
            TableColumn::numeric("ID", 13),
            TableColumn::new("Date", 10),
            TableColumn::new("Vehicle", 12),
            TableColumn::new("Type", 7),
            TableColumn::numeric("Amount", 10),
            TableColumn::new("Description", 16),
        ],
    )
    .with_empty_message("No rental records yet.");

    for record in manager.rentals().sorted_for_display() {
        let amount = match record.kind {
            RecordKind::Income => formatter.amount(record.amount),
            RecordKind::Expense => format!("-{}", formatter.amount(record.amount)),
        };
        table.add_row(vec![
            record.id.to_string(),
            formatter.date(record.date),
            manager.registry().name_of(record.car_id).to_string(),
            record.kind.to_string(),
            amount,
            record.description.clone(),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn stats(context: &ShellContext) -> CommandResult {
    let formatter = context.formatter();
    let manager = context.manager();
    let stats = manager.rental_stats();
    let week_start = manager.week_start_date();
    let month_start = month_start_for(manager.today());

    output_section(format!("This week (since {})", formatter.date(week_start)));
    print_period(&formatter, &stats.week);
    output_section(format!("This month (since {})", formatter.date(month_start)));
    print_period(&formatter, &stats.month);
    Ok(())
}

fn print_period(formatter: &Formatter, period: &PeriodStats) {
    let profit = output::signed(&formatter.signed_amount(period.profit), period.is_profit());
    formatter.print_two_column(&[
        ("Income", formatter.amount(period.income)),
        ("Expense", formatter.amount(period.expense)),
        ("Profit", profit),
        ("Records", period.count.to_string()),
    ]);
}
