pub mod config;
pub mod fleet;
pub mod mileage;
pub mod oil;
pub mod rental;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

/// Order in which commands appear in `help` and completion.
pub(crate) const ROOT_COMMAND_ORDER: &[&str] = &[
    "fleet", "rental", "oil", "mileage", "config", "help", "version", "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(fleet::definitions());
    entries.extend(rental::definitions());
    entries.extend(oil::definitions());
    entries.extend(mileage::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| *name == entry.name)
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    entries
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_entries() {
        registry.register(entry);
    }
}
