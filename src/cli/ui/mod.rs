pub mod formatting;
pub mod table;

pub use formatting::Formatter;
pub use table::{Table, TableColumn, TableRenderer};
