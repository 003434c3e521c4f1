//! fleet-domain
//!
//! Pure domain models (Vehicle, FinancialRecord, MaintenanceRecord, MileageBook, etc.).
//! No I/O, no CLI, no storage. Only data types, policies, and core enums.

pub mod common;
pub mod maintenance;
pub mod record;
pub mod summary;
pub mod vehicle;

pub use common::*;
pub use maintenance::*;
pub use record::*;
pub use summary::*;
pub use vehicle::*;
