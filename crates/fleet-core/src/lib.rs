//! fleet-core
//!
//! Business logic and services for the fleet ledger.
//! Depends on fleet-domain. No CLI, no terminal I/O, no filesystem access.

pub mod error;
pub mod forms;
pub mod ids;
pub mod ledger;
pub mod maintenance_service;
pub mod record_service;
pub mod registry;
pub mod stats_service;
pub mod storage;
pub mod time;

pub use error::CoreError;
pub use forms::*;
pub use ids::IdGenerator;
pub use ledger::*;
pub use maintenance_service::*;
pub use record_service::*;
pub use registry::FleetRegistry;
pub use stats_service::*;
pub use time::{Clock, FixedClock};
