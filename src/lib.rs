#![doc(test(attr(deny(warnings))))]

//! Fleet Ledger keeps a car-rental income/expense ledger and an oil-change
//! maintenance tracker for a small vehicle fleet, persisted as JSON snapshots
//! and driven from a terminal shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use fleet_core as services;
pub use fleet_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fleet Ledger tracing initialized.");
    });
}
