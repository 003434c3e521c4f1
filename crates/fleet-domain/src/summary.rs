//! Derived values produced by the statistics and maintenance services.

use serde::{Deserialize, Serialize};

use crate::{maintenance::MaintenanceRecord, vehicle::Vehicle};

/// Income/expense totals for one reporting window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodStats {
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
    pub count: usize,
}

impl PeriodStats {
    /// True when the window did not lose money.
    pub fn is_profit(&self) -> bool {
        self.profit >= 0.0
    }
}

/// The two summaries shown by the rental ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RentalStats {
    pub week: PeriodStats,
    pub month: PeriodStats,
}

/// Next oil change due for a vehicle with at least one recorded change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaintenanceProjection {
    pub next_due_mileage: u64,
    /// Negative once the vehicle has passed the due mileage.
    pub remaining_distance: i64,
    pub is_overdue: bool,
}

/// Everything the status card for one vehicle displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleStatus {
    pub vehicle: Vehicle,
    pub current_mileage: u64,
    pub last_change: Option<MaintenanceRecord>,
    pub projection: Option<MaintenanceProjection>,
}
