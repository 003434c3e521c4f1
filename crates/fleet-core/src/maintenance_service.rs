//! Oil-change due projections.

use fleet_domain::{
    BelongsToVehicle, Dated, MaintenancePolicy, MaintenanceProjection, MaintenanceRecord,
    MileageBook, VehicleId, VehicleStatus,
};

use crate::registry::FleetRegistry;

/// Derives "next oil change" figures from the maintenance history.
pub struct MaintenanceService;

impl MaintenanceService {
    /// Most recent oil change for `vehicle` by date.
    ///
    /// When several changes share the latest date, the one recorded first wins.
    pub fn last_change(
        records: &[MaintenanceRecord],
        vehicle: VehicleId,
    ) -> Option<&MaintenanceRecord> {
        latest_for(records, vehicle)
    }

    /// Projection from a known last change and the vehicle's current reading.
    pub fn project(
        last_change: &MaintenanceRecord,
        current_mileage: u64,
        policy: &MaintenancePolicy,
    ) -> MaintenanceProjection {
        let interval = policy.interval_for(&last_change.oil_type);
        let next_due_mileage = last_change.mileage.saturating_add(interval);
        let remaining_distance = to_signed(next_due_mileage) - to_signed(current_mileage);
        MaintenanceProjection {
            next_due_mileage,
            remaining_distance,
            is_overdue: remaining_distance < 0,
        }
    }

    /// Next due oil change for `vehicle`, or `None` when it has no history.
    pub fn next_change(
        records: &[MaintenanceRecord],
        mileage: &MileageBook,
        policy: &MaintenancePolicy,
        vehicle: VehicleId,
    ) -> Option<MaintenanceProjection> {
        let last = Self::last_change(records, vehicle)?;
        Some(Self::project(last, mileage.current(vehicle), policy))
    }

    /// Status card data for every registry vehicle, in registry order.
    pub fn vehicle_statuses(
        registry: &FleetRegistry,
        records: &[MaintenanceRecord],
        mileage: &MileageBook,
        policy: &MaintenancePolicy,
    ) -> Vec<VehicleStatus> {
        registry
            .vehicles()
            .iter()
            .map(|vehicle| {
                let current_mileage = mileage.current(vehicle.id);
                let last_change = Self::last_change(records, vehicle.id).cloned();
                let projection = last_change
                    .as_ref()
                    .map(|last| Self::project(last, current_mileage, policy));
                VehicleStatus {
                    vehicle: vehicle.clone(),
                    current_mileage,
                    last_change,
                    projection,
                }
            })
            .collect()
    }
}

/// Latest-dated entry for `vehicle`; ties keep the earliest inserted.
fn latest_for<T: Dated + BelongsToVehicle>(records: &[T], vehicle: VehicleId) -> Option<&T> {
    records
        .iter()
        .filter(|record| record.vehicle_id() == vehicle)
        .fold(None, |latest: Option<&T>, record| match latest {
            Some(current) if current.date() >= record.date() => Some(current),
            _ => Some(record),
        })
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
