//! Oil-change history, odometer readings, and the policies that govern them.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, vehicle::VehicleId};

/// Distance between oil changes when no override applies.
pub const DEFAULT_MAINTENANCE_INTERVAL: u64 = 10_000;

/// A completed oil change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: RecordId,
    pub car_id: VehicleId,
    pub date: NaiveDate,
    pub mileage: u64,
    pub oil_type: String,
    #[serde(default)]
    pub notes: String,
}

impl MaintenanceRecord {
    pub fn new(
        id: RecordId,
        car_id: VehicleId,
        date: NaiveDate,
        mileage: u64,
        oil_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            car_id,
            date,
            mileage,
            oil_type: oil_type.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn notes(&self) -> Option<&str> {
        let trimmed = self.notes.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Identifiable for MaintenanceRecord {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for MaintenanceRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BelongsToVehicle for MaintenanceRecord {
    fn vehicle_id(&self) -> VehicleId {
        self.car_id
    }
}

impl Displayable for MaintenanceRecord {
    fn display_label(&self) -> String {
        format!("oil:{} [{} @ {} km]", self.id, self.oil_type, self.mileage)
    }
}

/// Latest known odometer reading per vehicle.
///
/// Kept apart from the maintenance history; the two may diverge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MileageBook {
    readings: BTreeMap<VehicleId, u64>,
}

impl MileageBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reading for `vehicle`, `0` when none was recorded.
    pub fn current(&self, vehicle: VehicleId) -> u64 {
        self.readings.get(&vehicle).copied().unwrap_or(0)
    }

    pub fn get(&self, vehicle: VehicleId) -> Option<u64> {
        self.readings.get(&vehicle).copied()
    }

    pub fn set(&mut self, vehicle: VehicleId, mileage: u64) -> Option<u64> {
        self.readings.insert(vehicle, mileage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, u64)> + '_ {
        self.readings.iter().map(|(id, km)| (*id, *km))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Governs whether an odometer reading may go backwards.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MileagePolicy {
    /// Any non-negative reading is accepted, including lower ones.
    #[default]
    Unrestricted,
    /// Explicit updates below the current reading are rejected.
    RejectDecrease,
}

impl fmt::Display for MileagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MileagePolicy::Unrestricted => "unrestricted",
            MileagePolicy::RejectDecrease => "reject-decrease",
        };
        f.write_str(label)
    }
}

impl FromStr for MileagePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unrestricted" => Ok(MileagePolicy::Unrestricted),
            "reject-decrease" | "monotonic" => Ok(MileagePolicy::RejectDecrease),
            other => Err(format!(
                "unknown mileage policy `{other}` (use unrestricted or reject-decrease)"
            )),
        }
    }
}

/// Oil-change cadence: a default distance with optional per-oil-type overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaintenancePolicy {
    #[serde(default = "MaintenancePolicy::default_interval")]
    pub interval: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub oil_type_intervals: BTreeMap<String, u64>,
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_MAINTENANCE_INTERVAL,
            oil_type_intervals: BTreeMap::new(),
        }
    }
}

impl MaintenancePolicy {
    pub fn default_interval() -> u64 {
        DEFAULT_MAINTENANCE_INTERVAL
    }

    pub fn with_interval(interval: u64) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Distance until the next change for a record filled with `oil_type`.
    pub fn interval_for(&self, oil_type: &str) -> u64 {
        let key = oil_type.trim().to_ascii_uppercase();
        self.oil_type_intervals
            .iter()
            .find(|(name, _)| name.trim().to_ascii_uppercase() == key)
            .map(|(_, interval)| *interval)
            .unwrap_or(self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_record_reads_snapshot_without_notes() {
        let raw = r#"{"id":1,"carId":"2","date":"2024-01-01","mileage":30000,"oilType":"5W-30"}"#;
        let record: MaintenanceRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.car_id, VehicleId(2));
        assert_eq!(record.mileage, 30_000);
        assert_eq!(record.notes(), None);
    }

    #[test]
    fn mileage_book_defaults_missing_vehicle_to_zero() {
        let mut book = MileageBook::new();
        assert_eq!(book.current(VehicleId(4)), 0);
        assert_eq!(book.get(VehicleId(4)), None);
        book.set(VehicleId(4), 12_345);
        assert_eq!(book.current(VehicleId(4)), 12_345);
    }

    #[test]
    fn mileage_book_serializes_as_plain_map() {
        let mut book = MileageBook::new();
        book.set(VehicleId(1), 1000);
        book.set(VehicleId(2), 39_500);
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"1":1000,"2":39500}"#);
    }

    #[test]
    fn policy_interval_prefers_oil_type_override() {
        let mut policy = MaintenancePolicy::default();
        policy.oil_type_intervals.insert("0W-20".into(), 15_000);
        assert_eq!(policy.interval_for("0w-20"), 15_000);
        assert_eq!(policy.interval_for("5W-30"), DEFAULT_MAINTENANCE_INTERVAL);
    }

    #[test]
    fn mileage_policy_round_trips_labels() {
        for policy in [MileagePolicy::Unrestricted, MileagePolicy::RejectDecrease] {
            assert_eq!(policy.to_string().parse::<MileagePolicy>(), Ok(policy));
        }
    }
}
