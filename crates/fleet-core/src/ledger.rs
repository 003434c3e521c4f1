//! In-memory record collections for the two ledgers.

use fleet_domain::{
    FinancialRecord, Identifiable, MaintenanceRecord, MileageBook, RecordId, VehicleId,
};

/// Append/delete-only collection of rental income and expense entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalLedger {
    records: Vec<FinancialRecord>,
}

impl RentalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FinancialRecord>) -> Self {
        Self { records }
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&FinancialRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: FinancialRecord) {
        self.records.push(record);
    }

    pub(crate) fn remove(&mut self, id: RecordId) -> Option<FinancialRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Records newest first; entries sharing a date keep insertion order.
    pub fn sorted_for_display(&self) -> Vec<&FinancialRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(Identifiable::id)
    }
}

/// Oil-change history plus the independently tracked odometer readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OilLedger {
    records: Vec<MaintenanceRecord>,
    mileage: MileageBook,
}

impl OilLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(records: Vec<MaintenanceRecord>, mileage: MileageBook) -> Self {
        Self { records, mileage }
    }

    pub fn records(&self) -> &[MaintenanceRecord] {
        &self.records
    }

    pub fn mileage(&self) -> &MileageBook {
        &self.mileage
    }

    pub fn current_mileage(&self, vehicle: VehicleId) -> u64 {
        self.mileage.current(vehicle)
    }

    pub fn get(&self, id: RecordId) -> Option<&MaintenanceRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: MaintenanceRecord) {
        self.records.push(record);
    }

    pub(crate) fn remove(&mut self, id: RecordId) -> Option<MaintenanceRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    pub(crate) fn mileage_mut(&mut self) -> &mut MileageBook {
        &mut self.mileage
    }

    pub fn sorted_for_display(&self) -> Vec<&MaintenanceRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(Identifiable::id)
    }
}
