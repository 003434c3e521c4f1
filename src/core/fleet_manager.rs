//! Command facade over both ledgers with write-through persistence.

use chrono::NaiveDate;
use fleet_config::Config;
use fleet_core::{
    storage::{
        load_snapshot, save_snapshot, SnapshotStore, CURRENT_MILEAGE_KEY, OIL_RECORDS_KEY,
        RENTAL_RECORDS_KEY,
    },
    Clock, FleetRegistry, IdGenerator, MaintenanceService, MileageChange, MileageForm,
    OilChangeForm, OilLedger, RecordService, RentalForm, RentalLedger, StatsService,
};
use fleet_domain::{
    FinancialRecord, MaintenancePolicy, MaintenanceProjection, MaintenanceRecord, MileageBook,
    MileagePolicy, RecordId, RentalStats, VehicleId, VehicleStatus, WeekStart,
};

use crate::core::errors::{FleetError, Result};

/// Runtime knobs taken from the user configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSettings {
    pub registry: FleetRegistry,
    pub maintenance: MaintenancePolicy,
    pub mileage_policy: MileagePolicy,
    pub week_start: WeekStart,
}

impl FleetSettings {
    /// Settings described by `config`; an empty fleet list falls back to the default fleet.
    pub fn from_config(config: &Config) -> Self {
        let registry = if config.fleet.is_empty() {
            FleetRegistry::default()
        } else {
            FleetRegistry::new(config.fleet.clone())
        };
        Self {
            registry,
            maintenance: config.maintenance.clone(),
            mileage_policy: config.mileage_policy,
            week_start: config.week_start,
        }
    }
}

/// Owns the rental and oil ledgers, the id generator and the snapshot store.
///
/// Every successful mutation is written through to the store before the call
/// returns. When the write fails the in-memory ledger is restored to its state
/// before the command, so memory and storage never disagree.
pub struct FleetManager {
    rentals: RentalLedger,
    oil: OilLedger,
    ids: IdGenerator,
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    settings: FleetSettings,
}

impl FleetManager {
    /// Reads all three snapshots from `store`. Missing snapshots start empty.
    pub fn load(
        store: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        settings: FleetSettings,
    ) -> Result<Self> {
        let rentals: Vec<FinancialRecord> = load_snapshot(store.as_ref(), RENTAL_RECORDS_KEY)?;
        let changes: Vec<MaintenanceRecord> = load_snapshot(store.as_ref(), OIL_RECORDS_KEY)?;
        let mileage: MileageBook = load_snapshot(store.as_ref(), CURRENT_MILEAGE_KEY)?;

        let rentals = RentalLedger::from_records(rentals);
        let oil = OilLedger::from_parts(changes, mileage);
        let ids = IdGenerator::seeded(rentals.ids().chain(oil.ids()));

        tracing::info!(
            rentals = rentals.len(),
            oil_changes = oil.len(),
            odometers = oil.mileage().len(),
            "fleet ledgers loaded"
        );

        Ok(Self {
            rentals,
            oil,
            ids,
            store,
            clock,
            settings,
        })
    }

    pub fn rentals(&self) -> &RentalLedger {
        &self.rentals
    }

    pub fn oil(&self) -> &OilLedger {
        &self.oil
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.settings.registry
    }

    pub fn settings(&self) -> &FleetSettings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: FleetSettings) {
        self.settings = settings;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// A rental form in its default state for today.
    pub fn blank_rental_form(&self) -> RentalForm {
        RentalForm::blank(self.today())
    }

    pub fn blank_oil_change_form(&self) -> OilChangeForm {
        OilChangeForm::blank(self.today())
    }

    /// A mileage form with `car_id` selected and its current reading pre-filled.
    pub fn mileage_form_for(&self, car_id: &str) -> MileageForm {
        let mut form = MileageForm::default();
        form.select(car_id, self.oil.mileage());
        form
    }

    pub fn submit_rental(&mut self, form: &mut RentalForm) -> Result<RecordId> {
        let before = self.rentals.clone();
        let form_before = form.clone();
        let id = RecordService::add_rental(
            &mut self.rentals,
            form,
            &mut self.ids,
            self.clock.as_ref(),
            &self.settings.registry,
        )
        .inspect_err(|err| tracing::warn!(%err, "rental record rejected"))?;

        if let Err(err) = self.persist_rentals() {
            self.rentals = before;
            *form = form_before;
            return Err(err);
        }
        tracing::info!(id, "rental record added");
        Ok(id)
    }

    /// Deletes a rental record. Returns `false`, without writing, when `id` is unknown.
    pub fn delete_rental(&mut self, id: RecordId) -> Result<bool> {
        let before = self.rentals.clone();
        if !RecordService::delete_rental(&mut self.rentals, id) {
            tracing::warn!(id, "rental record not found");
            return Ok(false);
        }
        if let Err(err) = self.persist_rentals() {
            self.rentals = before;
            return Err(err);
        }
        tracing::info!(id, "rental record deleted");
        Ok(true)
    }

    pub fn submit_oil_change(&mut self, form: &mut OilChangeForm) -> Result<RecordId> {
        let before = self.oil.clone();
        let form_before = form.clone();
        let id = RecordService::add_oil_change(
            &mut self.oil,
            form,
            &mut self.ids,
            self.clock.as_ref(),
            self.settings.mileage_policy,
            &self.settings.registry,
        )
        .inspect_err(|err| tracing::warn!(%err, "oil change rejected"))?;

        if let Err(err) = self.persist_oil() {
            self.rollback_oil(before);
            *form = form_before;
            return Err(err);
        }
        tracing::info!(id, "oil change recorded");
        Ok(id)
    }

    pub fn delete_oil_change(&mut self, id: RecordId) -> Result<bool> {
        let before = self.oil.clone();
        if !RecordService::delete_oil_change(&mut self.oil, id) {
            tracing::warn!(id, "oil change not found");
            return Ok(false);
        }
        if let Err(err) = self.persist_oil() {
            self.rollback_oil(before);
            return Err(err);
        }
        tracing::info!(id, "oil change deleted");
        Ok(true)
    }

    pub fn update_mileage(&mut self, form: &mut MileageForm) -> Result<MileageChange> {
        let before = self.oil.clone();
        let form_before = form.clone();
        let change = RecordService::update_mileage(
            &mut self.oil,
            form,
            self.settings.mileage_policy,
            &self.settings.registry,
        )
        .inspect_err(|err| tracing::warn!(%err, "mileage update rejected"))?;

        if let Err(err) = self.persist_oil() {
            self.rollback_oil(before);
            *form = form_before;
            return Err(err);
        }
        tracing::info!(
            vehicle = %change.vehicle,
            mileage = change.current,
            "current mileage updated"
        );
        Ok(change)
    }

    pub fn rental_stats(&self) -> RentalStats {
        StatsService::rental_stats(
            self.rentals.records(),
            self.today(),
            self.settings.week_start,
        )
    }

    pub fn week_start_date(&self) -> NaiveDate {
        self.settings.week_start.week_start_for(self.today())
    }

    pub fn next_change(&self, vehicle: VehicleId) -> Option<MaintenanceProjection> {
        MaintenanceService::next_change(
            self.oil.records(),
            self.oil.mileage(),
            &self.settings.maintenance,
            vehicle,
        )
    }

    pub fn vehicle_statuses(&self) -> Vec<VehicleStatus> {
        MaintenanceService::vehicle_statuses(
            &self.settings.registry,
            self.oil.records(),
            self.oil.mileage(),
            &self.settings.maintenance,
        )
    }

    fn persist_rentals(&self) -> Result<()> {
        save_snapshot(self.store.as_ref(), RENTAL_RECORDS_KEY, self.rentals.records())
            .map_err(|err| persist_failed(RENTAL_RECORDS_KEY, err.into()))
    }

    // Both oil snapshots are rewritten together, whichever one changed.
    fn persist_oil(&self) -> Result<()> {
        save_snapshot(self.store.as_ref(), OIL_RECORDS_KEY, self.oil.records())
            .map_err(|err| persist_failed(OIL_RECORDS_KEY, err.into()))?;
        save_snapshot(self.store.as_ref(), CURRENT_MILEAGE_KEY, self.oil.mileage())
            .map_err(|err| persist_failed(CURRENT_MILEAGE_KEY, err.into()))
    }

    /// Restores `before` and rewrites the change-history snapshot, which may
    /// already hold the rejected state when only the mileage write failed.
    fn rollback_oil(&mut self, before: OilLedger) {
        self.oil = before;
        if let Err(err) = save_snapshot(self.store.as_ref(), OIL_RECORDS_KEY, self.oil.records()) {
            tracing::warn!(%err, "could not restore oil change snapshot");
        }
    }
}

fn persist_failed(key: &str, err: FleetError) -> FleetError {
    tracing::warn!(key, %err, "snapshot write failed, rolling back");
    err
}
