//! Create/delete commands for both ledgers and the standalone mileage update.

use fleet_domain::{Displayable, MileagePolicy, RecordId, VehicleId};

use crate::{
    forms::{MileageForm, OilChangeForm, RentalForm},
    ids::IdGenerator,
    ledger::{OilLedger, RentalLedger},
    registry::FleetRegistry,
    time::Clock,
    CoreError,
};

/// Outcome of a mileage update, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MileageChange {
    pub vehicle: VehicleId,
    pub previous: Option<u64>,
    pub current: u64,
}

/// Applies validated lifecycle commands to the in-memory ledgers.
///
/// Validation happens before any mutation; on error the ledger and the form
/// are left exactly as they were. Vehicles missing from the registry are
/// rejected.
pub struct RecordService;

impl RecordService {
    /// Validates `form`, appends the record, and resets the form to its defaults.
    pub fn add_rental(
        ledger: &mut RentalLedger,
        form: &mut RentalForm,
        ids: &mut IdGenerator,
        clock: &dyn Clock,
        registry: &FleetRegistry,
    ) -> Result<RecordId, CoreError> {
        let draft = form.validate()?;
        ensure_registered(registry, draft.car_id)?;
        let id = ids.next_id(clock);
        ledger.push(draft.into_record(id));
        form.reset(clock.today());
        Ok(id)
    }

    /// Removes the record with `id`. Returns `false` when nothing matched.
    pub fn delete_rental(ledger: &mut RentalLedger, id: RecordId) -> bool {
        match ledger.remove(id) {
            Some(removed) => {
                tracing::debug!(record = %removed.display_label(), "removed from ledger");
                true
            }
            None => false,
        }
    }

    /// Validates `form`, appends the oil change, and moves the vehicle's
    /// current reading to the recorded mileage.
    ///
    /// Under [`MileagePolicy::RejectDecrease`] the reading only moves forward,
    /// so back-filling an older oil change leaves it untouched.
    pub fn add_oil_change(
        ledger: &mut OilLedger,
        form: &mut OilChangeForm,
        ids: &mut IdGenerator,
        clock: &dyn Clock,
        policy: MileagePolicy,
        registry: &FleetRegistry,
    ) -> Result<RecordId, CoreError> {
        let draft = form.validate()?;
        ensure_registered(registry, draft.car_id)?;
        let vehicle = draft.car_id;
        let mileage = draft.mileage;
        let id = ids.next_id(clock);
        ledger.push(draft.into_record(id));

        let book = ledger.mileage_mut();
        let next = match policy {
            MileagePolicy::Unrestricted => mileage,
            MileagePolicy::RejectDecrease => book.current(vehicle).max(mileage),
        };
        book.set(vehicle, next);

        form.reset(clock.today());
        Ok(id)
    }

    /// Removes the oil change with `id`. Current readings are not touched.
    pub fn delete_oil_change(ledger: &mut OilLedger, id: RecordId) -> bool {
        match ledger.remove(id) {
            Some(removed) => {
                tracing::debug!(record = %removed.display_label(), "removed from history");
                true
            }
            None => false,
        }
    }

    /// Sets the vehicle's current reading independently of any oil change.
    ///
    /// On success the mileage field is cleared and the vehicle stays selected.
    pub fn update_mileage(
        ledger: &mut OilLedger,
        form: &mut MileageForm,
        policy: MileagePolicy,
        registry: &FleetRegistry,
    ) -> Result<MileageChange, CoreError> {
        let (vehicle, mileage) = form.validate()?;
        ensure_registered(registry, vehicle)?;
        let previous = ledger.mileage().get(vehicle);
        if policy == MileagePolicy::RejectDecrease {
            if let Some(current) = previous.filter(|current| mileage < *current) {
                return Err(CoreError::Validation(format!(
                    "mileage {mileage} is below the current reading {current} for vehicle {vehicle}"
                )));
            }
        }
        ledger.mileage_mut().set(vehicle, mileage);
        form.mileage.clear();
        Ok(MileageChange {
            vehicle,
            previous,
            current: mileage,
        })
    }
}

fn ensure_registered(registry: &FleetRegistry, vehicle: VehicleId) -> Result<(), CoreError> {
    if registry.contains(vehicle) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("vehicle {vehicle} is not in the fleet")))
    }
}
