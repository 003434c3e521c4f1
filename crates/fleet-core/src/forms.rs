//! Raw form state captured from the presentation layer and its validation.
//!
//! Every field arrives as a string, exactly as typed. `validate` performs the
//! presence and parseability checks and yields a draft with numeric fields
//! coerced; nothing is constructed when a check fails.

use chrono::NaiveDate;
use fleet_domain::{
    FinancialRecord, MaintenanceRecord, MileageBook, RecordId, RecordKind, VehicleId,
};

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn missing_fields_error(missing: &[&str]) -> CoreError {
    CoreError::Validation(format!(
        "fill in all required fields (missing: {})",
        missing.join(", ")
    ))
}

fn parse_vehicle(raw: &str) -> Result<VehicleId, CoreError> {
    raw.parse::<VehicleId>().map_err(CoreError::Validation)
}

fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("invalid date `{}` (use YYYY-MM-DD)", raw.trim()))
    })
}

fn parse_amount(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CoreError::Validation(format!(
            "amount `{trimmed}` must be a non-negative number"
        ))),
    }
}

fn parse_mileage(raw: &str) -> Result<u64, CoreError> {
    let trimmed = raw.trim();
    trimmed.parse::<u64>().map_err(|_| {
        CoreError::Validation(format!(
            "mileage `{trimmed}` must be a whole non-negative number"
        ))
    })
}

/// Input state of the "new rental record" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalForm {
    pub car_id: String,
    pub kind: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

/// Validated rental entry awaiting an id.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDraft {
    pub car_id: VehicleId,
    pub kind: RecordKind,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl RentalForm {
    /// Default form state: income, dated `today`, everything else empty.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            car_id: String::new(),
            kind: RecordKind::Income.to_string(),
            amount: String::new(),
            description: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::blank(today);
    }

    pub fn validate(&self) -> Result<RentalDraft, CoreError> {
        let mut missing = Vec::new();
        if is_blank(&self.car_id) {
            missing.push("vehicle");
        }
        if is_blank(&self.amount) {
            missing.push("amount");
        }
        if is_blank(&self.description) {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        Ok(RentalDraft {
            car_id: parse_vehicle(&self.car_id)?,
            kind: self.kind.parse().map_err(CoreError::Validation)?,
            amount: parse_amount(&self.amount)?,
            description: self.description.trim().to_string(),
            date: parse_date(&self.date)?,
        })
    }
}

impl RentalDraft {
    pub fn into_record(self, id: RecordId) -> FinancialRecord {
        FinancialRecord::new(id, self.car_id, self.kind, self.amount, self.description, self.date)
    }
}

/// Input state of the "new oil change" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OilChangeForm {
    pub car_id: String,
    pub date: String,
    pub mileage: String,
    pub oil_type: String,
    pub notes: String,
}

/// Validated oil change awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OilChangeDraft {
    pub car_id: VehicleId,
    pub date: NaiveDate,
    pub mileage: u64,
    pub oil_type: String,
    pub notes: String,
}

impl OilChangeForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            car_id: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            mileage: String::new(),
            oil_type: String::new(),
            notes: String::new(),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::blank(today);
    }

    pub fn validate(&self) -> Result<OilChangeDraft, CoreError> {
        let mut missing = Vec::new();
        if is_blank(&self.car_id) {
            missing.push("vehicle");
        }
        if is_blank(&self.mileage) {
            missing.push("mileage");
        }
        if is_blank(&self.oil_type) {
            missing.push("oil type");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        Ok(OilChangeDraft {
            car_id: parse_vehicle(&self.car_id)?,
            date: parse_date(&self.date)?,
            mileage: parse_mileage(&self.mileage)?,
            oil_type: self.oil_type.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

impl OilChangeDraft {
    pub fn into_record(self, id: RecordId) -> MaintenanceRecord {
        MaintenanceRecord::new(id, self.car_id, self.date, self.mileage, self.oil_type)
            .with_notes(self.notes)
    }
}

/// Input state of the standalone "update mileage" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MileageForm {
    pub car_id: String,
    pub mileage: String,
}

impl MileageForm {
    pub fn new(car_id: impl Into<String>, mileage: impl Into<String>) -> Self {
        Self {
            car_id: car_id.into(),
            mileage: mileage.into(),
        }
    }

    /// Selects a vehicle and pre-fills its current reading.
    pub fn select(&mut self, car_id: &str, book: &MileageBook) {
        self.car_id = car_id.trim().to_string();
        self.mileage = match parse_vehicle(car_id) {
            Ok(vehicle) => book.current(vehicle).to_string(),
            Err(_) => String::new(),
        };
    }

    pub fn validate(&self) -> Result<(VehicleId, u64), CoreError> {
        let mut missing = Vec::new();
        if is_blank(&self.car_id) {
            missing.push("vehicle");
        }
        if is_blank(&self.mileage) {
            missing.push("mileage");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }
        Ok((parse_vehicle(&self.car_id)?, parse_mileage(&self.mileage)?))
    }
}
