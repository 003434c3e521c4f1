//! Rental ledger entries.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, vehicle::VehicleId};

/// Direction of money flow for a rental ledger entry.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Income,
    Expense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(format!("unknown record type `{other}` (use income or expense)")),
        }
    }
}

/// An income or expense entry attributed to one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: RecordId,
    pub car_id: VehicleId,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl FinancialRecord {
    pub fn new(
        id: RecordId,
        car_id: VehicleId,
        kind: RecordKind,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            car_id,
            kind,
            amount,
            description: description.into(),
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == RecordKind::Income
    }
}

impl Identifiable for FinancialRecord {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for FinancialRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BelongsToVehicle for FinancialRecord {
    fn vehicle_id(&self) -> VehicleId {
        self.car_id
    }
}

impl Displayable for FinancialRecord {
    fn display_label(&self) -> String {
        format!("record:{} [{} {:.2}]", self.id, self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn financial_record_uses_snapshot_field_names() {
        let record = FinancialRecord::new(
            1_700_000_000_000,
            VehicleId(1),
            RecordKind::Income,
            150.0,
            "Weekly rental",
            NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["carId"], "1");
        assert_eq!(value["type"], "income");
        assert_eq!(value["date"], "2024-05-14");
        assert_eq!(value["amount"], 150.0);
    }

    #[test]
    fn financial_record_reads_browser_snapshot_entry() {
        let raw = r#"{"id":1715680000000,"carId":"3","type":"expense","amount":42.5,"description":"Fuel","date":"2024-05-14"}"#;
        let record: FinancialRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.car_id, VehicleId(3));
        assert_eq!(record.kind, RecordKind::Expense);
        assert!(!record.is_income());
        assert_eq!(record.description, "Fuel");
    }

    #[test]
    fn record_kind_parses_labels() {
        assert_eq!("Income".parse::<RecordKind>(), Ok(RecordKind::Income));
        assert_eq!("expense".parse::<RecordKind>(), Ok(RecordKind::Expense));
        assert!("refund".parse::<RecordKind>().is_err());
    }
}
