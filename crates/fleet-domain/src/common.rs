//! Shared traits, week arithmetic, and enums for ledger primitives.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleId;

/// Identifier assigned to ledger records at creation time.
pub type RecordId = u64;

/// Exposes a stable identifier for records stored in a ledger.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Records that carry a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Records that belong to a single vehicle.
pub trait BelongsToVehicle {
    fn vehicle_id(&self) -> VehicleId;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// First day of the calendar week used for "this week" statistics.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Returns the first day of the week containing `date`.
    pub fn week_start_for(self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(offset as i64)
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        };
        f.write_str(label)
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!("unknown week start `{other}` (use sunday or monday)")),
        }
    }
}

/// Returns the first day of the month containing `date`.
pub fn month_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_week_start_rewinds_to_sunday() {
        // 2024-05-15 is a Wednesday.
        assert_eq!(WeekStart::Sunday.week_start_for(date(2024, 5, 15)), date(2024, 5, 12));
        assert_eq!(WeekStart::Sunday.week_start_for(date(2024, 5, 12)), date(2024, 5, 12));
    }

    #[test]
    fn monday_week_start_treats_sunday_as_week_end() {
        assert_eq!(WeekStart::Monday.week_start_for(date(2024, 5, 12)), date(2024, 5, 6));
        assert_eq!(WeekStart::Monday.week_start_for(date(2024, 5, 15)), date(2024, 5, 13));
    }

    #[test]
    fn month_start_is_first_day() {
        assert_eq!(month_start_for(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(month_start_for(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn week_start_parses_case_insensitively() {
        assert_eq!("Monday".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert_eq!(" sun ".parse::<WeekStart>(), Ok(WeekStart::Sunday));
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
