//! Period statistics for the rental ledger.

use chrono::NaiveDate;
use fleet_domain::{
    month_start_for, FinancialRecord, PeriodStats, RecordKind, RentalStats, WeekStart,
};

/// Aggregates rental records into week and month summaries.
pub struct StatsService;

impl StatsService {
    /// Totals every record dated on or after `start`.
    ///
    /// There is no upper bound, so future-dated records count toward the
    /// current window.
    pub fn summarize_since(records: &[FinancialRecord], start: NaiveDate) -> PeriodStats {
        let mut stats = PeriodStats::default();
        for record in records.iter().filter(|record| record.date >= start) {
            match record.kind {
                RecordKind::Income => stats.income += record.amount,
                RecordKind::Expense => stats.expense += record.amount,
            }
            stats.count += 1;
        }
        stats.profit = stats.income - stats.expense;
        stats
    }

    pub fn week(
        records: &[FinancialRecord],
        today: NaiveDate,
        week_start: WeekStart,
    ) -> PeriodStats {
        Self::summarize_since(records, week_start.week_start_for(today))
    }

    pub fn month(records: &[FinancialRecord], today: NaiveDate) -> PeriodStats {
        Self::summarize_since(records, month_start_for(today))
    }

    pub fn rental_stats(
        records: &[FinancialRecord],
        today: NaiveDate,
        week_start: WeekStart,
    ) -> RentalStats {
        RentalStats {
            week: Self::week(records, today, week_start),
            month: Self::month(records, today),
        }
    }
}
