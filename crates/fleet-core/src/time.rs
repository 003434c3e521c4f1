use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date in local time.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// Clock pinned to one calendar day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// A clock reading noon UTC on `date`, with `date` as the local day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12),
            today: date,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
