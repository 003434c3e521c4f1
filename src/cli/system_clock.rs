use chrono::{DateTime, Utc};

use fleet_core::Clock;

/// Real-time clock backed by the system time source.
///
/// `today` keeps the trait default, the calendar date in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
