use fleet_domain::RecordId;

use crate::time::Clock;

/// Hands out record identifiers derived from the creation timestamp.
///
/// Ids are milliseconds since the epoch, bumped to `last + 1` whenever the
/// clock has not moved past the previously issued id, so two records created
/// within the same millisecond still receive distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: RecordId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the generator so it never reissues any of `existing`.
    pub fn seeded(existing: impl IntoIterator<Item = RecordId>) -> Self {
        let mut generator = Self::new();
        for id in existing {
            generator.observe(id);
        }
        generator
    }

    pub fn observe(&mut self, id: RecordId) {
        self.last = self.last.max(id);
    }

    pub fn next_id(&mut self, clock: &dyn Clock) -> RecordId {
        let candidate = RecordId::try_from(clock.now().timestamp_millis()).unwrap_or(0);
        let id = if candidate > self.last {
            candidate
        } else {
            self.last + 1
        };
        self.last = id;
        id
    }

    pub fn last_issued(&self) -> RecordId {
        self.last
    }
}
