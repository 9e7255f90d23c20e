//! Helpers shared by tests, doc-examples and benches.

use crate::time::Clock;
use chrono::NaiveDateTime;

/// A clock pinned to one instant, so the past-slot rule is deterministic.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
