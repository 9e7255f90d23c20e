use crate::time::ClockTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One availability window within a single calendar day.
///
/// The interval is half-open: a slot covers `[start, end)`, so a slot ending
/// at 10:00 and one starting at 10:00 do not collide.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Slot {
    /// Callers go through `Availability::add_slot`, which validates before
    /// allocating an id.
    pub(crate) fn new(start: ClockTime, end: ClockTime) -> Slot {
        Slot {
            id: Uuid::new_v4(),
            start,
            end,
        }
    }

    /// Strict interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
    /// `s1 < e2 && s2 < e1`. Shared endpoints are not an overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.overlaps_range(other.start, other.end)
    }

    /// Overlap against a candidate interval that has no allocated slot yet.
    pub fn overlaps_range(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start < end && start < self.end
    }

    /// Display form of the window, 12-hour clock on both ends.
    ///
    /// # Examples
    /// ```
    /// use mentorplan_libs::slot::Slot;
    ///
    /// let morning: Slot = serde_json::from_str(
    ///     r#"{ "id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "start": "00:00", "end": "12:00" }"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(morning.format_range(), "12:00 AM - 12:00 PM");
    /// ```
    pub fn format_range(&self) -> String {
        format!("{} - {}", self.start.twelve_hour(), self.end.twelve_hour())
    }
}
