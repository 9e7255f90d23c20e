use crate::availability::{Availability, AvailabilityError};
use crate::slot::Slot;
use crate::time::{Clock, ClockTime};
use chrono::{Duration, NaiveDate};

/// Transient slot-entry state behind the availability tab: the highlighted
/// day plus the two picker candidates. Nothing here is domain state; the
/// draft can be discarded at will and only touches the store through
/// [`commit`](SlotDraft::commit).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlotDraft {
    pub day: NaiveDate,
    pub start: Option<ClockTime>,
    pub end: Option<ClockTime>,
}

impl SlotDraft {
    pub fn new(day: NaiveDate) -> SlotDraft {
        SlotDraft {
            day,
            start: None,
            end: None,
        }
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.day = day;
    }

    pub fn set_start(&mut self, start: ClockTime) {
        self.start = Some(start);
    }

    pub fn set_end(&mut self, end: ClockTime) {
        self.end = Some(end);
    }

    pub fn clear_times(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Push the draft through the store's validation. On success both picker
    /// candidates reset, ready for the next entry; on rejection they stay so
    /// the user can correct them.
    pub fn commit<C>(
        &mut self,
        availability: &mut Availability<C>,
    ) -> Result<Slot, AvailabilityError>
    where
        C: Clock,
    {
        let slot = availability.add_slot(self.day, self.start, self.end)?;
        self.clear_times();
        Ok(slot)
    }
}

/// The dashboard's date strip: `count` consecutive days starting at `from`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use mentorplan_libs::planner::upcoming_days;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let week = upcoming_days(today, 7);
///
/// assert_eq!(week.len(), 7);
/// assert_eq!(week[0], today);
/// assert_eq!(week[6], NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
/// ```
pub fn upcoming_days(from: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|offset| from + Duration::days(offset as i64))
        .collect()
}

/// Heading above each day's slot list, e.g. `"Monday, March 2"`.
pub fn day_heading(day: NaiveDate) -> String {
    day.format("%A, %B %-d").to_string()
}
