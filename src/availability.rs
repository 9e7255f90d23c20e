use crate::slot::Slot;
use crate::time::{Clock, ClockTime, SystemClock};
use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, info, trace};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Rejections raised while adding a slot. All are local validation
/// failures: the store is untouched and the caller surfaces the message
/// as a transient notice. Display strings match what the dashboard shows.
#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum AvailabilityError {
    #[error("Please select valid start and end times")]
    IncompleteInput,
    #[error("Cannot create slots in the past")]
    PastSlot,
    #[error("End time must be after start time")]
    InvalidRange,
    #[error("Time slot overlaps with an existing slot!")]
    Overlap,
}

/// Per-day availability windows for one mentor.
///
/// The day-keyed store is owned here and mutated only through
/// [`add_slot`](Availability::add_slot) and
/// [`remove_slot`](Availability::remove_slot), which keeps the non-overlap
/// invariant enforceable at a single choke point. A day absent from the map
/// is the same as a day with no slots. Held purely in process memory.
///
/// Not built for concurrent writers: sharing one store across requests needs
/// per-day mutual exclusion around `add_slot`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use mentorplan_libs::availability::Availability;
/// use mentorplan_libs::test_utils::FixedClock;
/// use mentorplan_libs::time::ClockTime;
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 2)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let day = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
///
/// let mut availability = Availability::with_clock(FixedClock(now));
/// let slot = availability
///     .add_slot(
///         day,
///         Some(ClockTime::new(9, 0).unwrap()),
///         Some(ClockTime::new(10, 0).unwrap()),
///     )
///     .unwrap();
///
/// assert_eq!(availability.slots_on(day), [slot]);
/// ```
pub struct Availability<C = SystemClock>
where
    C: Clock,
{
    slots: BTreeMap<NaiveDate, Vec<Slot>>,
    clock: C,
}

impl Availability<SystemClock> {
    /// An empty store checking the past-slot rule against local wall-clock
    /// time.
    pub fn new() -> Availability<SystemClock> {
        Availability::with_clock(SystemClock)
    }
}

impl Default for Availability<SystemClock> {
    fn default() -> Self {
        Availability::new()
    }
}

impl<C> Availability<C>
where
    C: Clock,
{
    pub fn with_clock(clock: C) -> Availability<C> {
        Availability {
            slots: BTreeMap::new(),
            clock,
        }
    }

    /// Validate and insert a new slot for `day`. Checks run in order and the
    /// first failure wins:
    ///
    /// 1. both times picked, else [`AvailabilityError::IncompleteInput`];
    /// 2. `day` + `start` not strictly before now, else
    ///    [`AvailabilityError::PastSlot`];
    /// 3. `end` strictly after `start`, else
    ///    [`AvailabilityError::InvalidRange`];
    /// 4. no overlap with any existing slot on `day`, else
    ///    [`AvailabilityError::Overlap`].
    ///
    /// On success the created slot is returned and the day's list stays
    /// ordered by start time.
    pub fn add_slot(
        &mut self,
        day: NaiveDate,
        start: Option<ClockTime>,
        end: Option<ClockTime>,
    ) -> Result<Slot, AvailabilityError> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(AvailabilityError::IncompleteInput),
        };
        trace!("validating candidate {}-{} on {}", start, end, day);

        if day.and_time(start.to_naive()) < self.clock.now() {
            return Err(AvailabilityError::PastSlot);
        }

        if end <= start {
            return Err(AvailabilityError::InvalidRange);
        }

        if self
            .slots
            .get(&day)
            .map_or(false, |existing| {
                existing.iter().any(|slot| slot.overlaps_range(start, end))
            })
        {
            return Err(AvailabilityError::Overlap);
        }

        let slot = Slot::new(start, end);
        let day_slots = self.slots.entry(day).or_insert_with(Vec::new);
        let at = day_slots
            .iter()
            .take_while(|existing| existing.start < slot.start)
            .count();
        day_slots.insert(at, slot.clone());
        debug_assert!(ordered_and_disjoint(day_slots));

        info!("added slot {} ({}-{}) on {}", slot.id, start, end, day);
        Ok(slot)
    }

    /// Remove the slot with `id` from `day`. Deliberately forgiving: an
    /// unknown id or an empty day is a no-op, since the dashboard only ever
    /// removes what it can see.
    pub fn remove_slot(&mut self, day: NaiveDate, id: Uuid) {
        if let Some(day_slots) = self.slots.get_mut(&day) {
            let before = day_slots.len();
            day_slots.retain(|slot| slot.id != id);
            if day_slots.len() < before {
                info!("removed slot {} on {}", id, day);
            } else {
                debug!("ignored removal of unknown slot {} on {}", id, day);
            }
            if day_slots.is_empty() {
                self.slots.remove(&day);
            }
        }
    }

    /// Slots for `day`, ordered by start time. Empty for a day with no
    /// entries, never an error.
    pub fn slots_on(&self, day: NaiveDate) -> &[Slot] {
        self.slots.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that currently have at least one slot, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Slot])> + '_ {
        self.slots.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn slot_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn ordered_and_disjoint(day_slots: &[Slot]) -> bool {
    day_slots
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.start < b.start && a.end <= b.start)
}
