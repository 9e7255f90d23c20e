use chrono::{Local, NaiveDateTime, NaiveTime};
use core::fmt;
use core::str::FromStr;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Minutes in one calendar day; `ClockTime` values live in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// The minute marks offered by the picker grid.
pub const QUARTER_MINUTES: [u8; 4] = [0, 15, 30, 45];

#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum TimeError {
    #[error("time of day out of range: {hour}:{minute:02}")]
    OutOfRange { hour: u8, minute: u8 },
    #[error("malformed time of day: {0:?}")]
    Malformed(String),
    #[error("picker hour must be within 1-12, got {0}")]
    PickerHour(u8),
    #[error("picker minute must fall on a quarter hour, got {0}")]
    PickerMinute(u8),
}

/// Wall-clock time of day, stored as minutes since local midnight.
///
/// Prints as 24-hour `"HH:MM"` (also its serde form, matching the wire
/// format) and formats as 12-hour `"h:MM AM"` for display.
///
/// # Examples
/// ```
/// use mentorplan_libs::time::ClockTime;
///
/// let start = ClockTime::new(9, 0).unwrap();
///
/// assert_eq!(start.to_string(), "09:00");
/// assert_eq!(start.twelve_hour(), "9:00 AM");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Construct from a 24-hour clock reading.
    ///
    /// # Examples
    /// ```
    /// use mentorplan_libs::time::ClockTime;
    ///
    /// assert!(ClockTime::new(23, 59).is_ok());
    /// assert!(ClockTime::new(24, 0).is_err());
    /// assert!(ClockTime::new(9, 60).is_err());
    /// ```
    pub fn new(hour: u8, minute: u8) -> Result<ClockTime, TimeError> {
        if hour >= 24 || minute >= 60 {
            Err(TimeError::OutOfRange { hour, minute })
        } else {
            Ok(ClockTime(u16::from(hour) * 60 + u16::from(minute)))
        }
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn minutes_from_midnight(self) -> u16 {
        self.0
    }

    /// The same instant as a `chrono` time, for pairing with a calendar day.
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// 12-hour display form. Hour 0 shows as 12 AM, hour 12 as 12 PM,
    /// hours past noon subtract twelve.
    ///
    /// # Examples
    /// ```
    /// use mentorplan_libs::time::ClockTime;
    ///
    /// assert_eq!(ClockTime::new(0, 0).unwrap().twelve_hour(), "12:00 AM");
    /// assert_eq!(ClockTime::new(12, 0).unwrap().twelve_hour(), "12:00 PM");
    /// assert_eq!(ClockTime::new(13, 5).unwrap().twelve_hour(), "1:05 PM");
    /// ```
    pub fn twelve_hour(self) -> String {
        let hour = self.hour();
        let display_hour = if hour > 12 {
            hour - 12
        } else if hour == 0 {
            12
        } else {
            hour
        };
        format!("{}:{:02} {}", display_hour, self.minute(), self.period())
    }

    pub fn period(self) -> Period {
        if self.hour() >= 12 {
            Period::Pm
        } else {
            Period::Am
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parses the 24-hour `"HH:MM"` wire form.
    ///
    /// # Examples
    /// ```
    /// use mentorplan_libs::time::ClockTime;
    ///
    /// let t: ClockTime = "13:45".parse().unwrap();
    /// assert_eq!(t.hour(), 13);
    /// assert_eq!(t.minute(), 45);
    ///
    /// assert!("25:00".parse::<ClockTime>().is_err());
    /// assert!("9 o'clock".parse::<ClockTime>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ':');
        let (hour, minute) = match (parts.next(), parts.next()) {
            (Some(h), Some(m)) => (
                h.parse::<u8>()
                    .map_err(|_| TimeError::Malformed(s.to_string()))?,
                m.parse::<u8>()
                    .map_err(|_| TimeError::Malformed(s.to_string()))?,
            ),
            _ => return Err(TimeError::Malformed(s.to_string())),
        };
        ClockTime::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Half of the 12-hour clock face.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Period {
    Am,
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// Working state of the circular time picker: a 12-hour reading that only
/// becomes a [`ClockTime`] at confirmation. The constructor enforces the
/// picker grid (hours 1-12, quarter-hour minutes).
///
/// # Examples
/// ```
/// use mentorplan_libs::time::{Period, TimeSelection};
///
/// let noon = TimeSelection::new(12, 0, Period::Pm).unwrap();
/// assert_eq!(noon.resolve().hour(), 12);
///
/// let midnight = TimeSelection::new(12, 0, Period::Am).unwrap();
/// assert_eq!(midnight.resolve().hour(), 0);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TimeSelection {
    hour: u8,
    minute: u8,
    period: Period,
}

impl TimeSelection {
    pub fn new(hour: u8, minute: u8, period: Period) -> Result<TimeSelection, TimeError> {
        if hour < 1 || hour > 12 {
            Err(TimeError::PickerHour(hour))
        } else if !QUARTER_MINUTES.contains(&minute) {
            Err(TimeError::PickerMinute(minute))
        } else {
            Ok(TimeSelection {
                hour,
                minute,
                period,
            })
        }
    }

    /// Re-open an existing time for editing; `13:05` becomes `1:05 PM`.
    /// Minutes carry over as-is even when off the quarter grid.
    pub fn from_clock_time(time: ClockTime) -> TimeSelection {
        let hour = match time.hour() % 12 {
            0 => 12,
            h => h,
        };
        TimeSelection {
            hour,
            minute: time.minute(),
            period: time.period(),
        }
    }

    /// Confirm the selection as a 24-hour time. 12 PM resolves to noon,
    /// 12 AM to midnight.
    ///
    /// # Examples
    /// ```
    /// use mentorplan_libs::time::{Period, TimeSelection};
    ///
    /// let evening = TimeSelection::new(9, 30, Period::Pm).unwrap();
    /// assert_eq!(evening.resolve().to_string(), "21:30");
    /// ```
    pub fn resolve(self) -> ClockTime {
        let hour = match self.period {
            Period::Pm => {
                if self.hour == 12 {
                    12
                } else {
                    self.hour + 12
                }
            }
            Period::Am => {
                if self.hour == 12 {
                    0
                } else {
                    self.hour
                }
            }
        };
        // The picker ranges keep this constructible.
        ClockTime::new(hour, self.minute).unwrap_or(ClockTime(0))
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn period(self) -> Period {
        self.period
    }
}

impl Default for TimeSelection {
    /// The picker opens at 9:00 AM.
    fn default() -> TimeSelection {
        TimeSelection {
            hour: 9,
            minute: 0,
            period: Period::Am,
        }
    }
}

/// Source of "now" for the past-slot rule. Injected so the rule is
/// deterministic under test.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, the production clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
