use crate::availability::AvailabilityError;
use chrono::{Duration, NaiveDateTime};

/// How long a notice stays up before auto-dismissing.
pub const NOTICE_TTL_MS: i64 = 3000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-facing message. Rejections and network failures surface
/// through one of these and leave all state untouched; the view drops the
/// notice once [`expired`](Notice::expired) turns true.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub posted_at: NaiveDateTime,
}

impl Notice {
    pub fn info(message: impl Into<String>, posted_at: NaiveDateTime) -> Notice {
        Notice::at(message, NoticeLevel::Info, posted_at)
    }

    pub fn success(message: impl Into<String>, posted_at: NaiveDateTime) -> Notice {
        Notice::at(message, NoticeLevel::Success, posted_at)
    }

    pub fn error(message: impl Into<String>, posted_at: NaiveDateTime) -> Notice {
        Notice::at(message, NoticeLevel::Error, posted_at)
    }

    /// The notice shown when `add_slot` rejects a candidate.
    pub fn rejection(error: &AvailabilityError, posted_at: NaiveDateTime) -> Notice {
        Notice::error(error.to_string(), posted_at)
    }

    fn at(message: impl Into<String>, level: NoticeLevel, posted_at: NaiveDateTime) -> Notice {
        Notice {
            message: message.into(),
            level,
            posted_at,
        }
    }

    /// True once the fixed display interval has elapsed.
    pub fn expired(&self, now: NaiveDateTime) -> bool {
        now - self.posted_at >= Duration::milliseconds(NOTICE_TTL_MS)
    }
}
