//! Display-only feeds: pending session requests and past sessions. Both are
//! read-only JSON lists; items are kept opaque since nothing in the core
//! consumes their fields.

use serde::Deserialize;
use serde_json::Value;

/// `GET .../pending-requests` answers `{"events": [...]}`.
#[derive(Debug, Deserialize)]
pub struct PendingRequests {
    #[serde(default)]
    pub events: Vec<Value>,
}

/// `GET .../past-sessions` answers `{"Past Events": [...]}`.
#[derive(Debug, Deserialize)]
pub struct PastSessions {
    #[serde(default, rename = "Past Events")]
    pub past_events: Vec<Value>,
}
