use crate::routing::Route;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roles issued by the identity service. Anything the service returns
/// outside the three known roles collapses to [`Role::Unknown`] so every
/// downstream match stays exhaustive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mentor,
    Student,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// The role's home view, used both after login and as the wrong-role
    /// redirect target.
    pub fn home(self) -> Route {
        match self {
            Role::Admin => Route::Admin,
            Role::Mentor => Route::Mentor,
            Role::Student => Route::Student,
            Role::Unknown => Route::SelectRole,
        }
    }
}

/// The session record written at login completion and read on every
/// navigation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub authenticated: bool,
    pub role: Role,
}

/// Outcome of gating one navigation.
#[derive(Debug, Eq, PartialEq)]
pub enum AccessDecision {
    /// No usable session; send the caller to login.
    Unauthenticated,
    /// A session exists but its role is not allowed; redirect to its home.
    WrongRole(Route),
    /// Render the guarded view.
    Authorized,
}

/// Pure decision over the stored record and the view's allowed roles.
/// Stateless per request; the three outcomes above are the only results.
///
/// # Examples
/// ```
/// use mentorplan_libs::routing::Route;
/// use mentorplan_libs::session::{resolve_access, AccessDecision, AuthRecord, Role};
///
/// let student = AuthRecord {
///     authenticated: true,
///     role: Role::Student,
/// };
///
/// assert_eq!(
///     resolve_access(Some(&student), &[Role::Mentor]),
///     AccessDecision::WrongRole(Route::Student),
/// );
/// assert_eq!(
///     resolve_access(None, &[Role::Mentor]),
///     AccessDecision::Unauthenticated,
/// );
/// ```
pub fn resolve_access(record: Option<&AuthRecord>, allowed: &[Role]) -> AccessDecision {
    match record {
        None => AccessDecision::Unauthenticated,
        Some(record) if !record.authenticated => AccessDecision::Unauthenticated,
        Some(record) if !allowed.contains(&record.role) => {
            AccessDecision::WrongRole(record.role.home())
        }
        Some(_) => AccessDecision::Authorized,
    }
}

/// Fixed key the auth record lives under, mirroring the browser original.
pub const AUTH_KEY: &str = "authData";

/// Process-local key-value store standing in for the browser's local
/// storage. Values are plain strings; the auth record goes through JSON.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore {
            entries: HashMap::new(),
        }
    }

    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_key(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn delete_key(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Persist the record under [`AUTH_KEY`], written at login completion.
    pub fn write_auth(&mut self, record: &AuthRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.set_key(AUTH_KEY, json),
            Err(err) => warn!("could not encode auth record: {}", err),
        }
    }

    /// Read back the record. A missing or unparseable entry reads as no
    /// session rather than failing the navigation.
    pub fn read_auth(&self) -> Option<AuthRecord> {
        let raw = self.get_key(AUTH_KEY)?;
        match serde_json::from_str(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("discarding unreadable auth record: {}", err);
                None
            }
        }
    }

    /// Logout: drop the stored record.
    pub fn clear_auth(&mut self) {
        self.delete_key(AUTH_KEY);
    }
}
