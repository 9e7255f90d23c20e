use crate::session::{resolve_access, AccessDecision, AuthRecord, Role};

/// The app's navigable surface. The select-role view exists as a redirect
/// target for unknown roles even though its route is currently disabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Route {
    Login,
    Admin,
    Mentor,
    Student,
    SelectRole,
    NotFound,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Admin => "/admin",
            Route::Mentor => "/mentor",
            Route::Student => "/student",
            Route::SelectRole => "/select-role",
            Route::NotFound => "*",
        }
    }

    /// Resolve a requested path. The root redirects to login; anything
    /// unrecognized falls through to the not-found view.
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" | "/login" => Route::Login,
            "/admin" => Route::Admin,
            "/mentor" => Route::Mentor,
            "/student" => Route::Student,
            "/select-role" => Route::SelectRole,
            _ => Route::NotFound,
        }
    }

    /// Whether the route sits behind the session guard at all.
    pub fn requires_auth(self) -> bool {
        match self {
            Route::Admin | Route::Mentor | Route::Student | Route::SelectRole => true,
            Route::Login | Route::NotFound => false,
        }
    }

    /// Role restriction on top of authentication; `None` means any
    /// authenticated caller may enter.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Route::Admin => Some(&[Role::Admin]),
            Route::Mentor => Some(&[Role::Mentor]),
            Route::Student => Some(&[Role::Student]),
            Route::Login | Route::SelectRole | Route::NotFound => None,
        }
    }
}

/// One navigation, end to end: resolve the path, apply the guard, and
/// return the route actually rendered.
///
/// # Examples
/// ```
/// use mentorplan_libs::routing::{navigate, Route};
/// use mentorplan_libs::session::{AuthRecord, Role};
///
/// let student = AuthRecord {
///     authenticated: true,
///     role: Role::Student,
/// };
///
/// // A student asking for the mentor view lands back on their own home.
/// assert_eq!(navigate("/mentor", Some(&student)), Route::Student);
/// // Anonymous callers are sent to login.
/// assert_eq!(navigate("/mentor", None), Route::Login);
/// assert_eq!(navigate("/", None), Route::Login);
/// assert_eq!(navigate("/no-such-view", Some(&student)), Route::NotFound);
/// ```
pub fn navigate(path: &str, record: Option<&AuthRecord>) -> Route {
    let requested = Route::from_path(path);
    if !requested.requires_auth() {
        return requested;
    }

    match requested.allowed_roles() {
        Some(allowed) => match resolve_access(record, allowed) {
            AccessDecision::Unauthenticated => Route::Login,
            AccessDecision::WrongRole(home) => home,
            AccessDecision::Authorized => requested,
        },
        None => match record {
            Some(record) if record.authenticated => requested,
            _ => Route::Login,
        },
    }
}
