//! Wire types for the identity service: a single HTTP endpoint accepting
//! JSON-encoded GraphQL operations. Only two operations are used, the
//! `login` mutation and the `getAuthMe` query. Everything here is pure;
//! the optional transport lives in the `client` module.

use crate::routing::Route;
use crate::session::{AuthRecord, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOGIN_MUTATION: &str = "\
mutation login($input: LoginInput!) {
  login(input: $input) { id }
}";

pub const AUTH_ME_QUERY: &str = "\
query getAuthMe {
  me {
    id
    name
    username
    role
    sections_enrolled { id name }
  }
}";

/// Shown when the service rejects a login without an error of its own.
pub const LOGIN_FALLBACK_ERROR: &str = "Invalid credentials or login failed.";

#[derive(Error, Debug)]
pub enum IdentityError {
    /// The service answered but refused the operation; the message is
    /// displayable as-is.
    #[error("{0}")]
    Rejected(String),
    /// The service could not be reached or its answer not read.
    #[cfg(feature = "client")]
    #[error("An error occurred. Please try again.")]
    Transport(#[from] reqwest::Error),
}

/// JSON body of one GraphQL operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V>
where
    V: Serialize,
{
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
    pub operation_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginVariables {
    pub input: LoginInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

pub fn login_request(input: LoginInput) -> GraphqlRequest<LoginVariables> {
    GraphqlRequest {
        query: LOGIN_MUTATION,
        variables: Some(LoginVariables { input }),
        operation_name: "login",
    }
}

pub fn auth_me_request() -> GraphqlRequest<()> {
    GraphqlRequest {
        query: AUTH_ME_QUERY,
        variables: None,
        operation_name: "getAuthMe",
    }
}

/// GraphQL response envelope: data and errors can each be absent.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: Option<LoginId>,
}

#[derive(Debug, Deserialize)]
pub struct LoginId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthMeData {
    pub me: Option<AuthUser>,
}

/// The authenticated caller as the service describes them.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub sections_enrolled: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

/// Fold a login response into the opaque session id, or the first error
/// message the service offered.
///
/// # Examples
/// ```
/// use mentorplan_libs::identity::{login_outcome, GraphqlResponse, LoginData};
///
/// let accepted: GraphqlResponse<LoginData> =
///     serde_json::from_str(r#"{ "data": { "login": { "id": "u-91" } } }"#).unwrap();
/// assert_eq!(login_outcome(accepted).unwrap(), "u-91");
///
/// let refused: GraphqlResponse<LoginData> =
///     serde_json::from_str(r#"{ "data": null, "errors": [{ "message": "Bad password" }] }"#)
///         .unwrap();
/// assert!(login_outcome(refused).is_err());
/// ```
pub fn login_outcome(response: GraphqlResponse<LoginData>) -> Result<String, IdentityError> {
    if let Some(LoginData {
        login: Some(LoginId { id }),
    }) = response.data
    {
        return Ok(id);
    }

    let message = response
        .errors
        .into_iter()
        .next()
        .map(|error| error.message)
        .unwrap_or_else(|| LOGIN_FALLBACK_ERROR.to_string());
    Err(IdentityError::Rejected(message))
}

/// Fold a `getAuthMe` response into the caller's record.
pub fn auth_outcome(response: GraphqlResponse<AuthMeData>) -> Result<AuthUser, IdentityError> {
    if let Some(AuthMeData { me: Some(user) }) = response.data {
        return Ok(user);
    }

    let message = response
        .errors
        .into_iter()
        .next()
        .map(|error| error.message)
        .unwrap_or_else(|| LOGIN_FALLBACK_ERROR.to_string());
    Err(IdentityError::Rejected(message))
}

/// The session record to persist and the landing route, once the identity
/// service has described the caller.
pub fn session_for(user: &AuthUser) -> (AuthRecord, Route) {
    let record = AuthRecord {
        authenticated: true,
        role: user.role,
    };
    (record, user.role.home())
}
