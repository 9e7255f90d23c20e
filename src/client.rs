//! Async transport for the identity service and the two display feeds.
//! Compiled only with the `client` cargo feature. No retries anywhere in
//! this layer: a failure surfaces once, as a displayable error.

use crate::identity::{
    auth_me_request, auth_outcome, login_outcome, login_request, AuthMeData, AuthUser,
    GraphqlResponse, IdentityError, LoginData, LoginInput,
};
use crate::sessions::{PastSessions, PendingRequests};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// The identity deployment this front-end talks to.
pub const DEFAULT_ENDPOINT: &str = "https://experience-api.masaischool.com/";

pub const PENDING_REQUESTS_URL: &str = "https://dummy.com/api/pending-requests";
pub const PAST_SESSIONS_URL: &str = "https://dummy.com/api/past-sessions";

/// Client for the GraphQL identity endpoint. The session handed out at
/// login rides on a cookie, so one client instance covers the login /
/// getAuthMe pair.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    endpoint: String,
}

impl IdentityClient {
    pub fn new(endpoint: &str) -> IdentityClient {
        IdentityClient::with_timeout(endpoint, 30)
    }

    /// Client with a custom request timeout (for testing).
    pub fn with_timeout(endpoint: &str, timeout_secs: u64) -> IdentityClient {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        IdentityClient {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// Run the `login` mutation; the opaque session id on success.
    pub async fn login(&self, input: LoginInput) -> Result<String, IdentityError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&login_request(input))
            .send()
            .await?;

        // Rejections come back as a GraphQL errors array, not a status
        // code, so decode before judging.
        let body: GraphqlResponse<LoginData> = response.json().await?;
        login_outcome(body)
    }

    /// Run the `getAuthMe` query for the freshly logged-in caller.
    pub async fn fetch_me(&self) -> Result<AuthUser, IdentityError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&auth_me_request())
            .send()
            .await?;

        let body: GraphqlResponse<AuthMeData> = response.json().await?;
        auth_outcome(body)
    }

    /// Pending session requests, display-only.
    pub async fn fetch_pending_requests(&self, url: &str) -> Result<Vec<Value>, IdentityError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: PendingRequests = response.json().await?;
        Ok(body.events)
    }

    /// Past sessions, display-only.
    pub async fn fetch_past_sessions(&self, url: &str) -> Result<Vec<Value>, IdentityError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: PastSessions = response.json().await?;
        Ok(body.past_events)
    }
}

impl Default for IdentityClient {
    fn default() -> IdentityClient {
        IdentityClient::new(DEFAULT_ENDPOINT)
    }
}
