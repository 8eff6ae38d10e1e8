//! Request and response bodies for the backend endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A typed backend endpoint.
pub trait BackendCommand: Serialize + Send + Sync {
    type Response: DeserializeOwned;
    fn path() -> &'static str;
}

/// Empty success body.
#[derive(Debug, Deserialize)]
pub struct Ack {}

// ============================================================================
// Session exchange
// ============================================================================

/// Exchange an authorization code for tokens.
#[derive(Debug, Serialize)]
pub struct ExchangeCode {
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeCodeResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl BackendCommand for ExchangeCode {
    type Response = ExchangeCodeResponse;
    fn path() -> &'static str {
        "/oauth/callback"
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshToken {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    /// Only present when the provider rotates the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl BackendCommand for RefreshToken {
    type Response = RefreshTokenResponse;
    fn path() -> &'static str {
        "/oauth/refresh"
    }
}

// ============================================================================
// Calendar CRUD
// ============================================================================

/// Create an all-day event.
#[derive(Debug, Serialize)]
pub struct CreateEvent {
    pub access_token: String,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventResponse {
    /// Provider id, without the local `google-` prefix.
    pub event_id: String,
    /// Raw provider event, kept for callers that want more than id/date/title.
    #[serde(default)]
    pub event: Option<serde_json::Value>,
}

impl BackendCommand for CreateEvent {
    type Response = CreateEventResponse;
    fn path() -> &'static str {
        "/calendar/create"
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateEvent {
    pub access_token: String,
    pub event_id: String,
    pub title: String,
    pub date: NaiveDate,
}

impl BackendCommand for UpdateEvent {
    type Response = Ack;
    fn path() -> &'static str {
        "/calendar/update"
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteEvent {
    pub access_token: String,
    pub event_id: String,
}

impl BackendCommand for DeleteEvent {
    type Response = Ack;
    fn path() -> &'static str {
        "/calendar/delete"
    }
}

/// List events overlapping `[time_min, time_max]` (RFC3339).
#[derive(Debug, Serialize)]
pub struct ListEvents {
    pub access_token: String,
    pub time_min: String,
    pub time_max: String,
}

#[derive(Debug, Deserialize)]
pub struct ListEventsResponse {
    #[serde(default)]
    pub events: Vec<WireEvent>,
}

/// An event as the backend reports it. The date may carry a time part.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEvent {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl BackendCommand for ListEvents {
    type Response = ListEventsResponse;
    fn path() -> &'static str {
        "/calendar/events"
    }
}
