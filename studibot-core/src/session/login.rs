//! Authorization-code consent URL.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::constants::OAUTH_SCOPES;
use crate::error::{SessionError, SessionResult};

/// Public half of the OAuth client. The secret stays with the backend.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    pub auth_url: String,
    pub redirect_uri: String,
}

/// A started login: where to send the user, and what to expect back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub authorization_url: String,
    pub state: String,
    pub scopes: Vec<String>,
    pub redirect_uri: String,
}

impl LoginRequest {
    pub(crate) fn new(client: &OAuthClient) -> SessionResult<Self> {
        let state = Uuid::new_v4().simple().to_string();
        let scopes: Vec<String> = OAUTH_SCOPES.iter().map(|s| s.to_string()).collect();
        let scope = scopes.join(" ");

        let url = Url::parse_with_params(
            &client.auth_url,
            &[
                ("client_id", client.client_id.as_str()),
                ("redirect_uri", client.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state.as_str()),
            ],
        )?;

        Ok(LoginRequest {
            authorization_url: url.into(),
            state,
            scopes,
            redirect_uri: client.redirect_uri.clone(),
        })
    }

    /// Check the `state` echoed back on the redirect.
    pub fn verify_state(&self, returned: &str) -> SessionResult<()> {
        if returned == self.state {
            Ok(())
        } else {
            Err(SessionError::StateMismatch)
        }
    }
}
