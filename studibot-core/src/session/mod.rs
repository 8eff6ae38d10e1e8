//! The OAuth2 session with the remote calendar provider.

mod login;
mod token_manager;

pub use login::{LoginRequest, OAuthClient};
pub use token_manager::TokenManager;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Session state persisted under `SESSION_KEY`.
///
/// An access token is only ever present together with an identity. The
/// refresh token may outlive the access token.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn signed_in(identity: Identity, access_token: String, refresh_token: Option<String>) -> Self {
        Session {
            identity: Some(identity),
            access_token: Some(access_token),
            refresh_token,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some() && self.access_token.is_some()
    }

    /// Drop tokens that have no identity to belong to.
    fn normalized(self) -> Self {
        match self.identity {
            Some(_) => self,
            None => Session::default(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
