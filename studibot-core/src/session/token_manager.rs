//! Owns the OAuth session: login, refresh and sign-out.
//!
//! Access-token expiry is never tracked. Callers find out a token is stale
//! when a backend call fails, then ask for exactly one `refresh`.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::constants::SESSION_KEY;
use crate::error::{SessionError, SessionResult};
use crate::remote::Backend;
use crate::remote::protocol::{ExchangeCode, RefreshToken};
use crate::session::{Identity, LoginRequest, OAuthClient, Session};
use crate::store::Store;

pub struct TokenManager {
    store: Store,
    backend: Arc<dyn Backend>,
    oauth: OAuthClient,
    session: RwLock<Session>,
}

impl TokenManager {
    /// Load the persisted session, if any.
    pub fn new(store: Store, backend: Arc<dyn Backend>, oauth: OAuthClient) -> Self {
        let session = store
            .get::<Session>(SESSION_KEY)
            .map(Session::normalized)
            .unwrap_or_default();

        TokenManager {
            store,
            backend,
            oauth,
            session: RwLock::new(session),
        }
    }

    /// Start the authorization-code flow. The caller sends the user to
    /// `authorization_url` and later hands the returned code to `complete_login`.
    pub fn begin_login(&self) -> SessionResult<LoginRequest> {
        LoginRequest::new(&self.oauth)
    }

    /// Exchange an authorization code through the backend and store the new session.
    ///
    /// On failure the previous session is left untouched.
    pub async fn complete_login(&self, code: &str) -> SessionResult<Identity> {
        let response = self
            .backend
            .call(&ExchangeCode {
                code: code.to_string(),
                redirect_uri: self.oauth.redirect_uri.clone(),
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Authorization code exchange failed");
                SessionError::AuthExchangeFailed(e)
            })?;

        let user = response.user;
        let identity = Identity {
            display_name: user.name.unwrap_or_else(|| user.email.clone()),
            email: user.email,
            avatar_url: user.picture,
        };

        let mut session = self.session.write().await;

        // The provider omits the refresh token when consent was already granted
        let refresh_token = response.refresh_token.or_else(|| {
            let same_user = session.identity.as_ref().map(|i| &i.email) == Some(&identity.email);
            if same_user {
                session.refresh_token.clone()
            } else {
                None
            }
        });

        *session = Session::signed_in(identity.clone(), response.access_token, refresh_token);
        self.store.set(SESSION_KEY, &*session);

        info!(email = %identity.email, "Signed in");
        Ok(identity)
    }

    /// Make one attempt to get a fresh access token.
    ///
    /// A failed attempt clears the session; the caller treats that as a
    /// forced sign-out.
    pub async fn refresh(&self) -> SessionResult<()> {
        let refresh_token = self
            .session
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or(SessionError::NoRefreshToken)?;

        let response = match self.backend.call(&RefreshToken { refresh_token }).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Token refresh failed, signing out");
                self.clear().await;
                return Err(SessionError::RefreshFailed(e));
            }
        };

        let mut session = self.session.write().await;
        session.access_token = Some(response.access_token);
        if let Some(rotated) = response.refresh_token {
            session.refresh_token = Some(rotated);
        }
        self.store.set(SESSION_KEY, &*session);

        info!("Access token refreshed");
        Ok(())
    }

    /// Forget the session, in memory and on disk. Safe to call repeatedly.
    pub async fn clear(&self) {
        *self.session.write().await = Session::default();
        self.store.delete(SESSION_KEY);
    }

    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.session.read().await.identity.clone()
    }

    /// The current access token, only while signed in.
    pub async fn access_token(&self) -> Option<String> {
        let session = self.session.read().await;
        if session.is_signed_in() {
            session.access_token.clone()
        } else {
            None
        }
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.read().await.is_signed_in()
    }
}
