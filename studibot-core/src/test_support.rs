//! Test doubles shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::constants::SESSION_KEY;
use crate::error::{BackendError, BackendResult};
use crate::remote::Backend;
use crate::reminder::{Notification, Notifier};
use crate::session::{Identity, OAuthClient, Session, TokenManager};
use crate::store::Store;

/// A backend that answers from a per-path script and records every call.
/// Unscripted calls fail with a 500.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<(String, Value)>>,
    scripted: Mutex<HashMap<String, VecDeque<BackendResult<Value>>>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.push(path, Ok(body));
    }

    pub fn fail(&self, path: &str) {
        self.push(
            path,
            Err(BackendError::Status {
                path: path.to_string(),
                status: 401,
                body: "invalid credentials".into(),
            }),
        );
    }

    fn push(&self, path: &str, result: BackendResult<Value>) {
        self.scripted
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self, path: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn post(&self, path: &str, body: Value) -> BackendResult<Value> {
        self.calls.lock().unwrap().push((path.to_string(), body));

        let next = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        next.unwrap_or_else(|| {
            Err(BackendError::Status {
                path: path.to_string(),
                status: 500,
                body: "no scripted response".into(),
            })
        })
    }
}

/// Keeps every notification instead of showing it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.sent.lock().unwrap().push(notification.clone());
    }
}

pub fn oauth_client() -> OAuthClient {
    OAuthClient {
        client_id: "studibot.apps.example.com".into(),
        auth_url: "https://accounts.example.com/o/oauth2/v2/auth".into(),
        redirect_uri: "http://localhost:8085/callback".into(),
    }
}

pub fn identity() -> Identity {
    Identity {
        display_name: "Mia Schulz".into(),
        email: "mia@uni-hamburg.example".into(),
        avatar_url: None,
    }
}

/// A store that already holds a signed-in session.
pub fn signed_in_store() -> Store {
    let store = Store::in_memory();
    store.set(
        SESSION_KEY,
        &Session::signed_in(identity(), "access-1".into(), Some("refresh-1".into())),
    );
    store
}

pub fn token_manager(store: &Store, backend: &Arc<FakeBackend>) -> Arc<TokenManager> {
    Arc::new(TokenManager::new(
        store.clone(),
        backend.clone(),
        oauth_client(),
    ))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
