//! The merged event model and its write routing.
//!
//! While signed in, the remote provider is the only place new events go;
//! nothing falls back to local storage. Signed out, events live in the local
//! set, which is persisted wholesale on every change. The remote mirror only
//! ever holds the result of the last successful fetch plus this session's
//! own writes.
//!
//! Mutations are not serialized against `refresh_remote_mirror`. A mirror
//! replacement racing a create or delete can briefly drop or resurrect an
//! entry until the next fetch.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::calendar::{CalendarEvent, EventRef, LocalEvent, RemoteEvent};
use crate::constants::{LOCAL_EVENTS_KEY, REMOTE_ID_PREFIX};
use crate::date_range::DateRange;
use crate::error::{BackendError, BackendResult, EventError, EventResult, SessionError};
use crate::remote::Backend;
use crate::remote::protocol::{CreateEvent, DeleteEvent, ListEvents, UpdateEvent};
use crate::session::TokenManager;
use crate::store::Store;

pub struct EventStore {
    store: Store,
    tokens: Arc<TokenManager>,
    backend: Arc<dyn Backend>,
    local: RwLock<Vec<LocalEvent>>,
    mirror: RwLock<Vec<RemoteEvent>>,
}

/// Why a call wrapped in `with_token_retry` gave up.
enum RetryError {
    SignedOut,
    Session(SessionError),
    Backend(BackendError),
}

impl RetryError {
    fn into_event_error(self, wrap: fn(BackendError) -> EventError) -> EventError {
        match self {
            RetryError::SignedOut => EventError::RequiresAuth,
            RetryError::Session(e) => EventError::SessionExpired(e),
            RetryError::Backend(e) => wrap(e),
        }
    }
}

impl EventStore {
    /// Load persisted local events. The remote mirror starts empty.
    pub fn new(store: Store, tokens: Arc<TokenManager>, backend: Arc<dyn Backend>) -> Self {
        let local = store
            .get::<Vec<LocalEvent>>(LOCAL_EVENTS_KEY)
            .unwrap_or_default();

        EventStore {
            store,
            tokens,
            backend,
            local: RwLock::new(local),
            mirror: RwLock::new(Vec::new()),
        }
    }

    /// Local events followed by the remote mirror.
    pub async fn list(&self) -> Vec<CalendarEvent> {
        let local = self.local.read().await;
        let mirror = self.mirror.read().await;

        local
            .iter()
            .cloned()
            .map(CalendarEvent::Local)
            .chain(mirror.iter().cloned().map(CalendarEvent::Remote))
            .collect()
    }

    /// Add an event, routed to the provider while signed in and to the local
    /// set otherwise. Rejects entries matching an existing (date, title).
    pub async fn add(&self, date: NaiveDate, text: &str) -> EventResult<CalendarEvent> {
        if self
            .list()
            .await
            .iter()
            .any(|event| event.is_same_entry(date, text))
        {
            return Err(EventError::Duplicate(date));
        }

        if !self.tokens.is_signed_in().await {
            let event = LocalEvent::new(date, text);

            let mut local = self.local.write().await;
            local.push(event.clone());
            self.store.set(LOCAL_EVENTS_KEY, &*local);

            debug!(id = %event.id, "Added local event");
            return Ok(CalendarEvent::Local(event));
        }

        let created = self
            .with_token_retry(|access_token| {
                let cmd = CreateEvent {
                    access_token,
                    title: text.to_string(),
                    date,
                };
                async move { self.backend.call(&cmd).await }
            })
            .await
            .map_err(|e| e.into_event_error(EventError::RemoteWriteFailed))?;

        let event = RemoteEvent::new(&created.event_id, date, text);
        self.mirror.write().await.push(event.clone());

        info!(id = %event.id, "Created remote event");
        Ok(CalendarEvent::Remote(event))
    }

    /// Remove an event. Remote deletes need a session and are not retried.
    pub async fn remove(&self, id: &str) -> EventResult<()> {
        match EventRef::parse(id) {
            EventRef::Remote(id) => {
                let access_token = self
                    .tokens
                    .access_token()
                    .await
                    .ok_or(EventError::RequiresAuth)?;
                let provider_id = id.strip_prefix(REMOTE_ID_PREFIX).unwrap_or(id);

                self.backend
                    .call(&DeleteEvent {
                        access_token,
                        event_id: provider_id.to_string(),
                    })
                    .await
                    .map_err(EventError::RemoteWriteFailed)?;

                self.mirror.write().await.retain(|e| e.id != id);
                info!(id, "Deleted remote event");
                Ok(())
            }
            EventRef::Local(id) => {
                let mut local = self.local.write().await;
                let before = local.len();
                local.retain(|e| e.id != id);

                if local.len() == before {
                    return Err(EventError::NotFound(id.to_string()));
                }

                self.store.set(LOCAL_EVENTS_KEY, &*local);
                debug!(id, "Removed local event");
                Ok(())
            }
        }
    }

    /// Change an event's title, keeping its date.
    pub async fn update(&self, id: &str, text: &str) -> EventResult<CalendarEvent> {
        match EventRef::parse(id) {
            EventRef::Remote(id) => {
                let access_token = self
                    .tokens
                    .access_token()
                    .await
                    .ok_or(EventError::RequiresAuth)?;

                let current = self
                    .mirror
                    .read()
                    .await
                    .iter()
                    .find(|e| e.id == id)
                    .cloned()
                    .ok_or_else(|| EventError::NotFound(id.to_string()))?;

                self.backend
                    .call(&UpdateEvent {
                        access_token,
                        event_id: current.provider_id().to_string(),
                        title: text.to_string(),
                        date: current.date,
                    })
                    .await
                    .map_err(EventError::RemoteWriteFailed)?;

                let updated = RemoteEvent {
                    text: text.to_string(),
                    ..current
                };

                let mut mirror = self.mirror.write().await;
                if let Some(entry) = mirror.iter_mut().find(|e| e.id == id) {
                    *entry = updated.clone();
                }

                info!(id, "Updated remote event");
                Ok(CalendarEvent::Remote(updated))
            }
            EventRef::Local(id) => {
                let mut local = self.local.write().await;
                let entry = local
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| EventError::NotFound(id.to_string()))?;

                entry.text = text.to_string();
                let updated = entry.clone();
                self.store.set(LOCAL_EVENTS_KEY, &*local);

                debug!(id, "Updated local event");
                Ok(CalendarEvent::Local(updated))
            }
        }
    }

    /// Replace the remote mirror with every event overlapping `range`.
    ///
    /// On failure the previous mirror stays as it was; local events are
    /// unaffected either way. Returns the number of mirrored events.
    pub async fn refresh_remote_mirror(&self, range: &DateRange) -> EventResult<usize> {
        let time_min = range.time_min();
        let time_max = range.time_max();

        let response = self
            .with_token_retry(|access_token| {
                let cmd = ListEvents {
                    access_token,
                    time_min: time_min.clone(),
                    time_max: time_max.clone(),
                };
                async move { self.backend.call(&cmd).await }
            })
            .await
            .map_err(|e| e.into_event_error(EventError::FetchFailed))?;

        let fetched: Vec<RemoteEvent> = response
            .events
            .into_iter()
            .filter_map(|wire| {
                let id = wire.id.clone();
                let event = RemoteEvent::from_wire(wire);
                if event.is_none() {
                    warn!(id, "Skipping remote event with unreadable date");
                }
                event
            })
            .collect();

        let count = fetched.len();
        *self.mirror.write().await = fetched;

        debug!(count, %time_min, %time_max, "Replaced remote mirror");
        Ok(count)
    }

    /// Drop the remote mirror. Local events become the only visible set.
    pub async fn on_logout(&self) {
        self.mirror.write().await.clear();
    }

    /// Run `op` with the current access token. If it fails, refresh the
    /// token once and run it again. A failed or impossible refresh signs the
    /// user out.
    async fn with_token_retry<T, F, Fut>(&self, mut op: F) -> Result<T, RetryError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = BackendResult<T>>,
    {
        let access_token = self
            .tokens
            .access_token()
            .await
            .ok_or(RetryError::SignedOut)?;

        match op(access_token).await {
            Ok(value) => return Ok(value),
            Err(e) => debug!(error = %e, "Backend call failed, refreshing token"),
        }

        if let Err(e) = self.tokens.refresh().await {
            warn!(error = %e, "Session ended during retry");
            // `refresh` leaves the session alone when there is no refresh token
            self.tokens.clear().await;
            self.on_logout().await;
            return Err(RetryError::Session(e));
        }

        let access_token = self
            .tokens
            .access_token()
            .await
            .ok_or(RetryError::SignedOut)?;

        op(access_token).await.map_err(RetryError::Backend)
    }
}
