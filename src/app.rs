//! Wires the core components together from the user's config.

use std::sync::Arc;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;
use studibot_core::config::AppConfig;
use studibot_core::date_range::DateRange;
use studibot_core::error::EventError;
use studibot_core::reminder::{DesktopNotifier, LogNotifier, Notifier, ReminderEngine};
use studibot_core::remote::{Backend, HttpBackend};
use studibot_core::store::{FileStore, Store};
use studibot_core::{EventStore, TokenManager};

use crate::utils::tui::{Activity, with_spinner};

pub struct App {
    pub config: AppConfig,
    pub store: Store,
    pub tokens: Arc<TokenManager>,
    pub events: Arc<EventStore>,
}

impl App {
    pub fn load() -> Result<Self> {
        let config = AppConfig::load().context("Failed to load config")?;
        let data_dir = config.data_dir()?;
        debug!(data_dir = %data_dir.display(), backend = %config.backend_url, "Loaded config");
        let store = Store::new(FileStore::new(data_dir));

        let backend: Arc<dyn Backend> = Arc::new(
            HttpBackend::new(&config.backend_url, config.request_timeout())
                .context("Failed to set up the backend client")?,
        );

        let tokens = Arc::new(TokenManager::new(
            store.clone(),
            backend.clone(),
            config.oauth_client(),
        ));
        let events = Arc::new(EventStore::new(store.clone(), tokens.clone(), backend));

        Ok(App {
            config,
            store,
            tokens,
            events,
        })
    }

    pub fn reminders(&self, notifier: Arc<dyn Notifier>) -> ReminderEngine {
        ReminderEngine::new(self.store.clone(), self.events.clone(), notifier)
    }

    pub fn notifier(no_desktop: bool) -> Arc<dyn Notifier> {
        if no_desktop {
            Arc::new(LogNotifier)
        } else {
            Arc::new(DesktopNotifier)
        }
    }

    /// Load Google events for `range` while signed in.
    ///
    /// Fetch problems are reported and swallowed; local events stay usable.
    pub async fn sync_range(&self, range: &DateRange) {
        if !self.tokens.is_signed_in().await {
            return;
        }

        let result = with_spinner(
            Activity::LoadingCalendar,
            self.events.refresh_remote_mirror(range),
        )
        .await;

        match result {
            Ok(_) => {}
            Err(EventError::SessionExpired(_)) => {
                println!(
                    "{}",
                    "Your Google session expired and you were signed out. Run `studibot login` to reconnect."
                        .yellow()
                );
            }
            Err(e) => println!("{}", format!("Showing local events only: {e}").yellow()),
        }
    }
}
