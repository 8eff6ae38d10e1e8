//! The reminder scan.
//!
//! Every trigger (startup, the periodic timer and manual requests) runs the
//! same `scan`. Overlapping scans are safe because the ledger lock is held
//! across check, dispatch and record for the whole pass.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use tokio::sync::{Mutex, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::calendar::EventStore;
use crate::date_range::DateRange;
use crate::error::EventError;
use crate::reminder::{
    EventKind, Notification, Notifier, ReminderKey, ReminderLedger, ReminderSettings,
};
use crate::store::Store;

pub struct ReminderEngine {
    store: Store,
    events: Arc<EventStore>,
    notifier: Arc<dyn Notifier>,
    ledger: Mutex<ReminderLedger>,
}

impl ReminderEngine {
    pub fn new(store: Store, events: Arc<EventStore>, notifier: Arc<dyn Notifier>) -> Self {
        let ledger = ReminderLedger::load(&store);

        ReminderEngine {
            store,
            events,
            notifier,
            ledger: Mutex::new(ledger),
        }
    }

    /// Dispatch every reminder due at `now` that hasn't been sent yet.
    /// Returns what was dispatched.
    pub async fn scan(&self, now: DateTime<Local>) -> Vec<Notification> {
        let settings = ReminderSettings::load(&self.store);
        let today = now.date_naive();
        let events = self.events.list().await;

        let mut ledger = self.ledger.lock().await;
        ledger.reload(&self.store);

        let mut sent = Vec::new();
        for event in &events {
            let day_delta = days_between(today, event.date());
            if day_delta < 0 {
                continue;
            }

            let lead_days = settings.lead_days(EventKind::classify(event.text()));
            if day_delta != i64::from(lead_days) && day_delta != 0 {
                continue;
            }

            let key = ReminderKey::new(event.date(), event.text(), day_delta);
            if ledger.contains(&key) {
                debug!(%key, "Reminder already sent");
                continue;
            }

            let notification = Notification::reminder(event.text(), day_delta);
            self.notifier.notify(&notification);
            info!(%key, "Reminder sent");

            ledger.record(key, &self.store);
            sent.push(notification);
        }

        sent
    }

    /// Refresh the remote mirror for the days reminders can fall on, then scan.
    ///
    /// A failed or skipped refresh doesn't stop the scan; it runs over
    /// whatever is currently visible.
    pub async fn sync_and_scan(&self, now: DateTime<Local>) -> Vec<Notification> {
        let settings = ReminderSettings::load(&self.store);
        let horizon = settings.task_lead_days.max(settings.exam_lead_days);
        let range = DateRange::upcoming(now.date_naive(), u64::from(horizon));

        match self.events.refresh_remote_mirror(&range).await {
            Ok(count) => debug!(count, "Mirror refreshed before scan"),
            Err(EventError::RequiresAuth) => {}
            Err(e) => warn!(error = %e, "Scanning without a fresh remote mirror"),
        }

        self.scan(now).await
    }

    /// Scan now, then on every `period` tick and every message on `manual`,
    /// until `shutdown` resolves.
    pub async fn run(
        &self,
        period: Duration,
        mut manual: mpsc::Receiver<()>,
        shutdown: impl Future<Output = ()>,
    ) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Reminder loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.sync_and_scan(Local::now()).await;
                }
                Some(()) = manual.recv() => {
                    debug!("Manual reminder scan");
                    self.sync_and_scan(Local::now()).await;
                }
            }
        }
    }
}

fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use chrono::{Days, TimeZone};
    use serde_json::json;

    use super::*;
    use crate::constants::{REMINDER_LEDGER_KEY, REMINDER_SETTINGS_KEY};
    use crate::test_support::{FakeBackend, RecordingNotifier, signed_in_store, token_manager};

    struct Fixture {
        store: Store,
        events: Arc<EventStore>,
        notifier: Arc<RecordingNotifier>,
        engine: ReminderEngine,
    }

    fn fixture(store: Store, backend: Arc<FakeBackend>) -> Fixture {
        let tokens = token_manager(&store, &backend);
        let events = Arc::new(EventStore::new(store.clone(), tokens, backend));
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = ReminderEngine::new(store.clone(), events.clone(), notifier.clone());

        Fixture {
            store,
            events,
            notifier,
            engine,
        }
    }

    fn local_fixture() -> Fixture {
        fixture(Store::in_memory(), FakeBackend::new())
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 13, 9, 30, 0).unwrap()
    }

    fn in_days(days: u64) -> NaiveDate {
        now().date_naive() + Days::new(days)
    }

    #[tokio::test]
    async fn test_task_reminder_sent_once() {
        let f = local_fixture();
        f.events.add(in_days(1), "Hausaufgabe abgeben").await.unwrap();

        let first = f.engine.scan(now()).await;
        let second = f.engine.scan(now()).await;

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].body, "Morgen: Hausaufgabe abgeben");
        assert!(second.is_empty());
        assert_eq!(f.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_exam_uses_exam_lead_days() {
        let f = local_fixture();
        f.events.add(in_days(7), "Klausur Analysis").await.unwrap();
        f.events.add(in_days(7), "Hausaufgabe abgeben").await.unwrap();

        let sent = f.engine.scan(now()).await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "In 7 Tagen: Klausur Analysis");
    }

    #[tokio::test]
    async fn test_same_day_always_due() {
        let f = local_fixture();
        f.events.add(in_days(0), "Klausur Statistik").await.unwrap();

        let sent = f.engine.scan(now()).await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "Heute: Klausur Statistik");
    }

    #[tokio::test]
    async fn test_past_events_are_ignored() {
        let f = local_fixture();
        f.events
            .add(now().date_naive() - Days::new(1), "Abgabe")
            .await
            .unwrap();

        assert!(f.engine.scan(now()).await.is_empty());
        assert!(f.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_custom_lead_days() {
        let f = local_fixture();
        f.store
            .set(REMINDER_SETTINGS_KEY, &json!({ "taskLeadDays": 3, "examLeadDays": 14 }));
        f.events.add(in_days(3), "Abgabe Blatt 5").await.unwrap();
        f.events.add(in_days(1), "Tutorium").await.unwrap();

        let sent = f.engine.scan(now()).await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "In 3 Tagen: Abgabe Blatt 5");
    }

    #[tokio::test]
    async fn test_ledger_survives_restart() {
        let store = Store::in_memory();
        let first = fixture(store.clone(), FakeBackend::new());
        first.events.add(in_days(1), "Abgabe").await.unwrap();
        first.engine.scan(now()).await;

        let second = fixture(store.clone(), FakeBackend::new());
        assert!(second.engine.scan(now()).await.is_empty());

        let keys: Vec<String> = store.get(REMINDER_LEDGER_KEY).unwrap();
        assert_eq!(keys, vec![format!("{}|abgabe|1", in_days(1))]);
    }

    #[tokio::test]
    async fn test_each_lead_time_fires_separately() {
        let f = local_fixture();
        f.events.add(in_days(1), "Abgabe").await.unwrap();

        f.engine.scan(now()).await;
        let next_day = now() + chrono::Duration::days(1);
        let sent = f.engine.scan(next_day).await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "Heute: Abgabe");
    }

    #[tokio::test]
    async fn test_overlapping_scans_dispatch_once() {
        let f = local_fixture();
        f.events.add(in_days(1), "Abgabe").await.unwrap();

        let (a, b) = tokio::join!(f.engine.scan(now()), f.engine.scan(now()));

        assert_eq!(a.len() + b.len(), 1);
        assert_eq!(f.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_and_scan_reminds_about_remote_events() {
        let backend = FakeBackend::new();
        backend.respond(
            "/calendar/events",
            json!({
                "success": true,
                "events": [{ "id": "google-k1", "date": in_days(7).to_string(), "text": "Prüfung Lineare Algebra" }]
            }),
        );
        let f = fixture(signed_in_store(), backend.clone());

        let sent = f.engine.sync_and_scan(now()).await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "In 7 Tagen: Prüfung Lineare Algebra");
        assert_eq!(
            backend.calls("/calendar/events")[0]["time_min"],
            format!("{}T00:00:00Z", now().date_naive())
        );
    }

    #[tokio::test]
    async fn test_sync_and_scan_signed_out_uses_local_events() {
        let backend = FakeBackend::new();
        let f = fixture(Store::in_memory(), backend.clone());
        f.events.add(in_days(0), "Abgabe").await.unwrap();

        let sent = f.engine.sync_and_scan(now()).await;

        assert_eq!(sent.len(), 1);
        assert!(backend.calls("/calendar/events").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_scans_on_start_and_manual_trigger() {
        let f = local_fixture();
        let today = Local::now().date_naive();
        f.events.add(today, "Abgabe").await.unwrap();

        let (trigger, manual) = mpsc::channel(1);
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

        let run = f.engine.run(Duration::from_secs(3600), manual, async {
            let _ = stopped.await;
        });
        let drive = async {
            tokio::task::yield_now().await;
            f.events
                .add(today + Days::new(1), "Referat")
                .await
                .unwrap();
            trigger.send(()).await.unwrap();
            tokio::task::yield_now().await;
            stop.send(()).unwrap();
        };
        tokio::join!(run, drive);

        let bodies: Vec<String> = f.notifier.sent().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["Heute: Abgabe", "Morgen: Referat"]);
    }
}
