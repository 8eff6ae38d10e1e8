use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::{info, warn};

const APP_NAME: &str = "StudiBot";
const REMINDER_TITLE: &str = "Erinnerung";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The reminder for an event `day_delta` days from today.
    pub fn reminder(text: &str, day_delta: i64) -> Self {
        let body = match day_delta {
            0 => format!("Heute: {text}"),
            1 => format!("Morgen: {text}"),
            n => format!("In {n} Tagen: {text}"),
        };

        Notification {
            title: REMINDER_TITLE.to_string(),
            body,
        }
    }
}

/// Delivers notifications to the user. Delivery is best-effort; failures are
/// logged, never returned.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Native desktop notifications.
///
/// Showing one talks to the notification daemon synchronously, so inside a
/// runtime it happens on the blocking pool instead of the calling task.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        let Notification { title, body } = notification.clone();

        off_runtime(move || {
            let result = notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&body)
                .show();

            if let Err(e) = result {
                warn!(error = %e, "Failed to show desktop notification");
            }
        });
    }
}

/// Run `f` on the blocking pool when called from a runtime, inline otherwise.
fn off_runtime(f: impl FnOnce() + Send + 'static) {
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(f);
        }
        Err(_) => f(),
    }
}

/// Writes notifications to the log only. Used when no desktop session is available.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        info!(title = %notification.title, body = %notification.body, "Notification");
    }
}
