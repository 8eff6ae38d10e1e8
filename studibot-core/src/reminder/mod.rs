//! Reminder scanning and dispatch.

mod engine;
mod ledger;
mod notifier;
mod settings;

pub use engine::ReminderEngine;
pub use ledger::{ReminderKey, ReminderLedger};
pub use notifier::{DesktopNotifier, LogNotifier, Notification, Notifier};
pub use settings::{EventKind, ReminderSettings};
