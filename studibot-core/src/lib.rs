//! Calendar core for StudiBot.
//!
//! This crate owns the calendar side of the assistant:
//! - `store`: the persisted key/value layer every component reads and writes
//! - `session`: the OAuth2 session and its token lifecycle
//! - `calendar`: local events, the remote mirror, and write routing between them
//! - `reminder`: the scan-and-notify engine with its dispatch ledger
//! - `remote`: the JSON protocol spoken with the chat backend

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod reminder;
pub mod remote;
pub mod session;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use calendar::{CalendarEvent, EventStore, LocalEvent, RemoteEvent, Source};
pub use error::{BackendError, ConfigError, EventError, SessionError, StoreError};
pub use reminder::{Notification, Notifier, ReminderEngine, ReminderSettings};
pub use session::{Identity, Session, TokenManager};
pub use store::Store;
