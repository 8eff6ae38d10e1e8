//! Calendar events from two sources of truth: this device and the remote provider.

mod event;
mod store;

pub use event::{CalendarEvent, EventRef, LocalEvent, RemoteEvent, Source};
pub use store::EventStore;
