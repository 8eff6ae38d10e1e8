//! Event types.
//!
//! A `CalendarEvent` is either local (created on this device, persisted) or
//! remote (mirrored from the provider, never persisted). Both are all-day
//! entries with a single title.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{LOCAL_ID_PREFIX, REMOTE_ID_PREFIX, UNTITLED_EVENT};
use crate::remote::protocol::WireEvent;
use crate::utils::normalize_title;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEvent {
    pub id: String,
    pub date: NaiveDate,
    pub text: String,
}

impl LocalEvent {
    /// Create an event with a fresh id: creation time plus a random suffix.
    pub fn new(date: NaiveDate, text: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();

        LocalEvent {
            id: format!(
                "{}{}-{}",
                LOCAL_ID_PREFIX,
                Utc::now().timestamp_millis(),
                &suffix[..8]
            ),
            date,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    /// Always starts with `REMOTE_ID_PREFIX`.
    pub id: String,
    pub date: NaiveDate,
    pub text: String,
}

impl RemoteEvent {
    pub fn new(provider_id: &str, date: NaiveDate, text: &str) -> Self {
        let id = if provider_id.starts_with(REMOTE_ID_PREFIX) {
            provider_id.to_string()
        } else {
            format!("{REMOTE_ID_PREFIX}{provider_id}")
        };

        RemoteEvent {
            id,
            date,
            text: text.to_string(),
        }
    }

    /// The id as the provider knows it.
    pub fn provider_id(&self) -> &str {
        self.id.strip_prefix(REMOTE_ID_PREFIX).unwrap_or(&self.id)
    }

    /// Convert a backend event. Returns None when the date can't be read.
    pub fn from_wire(wire: WireEvent) -> Option<Self> {
        // Timed events carry "YYYY-MM-DDTHH:MM:SS..."; only the day matters here
        let day = wire.date.split('T').next().unwrap_or_default();
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;

        let text = match wire.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => UNTITLED_EVENT.to_string(),
        };

        Some(Self::new(&wire.id, date, &text))
    }
}

/// A calendar entry from either source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CalendarEvent {
    Local(LocalEvent),
    Remote(RemoteEvent),
}

impl CalendarEvent {
    pub fn id(&self) -> &str {
        match self {
            CalendarEvent::Local(e) => &e.id,
            CalendarEvent::Remote(e) => &e.id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEvent::Local(e) => e.date,
            CalendarEvent::Remote(e) => e.date,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CalendarEvent::Local(e) => &e.text,
            CalendarEvent::Remote(e) => &e.text,
        }
    }

    pub fn source(&self) -> Source {
        match self {
            CalendarEvent::Local(_) => Source::Local,
            CalendarEvent::Remote(_) => Source::Remote,
        }
    }

    /// Whether this event and (`date`, `text`) describe the same entry.
    pub fn is_same_entry(&self, date: NaiveDate, text: &str) -> bool {
        self.date() == date && normalize_title(self.text()) == normalize_title(text)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Which store an event id points into, decided from the id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRef<'a> {
    Local(&'a str),
    /// Carries the full prefixed id.
    Remote(&'a str),
}

impl<'a> EventRef<'a> {
    pub fn parse(id: &'a str) -> Self {
        if id.starts_with(REMOTE_ID_PREFIX) {
            EventRef::Remote(id)
        } else {
            EventRef::Local(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;

    #[test]
    fn test_local_ids_are_unique_and_prefixed() {
        let a = LocalEvent::new(date(2025, 3, 20), "Abgabe");
        let b = LocalEvent::new(date(2025, 3, 20), "Abgabe");

        assert!(a.id.starts_with(LOCAL_ID_PREFIX));
        assert_ne!(a.id, b.id);
        assert_eq!(EventRef::parse(&a.id), EventRef::Local(&a.id));
    }

    #[test]
    fn test_remote_id_prefix_added_once() {
        let event = RemoteEvent::new("abc123", date(2025, 3, 20), "Klausur");
        assert_eq!(event.id, "google-abc123");
        assert_eq!(event.provider_id(), "abc123");

        let again = RemoteEvent::new("google-abc123", date(2025, 3, 20), "Klausur");
        assert_eq!(again.id, "google-abc123");
    }

    #[test]
    fn test_from_wire_truncates_time_and_fills_title() {
        let event = RemoteEvent::from_wire(WireEvent {
            id: "google-xyz".into(),
            date: "2025-03-20T10:00:00+01:00".into(),
            text: Some("  ".into()),
        })
        .unwrap();

        assert_eq!(event.date, date(2025, 3, 20));
        assert_eq!(event.text, UNTITLED_EVENT);
    }

    #[test]
    fn test_from_wire_rejects_bad_date() {
        let event = RemoteEvent::from_wire(WireEvent {
            id: "xyz".into(),
            date: "someday".into(),
            text: None,
        });
        assert!(event.is_none());
    }

    #[test]
    fn test_same_entry_ignores_case_and_whitespace() {
        let event = CalendarEvent::Local(LocalEvent::new(date(2025, 3, 20), "Klausur Analysis"));

        assert!(event.is_same_entry(date(2025, 3, 20), "  klausur analysis "));
        assert!(!event.is_same_entry(date(2025, 3, 21), "Klausur Analysis"));
        assert!(!event.is_same_entry(date(2025, 3, 20), "Klausur Analysis II"));
    }

    #[test]
    fn test_serialized_with_source_tag() {
        let event = CalendarEvent::Remote(RemoteEvent::new("a1", date(2025, 3, 20), "Tutorium"));
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["source"], "remote");
        assert_eq!(value["date"], "2025-03-20");
    }
}
