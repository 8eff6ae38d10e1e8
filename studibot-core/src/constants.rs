/// Prefix carried by ids of events mirrored from the remote provider.
pub const REMOTE_ID_PREFIX: &str = "google-";

/// Prefix carried by ids of events created on this device.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Title shown for remote events that have none.
pub const UNTITLED_EVENT: &str = "Ohne Titel";

// Persisted keys

pub const LOCAL_EVENTS_KEY: &str = "local_events";
pub const SESSION_KEY: &str = "session";
pub const REMINDER_SETTINGS_KEY: &str = "reminder_settings";
pub const REMINDER_LEDGER_KEY: &str = "reminder_ledger";

/// Scopes requested on the consent screen: calendar read/write plus identity.
pub const OAUTH_SCOPES: &[&str] = &[
    "openid",
    "email",
    "profile",
    "https://www.googleapis.com/auth/calendar",
];

/// Words that mark an event as an exam rather than a task (matched case-insensitively).
pub const EXAM_KEYWORDS: &[&str] = &["klausur", "prüfung", "exam", "test"];

pub const DEFAULT_TASK_LEAD_DAYS: u32 = 1;
pub const DEFAULT_EXAM_LEAD_DAYS: u32 = 7;
