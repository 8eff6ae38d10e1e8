//! Record of reminders already sent.
//!
//! Keys are only ever added. A reminder missed on its exact day stays
//! missed, since the key encodes the day offset it was due at.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::constants::REMINDER_LEDGER_KEY;
use crate::store::Store;
use crate::utils::normalize_title;

/// `date|normalized title|day offset`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderKey(String);

impl ReminderKey {
    pub fn new(date: NaiveDate, text: &str, day_delta: i64) -> Self {
        ReminderKey(format!(
            "{}|{}|{}",
            date.format("%Y-%m-%d"),
            normalize_title(text),
            day_delta
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct ReminderLedger {
    keys: BTreeSet<String>,
}

impl ReminderLedger {
    pub fn load(store: &Store) -> Self {
        ReminderLedger {
            keys: store
                .get::<Vec<String>>(REMINDER_LEDGER_KEY)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }

    /// Merge in keys written by another process since this ledger was loaded.
    pub fn reload(&mut self, store: &Store) {
        let stored = Self::load(store);
        self.keys.extend(stored.keys);
    }

    pub fn contains(&self, key: &ReminderKey) -> bool {
        self.keys.contains(key.as_str())
    }

    /// Add a key and persist the whole ledger.
    pub fn record(&mut self, key: ReminderKey, store: &Store) {
        if self.keys.insert(key.0) {
            let keys: Vec<&String> = self.keys.iter().collect();
            store.set(REMINDER_LEDGER_KEY, &keys);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
