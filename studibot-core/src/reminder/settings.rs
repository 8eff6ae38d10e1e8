use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXAM_LEAD_DAYS, DEFAULT_TASK_LEAD_DAYS, EXAM_KEYWORDS, REMINDER_SETTINGS_KEY,
};
use crate::store::Store;

/// How many days ahead of an event its reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderSettings {
    pub task_lead_days: u32,
    pub exam_lead_days: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        ReminderSettings {
            task_lead_days: DEFAULT_TASK_LEAD_DAYS,
            exam_lead_days: DEFAULT_EXAM_LEAD_DAYS,
        }
    }
}

impl ReminderSettings {
    /// Stored settings, or the defaults when none are stored.
    pub fn load(store: &Store) -> Self {
        store.get(REMINDER_SETTINGS_KEY).unwrap_or_default()
    }

    pub fn save(&self, store: &Store) {
        store.set(REMINDER_SETTINGS_KEY, self);
    }

    pub fn lead_days(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::Task => self.task_lead_days,
            EventKind::Exam => self.exam_lead_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Task,
    Exam,
}

impl EventKind {
    /// An event is an exam when its title contains one of the exam keywords.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        if EXAM_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
            EventKind::Exam
        } else {
            EventKind::Task
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let store = Store::in_memory();
        assert_eq!(
            ReminderSettings::load(&store),
            ReminderSettings {
                task_lead_days: 1,
                exam_lead_days: 7
            }
        );
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let store = Store::in_memory();
        store.set(REMINDER_SETTINGS_KEY, &json!({ "examLeadDays": 14 }));

        let settings = ReminderSettings::load(&store);
        assert_eq!(settings.task_lead_days, 1);
        assert_eq!(settings.exam_lead_days, 14);
    }

    #[test]
    fn test_negative_lead_days_fall_back_to_defaults() {
        let store = Store::in_memory();
        store.set(REMINDER_SETTINGS_KEY, &json!({ "taskLeadDays": -2 }));

        assert_eq!(ReminderSettings::load(&store), ReminderSettings::default());
    }

    #[test]
    fn test_classify() {
        assert_eq!(EventKind::classify("Klausur Analysis"), EventKind::Exam);
        assert_eq!(EventKind::classify("PRÜFUNG Statistik"), EventKind::Exam);
        assert_eq!(EventKind::classify("Midterm exam"), EventKind::Exam);
        assert_eq!(EventKind::classify("Hausaufgabe abgeben"), EventKind::Task);
    }
}
