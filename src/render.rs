//! Terminal rendering for core types.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use studibot_core::reminder::Notification;
use studibot_core::{CalendarEvent, Identity, ReminderSettings, Source};

use crate::utils::dates::day_label;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Source {
    fn render(&self) -> String {
        match self {
            Source::Local => "[local]".cyan().to_string(),
            Source::Remote => "[google]".green().to_string(),
        }
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.text(),
            self.source().render(),
            self.id().dimmed()
        )
    }
}

impl Render for Identity {
    fn render(&self) -> String {
        if self.display_name == self.email {
            self.email.bold().to_string()
        } else {
            format!("{} <{}>", self.display_name.bold(), self.email)
        }
    }
}

impl Render for ReminderSettings {
    fn render(&self) -> String {
        format!(
            "  Tasks:  {} {} before\n  Exams:  {} {} before",
            self.task_lead_days,
            days(self.task_lead_days),
            self.exam_lead_days,
            days(self.exam_lead_days)
        )
    }
}

impl Render for Notification {
    fn render(&self) -> String {
        format!("🔔 {}", self.body)
    }
}

fn days(count: u32) -> &'static str {
    if count == 1 { "day" } else { "days" }
}

/// Events grouped under a heading per day, in date order.
pub fn render_agenda(events: &[CalendarEvent], today: NaiveDate) -> String {
    if events.is_empty() {
        return "No events found".dimmed().to_string();
    }

    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date());

    let mut lines = Vec::new();
    let mut current: Option<NaiveDate> = None;

    for event in sorted {
        if current != Some(event.date()) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(day_label(event.date(), today).bold().to_string());
            current = Some(event.date());
        }
        lines.push(format!("  {}", event.render()));
    }

    lines.join("\n")
}
