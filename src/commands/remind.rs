use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui::{Activity, with_spinner};

pub async fn run(app: &App, no_desktop: bool) -> Result<()> {
    let engine = app.reminders(App::notifier(no_desktop));

    let sent = with_spinner(Activity::CheckingReminders, engine.sync_and_scan(Local::now())).await;

    if sent.is_empty() {
        println!("{}", "No reminders due".dimmed());
    }
    for notification in &sent {
        println!("{}", notification.render());
    }

    Ok(())
}
