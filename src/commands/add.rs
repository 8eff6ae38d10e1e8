use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use studibot_core::date_range::DateRange;

use crate::app::App;
use crate::render::Render;
use crate::utils::dates::{day_label, parse_date};

pub async fn run(app: &App, date: &str, text: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(date, today)?;

    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Event title must not be empty");
    }

    // Duplicate detection needs that month's Google events in view
    app.sync_range(&DateRange::containing(date)).await;

    let event = app.events.add(date, text).await?;

    println!(
        "{} {} {}",
        "Added".green(),
        day_label(date, today).bold(),
        event.render()
    );

    Ok(())
}
