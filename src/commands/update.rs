use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;
use crate::utils::dates::parse_month;

pub async fn run(app: &App, id: &str, text: &str, month: Option<&str>) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Event title must not be empty");
    }

    let range = parse_month(month, Local::now().date_naive())?;
    app.sync_range(&range).await;

    let event = app.events.update(id, text).await?;

    println!("{} {}", "Updated".yellow(), event.render());

    Ok(())
}
