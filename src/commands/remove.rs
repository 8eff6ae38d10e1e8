use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::utils::dates::parse_month;

pub async fn run(app: &App, id: &str, month: Option<&str>) -> Result<()> {
    let range = parse_month(month, Local::now().date_naive())?;
    app.sync_range(&range).await;

    let title = app
        .events
        .list()
        .await
        .into_iter()
        .find(|e| e.id() == id)
        .map(|e| e.text().to_string());

    app.events.remove(id).await?;

    println!(
        "{} {}",
        "Removed".red(),
        title.as_deref().unwrap_or(id)
    );

    Ok(())
}
