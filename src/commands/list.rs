use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::render_agenda;
use crate::utils::dates::parse_month;

pub async fn run(app: &App, month: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let range = parse_month(month, today)?;

    app.sync_range(&range).await;

    let events: Vec<_> = app
        .events
        .list()
        .await
        .into_iter()
        .filter(|e| range.contains(e.date()))
        .collect();

    println!("{}\n", range.from.format("%B %Y").to_string().bold());
    println!("{}", render_agenda(&events, today));

    Ok(())
}
