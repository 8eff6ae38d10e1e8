use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;

pub async fn run(app: &App) -> Result<()> {
    let identity = app.tokens.identity().await;

    app.tokens.clear().await;
    app.events.on_logout().await;

    match identity {
        Some(identity) => println!("Signed out {}. Local events are kept.", identity.email),
        None => println!("{}", "Not signed in".dimmed()),
    }

    Ok(())
}
