use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;

pub async fn run(app: &App) -> Result<()> {
    let session = app.tokens.session().await;

    match (&session.identity, session.is_signed_in()) {
        (Some(identity), true) => {
            println!("{}", identity.render());
            if let Some(avatar) = &identity.avatar_url {
                println!("  {}", avatar.dimmed());
            }
            if session.refresh_token.is_none() {
                println!(
                    "{}",
                    "No refresh token stored; you'll need to sign in again when the access token expires."
                        .yellow()
                );
            }
        }
        _ => println!("{}", "Not signed in. Events are stored on this device only.".dimmed()),
    }

    Ok(())
}
