use std::collections::HashMap;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app::App;
use crate::render::Render;
use crate::utils::dates::parse_month;

pub async fn run(app: &App) -> Result<()> {
    if app.config.client_id.is_empty() {
        anyhow::bail!(
            "No OAuth client id configured.\n\n\
            Set client_id in {} or export STUDIBOT_CLIENT_ID.",
            studibot_core::config::AppConfig::config_path()?.display()
        );
    }

    let request = app.tokens.begin_login()?;

    println!("Open this URL in your browser to sign in with Google:\n");
    println!("{}\n", request.authorization_url);

    if open::that(&request.authorization_url).is_err() {
        println!("(Could not open browser automatically, please copy the URL above)");
    }

    let params = wait_for_callback(app.config.redirect_port).await?;

    if let Some(error) = params.get("error") {
        anyhow::bail!("Google sign-in was cancelled: {error}");
    }

    let code = params
        .get("code")
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state = params
        .get("state")
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    request
        .verify_state(state)
        .context("OAuth state mismatch - possible CSRF attack")?;

    println!("Received authorization code, exchanging for tokens...");
    let identity = app.tokens.complete_login(code).await?;

    println!("\n{} {}", "Signed in as".green(), identity.render());

    // Show what's in the calendar right away
    let today = chrono::Local::now().date_naive();
    app.sync_range(&parse_month(None, today)?).await;

    Ok(())
}

/// Accept one redirect on the loopback port and return its query parameters.
async fn wait_for_callback(port: u16) -> Result<HashMap<String, String>> {
    let address = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&address)
        .await
        .context("Failed to bind OAuth callback listener")?;

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html; charset=utf-8\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>StudiBot is connected</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok(params)
}
