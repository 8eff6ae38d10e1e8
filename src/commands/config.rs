use anyhow::Result;
use owo_colors::OwoColorize;
use studibot_core::config::AppConfig;

pub fn run() -> Result<()> {
    let config_path = AppConfig::config_path()?;
    let config = AppConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_dir()?.display());

    println!("\n{}", "Backend".bold());
    println!("  URL:          {}", config.backend_url);
    println!("  Redirect URI: {}", config.redirect_uri());
    if config.client_id.is_empty() {
        println!("  Client id:    {}", "(not set)".yellow());
    } else {
        println!("  Client id:    {}", config.client_id);
    }

    Ok(())
}
