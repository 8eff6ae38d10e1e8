//! Application configuration at ~/.config/studibot/config.toml
//!
//! Every field can be overridden through `STUDIBOT_<FIELD>` environment
//! variables, e.g. `STUDIBOT_BACKEND_URL`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::session::OAuthClient;

static DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
static DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_REDIRECT_PORT: u16 = 8085;
const DEFAULT_REMINDER_INTERVAL_MINUTES: u64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chat backend that holds the OAuth client secret and proxies calendar calls.
    pub backend_url: String,

    /// Public OAuth client id used to build the consent URL.
    pub client_id: String,

    pub auth_url: String,

    /// Port of the loopback listener receiving the OAuth redirect.
    pub redirect_port: u16,

    /// Where persisted state lives. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,

    pub reminder_interval_minutes: u64,

    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            client_id: String::new(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            redirect_port: DEFAULT_REDIRECT_PORT,
            data_dir: None,
            reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoDirectory("config"))?
            .join("studibot");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STUDIBOT").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ConfigResult<()> {
        let contents = format!(
            "\
# StudiBot configuration

# Chat backend handling token exchange and calendar calls:
# backend_url = \"{DEFAULT_BACKEND_URL}\"

# OAuth client id shown on the consent screen:
# client_id = \"your-client-id.apps.googleusercontent.com\"

# Port for the local OAuth redirect listener:
# redirect_port = {DEFAULT_REDIRECT_PORT}

# Minutes between reminder scans in `studibot watch`:
# reminder_interval_minutes = {DEFAULT_REMINDER_INTERVAL_MINUTES}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }

    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .ok_or(ConfigError::NoDirectory("data"))?
                .join("studibot")),
        }
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback", self.redirect_port)
    }

    pub fn oauth_client(&self) -> OAuthClient {
        OAuthClient {
            client_id: self.client_id.clone(),
            auth_url: self.auth_url.clone(),
            redirect_uri: self.redirect_uri(),
        }
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_minutes.max(1) * 60)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.redirect_port, DEFAULT_REDIRECT_PORT);
        assert_eq!(config.redirect_uri(), "http://localhost:8085/callback");
        assert_eq!(config.reminder_interval(), Duration::from_secs(3600));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "backend_url = \"https://bot.example.org\"\nredirect_port = 9000\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.backend_url, "https://bot.example.org");
        assert_eq!(config.redirect_uri(), "http://localhost:9000/callback");
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    }

    #[test]
    fn test_default_config_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AppConfig::create_default_config(&path).unwrap();
        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }
}
