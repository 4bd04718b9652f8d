//! CLI configuration.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/dropzone/config.toml`
//! - Windows: `%APPDATA%/dropzone/config.toml`
//!
//! `DROPZONE_*` environment variables override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Storage provider base URL.
    #[serde(default = "default_storage_url")]
    pub storage_url: String,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Emails allowed to create and delete folders.
    #[serde(default)]
    pub admin_emails: Vec<String>,

    /// Email of the signed-in user.
    #[serde(default)]
    pub user_email: Option<String>,

    /// Bearer token of the signed-in user.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_api_url() -> String {
    dropzone_client::backend::DEFAULT_BASE_URL.into()
}

fn default_storage_url() -> String {
    dropzone_client::storage::DEFAULT_BASE_URL.into()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_url: default_storage_url(),
            request_timeout_secs: default_timeout(),
            admin_emails: Vec::new(),
            user_email: None,
            auth_token: None,
        }
    }
}

impl Config {
    /// Loads the config file (defaults if absent) and applies the process
    /// environment on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Applies `DROPZONE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DROPZONE_API_URL") {
            self.api_url = url;
        }
        if let Some(url) = get("DROPZONE_STORAGE_URL") {
            self.storage_url = url;
        }
        if let Some(token) = get("DROPZONE_TOKEN") {
            self.auth_token = Some(token);
        }
        if let Some(email) = get("DROPZONE_USER_EMAIL") {
            self.user_email = Some(email);
        }
        if let Some(list) = get("DROPZONE_ADMIN_EMAILS") {
            self.admin_emails = list
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Token to send, if any.
    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> PathBuf {
    config_base_dir().join("dropzone").join("config.toml")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp")
    }
}
