//! # Client Configuration
//!
//! Where the catalog service lives and which credentials the client falls
//! back to when a token is rejected.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     IZZYMART_API_URL=https://catalog.example/api/v1                    │
//! │     IZZYMART_API_USERNAME / IZZYMART_API_PASSWORD                      │
//! │     IZZYMART_API_TIMEOUT_SECS=15                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/register/api.toml (Linux)                                │
//! │     ~/Library/Application Support/com.izzymart.register/api.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api/v1, root / root, no timeout              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! base_url = "http://localhost:8000/api/v1"
//! default_username = "root"
//! default_password = "root"
//! request_timeout_secs = 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

pub const ENV_API_URL: &str = "IZZYMART_API_URL";
pub const ENV_API_USERNAME: &str = "IZZYMART_API_USERNAME";
pub const ENV_API_PASSWORD: &str = "IZZYMART_API_PASSWORD";
pub const ENV_API_TIMEOUT_SECS: &str = "IZZYMART_API_TIMEOUT_SECS";

/// Catalog service connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing path like `/products`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credentials used to re-authenticate after a 401 from search.
    #[serde(default = "default_username")]
    pub default_username: String,

    #[serde(default = "default_password")]
    pub default_password: String,

    /// Per-request timeout. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_username() -> String {
    "root".to_string()
}

fn default_password() -> String {
    "root".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            default_username: default_username(),
            default_password: default_password(),
            request_timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("default_username", &self.default_username)
            .field("default_password", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// Creates a config pointing at `base_url` with default credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (api.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load API config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "API config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a duration, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.base_url = url;
        }

        if let Some(username) = var(ENV_API_USERNAME) {
            self.default_username = username;
        }

        if let Some(password) = var(ENV_API_PASSWORD) {
            self.default_password = password;
        }

        if let Some(timeout) = var(ENV_API_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring invalid API timeout in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "izzymart", "register")
            .map(|dirs| dirs.config_dir().join("api.toml"))
    }
}
