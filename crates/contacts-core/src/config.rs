//! Configuration types for the contacts front end
//!
//! The base URL is a deployment-time setting, never user input. Values come
//! from a JSON file, environment variables, or both (env wins).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::notify::DEFAULT_TOAST_TTL_SECS;
use crate::validation::DEFAULT_MIN_NAME_LEN;

/// Environment keys read by [`ClientConfig::from_lookup`]
pub const ENV_API_URL: &str = "CONTACTS_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "CONTACTS_API_TIMEOUT_SECS";
pub const ENV_MIN_NAME_LEN: &str = "CONTACTS_MIN_NAME_LEN";
pub const ENV_TOAST_TTL_SECS: &str = "CONTACTS_TOAST_TTL_SECS";
pub const ENV_LOG_LEVEL: &str = "CONTACTS_LOG_LEVEL";
/// Optional path of a JSON config file loaded before env overrides
pub const ENV_CONFIG_FILE: &str = "CONTACTS_CONFIG";

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Form validation settings
    #[serde(default)]
    pub form: FormConfig,

    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            api: ApiConfig::default(),
            form: FormConfig::default(),
            notifications: NotificationConfig::default(),
            log_level: default_log_level(),
        }
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: ClientConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Load from the process environment
    ///
    /// If `CONTACTS_CONFIG` names a file it is loaded first; the remaining
    /// `CONTACTS_*` variables then override individual values.
    pub fn from_env() -> Result<Self, crate::Error> {
        let base = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::new(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Build from defaults plus the values returned by `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new().with_overrides(lookup)
    }

    /// Apply environment-style overrides on top of this configuration
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            self.api.timeout_secs = Some(parse_number(ENV_API_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MIN_NAME_LEN) {
            self.form.min_name_len = parse_number(ENV_MIN_NAME_LEN, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TOAST_TTL_SECS) {
            self.notifications.ttl_secs = parse_number(ENV_TOAST_TTL_SECS, &raw)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.trim().to_lowercase();
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.api.validate()?;

        if self.form.min_name_len == 0 {
            return Err(crate::Error::config("Minimum name length must be > 0"));
        }

        if self.notifications.ttl_secs == 0 {
            return Err(crate::Error::config("Notification TTL must be > 0"));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(crate::Error::config(format!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ))),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the four endpoints are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional per-request timeout in seconds
    ///
    /// Unset by default: requests run until the backend answers.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Create an API config for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Set a request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Validate the API configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.base_url.is_empty() {
            return Err(crate::Error::config("API base URL cannot be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "API base URL must use HTTP or HTTPS scheme. Got: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(crate::Error::config("API timeout must be > 0 when set"));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

/// Form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Minimum length of first and last names, in characters
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_name_len: default_min_name_len(),
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds a toast stays visible
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, crate::Error> {
    raw.trim()
        .parse()
        .map_err(|_| crate::Error::config(format!("{} must be a number. Got: {}", key, raw)))
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_min_name_len() -> usize {
    DEFAULT_MIN_NAME_LEN
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TOAST_TTL_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}
