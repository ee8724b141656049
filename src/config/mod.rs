//! Configuration management for trendmail.
//!
//! Settings come from an optional TOML file (`--config PATH`, or
//! `~/.config/trendmail/config.toml` when present) and are then overridden by
//! environment variables, which is how scheduled runs supply credentials:
//!
//! - `RESEND_API_KEY` - email API key
//! - `SENDER_EMAIL` - sender address
//! - `RECIPIENT_EMAIL` - recipients, comma or whitespace separated
//! - `FALLBACK_RECIPIENT_EMAIL` - redirect target for restricted sends

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::notifier::OnRestricted;

pub const DEFAULT_TRENDING_URL: &str = "https://github.com/trending?since=daily";
pub const DEFAULT_LIMIT: usize = 10;
/// The daily listing shows 25 repositories.
pub const MAX_LIMIT: usize = 25;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";

pub const ENV_API_KEY: &str = "RESEND_API_KEY";
pub const ENV_SENDER: &str = "SENDER_EMAIL";
pub const ENV_RECIPIENTS: &str = "RECIPIENT_EMAIL";
pub const ENV_FALLBACK_RECIPIENT: &str = "FALLBACK_RECIPIENT_EMAIL";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub delivery: DeliveryConfig,
    pub report: ReportConfig,
}

/// Settings for retrieving the trending page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Trending listing URL (default: daily, all languages)
    pub url: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User agent sent with the request
    pub user_agent: String,

    /// Number of records kept from the top of the page (default: 10)
    pub limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TRENDING_URL.to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (compatible; trendmail/0.1; +https://github.com/trending)"
                .to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the outbound email API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub api_key: Option<String>,
    pub sender: Option<String>,
    pub recipients: Vec<String>,

    /// Base URL of the email API (default: https://api.resend.com)
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Address to redirect to when the provider restricts recipients.
    /// Without one, a restricted send fails the run.
    pub fallback_recipient: Option<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sender: None,
            recipients: Vec::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
            fallback_recipient: None,
        }
    }
}

impl DeliveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate and collect the values delivery cannot run without.
    pub fn settings(&self) -> Result<DeliverySettings, ConfigError> {
        let api_key = non_empty(self.api_key.as_deref()).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let sender = non_empty(self.sender.as_deref()).ok_or(ConfigError::Missing(ENV_SENDER))?;
        let recipients = parse_recipients(&self.recipients.join(","));
        if recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }

        Ok(DeliverySettings {
            api_key: api_key.to_string(),
            sender: sender.to_string(),
            recipients,
        })
    }

    pub fn on_restricted(&self) -> OnRestricted {
        match non_empty(self.fallback_recipient.as_deref()) {
            Some(addr) => OnRestricted::RedirectTo(addr.to_string()),
            None => OnRestricted::Fail,
        }
    }
}

/// Report presentation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Offset from UTC, in hours, used for the report date (default: 8, Beijing time)
    pub utc_offset_hours: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { utc_offset_hours: 8 }
    }
}

/// Validated delivery credentials and addressing, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    pub api_key: String,
    pub sender: String,
    pub recipients: Vec<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and defaults are used otherwise. Environment variables are
    /// applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reject numeric settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LIMIT).contains(&self.fetch.limit) {
            return Err(ConfigError::OutOfRange {
                field: "fetch.limit",
                value: self.fetch.limit as u64,
                min: 1,
                max: MAX_LIMIT as u64,
            });
        }
        for (field, value) in [
            ("fetch.timeout_secs", self.fetch.timeout_secs),
            ("delivery.timeout_secs", self.delivery.timeout_secs),
        ] {
            if !(1..=MAX_TIMEOUT_SECS).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 1,
                    max: MAX_TIMEOUT_SECS,
                });
            }
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/trendmail/config.toml` on Linux, platform equivalent elsewhere
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trendmail").join("config.toml"))
    }

    /// Override file values with non-empty environment values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.delivery.api_key = Some(key.trim().to_string());
        }
        if let Some(sender) = get(ENV_SENDER) {
            self.delivery.sender = Some(sender.trim().to_string());
        }
        if let Some(raw) = get(ENV_RECIPIENTS) {
            self.delivery.recipients = parse_recipients(&raw);
        }
        if let Some(addr) = get(ENV_FALLBACK_RECIPIENT) {
            self.delivery.fallback_recipient = Some(addr.trim().to_string());
        }
    }
}

/// Split a recipient list on commas and whitespace, dropping empty entries
/// and repeated addresses while keeping first-seen order.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        let part = part.trim();
        if part.is_empty() || recipients.iter().any(|r| r == part) {
            continue;
        }
        recipients.push(part.to_string());
    }
    recipients
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("No recipients configured (set {ENV_RECIPIENTS})")]
    NoRecipients,

    #[error("Delivery is not configured")]
    NoDelivery,

    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("UTC offset out of range: {0} hours")]
    InvalidOffset(i32),
}
