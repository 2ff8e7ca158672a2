use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub checks: CheckConfig,
    pub slack: SlackConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub domains: Vec<String>,
    pub buffer_days: u16,
    pub probe_timeout: Duration,
    /// Zone used to display expiry dates; comparisons always happen in UTC.
    pub timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub webhook_url: Url,
    pub notice_channel: String,
    pub warn_channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub logs_dir: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
