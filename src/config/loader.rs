use std::{env, time::Duration};

use chrono_tz::Tz;
use url::Url;

use super::env::{AppConfig, CheckConfig, ConfigError, LoggingConfig, SlackConfig};

const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let domains = get("CERT_CHECK_DOMAINS")
            .map(|raw| parse_domains(&raw))
            .unwrap_or_default();

        let buffer_days = match get("CERT_CHECK_BUFFER_DAYS") {
            Some(raw) => raw.parse::<u16>().map_err(|err| ConfigError::Invalid {
                key: "CERT_CHECK_BUFFER_DAYS",
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => 0,
        };

        let probe_timeout =
            parse_timeout("CERT_CHECK_TIMEOUT_MS", get("CERT_CHECK_TIMEOUT_MS"))?;

        let timezone_name =
            get("CERT_CHECK_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|err| ConfigError::Invalid {
                key: "CERT_CHECK_TIMEZONE",
                value: timezone_name.clone(),
                reason: err.to_string(),
            })?;

        let checks = CheckConfig {
            domains,
            buffer_days,
            probe_timeout,
            timezone,
        };

        let raw_webhook =
            get("SLACK_WEBHOOK_URL").ok_or(ConfigError::Missing("SLACK_WEBHOOK_URL"))?;
        let webhook_url = match Url::parse(&raw_webhook) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    key: "SLACK_WEBHOOK_URL",
                    value: raw_webhook,
                    reason: format!("unsupported scheme {}", url.scheme()),
                })
            }
            Err(err) => {
                return Err(ConfigError::Invalid {
                    key: "SLACK_WEBHOOK_URL",
                    value: raw_webhook.clone(),
                    reason: err.to_string(),
                })
            }
        };

        let slack = SlackConfig {
            webhook_url,
            notice_channel: get("SLACK_CHANNEL_NOTICE").unwrap_or_default(),
            warn_channel: get("SLACK_CHANNEL_WARN").unwrap_or_default(),
            username: get("SLACK_USERNAME").unwrap_or_else(|| "cert-checker".to_string()),
            icon_emoji: get("SLACK_ICON_EMOJI").unwrap_or_else(|| ":lock:".to_string()),
            timeout: parse_timeout("SLACK_TIMEOUT_MS", get("SLACK_TIMEOUT_MS"))?,
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            logs_dir: get("LOGS_DIR"),
        };

        Ok(Self {
            checks,
            slack,
            logging,
        })
    }
}

// Entries are not validated here; a malformed one fails its own probe and is reported
// as unreachable alongside the rest.
fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_timeout(key: &'static str, raw: Option<String>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        Ok(_) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "timeout must be greater than zero".to_string(),
        }),
        Err(err) => Err(ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: err.to_string(),
        }),
    }
}
