use serde::{Deserialize, Serialize};

use crate::{config::SlackConfig, domain::Report};

pub const CHANNEL_MENTION: &str = "<!channel>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackPayload {
    pub text: String,
    pub username: String,
    pub icon_emoji: String,
    pub channel: String,
}

impl SlackPayload {
    pub fn from_report(report: &Report, config: &SlackConfig) -> Self {
        let body = report.text();
        let (text, channel) = if report.urgent {
            (
                format!("{CHANNEL_MENTION}\n{body}"),
                config.warn_channel.clone(),
            )
        } else {
            (body, config.notice_channel.clone())
        };

        Self {
            text,
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
            channel,
        }
    }
}
