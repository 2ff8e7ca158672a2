use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::payload::SlackPayload;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct WebhookClient {
    http: Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(http: Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Posts the payload once as the `payload` form field. Any HTTP status counts as delivered.
    pub async fn post(&self, payload: &SlackPayload) -> Result<(), NotifyError> {
        let body = serde_json::to_string(payload)?;
        let response = self
            .http
            .post(self.url.clone())
            .form(&[("payload", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "slack", %status, "webhook answered with a non-success status");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::testing::{spawn_webhook, unused_local_url};

    fn payload() -> SlackPayload {
        SlackPayload {
            text: "<!channel>\nexpiring & co".to_string(),
            username: "cert-checker".to_string(),
            icon_emoji: ":lock:".to_string(),
            channel: "#cert-warn".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_json_as_payload_form_field() {
        let webhook = spawn_webhook("200 OK").await;
        let client = WebhookClient::new(Client::new(), webhook.url.clone());

        client.post(&payload()).await.unwrap();

        let request = webhook.request().await;
        assert!(request.head.starts_with("POST /hook"));
        assert!(request
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"));
        let fields = request.form_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "payload");
        let sent: SlackPayload = serde_json::from_str(&fields[0].1).unwrap();
        assert_eq!(sent, payload());
    }

    #[tokio::test]
    async fn error_status_still_counts_as_delivered() {
        let webhook = spawn_webhook("500 Internal Server Error").await;
        let client = WebhookClient::new(Client::new(), webhook.url.clone());
        assert!(client.post(&payload()).await.is_ok());
        webhook.request().await;
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let client = WebhookClient::new(Client::new(), unused_local_url());
        let err = client.post(&payload()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
