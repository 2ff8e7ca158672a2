use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;

use crate::{
    checks::{buffer_date, CertificateProbe, Classifier, TlsProbe},
    config::AppConfig,
    domain::{Report, ReportCounts},
    slack::{NotifyError, SlackPayload, WebhookClient},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub counts: ReportCounts,
    pub urgent: bool,
}

pub struct CertCheckApp<P> {
    config: AppConfig,
    classifier: Classifier<P>,
    webhook: WebhookClient,
}

impl CertCheckApp<TlsProbe> {
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let probe = TlsProbe::new(config.checks.probe_timeout)
            .context("failed to build TLS probe client")?;
        Self::with_probe(config, probe)
    }
}

impl<P: CertificateProbe> CertCheckApp<P> {
    pub fn with_probe(config: AppConfig, probe: P) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("cert-expiry-notifier/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.slack.timeout)
            .build()
            .context("failed to build webhook client")?;

        let classifier = Classifier::new(probe, config.checks.timezone);
        let webhook = WebhookClient::new(http_client, config.slack.webhook_url.clone());

        Ok(Self {
            config,
            classifier,
            webhook,
        })
    }

    /// Checks every configured domain, then delivers a single report. Delivery errors are the
    /// only failure; unreachable domains are part of the report.
    pub async fn run(self) -> Result<RunSummary, NotifyError> {
        let buffer = buffer_date(Utc::now(), self.config.checks.buffer_days);
        let checks = self
            .classifier
            .classify_all(&self.config.checks.domains, buffer)
            .await;

        let report = Report::from_checks(&checks);
        let counts = report.counts();
        tracing::info!(
            target: "report",
            expiring_soon = counts.expiring_soon,
            unreachable = counts.unreachable,
            safe = counts.safe,
            urgent = report.urgent,
            "report built"
        );

        let payload = SlackPayload::from_report(&report, &self.config.slack);
        self.webhook.post(&payload).await?;
        tracing::info!(target: "slack", channel = %payload.channel, "notification delivered");

        Ok(RunSummary {
            counts,
            urgent: report.urgent,
        })
    }
}
