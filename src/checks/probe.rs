use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{redirect::Policy, tls::TlsInfo, Client};
use thiserror::Error;
use x509_parser::prelude::{FromDer, X509Certificate};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("peer presented no certificate")]
    MissingCertificate,
    #[error("unreadable certificate: {0}")]
    InvalidCertificate(String),
}

/// Connects to a host and reports when its leaf certificate stops being valid.
#[allow(async_fn_in_trait)]
pub trait CertificateProbe {
    async fn leaf_expiry(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError>;
}

pub struct TlsProbe {
    client: Client,
}

impl TlsProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = probe_client(timeout)?;
        Ok(Self { client })
    }
}

// Expired or mis-chained certificates still have to report their dates. Idle pooling is off so
// every connection closes as soon as its response is dropped.
fn probe_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("cert-expiry-notifier/{}", env!("CARGO_PKG_VERSION")))
        .use_rustls_tls()
        .tls_info(true)
        .danger_accept_invalid_certs(true)
        .redirect(Policy::none())
        .pool_max_idle_per_host(0)
        .timeout(timeout)
        .build()
}

impl CertificateProbe for TlsProbe {
    async fn leaf_expiry(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError> {
        let response = self.client.get(format!("https://{domain}/")).send().await?;

        let der = response
            .extensions()
            .get::<TlsInfo>()
            .and_then(|info| info.peer_certificate())
            .ok_or(ProbeError::MissingCertificate)?;

        not_after(der)
    }
}

pub fn not_after(der: &[u8]) -> Result<DateTime<Utc>, ProbeError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|err| ProbeError::InvalidCertificate(err.to_string()))?;
    let timestamp = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        ProbeError::InvalidCertificate(format!("notAfter {timestamp} is out of range"))
    })
}
