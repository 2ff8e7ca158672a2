use chrono::{DateTime, Days, Utc};
use chrono_tz::Tz;

use crate::domain::{Classification, DomainCheck};

use super::probe::CertificateProbe;

/// Cutoff instant for "expiring soon"; computed once and shared by every check in a run.
pub fn buffer_date(now: DateTime<Utc>, buffer_days: u16) -> DateTime<Utc> {
    now.checked_add_days(Days::new(buffer_days.into()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub struct Classifier<P> {
    probe: P,
    timezone: Tz,
}

impl<P: CertificateProbe> Classifier<P> {
    pub fn new(probe: P, timezone: Tz) -> Self {
        Self { probe, timezone }
    }

    pub async fn classify_all(
        &self,
        domains: &[String],
        buffer: DateTime<Utc>,
    ) -> Vec<DomainCheck> {
        let mut ordered = domains.to_vec();
        ordered.sort();

        tracing::info!(
            target: "checks",
            domains = ordered.len(),
            buffer_date = %buffer.with_timezone(&self.timezone).format("%Y/%m/%d"),
            "starting certificate checks"
        );

        let mut checks = Vec::with_capacity(ordered.len());
        for domain in ordered {
            let classification = self.classify_domain(&domain, buffer).await;
            checks.push(DomainCheck {
                domain,
                classification,
            });
        }
        checks
    }

    async fn classify_domain(&self, domain: &str, buffer: DateTime<Utc>) -> Classification {
        match self.probe.leaf_expiry(domain).await {
            Ok(expires_at) => {
                let classification = classify(expires_at, buffer, &self.timezone);
                tracing::info!(
                    target: "checks",
                    domain,
                    expires_at = %expires_at.with_timezone(&self.timezone),
                    result = classification.label(),
                    "certificate checked"
                );
                classification
            }
            Err(err) => {
                tracing::warn!(target: "checks", domain, error = %err, "certificate unavailable");
                Classification::Unreachable {
                    reason: err.to_string(),
                }
            }
        }
    }
}

pub fn classify(expires_at: DateTime<Utc>, buffer: DateTime<Utc>, timezone: &Tz) -> Classification {
    let expiring = expires_at < buffer;
    let expires_at = expires_at.with_timezone(timezone);
    if expiring {
        Classification::ExpiringSoon { expires_at }
    } else {
        Classification::Safe { expires_at }
    }
}
