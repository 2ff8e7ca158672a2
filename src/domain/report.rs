use super::types::{Classification, DomainCheck};

pub const DANGER_HEADER: &str = "有効期限切れが迫った証明書:exclamation:";
pub const UNKNOWN_HEADER: &str = "情報取得に失敗した証明書:question:";
pub const SAFE_HEADER: &str = "有効期限切れまで猶予のある証明書:green_heart:";

const DATE_FORMAT: &str = "%Y/%m/%d";

/// Per-category entry lines in check order, plus the derived urgency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub danger: Vec<String>,
    pub unknown: Vec<String>,
    pub safe: Vec<String>,
    pub urgent: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    pub expiring_soon: usize,
    pub unreachable: usize,
    pub safe: usize,
}

impl ReportCounts {
    pub fn total(&self) -> usize {
        self.expiring_soon + self.unreachable + self.safe
    }
}

impl Report {
    pub fn from_checks(checks: &[DomainCheck]) -> Self {
        let mut danger = Vec::new();
        let mut unknown = Vec::new();
        let mut safe = Vec::new();

        for check in checks {
            match &check.classification {
                Classification::ExpiringSoon { expires_at } => {
                    danger.push(format!("{}({})", check.domain, expires_at.format(DATE_FORMAT)));
                }
                Classification::Unreachable { reason } => {
                    tracing::debug!(
                        target: "report",
                        domain = %check.domain,
                        reason = %reason,
                        "listing as unreachable"
                    );
                    unknown.push(format!("{}(unreachable)", check.domain));
                }
                Classification::Safe { expires_at } => {
                    safe.push(format!("{}({})", check.domain, expires_at.format(DATE_FORMAT)));
                }
            }
        }

        let urgent = !danger.is_empty() || !unknown.is_empty();
        Self {
            danger,
            unknown,
            safe,
            urgent,
        }
    }

    pub fn counts(&self) -> ReportCounts {
        ReportCounts {
            expiring_soon: self.danger.len(),
            unreachable: self.unknown.len(),
            safe: self.safe.len(),
        }
    }

    pub fn text(&self) -> String {
        [
            render_block(DANGER_HEADER, &self.danger),
            render_block(UNKNOWN_HEADER, &self.unknown),
            render_block(SAFE_HEADER, &self.safe),
        ]
        .join("\n")
    }
}

fn render_block(header: &str, entries: &[String]) -> String {
    let mut block = String::with_capacity(header.len() + 1);
    block.push_str(header);
    block.push('\n');
    for entry in entries {
        block.push_str(entry);
        block.push('\n');
    }
    block
}
