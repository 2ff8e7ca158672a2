use chrono::DateTime;
use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Safe { expires_at: DateTime<Tz> },
    ExpiringSoon { expires_at: DateTime<Tz> },
    Unreachable { reason: String },
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Safe { .. } => "safe",
            Classification::ExpiringSoon { .. } => "expiring_soon",
            Classification::Unreachable { .. } => "unreachable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainCheck {
    pub domain: String,
    pub classification: Classification,
}
