pub mod report;
pub mod types;

pub use report::{Report, ReportCounts};
pub use types::{Classification, DomainCheck};
