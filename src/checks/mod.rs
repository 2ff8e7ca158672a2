pub mod classifier;
pub mod probe;

pub use classifier::{buffer_date, Classifier};
pub use probe::{CertificateProbe, TlsProbe};
