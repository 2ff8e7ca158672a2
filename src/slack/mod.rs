pub mod client;
pub mod payload;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{NotifyError, WebhookClient};
pub use payload::SlackPayload;
