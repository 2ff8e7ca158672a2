pub mod env;
mod loader;

pub use env::{AppConfig, LoggingConfig, SlackConfig};
pub use loader::load_config;
