mod app;
mod checks;
mod config;
mod domain;
mod infrastructure;
mod slack;

use std::process::ExitCode;

use infrastructure::logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("failed to initialize logging: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let app = match app::CertCheckApp::initialize(config) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(?err, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    match app.run().await {
        Ok(summary) => {
            tracing::info!(
                checked = summary.counts.total(),
                urgent = summary.urgent,
                "certificate check finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to deliver notification");
            ExitCode::FAILURE
        }
    }
}
