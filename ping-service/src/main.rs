use clap::Parser;
use ping_service::startup::Application;
use service_core::cli::LogArgs;
use service_core::config::Config;
use service_core::error::AppError;
use service_core::observability::init_tracing;

/// Skeleton API server exposing health-check endpoints.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let _log_guard = init_tracing("ping-service", &cli.log.settings());

    let config = Config::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    tracing::info!(port = config.port, "Starting api server");

    let result = Application::build(config).await?.run_until_stopped().await;

    tracing::warn!("Exiting api server");
    Ok(result?)
}
