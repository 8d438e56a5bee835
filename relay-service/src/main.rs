use clap::Parser;
use relay_service::config::RelayConfig;
use relay_service::startup::Application;
use service_core::cli::LogArgs;
use service_core::error::AppError;
use service_core::observability::init_tracing;

/// Skeleton API server that publishes to and drains a broker queue.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let _log_guard = init_tracing("relay-service", &cli.log.settings());

    let config = RelayConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    tracing::info!(
        port = config.common.port,
        queue = %config.broker.queue,
        "Starting api server"
    );

    let app = Application::build(config).await?;
    let result = app.run_until_stopped().await;

    tracing::warn!("Exiting api server");
    Ok(result?)
}
