use clap::Parser;
use intent_relay::cli::RelayArgs;
use intent_relay::server::{self, AppState};
use intent_relay::RelayConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: RelayConfig = RelayArgs::parse().into();

    // Initialize logging/tracing
    let default_filter = if config.debug {
        "intent_relay=debug,tower_http=debug"
    } else {
        "intent_relay=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();

    tracing::info!("Intent relay booting...");
    tracing::info!("  Model service: {}", config.gateway.endpoint);
    tracing::info!("  Data file: {}", config.data_file.display());

    let (state, writer) = AppState::from_config(&config)?;
    let app = server::router(state, config.static_dir.clone());
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl+C, draining and exiting");
                trigger.cancel();
            }
            Err(e) => tracing::warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    server::serve(listener, app, shutdown).await?;

    // Router (and every store handle) is gone; wait for queued appends to land.
    writer.await?;
    tracing::info!("Intent relay stopped");
    Ok(())
}
