use anyhow::Context;
use clap::Parser;
use intent_relay::cli::HarnessArgs;
use intent_relay::harness::{load_queries, LatencyHarness};
use intent_relay::{HarnessConfig, ModelGateway};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "intent_relay=info".into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config: HarnessConfig = HarnessArgs::parse().into();

    let queries = load_queries(&config.input_file, config.has_header)
        .await
        .with_context(|| format!("loading queries from {}", config.input_file.display()))?;
    tracing::info!("Loaded {} queries from {}", queries.len(), config.input_file.display());

    let gateway = ModelGateway::new(config.gateway.clone())?;
    let harness = LatencyHarness::new(gateway.single_attempt());

    tracing::info!("Starting {} warmup iterations against {}", config.warmup, config.gateway.endpoint);
    let report = harness.run(&queries, config.warmup).await?;

    println!("{}", report);
    Ok(())
}
