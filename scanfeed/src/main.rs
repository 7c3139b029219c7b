use anyhow::Context;
use clap::Parser;
use scanfeed::{
    arguments::Arguments,
    broadcaster::SubscriberHub,
    config::Config,
    server::{self, AppState},
    service::Service,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    init_tracing(args.log.as_deref())?;

    let config = Config::load(&args)?;
    tracing::debug!(?config, "Loaded configuration");

    let hub = SubscriberHub::new(config.subscriber_buffer);
    let (service, ingestor) = Service::start(&config, Arc::new(hub.clone()));

    let shutdown = CancellationToken::new();
    let state = AppState::new(ingestor, hub, shutdown.clone());

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    // Dispatchers keep running until every accepted upload has been queued.
    server::serve(listener, server::router(state, config.max_body_bytes), shutdown).await?;
    service.shutdown().await
}

fn init_tracing(directive: Option<&str>) -> anyhow::Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).context("Invalid log filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl-C, shutting down");
            cancel.cancel();
        }
        Err(e) => tracing::warn!("Cannot listen for Ctrl-C: {e}"),
    }
}
