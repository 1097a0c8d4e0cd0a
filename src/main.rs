//! Binary entry point: logging, config, one immediate cycle, then the
//! interval scheduler and the HTTP trigger server side by side.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use njuskalo_watch::infrastructure::{config::AppConfig, logging};
use njuskalo_watch::{server, AdWatcher};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let config = AppConfig::from_env()?;
    info!(
        "starting njuskalo-watch: url={} interval={}s bind={}",
        config.listing_url, config.poll_interval_secs, config.bind_addr
    );

    let watcher = Arc::new(AdWatcher::new(config.clone())?);

    // Match the original behavior of running one cycle right at startup.
    info!("running initial cycle...");
    if let Err(e) = watcher.run_cycle().await {
        error!("initial cycle failed: {e}");
    }

    let scheduler = tokio::spawn(run_scheduler(
        watcher.clone(),
        Duration::from_secs(config.poll_interval_secs),
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("trigger endpoint listening on {}", config.bind_addr);

    axum::serve(listener, server::router(watcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("trigger server failed")?;

    scheduler.abort();
    info!("shut down");
    Ok(())
}

/// Periodic cycle loop. The first tick fires immediately and is skipped
/// because the startup cycle already ran.
async fn run_scheduler(watcher: Arc<AdWatcher>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if let Err(e) = watcher.run_cycle().await {
            error!("scheduled cycle failed: {e}");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        return;
    }
    info!("shutdown signal received");
}
