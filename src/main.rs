//! Disaster Watch - aggregated natural-disaster events from public feeds.
//!
//! # API Endpoints
//!
//! - `GET /events` - Merged, de-duplicated events, newest first
//! - `GET /events/statistics` - Per-type counts
//! - `GET /health` - Health check

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use disaster_watch::aggregation::Aggregator;
use disaster_watch::api::{AppState, router};
use disaster_watch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("disaster_watch=info".parse()?))
        .init();

    let config = Config::from_env();

    info!(
        port = config.port,
        gdacs_url = ?config.aggregator.gdacs_url,
        eonet_url = ?config.aggregator.eonet_url,
        usgs_url = ?config.aggregator.usgs_url,
        timeout = ?config.aggregator.request_timeout,
        "Starting Disaster Watch"
    );

    let state = AppState {
        aggregator: Aggregator::with_config(&config.aggregator),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Disaster Watch is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
