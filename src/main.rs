//! Confidence Closure Service — Binary Entrypoint
//! Boots the Axum HTTP server with the relaxation API and Prometheus metrics.

use anyhow::Context;
use confidence_closure::ComputeConfig;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact console logs. `RUST_LOG` wins over the built-in filter; a subscriber
/// already installed by the host runtime is left in place.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("confidence_closure=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = ComputeConfig::load_default().context("loading compute config")?;
    let router = confidence_closure::app_with(config)?;

    Ok(router.into())
}
