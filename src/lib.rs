// src/lib.rs
// Public library surface: score model, relaxation engine, and the HTTP driver.

pub mod api;
pub mod compute;
pub mod config;
pub mod edges;
pub mod errors;
pub mod graph;
pub mod history;
pub mod labels;
pub mod metrics;
pub mod report;
pub mod score;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::compute::{closure, ComputeState};
pub use crate::config::ComputeConfig;
pub use crate::edges::EdgeScores;
pub use crate::errors::{GraphError, GraphResult};
pub use crate::graph::ScoreGraph;

use axum::Router;
use tracing::info;

/// Edges of the seven-vertex graph shown when a driver has no input of its own.
pub fn demo_edges() -> EdgeScores {
    [
        ("A-B", 90.0),
        ("A-C", 90.0),
        ("A-D", 80.0),
        ("A-E", 30.0),
        ("B-C", 90.0),
        ("B-D", 70.0),
        ("C-D", 80.0),
        ("E-F", 95.0),
        ("E-G", 85.0),
        ("F-G", 75.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Build the full application router (API + `/metrics`) from `config`.
pub fn app_with(config: ComputeConfig) -> anyhow::Result<Router> {
    let metrics = crate::metrics::Metrics::init(config.max_vertices)?;
    let state = api::AppState::new(config);
    info!(max_vertices = state.config().max_vertices, "router ready");
    Ok(api::router(state).merge(metrics.router()))
}

/// Same as [`app_with`], resolving configuration from files and environment.
pub async fn app() -> anyhow::Result<Router> {
    let config = ComputeConfig::load_default()?;
    app_with(config)
}
