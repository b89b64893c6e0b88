use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const COMPUTATIONS_TOTAL: &str = "closure_computations_total";
pub const ROUNDS_TOTAL: &str = "closure_relaxation_rounds_total";
pub const REJECTED_TOTAL: &str = "closure_rejected_requests_total";
pub const COMPUTE_DURATION_MS: &str = "closure_compute_duration_ms";
pub const MAX_VERTICES: &str = "closure_max_vertices";

// A process can hold a single global recorder; tests build many routers.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and publish the vertex bound.
    pub fn init(max_vertices: usize) -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")
            })?
            .clone();

        gauge!(MAX_VERTICES).set(max_vertices as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Record one finished computation.
pub fn record_computation(rounds: usize, duration_ms: f64) {
    counter!(COMPUTATIONS_TOTAL).increment(1);
    counter!(ROUNDS_TOTAL).increment(rounds as u64);
    histogram!(COMPUTE_DURATION_MS).record(duration_ms);
}

/// Record a request turned away before computing, labeled by reason.
pub fn record_rejection(reason: &'static str) {
    counter!(REJECTED_TOTAL, "reason" => reason).increment(1);
}
