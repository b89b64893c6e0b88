use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::compute::ComputeState;
use crate::config::ComputeConfig;
use crate::edges::EdgeScores;
use crate::errors::GraphError;
use crate::graph::ScoreGraph;
use crate::history::{History, HistoryEntry};
use crate::metrics;
use crate::report::{ComputeReport, SnapshotReport};

#[derive(Clone)]
pub struct AppState {
    config: Arc<ComputeConfig>,
    history: Arc<History>,
}

impl AppState {
    pub fn new(config: ComputeConfig) -> Self {
        let history = History::with_capacity(config.history_capacity);
        Self {
            config: Arc::new(config),
            history: Arc::new(history),
        }
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/graph/empty", get(empty_graph))
        .route("/confidence", post(confidence))
        .route("/compute", post(compute))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Request failures reported with a JSON body; `400` unless the worker died.
#[derive(Debug)]
pub enum ApiError {
    Graph(GraphError),
    TooManyVertices { count: usize, max: usize },
    ComputeAborted(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Graph(e) => e.kind(),
            ApiError::TooManyVertices { .. } => "too_many_vertices",
            ApiError::ComputeAborted(_) => "compute_aborted",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::ComputeAborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(e: GraphError) -> Self {
        ApiError::Graph(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Graph(e) => e.to_string(),
            ApiError::TooManyVertices { count, max } => {
                format!("graph has {count} vertices, at most {max} are accepted")
            }
            ApiError::ComputeAborted(reason) => format!("computation aborted: {reason}"),
        };
        warn!(kind = self.kind(), %message, "request rejected");
        metrics::record_rejection(self.kind());
        let body = json!({ "error": self.kind(), "message": message });
        (self.status(), Json(body)).into_response()
    }
}

#[derive(serde::Deserialize)]
struct EmptyQuery {
    vertices: Option<usize>,
}

#[derive(serde::Deserialize)]
struct EdgesReq {
    edges: EdgeScores,
}

#[derive(serde::Serialize)]
struct ConfidenceResp {
    vertex_count: usize,
    confidence: Option<f64>,
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

fn check_bound(count: usize, config: &ComputeConfig) -> Result<(), ApiError> {
    if count > config.max_vertices {
        return Err(ApiError::TooManyVertices {
            count,
            max: config.max_vertices,
        });
    }
    Ok(())
}

fn parse_graph(edges: &EdgeScores, config: &ComputeConfig) -> Result<ScoreGraph, ApiError> {
    let graph = ScoreGraph::from_edge_scores(edges)?;
    check_bound(graph.vertex_count(), config)?;
    Ok(graph)
}

async fn empty_graph(
    State(state): State<AppState>,
    Query(q): Query<EmptyQuery>,
) -> Result<Json<SnapshotReport>, ApiError> {
    let n = q.vertices.unwrap_or(state.config.default_vertex_count);
    check_bound(n, &state.config)?;
    Ok(Json(SnapshotReport::of(&ScoreGraph::empty(n))))
}

async fn confidence(
    State(state): State<AppState>,
    Json(body): Json<EdgesReq>,
) -> Result<Json<ConfidenceResp>, ApiError> {
    let graph = parse_graph(&body.edges, &state.config)?;
    Ok(Json(ConfidenceResp {
        vertex_count: graph.vertex_count(),
        confidence: graph.confidence_score().ok(),
    }))
}

async fn compute(
    State(state): State<AppState>,
    Json(body): Json<EdgesReq>,
) -> Result<Json<ComputeReport>, ApiError> {
    let graph = parse_graph(&body.edges, &state.config)?;
    let n = graph.vertex_count();

    // O(n³) relaxation; keep it off the async workers.
    let started = Instant::now();
    let done = tokio::task::spawn_blocking(move || ComputeState::initial(graph).run_to_completion())
        .await
        .map_err(|e| ApiError::ComputeAborted(e.to_string()))?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    metrics::record_computation(done.rounds_completed(), elapsed_ms);
    state.history.push(&done);

    let report = ComputeReport::of(&done);
    info!(
        vertices = n,
        rounds = report.rounds,
        confidence = ?report.final_snapshot.confidence,
        elapsed_ms,
        "closure computed"
    );
    Ok(Json(report))
}

async fn debug_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(q.limit.unwrap_or(10)))
}
