//! report.rs — serializable views of snapshots and whole computations.
//!
//! These are the shapes the HTTP driver returns and the demo binary prints.
//! Confidence is `None` when a snapshot has fewer than two vertices.

use serde::{Deserialize, Serialize};

use crate::compute::ComputeState;
use crate::edges::EdgeScores;
use crate::graph::ScoreGraph;

/// One snapshot as seen by a display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub vertices: Vec<String>,
    /// Mean pairwise score (hundred-scale).
    pub confidence: Option<f64>,
    pub edges: EdgeScores,
}

/// A snapshot inside a computation, with the pivot that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub index: usize,
    /// Label of the pivot vertex; absent for the input snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<String>,
    pub confidence: Option<f64>,
    pub edges: EdgeScores,
}

/// A finished (or partial) computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeReport {
    pub vertices: Vec<String>,
    pub rounds: usize,
    pub complete: bool,
    pub iterations: Vec<IterationReport>,
    #[serde(rename = "final")]
    pub final_snapshot: SnapshotReport,
}

impl SnapshotReport {
    pub fn of(graph: &ScoreGraph) -> Self {
        Self {
            vertices: graph.vertex_names().to_vec(),
            confidence: graph.confidence_score().ok(),
            edges: graph.to_edge_scores(),
        }
    }
}

impl IterationReport {
    pub fn of(state: &ComputeState, index: usize) -> Self {
        let graph = &state.iterations()[index];
        let pivot = ComputeState::pivot_of(index).map(|k| graph.vertex_name(k).to_string());
        Self {
            index,
            pivot,
            confidence: graph.confidence_score().ok(),
            edges: graph.to_edge_scores(),
        }
    }
}

impl ComputeReport {
    pub fn of(state: &ComputeState) -> Self {
        let iterations = (0..state.iterations().len())
            .map(|i| IterationReport::of(state, i))
            .collect();
        Self {
            vertices: state.initial_snapshot().vertex_names().to_vec(),
            rounds: state.rounds_completed(),
            complete: !state.needs_another_step(),
            iterations,
            final_snapshot: SnapshotReport::of(state.latest()),
        }
    }
}
