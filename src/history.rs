//! history.rs — bounded in-memory log of finished computations, for diagnostics.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compute::ComputeState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub ts: DateTime<Utc>,
    pub vertex_count: usize,
    pub rounds: usize,
    pub initial_confidence: Option<f64>,
    pub final_confidence: Option<f64>,
    /// Number of pairs with a nonzero score after the last round.
    pub connected_pairs: usize,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, state: &ComputeState) {
        self.push_at(state, Utc::now());
    }

    pub fn push_at(&self, state: &ComputeState, ts: DateTime<Utc>) {
        let entry = HistoryEntry {
            ts,
            vertex_count: state.initial_snapshot().vertex_count(),
            rounds: state.rounds_completed(),
            initial_confidence: state.initial_snapshot().confidence_score().ok(),
            final_confidence: state.latest().confidence_score().ok(),
            connected_pairs: state.latest().to_edge_scores().len(),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("history mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ScoreGraph;

    fn finished(n: usize) -> ComputeState {
        let g = ScoreGraph::empty(n).with_score(0, 1, 50.0).unwrap();
        ComputeState::initial(g).run_to_completion()
    }

    #[test]
    fn records_summary_of_computation() {
        let h = History::with_capacity(10);
        h.push(&finished(3));
        let rows = h.snapshot_last_n(5);
        assert_eq!(rows.len(), 1);
        let e = &rows[0];
        assert_eq!(e.vertex_count, 3);
        assert_eq!(e.rounds, 3);
        assert!((e.initial_confidence.unwrap() - 50.0 / 3.0).abs() < 1e-9);
        assert_eq!(e.connected_pairs, 1);
    }

    #[test]
    fn drops_oldest_beyond_capacity() {
        let h = History::with_capacity(2);
        for n in 2..6 {
            h.push(&finished(n));
        }
        assert_eq!(h.len(), 2);
        let rows = h.snapshot_last_n(10);
        assert_eq!(rows[0].vertex_count, 4);
        assert_eq!(rows[1].vertex_count, 5);
    }

    #[test]
    fn single_vertex_has_no_confidence() {
        let h = History::with_capacity(2);
        h.push(&ComputeState::initial(ScoreGraph::empty(1)).run_to_completion());
        assert!(h.snapshot_last_n(1)[0].final_confidence.is_none());
    }
}
