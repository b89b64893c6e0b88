//! # Relaxation Engine
//! Pure, testable logic that grows a sequence of `ScoreGraph` snapshots, one
//! relaxation round at a time. No I/O and no sleeping; drivers decide the pace.
//!
//! Round `k` (0-based) uses vertex `k` as pivot: every pair `(i, j)` whose
//! score is beaten by the two-hop detour `i → k → j` (product of unit-scale
//! scores) is revised upward. After one round per vertex the last snapshot
//! holds, for every pair, the best product over any path of the input graph.

use tracing::debug;

use crate::graph::ScoreGraph;
use crate::score::to_hundred;

/// Append-only sequence of snapshots; index 0 is the input graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeState {
    iterations: Vec<ScoreGraph>,
}

impl ComputeState {
    pub fn initial(graph: ScoreGraph) -> Self {
        Self {
            iterations: vec![graph],
        }
    }

    /// True until every vertex has served as pivot once.
    pub fn needs_another_step(&self) -> bool {
        self.iterations.len() <= self.initial_snapshot().vertex_count()
    }

    /// Run the next round and return the extended sequence.
    ///
    /// Panics when no step is needed.
    pub fn advance(&self) -> Self {
        assert!(
            self.needs_another_step(),
            "advance called on a finished computation ({} rounds done)",
            self.rounds_completed()
        );
        let pivot = self.iterations.len() - 1;
        let next = relax(self.latest(), pivot);
        let mut iterations = self.iterations.clone();
        iterations.push(next);
        Self { iterations }
    }

    /// Drive every remaining round.
    pub fn run_to_completion(self) -> Self {
        let mut state = self;
        while state.needs_another_step() {
            let pivot = state.iterations.len() - 1;
            let next = relax(state.latest(), pivot);
            state.iterations.push(next);
        }
        state
    }

    pub fn iterations(&self) -> &[ScoreGraph] {
        &self.iterations
    }

    pub fn initial_snapshot(&self) -> &ScoreGraph {
        &self.iterations[0]
    }

    pub fn latest(&self) -> &ScoreGraph {
        // Never empty: built from one snapshot and only ever appended to.
        &self.iterations[self.iterations.len() - 1]
    }

    pub fn rounds_completed(&self) -> usize {
        self.iterations.len() - 1
    }

    /// Pivot vertex that produced `iteration`; `None` for the input snapshot.
    pub fn pivot_of(iteration: usize) -> Option<usize> {
        iteration.checked_sub(1)
    }
}

/// Full closure of `graph` in one call.
pub fn closure(graph: ScoreGraph) -> ScoreGraph {
    let done = ComputeState::initial(graph).run_to_completion();
    done.latest().clone()
}

/// One round with `pivot` as intermediate vertex.
///
/// Pairs are visited in increasing `(i, j)` order and reads see the writes
/// made earlier in the same round.
pub fn relax(graph: &ScoreGraph, pivot: usize) -> ScoreGraph {
    let (next, revised) = relax_counting(graph, pivot);
    debug!(
        pivot,
        pivot_name = graph.vertex_name(pivot),
        revised,
        "relaxation round done"
    );
    next
}

/// Round body; also returns how many stored pair scores actually changed.
fn relax_counting(graph: &ScoreGraph, pivot: usize) -> (ScoreGraph, usize) {
    let n = graph.vertex_count();
    let mut next = graph.clone();
    let mut revised = 0usize;

    for i in 0..n {
        for j in 0..n {
            let ij = next.score_unit(i, j);
            let ik = next.score_unit(i, pivot);
            let kj = next.score_unit(pivot, j);
            let candidate = ik * kj;
            if ij < candidate {
                let old = next.score(i, j);
                // Rounding in the scale conversion must not undercut the old score.
                let value = to_hundred(candidate).max(old);
                if value > old {
                    next.set_score(i, j, value);
                    revised += 1;
                }
            }
        }
    }

    (next, revised)
}
