//! Property tests for the score model and the relaxation engine.

use proptest::prelude::*;

use confidence_closure::{ComputeState, ScoreGraph};

/// Random graph with `n` vertices; roughly a third of the pairs left at 0.
fn graph_strategy(max_n: usize) -> impl Strategy<Value = ScoreGraph> {
    (1..=max_n).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        prop::collection::vec(prop_oneof![Just(0.0_f64), 0.0_f64..=100.0], pairs).prop_map(
            move |scores| {
                let mut g = ScoreGraph::empty(n);
                let mut it = scores.into_iter();
                for x in 0..n {
                    for y in x + 1..n {
                        let v = it.next().unwrap_or(0.0);
                        g = g.with_score(x, y, v).unwrap();
                    }
                }
                g
            },
        )
    })
}

/// Best product of unit-scale scores over all simple paths from `from` to `to`.
fn best_path(g: &ScoreGraph, from: usize, to: usize) -> f64 {
    fn walk(g: &ScoreGraph, at: usize, to: usize, acc: f64, seen: &mut Vec<bool>) -> f64 {
        if at == to {
            return acc;
        }
        let mut best = 0.0_f64;
        for next in 0..g.vertex_count() {
            if seen[next] {
                continue;
            }
            let w = g.score_unit(at, next);
            if w == 0.0 {
                continue;
            }
            seen[next] = true;
            best = best.max(walk(g, next, to, acc * w, seen));
            seen[next] = false;
        }
        best
    }
    let mut seen = vec![false; g.vertex_count()];
    seen[from] = true;
    walk(g, from, to, 1.0, &mut seen)
}

proptest! {
    #[test]
    fn symmetric_with_full_diagonal(g in graph_strategy(7)) {
        let n = g.vertex_count();
        for x in 0..n {
            prop_assert_eq!(g.score(x, x), 100.0);
            for y in 0..n {
                prop_assert_eq!(g.score(x, y), g.score(y, x));
            }
        }
    }

    #[test]
    fn writes_are_clamped(v in -500.0_f64..500.0, x in 0_usize..5, y in 0_usize..5) {
        let g = ScoreGraph::empty(5);
        if x == y {
            prop_assert!(g.with_score(x, y, v).is_err());
        } else {
            let w = g.with_score(x, y, v).unwrap();
            prop_assert_eq!(w.score(x, y), v.clamp(0.0, 100.0));
            prop_assert_eq!(w.score(y, x), v.clamp(0.0, 100.0));
        }
    }

    #[test]
    fn edge_scores_round_trip(g in graph_strategy(7)) {
        let out = g.to_edge_scores();
        prop_assert!(out.values().all(|&v| v != 0.0));
        let rebuilt = ScoreGraph::from_edge_scores(&out).unwrap();
        prop_assert_eq!(rebuilt.to_edge_scores(), out);
    }

    #[test]
    fn scores_never_decrease(g in graph_strategy(6)) {
        let done = ComputeState::initial(g).run_to_completion();
        let n = done.initial_snapshot().vertex_count();
        for pair in done.iterations().windows(2) {
            for x in 0..n {
                for y in 0..n {
                    prop_assert!(pair[1].score(x, y) >= pair[0].score(x, y));
                }
            }
        }
    }

    #[test]
    fn terminates_after_vertex_count_steps(g in graph_strategy(8)) {
        let n = g.vertex_count();
        let mut state = ComputeState::initial(g);
        let mut steps = 0;
        while state.needs_another_step() {
            state = state.advance();
            steps += 1;
        }
        prop_assert_eq!(steps, n);
        prop_assert_eq!(state.rounds_completed(), n);
    }

    #[test]
    fn closure_matches_brute_force(g in graph_strategy(6)) {
        let done = ComputeState::initial(g.clone()).run_to_completion();
        let last = done.latest();
        let n = g.vertex_count();
        for x in 0..n {
            for y in 0..n {
                if x == y {
                    continue;
                }
                let expected = best_path(&g, x, y) * 100.0;
                prop_assert!(
                    (last.score(x, y) - expected).abs() < 1e-6,
                    "pair ({}, {}): got {}, expected {}", x, y, last.score(x, y), expected
                );
            }
        }
    }

    #[test]
    fn relaxation_is_deterministic(g in graph_strategy(6)) {
        let a = ComputeState::initial(g.clone()).run_to_completion();
        let b = ComputeState::initial(g).run_to_completion();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn stepping_equals_running(g in graph_strategy(6)) {
        let mut stepped = ComputeState::initial(g.clone());
        while stepped.needs_another_step() {
            stepped = stepped.advance();
        }
        prop_assert_eq!(stepped, ComputeState::initial(g).run_to_completion());
    }
}
