//! Demo that steps the relaxation one round at a time, paced by `step_delay_ms`.
//!
//! Usage: `relax_demo [edges.json]` — without a file the seven-vertex demo graph is used.

use anyhow::Context;
use confidence_closure::score::round2;
use confidence_closure::{demo_edges, ComputeConfig, ComputeState, EdgeScores, ScoreGraph};

fn load_edges(path: Option<String>) -> anyhow::Result<EdgeScores> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(&p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing edge scores in {p}"))
        }
        None => Ok(demo_edges()),
    }
}

fn describe(confidence: Option<f64>) -> String {
    confidence
        .map(|c| format!("{:.2}", round2(c)))
        .unwrap_or_else(|| "n/a".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let config = ComputeConfig::load_default()?;
    let edges = load_edges(std::env::args().nth(1))?;
    let graph = ScoreGraph::from_edge_scores(&edges)?;

    let mut state = ComputeState::initial(graph);
    println!(
        "iteration 0 (input state): confidence {}",
        describe(state.latest().confidence_score().ok())
    );

    while state.needs_another_step() {
        tokio::time::sleep(std::time::Duration::from_millis(config.step_delay_ms)).await;
        state = state.advance();
        let k = state.rounds_completed();
        let pivot = ComputeState::pivot_of(k)
            .map(|p| state.latest().vertex_name(p).to_string())
            .unwrap_or_default();
        println!(
            "iteration {k} (paths through {pivot}): confidence {}",
            describe(state.latest().confidence_score().ok())
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&state.latest().to_edge_scores())?
    );
    Ok(())
}
