//! # Score Graph
//! Immutable, symmetric score matrix over a labeled vertex set.
//!
//! Only the upper triangle (`x < y`) is stored; the lower triangle is read by
//! symmetry and the diagonal is fixed at 100. Rows sit behind `Arc`, so every
//! "modifying" call returns a new graph that shares all untouched rows with
//! the previous one.
//!
//! Invariants:
//! - `score(x, x) == 100`
//! - `score(x, y) == score(y, x)`
//! - every stored score lies in `[0, 100]`; a pair never written reads as 0

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::trace;

use crate::edges::{edge_key, is_valid_label, parse_edge, EdgeScores};
use crate::errors::{GraphError, GraphResult};
use crate::labels::{alpha_name, alpha_names};
use crate::score::{clamp_score, to_unit, SCORE_MAX};

/// Row `x` holds the scores of pairs `(x, y)` for `y` in `x + 1..n`, at `y - x - 1`.
type Row = Arc<Vec<f64>>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGraph {
    names: Arc<Vec<String>>,
    rows: Vec<Row>,
}

impl ScoreGraph {
    /// Graph over the given labels with every pairwise score at 0.
    ///
    /// Labels must be unique, non-empty and must not contain the edge delimiter.
    pub fn create_empty<I, S>(vertex_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = vertex_names.into_iter().map(Into::into).collect();
        assert_valid_names(&names);
        let rows = empty_rows(names.len());
        Self {
            names: Arc::new(names),
            rows,
        }
    }

    /// Graph of `count` vertices labeled A, B, C, … with every score at 0.
    pub fn empty(count: usize) -> Self {
        Self::create_empty(alpha_names(count))
    }

    /// Build a graph from an edge-score mapping.
    ///
    /// The vertex set is the sorted set of every label that appears in a key.
    /// Scores go through the clamping writer; when two keys name the same pair
    /// (`"A-B"` and `"B-A"`), the one iterated last wins.
    pub fn from_edge_scores(edges: &EdgeScores) -> GraphResult<Self> {
        let mut parsed = Vec::with_capacity(edges.len());
        let mut labels = BTreeSet::new();
        for (key, &score) in edges {
            let (a, b) = parse_edge(key)?;
            labels.insert(a);
            labels.insert(b);
            parsed.push((a, b, score));
        }

        let index_by_name: BTreeMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();

        let mut graph = Self::create_empty(labels.iter().copied());
        for (a, b, score) in parsed {
            graph.set_score(index_by_name[a], index_by_name[b], score);
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Label of vertex `index`. Panics when `index` is out of range.
    pub fn vertex_name(&self, index: usize) -> &str {
        self.check_index(index);
        &self.names[index]
    }

    pub fn vertex_names(&self) -> &[String] {
        &self.names
    }

    /// Index of the vertex labeled `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Resize the vertex set.
    ///
    /// Shrinking drops the trailing vertices with their scores. Growing appends
    /// generated labels, continuing the letter sequence and skipping labels
    /// already in use; new pairs start at 0. Scores among kept vertices are
    /// preserved.
    pub fn with_vertex_count(&self, count: usize) -> Self {
        let old = self.vertex_count();
        if count == old {
            return self.clone();
        }

        let mut names: Vec<String> = self.names.iter().take(count).cloned().collect();
        let mut candidate = names.len();
        while names.len() < count {
            let label = alpha_name(candidate);
            candidate += 1;
            if !names.contains(&label) {
                names.push(label);
            }
        }

        let mut rows: Vec<Row> = Vec::with_capacity(count);
        for x in 0..count {
            let len = count - x - 1;
            let row = match self.rows.get(x) {
                Some(row) => {
                    let mut row = row.as_ref().clone();
                    row.resize(len, 0.0);
                    row
                }
                None => vec![0.0; len],
            };
            rows.push(Arc::new(row));
        }

        Self {
            names: Arc::new(names),
            rows,
        }
    }

    /// Relabel the vertices, keeping every score. The name count must match.
    pub fn with_vertex_names<I, S>(&self, vertex_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = vertex_names.into_iter().map(Into::into).collect();
        assert_eq!(
            names.len(),
            self.vertex_count(),
            "relabeling needs exactly one name per vertex"
        );
        assert_valid_names(&names);
        Self {
            names: Arc::new(names),
            rows: self.rows.clone(),
        }
    }

    /// Hundred-scale score of the pair `{x, y}`; 100 on the diagonal.
    pub fn score(&self, x: usize, y: usize) -> f64 {
        self.check_index(x);
        self.check_index(y);
        if x == y {
            return SCORE_MAX;
        }
        let (lo, hi) = ordered(x, y);
        self.rows[lo][hi - lo - 1]
    }

    /// Unit-scale score of the pair `{x, y}`.
    pub fn score_unit(&self, x: usize, y: usize) -> f64 {
        to_unit(self.score(x, y))
    }

    /// Whether the pair `{x, y}` can be written (everything but the diagonal).
    pub fn is_modifiable(x: usize, y: usize) -> bool {
        x != y
    }

    /// New graph with the pair `{x, y}` set to `score` clamped into `[0, 100]`.
    pub fn with_score(&self, x: usize, y: usize, score: f64) -> GraphResult<Self> {
        self.check_index(x);
        self.check_index(y);
        if !Self::is_modifiable(x, y) {
            return Err(GraphError::DiagonalNotModifiable { vertex: x });
        }
        let mut next = self.clone();
        next.set_score(x, y, score);
        Ok(next)
    }

    /// Same vertices, every off-diagonal score back to 0.
    pub fn with_reset_scores(&self) -> Self {
        Self {
            names: Arc::clone(&self.names),
            rows: empty_rows(self.vertex_count()),
        }
    }

    /// Mean hundred-scale score over all unordered pairs `x < y`.
    pub fn confidence_score(&self) -> GraphResult<f64> {
        let n = self.vertex_count();
        if n < 2 {
            return Err(GraphError::InsufficientVertices { count: n });
        }
        let sum: f64 = self.rows.iter().flat_map(|row| row.iter()).sum();
        let pairs = (n * (n - 1) / 2) as f64;
        Ok(sum / pairs)
    }

    /// Nonzero pairs keyed `"<lesser>-<greater>"` by label ordering.
    pub fn to_edge_scores(&self) -> EdgeScores {
        let mut out = EdgeScores::new();
        for (x, row) in self.rows.iter().enumerate() {
            for (offset, &score) in row.iter().enumerate() {
                if score != 0.0 {
                    let y = x + offset + 1;
                    out.insert(edge_key(&self.names[x], &self.names[y]), score);
                }
            }
        }
        out
    }

    /// In-place clamped write of an off-diagonal pair. Only the touched row is
    /// copied, and only if another graph still shares it.
    pub(crate) fn set_score(&mut self, x: usize, y: usize, score: f64) {
        debug_assert!(x != y, "diagonal is not stored");
        let (lo, hi) = ordered(x, y);
        let value = clamp_score(score);
        trace!(x = lo, y = hi, value, "score write");
        Arc::make_mut(&mut self.rows[lo])[hi - lo - 1] = value;
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.vertex_count(),
            "vertex index {index} out of range for {} vertices",
            self.vertex_count()
        );
    }
}

fn ordered(x: usize, y: usize) -> (usize, usize) {
    if x < y {
        (x, y)
    } else {
        (y, x)
    }
}

fn empty_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|x| Arc::new(vec![0.0; count - x - 1]))
        .collect()
}

fn assert_valid_names(names: &[String]) {
    let mut seen = BTreeSet::new();
    for name in names {
        assert!(is_valid_label(name), "invalid vertex label {name:?}");
        assert!(seen.insert(name.as_str()), "duplicate vertex label {name:?}");
    }
}
