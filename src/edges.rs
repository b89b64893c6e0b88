//! # Edge-score exchange format
//!
//! A mapping `"<Label1>-<Label2>" → score` (hundred-scale), with `Label1 < Label2`
//! on output. Used to build a model from user input and to serialize one back.
//!
//! - Keys split on a single `-`; anything else is rejected.
//! - Both halves must be non-empty and different.
//! - Halves are returned ordered, so `"B-A"` and `"A-B"` name the same pair.

use std::collections::BTreeMap;

use crate::errors::{GraphError, GraphResult};

/// Separator between the two vertex labels of an edge key.
pub const EDGE_DELIMITER: char = '-';

/// Edge key → hundred-scale score. Ordered so serialized output is stable.
pub type EdgeScores = BTreeMap<String, f64>;

/// Split an edge key into its two labels, lesser label first.
pub fn parse_edge(edge: &str) -> GraphResult<(&str, &str)> {
    let mut parts = edge.split(EDGE_DELIMITER);
    let (a, b) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => (a, b),
        _ => {
            return Err(GraphError::InvalidEdgeFormat {
                edge: edge.to_string(),
            })
        }
    };
    if a == b {
        return Err(GraphError::SelfEdgeNotAllowed {
            edge: edge.to_string(),
        });
    }
    Ok(if a < b { (a, b) } else { (b, a) })
}

/// Canonical key for a pair of labels (lesser label first).
pub fn edge_key(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}{EDGE_DELIMITER}{hi}")
}

/// True when `label` can appear in an edge key.
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && !label.contains(EDGE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_labels() {
        assert_eq!(parse_edge("A-B").unwrap(), ("A", "B"));
        assert_eq!(parse_edge("C-A").unwrap(), ("A", "C"));
        assert_eq!(parse_edge("alice-bob").unwrap(), ("alice", "bob"));
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in ["AB", "A-B-C", "-B", "A-", "", "-"] {
            assert!(
                matches!(parse_edge(bad), Err(GraphError::InvalidEdgeFormat { .. })),
                "expected InvalidEdgeFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_self_edges() {
        assert_eq!(
            parse_edge("A-A"),
            Err(GraphError::SelfEdgeNotAllowed {
                edge: "A-A".to_string()
            })
        );
    }

    #[test]
    fn key_orders_labels() {
        assert_eq!(edge_key("B", "A"), "A-B");
        assert_eq!(edge_key("A", "B"), "A-B");
    }

    #[test]
    fn label_validity() {
        assert!(is_valid_label("A"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("A-B"));
    }
}
