use thiserror::Error;

/// Recoverable failures of the score model.
///
/// Contract breaches (index out of range, stepping a finished computation)
/// panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid edge `{edge}`: it must be of form <Node1>-<Node2>")]
    InvalidEdgeFormat { edge: String },

    #[error("edge `{edge}` uses twice the same node")]
    SelfEdgeNotAllowed { edge: String },

    #[error("score of vertex {vertex} with itself is not modifiable")]
    DiagonalNotModifiable { vertex: usize },

    #[error("confidence score needs at least 2 vertices, got {count}")]
    InsufficientVertices { count: usize },
}

impl GraphError {
    /// Stable snake_case identifier, used in HTTP error bodies and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            GraphError::InvalidEdgeFormat { .. } => "invalid_edge_format",
            GraphError::SelfEdgeNotAllowed { .. } => "self_edge_not_allowed",
            GraphError::DiagonalNotModifiable { .. } => "diagonal_not_modifiable",
            GraphError::InsufficientVertices { .. } => "insufficient_vertices",
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
