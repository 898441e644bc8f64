//! Error types for trellis-graph.

use thiserror::Error;

use crate::{EdgeId, NodeId};

/// Result type for graph validation.
pub type Result<T> = std::result::Result<T, InvalidGraph>;

/// A graph that violates the identity or reference invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraph {
    /// Two nodes share an id within the same graph.
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: NodeId },

    /// Two edges share an id within the same graph.
    #[error("duplicate edge id: {id}")]
    DuplicateEdgeId { id: EdgeId },

    /// An edge endpoint does not resolve to any node.
    #[error("edge {edge} references missing node {endpoint}")]
    DanglingEdge { edge: EdgeId, endpoint: NodeId },
}
