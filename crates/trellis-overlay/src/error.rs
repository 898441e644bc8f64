//! Error types for trellis-overlay.

use thiserror::Error;
use trellis_graph::{EdgeId, NodeId};

/// Result type for composition.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Composition rejected the overlay; the base graph is never at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// An overlay id exactly matches a base id. The overlay is rejected
    /// wholesale rather than overwriting canonical state.
    #[error("suggestion id collides with base id: {id}")]
    IdentifierCollision { id: String },

    /// An overlay edge endpoint resolves neither in the overlay nor in
    /// the base.
    #[error("suggestion edge {edge} references unknown node {endpoint}")]
    DanglingOverlayEdge { edge: EdgeId, endpoint: NodeId },
}
