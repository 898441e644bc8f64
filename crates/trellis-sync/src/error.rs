//! Error types for trellis-sync.

use thiserror::Error;
use trellis_graph::InvalidGraph;
use trellis_overlay::ComposeError;

/// Result type for session transitions.
pub type Result<T> = std::result::Result<T, SyncError>;

/// A transition was rejected. The session keeps its prior state in every
/// case; none of these is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The delivered graph violates the model invariants.
    #[error("invalid graph: {0}")]
    Graph(#[from] InvalidGraph),

    /// The suggestion overlay could not be composed onto the base.
    #[error("composition rejected: {0}")]
    Compose(#[from] ComposeError),

    /// Opaque failure from a delivery collaborator, surfaced for
    /// user-facing reporting. Constructed by integrations wrapping a
    /// snapshot fetch or push subscription; the session itself never
    /// produces it.
    #[error("transport failure: {0}")]
    Transport(String),
}
