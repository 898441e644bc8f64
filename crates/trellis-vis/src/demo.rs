//! Deterministic demo content for the server binary and tests.
//!
//! A small worked problem (solving a quadratic by factoring) plus a gap
//! suggestion anchored to its conclusion. Content carries inline TeX the
//! way real payloads do; the engine treats it as opaque text.

use trellis_graph::{Edge, Graph, Node};
use trellis_sync::{MapSession, SyncError};

/// Map id used by the demo session.
pub const DEMO_MAP_ID: &str = "demo";

/// The student's reasoning so far.
pub fn demo_base() -> Graph {
    Graph::new()
        .with_node(Node::new("n1", "Given: $x^2 - 5x + 6 = 0$", "premise"))
        .with_node(Node::new("n2", "Factor: $(x - 2)(x - 3) = 0$", "step"))
        .with_node(Node::new(
            "n3",
            "Zero product: $x - 2 = 0$ or $x - 3 = 0$",
            "step",
        ))
        .with_node(Node::new("n4", "Roots: $x = 2$, $x = 3$", "conclusion"))
        .with_edge(Edge::new("e1", "n1", "n2", "factor"))
        .with_edge(Edge::new("e2", "n2", "n3", "split"))
        .with_edge(Edge::new("e3", "n3", "n4", "solve"))
}

/// A provisional overlay pointing out the missing verification step,
/// anchored to the base conclusion.
pub fn demo_suggestion() -> (Graph, String) {
    let graph = Graph::new()
        .with_node(Node::new(
            "sugg-1",
            "Check: substitute the roots back into $x^2 - 5x + 6$",
            "step",
        ))
        .with_edge(Edge::new("sugg-e1", "n4", "sugg-1", "verify"));
    let summary =
        "The derivation is sound, but the roots are never verified. Substitute $x = 2$ and \
         $x = 3$ back into the original equation to close the argument."
            .to_string();
    (graph, summary)
}

/// A session with the demo base already delivered.
pub fn demo_session() -> Result<MapSession, SyncError> {
    let mut session = MapSession::new(DEMO_MAP_ID);
    session.receive_snapshot(demo_base())?;
    Ok(session)
}
