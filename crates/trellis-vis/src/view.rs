//! Render-ready view assembly.
//!
//! Flattens a session's composite graph, position map and layout
//! geometry into the single JSON payload a renderer consumes. The view
//! is a snapshot: it borrows nothing from the session and can be shipped
//! over any channel.

use serde::{Deserialize, Serialize};
use trellis_graph::{EdgeId, NodeId};
use trellis_overlay::Provenance;
use trellis_sync::{MapId, MapSession, SessionState};

/// One positioned node, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub content: String,
    pub kind: String,
    pub provenance: Provenance,
    pub stack_order: u32,
    pub provisional: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One edge, ready to draw between node boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    pub provenance: Provenance,
    pub stack_order: u32,
    pub provisional: bool,
}

/// The complete render-ready state of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub map_id: MapId,
    pub state: SessionState,
    pub suggestion_summary: Option<String>,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderView {
    /// Project the session's current composite and positions.
    pub fn from_session(session: &MapSession) -> Self {
        let config = session.layout_config();
        let positions = session.positions();

        let nodes = session
            .composite()
            .nodes
            .iter()
            .map(|composite| {
                let position = positions
                    .get(&composite.node.id)
                    .copied()
                    .unwrap_or_default();
                RenderNode {
                    id: composite.node.id.clone(),
                    content: composite.node.content.clone(),
                    kind: composite.node.kind.clone(),
                    provenance: composite.provenance,
                    stack_order: composite.stack_order,
                    provisional: composite.provenance.is_provisional(),
                    x: position.x,
                    y: position.y,
                    width: config.node_width,
                    height: config.node_height,
                }
            })
            .collect();

        let edges = session
            .composite()
            .edges
            .iter()
            .map(|composite| RenderEdge {
                id: composite.edge.id.clone(),
                source: composite.edge.source.clone(),
                target: composite.edge.target.clone(),
                label: composite.edge.label.clone(),
                provenance: composite.provenance,
                stack_order: composite.stack_order,
                provisional: composite.provenance.is_provisional(),
            })
            .collect();

        Self {
            map_id: session.map_id().clone(),
            state: session.state(),
            suggestion_summary: session.summary().map(str::to_string),
            nodes,
            edges,
        }
    }
}
