//! The compose operation: base + optional overlay → composite.

use std::collections::HashSet;

use trellis_graph::Graph;

use crate::{ComposeError, CompositeGraph};

/// Compose a base graph with an optional suggestion overlay.
///
/// Neither input is mutated; the composite is freshly built on every
/// call. With no overlay the result is the base graph with every element
/// tagged `Base`. With an overlay, every overlay id must be absent from
/// the base and every overlay edge must resolve within the union,
/// otherwise the whole overlay is rejected and the caller keeps whatever
/// composite it had before.
pub fn compose(base: &Graph, suggestion: Option<&Graph>) -> Result<CompositeGraph, ComposeError> {
    let mut composite = CompositeGraph::from_base(base);

    let Some(overlay) = suggestion else {
        return Ok(composite);
    };

    let base_nodes: HashSet<_> = base.nodes.iter().map(|n| &n.id).collect();
    let base_edges: HashSet<_> = base.edges.iter().map(|e| &e.id).collect();
    let overlay_nodes: HashSet<_> = overlay.nodes.iter().map(|n| &n.id).collect();

    for node in &overlay.nodes {
        if base_nodes.contains(&node.id) {
            return Err(ComposeError::IdentifierCollision {
                id: node.id.to_string(),
            });
        }
    }
    for edge in &overlay.edges {
        if base_edges.contains(&edge.id) {
            return Err(ComposeError::IdentifierCollision {
                id: edge.id.to_string(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !base_nodes.contains(endpoint) && !overlay_nodes.contains(endpoint) {
                return Err(ComposeError::DanglingOverlayEdge {
                    edge: edge.id.clone(),
                    endpoint: endpoint.clone(),
                });
            }
        }
    }

    composite.push_overlay(overlay);
    Ok(composite)
}
