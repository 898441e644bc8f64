//! Whole-graph invariant checks.
//!
//! A rejected graph is rejected wholesale: callers keep their prior state
//! and never see a partially-applied snapshot.

use std::collections::HashSet;

use crate::{Graph, InvalidGraph, NodeId};

impl Graph {
    /// Check the self-contained graph invariants.
    ///
    /// Fails on the first duplicate node id, duplicate edge id, or edge
    /// endpoint that does not resolve within this graph.
    pub fn validate(&self) -> Result<(), InvalidGraph> {
        let node_ids = self.unique_node_ids()?;
        self.check_edges(|id| node_ids.contains(id))
    }

    /// Check the invariants for an overlay graph on top of `base_ids`.
    ///
    /// Ids must still be unique within the overlay, but edge endpoints may
    /// resolve either to overlay nodes or to base nodes. Base graphs are
    /// never validated against an overlay, so the dependency stays
    /// one-directional: an overlay may point into the base, the base can
    /// never point into an overlay.
    pub fn validate_overlay(&self, base_ids: &HashSet<NodeId>) -> Result<(), InvalidGraph> {
        let node_ids = self.unique_node_ids()?;
        self.check_edges(|id| node_ids.contains(id) || base_ids.contains(id))
    }

    fn unique_node_ids(&self) -> Result<HashSet<&NodeId>, InvalidGraph> {
        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(&node.id) {
                return Err(InvalidGraph::DuplicateNodeId { id: node.id.clone() });
            }
        }
        Ok(node_ids)
    }

    fn check_edges(&self, resolves: impl Fn(&NodeId) -> bool) -> Result<(), InvalidGraph> {
        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(&edge.id) {
                return Err(InvalidGraph::DuplicateEdgeId { id: edge.id.clone() });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !resolves(endpoint) {
                    return Err(InvalidGraph::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
