//! Render-ready composite graph types.

use trellis_graph::{Edge, Graph, Node};

/// Stack order given to suggestion elements so the overlay floats above
/// every base element (which all sit at 0).
pub const SUGGESTION_STACK_ORDER: u32 = 10;

/// Where a composite element came from.
///
/// This is a semantic marker, not a style: renderers decide how
/// "provisional" looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Provenance {
    /// Canonical element of the base graph.
    Base,
    /// Provisional element of the suggestion overlay.
    Suggestion,
}

impl Provenance {
    /// Stacking layer for this provenance.
    pub const fn stack_order(self) -> u32 {
        match self {
            Provenance::Base => 0,
            Provenance::Suggestion => SUGGESTION_STACK_ORDER,
        }
    }

    /// True for elements that are provisional rather than canonical.
    pub const fn is_provisional(self) -> bool {
        matches!(self, Provenance::Suggestion)
    }
}

/// A node plus its provenance tag and stacking layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeNode {
    pub node: Node,
    pub provenance: Provenance,
    pub stack_order: u32,
}

/// An edge plus its provenance tag and stacking layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeEdge {
    pub edge: Edge,
    pub provenance: Provenance,
    pub stack_order: u32,
}

impl CompositeNode {
    fn tagged(node: Node, provenance: Provenance) -> Self {
        Self {
            node,
            provenance,
            stack_order: provenance.stack_order(),
        }
    }
}

impl CompositeEdge {
    fn tagged(edge: Edge, provenance: Provenance) -> Self {
        Self {
            edge,
            provenance,
            stack_order: provenance.stack_order(),
        }
    }
}

/// The merged, render-ready union of a base graph and an optional
/// suggestion overlay. Base elements come first, in delivery order,
/// followed by overlay elements in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeGraph {
    pub nodes: Vec<CompositeNode>,
    pub edges: Vec<CompositeEdge>,
}

impl CompositeGraph {
    /// Composite of a base graph alone; cannot fail.
    pub fn from_base(base: &Graph) -> Self {
        Self {
            nodes: base
                .nodes
                .iter()
                .cloned()
                .map(|node| CompositeNode::tagged(node, Provenance::Base))
                .collect(),
            edges: base
                .edges
                .iter()
                .cloned()
                .map(|edge| CompositeEdge::tagged(edge, Provenance::Base))
                .collect(),
        }
    }

    pub(crate) fn push_overlay(&mut self, overlay: &Graph) {
        self.nodes.extend(
            overlay
                .nodes
                .iter()
                .cloned()
                .map(|node| CompositeNode::tagged(node, Provenance::Suggestion)),
        );
        self.edges.extend(
            overlay
                .edges
                .iter()
                .cloned()
                .map(|edge| CompositeEdge::tagged(edge, Provenance::Suggestion)),
        );
    }

    /// Total node count across both provenances.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total edge count across both provenances.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when no nodes are present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes carrying the given provenance.
    pub fn nodes_with(&self, provenance: Provenance) -> impl Iterator<Item = &CompositeNode> {
        self.nodes.iter().filter(move |n| n.provenance == provenance)
    }

    /// Edges carrying the given provenance.
    pub fn edges_with(&self, provenance: Provenance) -> impl Iterator<Item = &CompositeEdge> {
        self.edges.iter().filter(move |e| e.provenance == provenance)
    }

    /// Project the union topology as a plain graph, for the layout
    /// engine. Provenance is dropped; positions are keyed by id, so the
    /// caller can re-associate them with either side.
    pub fn to_graph(&self) -> Graph {
        Graph {
            nodes: self.nodes.iter().map(|n| n.node.clone()).collect(),
            edges: self.edges.iter().map(|e| e.edge.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_graph::Node;

    #[test]
    fn provenance_stack_orders() {
        assert_eq!(Provenance::Base.stack_order(), 0);
        assert_eq!(Provenance::Suggestion.stack_order(), SUGGESTION_STACK_ORDER);
        assert!(Provenance::Suggestion.is_provisional());
        assert!(!Provenance::Base.is_provisional());
    }

    #[test]
    fn from_base_tags_everything_base() {
        let base = Graph::new()
            .with_node(Node::new("a", "", "step"))
            .with_node(Node::new("b", "", "step"));
        let composite = CompositeGraph::from_base(&base);

        assert_eq!(composite.node_count(), 2);
        assert!(composite
            .nodes
            .iter()
            .all(|n| n.provenance == Provenance::Base && n.stack_order == 0));
        assert_eq!(composite.nodes_with(Provenance::Suggestion).count(), 0);
    }

    #[test]
    fn to_graph_round_trips_base() {
        let base = Graph::new()
            .with_node(Node::new("a", "text", "step"))
            .with_node(Node::new("b", "", "conclusion"));
        let composite = CompositeGraph::from_base(&base);
        assert_eq!(composite.to_graph(), base);
    }
}
