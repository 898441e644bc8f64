//! Graph data types: ids, nodes, edges, and whole-graph snapshots.

use std::fmt;

/// Identifier of a node, unique within one graph generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub String);

/// Identifier of an edge, unique within one graph generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EdgeId(pub String);

impl NodeId {
    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EdgeId {
    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single reasoning step in the mind map.
///
/// `content` is opaque text and may contain markup; the engine never
/// interprets it. `kind` is an open tag (`"premise"`, `"step"`,
/// `"conclusion"`, ...) that renderers map to visual treatments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub content: String,
    pub kind: String,
}

impl Node {
    /// Create a node.
    pub fn new(id: impl Into<NodeId>, content: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind: kind.into(),
        }
    }
}

/// A directed, labeled edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
}

impl Edge {
    /// Create an edge from `source` to `target`.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

/// A complete directed graph snapshot.
///
/// Node and edge order is preserved as delivered; the layout engine uses
/// it as the deterministic tie-break, so two deliveries of the same
/// payload lay out identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, builder style.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append an edge, builder style.
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes (and therefore no valid edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// True when a node with this id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Iterate node ids in delivery order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|node| &node.id)
    }

    /// True when both graphs have the same node-id set and edge-id set.
    ///
    /// Content and labels are ignored: equal topology means a relayout
    /// would reproduce the same positions, so callers may keep them.
    pub fn same_topology(&self, other: &Graph) -> bool {
        fn sorted<T: Ord>(items: impl Iterator<Item = T>) -> Vec<T> {
            let mut v: Vec<T> = items.collect();
            v.sort();
            v
        }

        sorted(self.nodes.iter().map(|n| &n.id)) == sorted(other.nodes.iter().map(|n| &n.id))
            && sorted(self.edges.iter().map(|e| &e.id))
                == sorted(other.edges.iter().map(|e| &e.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_lookup() {
        let graph = Graph::new()
            .with_node(Node::new("a", "first", "step"))
            .with_node(Node::new("b", "second", "step"));

        assert_eq!(graph.node(&"a".into()).map(|n| n.content.as_str()), Some("first"));
        assert!(graph.node(&"missing".into()).is_none());
    }

    #[test]
    fn ids_display_as_their_string() {
        assert_eq!(NodeId::from("n1").to_string(), "n1");
        assert_eq!(EdgeId::from("e1").to_string(), "e1");
    }

    #[test]
    fn same_topology_ignores_content() {
        let a = Graph::new()
            .with_node(Node::new("x", "old text", "step"))
            .with_node(Node::new("y", "", "step"))
            .with_edge(Edge::new("e", "x", "y", ""));
        let b = Graph::new()
            .with_node(Node::new("y", "", "conclusion"))
            .with_node(Node::new("x", "new text", "step"))
            .with_edge(Edge::new("e", "x", "y", "relabeled"));

        assert!(a.same_topology(&b));
    }

    #[test]
    fn same_topology_detects_changes() {
        let a = Graph::new().with_node(Node::new("x", "", "step"));
        let b = Graph::new().with_node(Node::new("y", "", "step"));
        let c = a.clone().with_edge(Edge::new("e", "x", "x", ""));

        assert!(!a.same_topology(&b));
        assert!(!a.same_topology(&c));
    }
}
