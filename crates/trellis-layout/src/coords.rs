//! Coordinate assignment: ranks to x, lanes to y, components stacked.

use std::collections::HashMap;

use trellis_graph::{Graph, NodeId};

use crate::{assign_ranks, order_ranks};

/// Geometry knobs for the layout.
///
/// Every node occupies the same logical box; spacing is chosen so boxes
/// never overlap and edges have room to route between ranks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Logical width of a node box.
    pub node_width: f64,
    /// Logical height of a node box.
    pub node_height: f64,
    /// Horizontal gap between consecutive ranks.
    pub rank_gap: f64,
    /// Vertical gap between lanes within a rank.
    pub lane_gap: f64,
    /// Vertical gap between stacked disconnected components.
    pub component_gap: f64,
    /// Crossing-reduction sweeps; see `order_ranks`.
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 350.0,
            node_height: 150.0,
            rank_gap: 120.0,
            lane_gap: 60.0,
            component_gap: 80.0,
            ordering_passes: 4,
        }
    }
}

/// Position of a node's box, as its top-left corner.
///
/// Centers are used internally; emitting the corner means a renderer can
/// attach edges to box borders without re-deriving the box from its
/// center, mirroring what the reference renderer expects.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPosition {
    pub x: f64,
    pub y: f64,
}

/// Compute one position per node of `graph`.
///
/// Pure and deterministic: no state survives between calls and identical
/// input (including delivery order) yields identical output. An empty
/// graph yields an empty mapping. The caller is expected to pass a
/// validated graph; edges that do not resolve are ignored rather than
/// laid out.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> HashMap<NodeId, LayoutPosition> {
    let n = graph.nodes.len();
    if n == 0 {
        return HashMap::new();
    }

    let ranking = assign_ranks(graph);
    let orders = order_ranks(graph, &ranking, config.ordering_passes);

    // Lane per node, counted per (component, rank) in final rank order.
    let mut lane = vec![0usize; n];
    let mut lanes_used: HashMap<(usize, u32), usize> = HashMap::new();
    for row in &orders {
        for &v in row {
            let key = (ranking.component[v], ranking.rank[v]);
            let next = lanes_used.entry(key).or_insert(0);
            lane[v] = *next;
            *next += 1;
        }
    }

    // Vertical extent of each component: its deepest lane stack.
    let component_count = ranking.component_count();
    let mut max_lanes = vec![0usize; component_count];
    for (&(component, _), &used) in &lanes_used {
        max_lanes[component] = max_lanes[component].max(used);
    }

    let row_pitch = config.node_height + config.lane_gap;
    let mut offset = vec![0f64; component_count];
    let mut next_offset = 0.0;
    for c in 0..component_count {
        offset[c] = next_offset;
        let height = max_lanes[c] as f64 * row_pitch - config.lane_gap;
        next_offset += height + config.component_gap;
    }

    let col_pitch = config.node_width + config.rank_gap;
    graph
        .nodes
        .iter()
        .enumerate()
        .map(|(v, node)| {
            let position = LayoutPosition {
                x: ranking.rank[v] as f64 * col_pitch,
                y: offset[ranking.component[v]] + lane[v] as f64 * row_pitch,
            };
            (node.id.clone(), position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_graph::{Edge, Node};

    fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
        let mut g = Graph::new();
        for id in nodes {
            g.nodes.push(Node::new(*id, "", "step"));
        }
        for (id, s, t) in edges {
            g.edges.push(Edge::new(*id, *s, *t, ""));
        }
        g
    }

    fn pos<'a>(
        positions: &'a HashMap<NodeId, LayoutPosition>,
        id: &str,
    ) -> &'a LayoutPosition {
        positions
            .get(&NodeId::from(id))
            .unwrap_or_else(|| panic!("no position for {id}"))
    }

    #[test]
    fn empty_graph_empty_mapping() {
        let positions = layout(&Graph::new(), &LayoutConfig::default());
        assert!(positions.is_empty());
    }

    #[test]
    fn one_position_per_node() {
        let g = graph(
            &["a", "b", "c", "lone"],
            &[("e1", "a", "b"), ("e2", "b", "c")],
        );
        let positions = layout(&g, &LayoutConfig::default());
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn chain_advances_along_x() {
        let config = LayoutConfig::default();
        let g = graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "b", "c")]);
        let positions = layout(&g, &config);

        let pitch = config.node_width + config.rank_gap;
        assert_eq!(pos(&positions, "a").x, 0.0);
        assert_eq!(pos(&positions, "b").x, pitch);
        assert_eq!(pos(&positions, "c").x, 2.0 * pitch);
        // A single chain occupies a single lane.
        assert_eq!(pos(&positions, "a").y, pos(&positions, "c").y);
    }

    #[test]
    fn siblings_get_distinct_lanes() {
        let config = LayoutConfig::default();
        let g = graph(
            &["root", "left", "right"],
            &[("e1", "root", "left"), ("e2", "root", "right")],
        );
        let positions = layout(&g, &config);

        let (left, right) = (pos(&positions, "left"), pos(&positions, "right"));
        assert_eq!(left.x, right.x);
        assert_eq!(
            (left.y - right.y).abs(),
            config.node_height + config.lane_gap
        );
    }

    #[test]
    fn components_stack_without_overlap() {
        let config = LayoutConfig::default();
        let g = graph(
            &["a", "b", "p", "q"],
            &[("e1", "a", "b"), ("e2", "p", "q")],
        );
        let positions = layout(&g, &config);

        // Second component starts below the first one's extent.
        let first_bottom = pos(&positions, "a").y + config.node_height;
        assert!(pos(&positions, "p").y >= first_bottom + config.component_gap);
        assert_eq!(pos(&positions, "p").y, pos(&positions, "q").y);
        // Each component restarts at rank 0.
        assert_eq!(pos(&positions, "p").x, 0.0);
    }

    #[test]
    fn cycle_lays_out_finitely() {
        let g = graph(&["x", "y"], &[("e1", "x", "y"), ("e2", "y", "x")]);
        let config = LayoutConfig::default();
        let positions = layout(&g, &config);

        assert_eq!(pos(&positions, "x").x, 0.0);
        assert_eq!(pos(&positions, "y").x, config.node_width + config.rank_gap);
    }

    #[test]
    fn layout_is_deterministic() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[
                ("e1", "a", "c"),
                ("e2", "b", "c"),
                ("e3", "c", "d"),
                ("e4", "c", "e"),
            ],
        );
        let config = LayoutConfig::default();
        assert_eq!(layout(&g, &config), layout(&g, &config));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_graph(
            node_count: usize,
            edge_pairs: &[(usize, usize)],
        ) -> Graph {
            let mut g = Graph::new();
            for i in 0..node_count {
                g.nodes.push(Node::new(format!("n{i}"), "", "step"));
            }
            for (i, (s, t)) in edge_pairs.iter().enumerate() {
                let source = format!("n{}", s % node_count);
                let target = format!("n{}", t % node_count);
                g.edges.push(Edge::new(format!("e{i}"), source, target, ""));
            }
            g
        }

        proptest! {
            /// Totality: any digraph, cyclic or not, gets exactly one
            /// position per node.
            #[test]
            fn assigns_one_position_per_node(
                node_count in 1usize..32,
                edge_pairs in proptest::collection::vec((0usize..64, 0usize..64), 0..96),
            ) {
                let g = arbitrary_graph(node_count, &edge_pairs);
                let positions = layout(&g, &LayoutConfig::default());
                prop_assert_eq!(positions.len(), node_count);
            }

            /// Determinism: unchanged input, unchanged output.
            #[test]
            fn repeated_layout_is_identical(
                node_count in 1usize..32,
                edge_pairs in proptest::collection::vec((0usize..64, 0usize..64), 0..96),
            ) {
                let g = arbitrary_graph(node_count, &edge_pairs);
                let config = LayoutConfig::default();
                prop_assert_eq!(layout(&g, &config), layout(&g, &config));
            }
        }
    }
}
