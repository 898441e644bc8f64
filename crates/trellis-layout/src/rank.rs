//! Rank assignment: longest-path layering with cycle tolerance.
//!
//! Ranks are computed on a feedback-arc-reduced view of the graph: a
//! depth-first traversal marks nodes in progress, and any edge into an
//! in-progress node is classified as a back-edge. Back-edges are excluded
//! from the longest-path pass (they would make it diverge) but remain in
//! the graph and are still rendered.

use std::collections::HashMap;

use trellis_graph::Graph;

/// Structural result of the rank phase, indexed like `graph.nodes` /
/// `graph.edges`.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Layer per node: longest-path distance from a source, back-edges
    /// excluded. Sources (and cycle entry nodes) sit at rank 0.
    pub rank: Vec<u32>,
    /// Back-edge classification per edge.
    pub back_edge: Vec<bool>,
    /// Weakly-connected component per node, numbered in first-appearance
    /// order over the node list.
    pub component: Vec<usize>,
}

impl Ranking {
    /// Number of distinct components.
    pub fn component_count(&self) -> usize {
        self.component.iter().copied().max().map_or(0, |max| max + 1)
    }

    /// Highest rank present, or `None` for an empty graph.
    pub fn max_rank(&self) -> Option<u32> {
        self.rank.iter().copied().max()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Assign a rank to every node of `graph`.
///
/// Always terminates, including on cyclic input: the traversal visits
/// each node once and each edge once, and the longest-path pass runs over
/// an acyclic edge subset.
pub fn assign_ranks(graph: &Graph) -> Ranking {
    let n = graph.nodes.len();
    let index: HashMap<_, _> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    // Out-adjacency as (edge index, target index). Edges with unresolved
    // endpoints were rejected upstream by validation; skip defensively.
    let mut out: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    let mut undirected: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (e, edge) in graph.edges.iter().enumerate() {
        let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) else {
            continue;
        };
        out[s].push((e, t));
        undirected[s].push(t);
        undirected[t].push(s);
    }

    let (back_edge, postorder) = classify_edges(n, graph.edge_count(), &out);

    // Reverse postorder is a topological order of the reduced graph;
    // relax non-back out-edges in that order for longest paths.
    let mut rank = vec![0u32; n];
    for &v in postorder.iter().rev() {
        for &(e, t) in &out[v] {
            if !back_edge[e] {
                rank[t] = rank[t].max(rank[v] + 1);
            }
        }
    }

    Ranking {
        rank,
        back_edge,
        component: components(n, &undirected),
    }
}

/// Depth-first edge classification. Returns back-edge flags and a
/// postorder over all nodes, rooted at unvisited nodes in delivery order.
fn classify_edges(
    n: usize,
    edge_count: usize,
    out: &[Vec<(usize, usize)>],
) -> (Vec<bool>, Vec<usize>) {
    let mut mark = vec![Mark::White; n];
    let mut back_edge = vec![false; edge_count];
    let mut postorder = Vec::with_capacity(n);

    for root in 0..n {
        if mark[root] != Mark::White {
            continue;
        }
        mark[root] = Mark::Gray;
        // Explicit stack of (node, next out-edge offset); recursion depth
        // would otherwise be bounded by the longest path.
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while !stack.is_empty() {
            let top = stack.len() - 1;
            let (v, i) = stack[top];
            if let Some(&(e, t)) = out[v].get(i) {
                stack[top].1 = i + 1;
                match mark[t] {
                    Mark::White => {
                        mark[t] = Mark::Gray;
                        stack.push((t, 0));
                    }
                    // Target is still in progress: this edge closes a cycle.
                    Mark::Gray => back_edge[e] = true,
                    Mark::Black => {}
                }
            } else {
                mark[v] = Mark::Black;
                postorder.push(v);
                stack.pop();
            }
        }
    }

    (back_edge, postorder)
}

/// Weakly-connected component per node via traversal over the undirected
/// adjacency, numbered in first-appearance order.
fn components(n: usize, undirected: &[Vec<usize>]) -> Vec<usize> {
    let mut component = vec![usize::MAX; n];
    let mut next = 0;
    for start in 0..n {
        if component[start] != usize::MAX {
            continue;
        }
        let mut frontier = vec![start];
        component[start] = next;
        while let Some(v) = frontier.pop() {
            for &w in &undirected[v] {
                if component[w] == usize::MAX {
                    component[w] = next;
                    frontier.push(w);
                }
            }
        }
        next += 1;
    }
    component
}
