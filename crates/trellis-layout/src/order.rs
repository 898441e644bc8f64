//! Crossing reduction: in-rank ordering by median-of-neighbors sweeps.
//!
//! Only edges between adjacent ranks steer the ordering (a back-edge
//! never spans forward, so back-edges drop out naturally). The sweep is
//! the classic barycenter-family heuristic: order rank r by the median
//! position of each node's neighbors in the previously-ordered rank,
//! alternating sweep direction for a fixed number of passes. Ties keep
//! the prior order, so the result is deterministic for identical input.

use std::collections::HashMap;

use trellis_graph::Graph;

use crate::Ranking;

/// Order nodes within each rank.
///
/// Returns, per rank, node indices in final left-to-right (here:
/// top-to-bottom) order. `passes` sweeps are run, alternating forward and
/// backward, starting forward; zero passes yields delivery order.
pub fn order_ranks(graph: &Graph, ranking: &Ranking, passes: usize) -> Vec<Vec<usize>> {
    let n = graph.nodes.len();
    let rank_count = ranking.max_rank().map_or(0, |max| max as usize + 1);
    let mut ranks: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for v in 0..n {
        ranks[ranking.rank[v] as usize].push(v);
    }

    let (preds, succs) = adjacent_neighbors(graph, ranking);

    // Current index of each node within its rank.
    let mut position = vec![0usize; n];
    let update_positions = |ranks: &[Vec<usize>], position: &mut [usize]| {
        for row in ranks {
            for (i, &v) in row.iter().enumerate() {
                position[v] = i;
            }
        }
    };
    update_positions(&ranks, &mut position);

    for pass in 0..passes {
        if pass % 2 == 0 {
            for r in 1..rank_count {
                reorder_row(&mut ranks[r], &preds, &position);
                for (i, &v) in ranks[r].iter().enumerate() {
                    position[v] = i;
                }
            }
        } else {
            for r in (0..rank_count.saturating_sub(1)).rev() {
                reorder_row(&mut ranks[r], &succs, &position);
                for (i, &v) in ranks[r].iter().enumerate() {
                    position[v] = i;
                }
            }
        }
    }

    ranks
}

/// Count edge crossings between adjacent ranks under the given ordering.
///
/// Quadratic in the edge count; used by tests and diagnostics, not by the
/// layout pipeline itself.
pub fn crossing_count(graph: &Graph, ranking: &Ranking, orders: &[Vec<usize>]) -> usize {
    let n = graph.nodes.len();
    let mut position = vec![0usize; n];
    for row in orders {
        for (i, &v) in row.iter().enumerate() {
            position[v] = i;
        }
    }

    let index: HashMap<_, _> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    // Spans between adjacent ranks, keyed by source rank.
    let mut spans: Vec<(u32, usize, usize)> = Vec::new();
    for edge in &graph.edges {
        let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) else {
            continue;
        };
        if ranking.rank[t] == ranking.rank[s] + 1 {
            spans.push((ranking.rank[s], position[s], position[t]));
        }
    }

    let mut crossings = 0;
    for (i, &(rank_a, s_a, t_a)) in spans.iter().enumerate() {
        for &(rank_b, s_b, t_b) in &spans[i + 1..] {
            if rank_a == rank_b && (s_a < s_b) != (t_a < t_b) && s_a != s_b && t_a != t_b {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Neighbor lists restricted to adjacent ranks: `preds[v]` holds the
/// nodes one rank earlier that point at `v`, `succs[v]` the nodes one
/// rank later that `v` points at.
fn adjacent_neighbors(graph: &Graph, ranking: &Ranking) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let n = graph.nodes.len();
    let index: HashMap<_, _> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge in &graph.edges {
        let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) else {
            continue;
        };
        if ranking.rank[t] == ranking.rank[s] + 1 {
            preds[t].push(s);
            succs[s].push(t);
        }
    }
    (preds, succs)
}

/// Stable-reorder one row by median neighbor position. Nodes without
/// neighbors in the reference rank keep their current position as key,
/// so they stay put relative to the row.
fn reorder_row(row: &mut [usize], neighbors: &[Vec<usize>], position: &[usize]) {
    let mut keyed: Vec<(f64, usize, usize)> = row
        .iter()
        .map(|&v| (median_or(&neighbors[v], position, position[v] as f64), position[v], v))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    for (slot, (_, _, v)) in row.iter_mut().zip(keyed) {
        *slot = v;
    }
}

fn median_or(neighbors: &[usize], position: &[usize], fallback: f64) -> f64 {
    if neighbors.is_empty() {
        return fallback;
    }
    let mut spots: Vec<usize> = neighbors.iter().map(|&v| position[v]).collect();
    spots.sort_unstable();
    let mid = spots.len() / 2;
    if spots.len() % 2 == 1 {
        spots[mid] as f64
    } else {
        (spots[mid - 1] as f64 + spots[mid] as f64) / 2.0
    }
}
