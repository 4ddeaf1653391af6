//! Weighted shortest-path search over the torus.
//!
//! Plain Dijkstra over a binary heap. All weights are at least 1, so the
//! first time the destination is popped its cost is final. Equal-cost
//! frontier entries are popped in insertion order and neighbors are pushed
//! in [`noc_topology::Direction::ALL`] order, which makes the chosen path
//! deterministic for a given torus and weight vector.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use noc_topology::{ChannelId, Node, Torus};

use crate::router::Path;

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap behavior
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find the least-weight path from `origin` to `destination`.
///
/// `weights` is indexed by channel id. Returns the path and its total
/// weight, or `None` when the destination cannot be reached (including when
/// either endpoint lies outside the torus).
pub(crate) fn shortest_path(
    torus: &Torus,
    weights: &[f64],
    origin: Node,
    destination: Node,
) -> Option<(Path, f64)> {
    let start = torus.node_index(origin)?;
    let goal = torus.node_index(destination)?;

    let mut dist = vec![f64::INFINITY; torus.node_count()];
    let mut via: Vec<Option<ChannelId>> = vec![None; torus.node_count()];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist[start] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        seq,
        node: start,
    });

    while let Some(Frontier { cost, node, .. }) = heap.pop() {
        if node == goal {
            break;
        }
        if cost > dist[node] {
            continue;
        }

        for id in torus.outgoing(torus.node_at(node)) {
            let Some(&weight) = weights.get(id.index()) else {
                continue;
            };
            let Some(next) = torus.node_index(torus.channel(id).to) else {
                continue;
            };
            let next_cost = cost + weight;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                via[next] = Some(id);
                seq += 1;
                heap.push(Frontier {
                    cost: next_cost,
                    seq,
                    node: next,
                });
            }
        }
    }

    if start != goal && via[goal].is_none() {
        return None;
    }

    let mut channels = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        let id = via[cursor]?;
        channels.push(id);
        cursor = torus.node_index(torus.channel(id).from)?;
    }
    channels.reverse();

    let mut nodes = Vec::with_capacity(channels.len() + 1);
    nodes.push(origin);
    nodes.extend(channels.iter().map(|&id| torus.channel(id).to));

    Some((Path::new(nodes, channels), dist[goal]))
}
