//! Shared fixtures for end-to-end tests of the torus routing stack.

use noc_routing::{Demand, RouterConfig, Simulation};
use noc_topology::Node;

/// `count` identical demands between two routers.
pub fn repeated(origin: (usize, usize), destination: (usize, usize), volume: u64, count: usize) -> Vec<Demand> {
    match Demand::new(origin, destination, volume) {
        Ok(demand) => vec![demand; count],
        Err(e) => panic!("fixture demand {origin:?} -> {destination:?} rejected: {e}"),
    }
}

/// A fresh simulation with default router settings.
pub fn simulation(rows: usize, cols: usize, capacity: u64) -> Simulation {
    match Simulation::build(rows, cols, capacity, RouterConfig::default()) {
        Ok(sim) => sim,
        Err(e) => panic!("fixture torus {rows}x{cols} rejected: {e}"),
    }
}

/// Channel loads indexed by channel id.
pub fn loads(sim: &Simulation) -> Vec<u64> {
    sim.ledger().iter().map(|(_, load)| load).collect()
}

/// Whether consecutive nodes of `nodes` are joined by a channel of the torus.
pub fn is_walk(sim: &Simulation, nodes: &[Node]) -> bool {
    nodes
        .windows(2)
        .all(|pair| sim.torus().channels_between(pair[0], pair[1]).next().is_some())
}
