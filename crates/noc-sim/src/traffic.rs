//! Demand generators.
//!
//! Two patterns:
//! - Hotspot: every demand between the same two routers with a fixed volume
//! - Uniform: random distinct origin/destination pairs with a random volume

use noc_routing::Demand;
use noc_topology::Node;
use rand::Rng;

use crate::error::{Error, Result};

/// Which generator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TrafficPattern {
    /// All demands share one origin and one destination
    #[default]
    Hotspot,
    /// Uniformly random pairs and volumes
    Uniform,
}

impl std::fmt::Display for TrafficPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotspot => f.write_str("hotspot"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

/// `count` copies of the same demand.
pub fn hotspot(origin: Node, destination: Node, volume: u64, count: usize) -> Result<Vec<Demand>> {
    let demand = Demand::new(origin, destination, volume)?;
    Ok(vec![demand; count])
}

/// Random traffic between distinct routers of a `rows` x `cols` torus.
#[derive(Debug, Clone, Copy)]
pub struct UniformTraffic {
    rows: usize,
    cols: usize,
    min_volume: u64,
    max_volume: u64,
}

impl UniformTraffic {
    /// Create a generator. Volumes are drawn from `min_volume..=max_volume`.
    pub fn new(rows: usize, cols: usize, min_volume: u64, max_volume: u64) -> Result<Self> {
        if min_volume == 0 || min_volume > max_volume {
            return Err(Error::InvalidVolumeRange {
                min: min_volume,
                max: max_volume,
            });
        }
        // Saturation keeps oversized shapes above the two-node minimum.
        let nodes = rows.saturating_mul(cols);
        if nodes < 2 {
            return Err(Error::TooFewNodes { nodes });
        }
        Ok(Self {
            rows,
            cols,
            min_volume,
            max_volume,
        })
    }

    fn random_node<R: Rng>(&self, rng: &mut R) -> Node {
        Node::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }

    /// Draw one demand.
    pub fn demand<R: Rng>(&self, rng: &mut R) -> Result<Demand> {
        let origin = self.random_node(rng);
        let mut destination = self.random_node(rng);
        while destination == origin {
            destination = self.random_node(rng);
        }
        let volume = rng.gen_range(self.min_volume..=self.max_volume);
        Ok(Demand::new(origin, destination, volume)?)
    }

    /// Draw `count` demands.
    pub fn generate<R: Rng>(&self, rng: &mut R, count: usize) -> Result<Vec<Demand>> {
        (0..count).map(|_| self.demand(rng)).collect()
    }
}
