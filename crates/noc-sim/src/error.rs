//! Error types for noc-sim.

use thiserror::Error;

/// Result type for noc-sim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Topology, demand or report failure from the routing core.
    #[error(transparent)]
    Routing(#[from] noc_routing::Error),

    /// The volume range is empty or starts at zero.
    #[error("invalid volume range {min}..={max}")]
    InvalidVolumeRange { min: u64, max: u64 },

    /// Random pairs need at least two distinct nodes.
    #[error("uniform traffic needs at least 2 nodes, torus has {nodes}")]
    TooFewNodes { nodes: usize },

    /// Report export failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
