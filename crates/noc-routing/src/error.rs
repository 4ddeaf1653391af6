//! Error types for noc-routing.

use noc_topology::{Node, TopologyError};
use thiserror::Error;

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time failures.
///
/// Routing failures are not errors: a demand that cannot be admitted comes
/// back as a [`crate::RouteOutcome::Dropped`].
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid torus parameters or a node outside the torus.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// A demand whose origin is its own destination.
    #[error("demand origin and destination are both {node}")]
    SameEndpoints { node: Node },

    /// A demand that carries no traffic.
    #[error("demand {origin} -> {destination} has zero volume")]
    ZeroVolume { origin: Node, destination: Node },

    /// Report export failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
