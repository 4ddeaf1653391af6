//! Error types for noc-topology.

use thiserror::Error;

use crate::Node;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while building or addressing a torus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A torus needs at least one row and one column.
    #[error("torus must have at least one {axis}")]
    EmptyDimension { axis: &'static str },

    /// The channel count does not fit in `usize`.
    #[error("{rows}x{cols} torus is too large to address")]
    TooLarge { rows: usize, cols: usize },

    /// A node lies outside the torus.
    #[error("node {node} is outside the {rows}x{cols} torus")]
    NodeOutOfBounds { node: Node, rows: usize, cols: usize },
}
