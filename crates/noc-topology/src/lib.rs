//! NoC Torus Topology
//!
//! Directed 2D torus interconnect with a 4-connection invariant and uniform
//! channel capacity.
//!
//! # Structure
//!
//! Routers sit on a `rows` x `cols` grid whose edges wrap in both axes.
//! Each router has exactly 4 outgoing and 4 incoming channels:
//! - 2 vertical channels (north, south)
//! - 2 horizontal channels (west, east)
//!
//! On tori with fewer than 3 rows or columns two directions can reach the
//! same neighbor. Those channels stay distinct: a channel is identified by
//! its source router and direction, not by its endpoints.
//!
//! # Example
//!
//! ```
//! use noc_topology::{Node, Torus};
//!
//! let torus = Torus::build(4, 4, 15).unwrap();
//! assert_eq!(torus.channel_count(), 64);
//! assert_eq!(torus.outgoing(Node::ORIGIN).len(), 4);
//! ```

mod error;
mod neighbors;
mod node;
mod torus;

pub use error::{Result, TopologyError};
pub use neighbors::{are_neighbors, Direction, Neighbors};
pub use node::Node;
pub use torus::{Channel, ChannelId, Torus};

/// Total number of outgoing channels per router (invariant: always 4)
pub const CONNECTIONS_PER_NODE: usize = 4;

/// Channels along the row axis
pub const VERTICAL_CONNECTIONS: usize = 2;

/// Channels along the column axis
pub const HORIZONTAL_CONNECTIONS: usize = 2;

// Compile-time assertion of the 4-connection invariant
const _: () = assert!(VERTICAL_CONNECTIONS + HORIZONTAL_CONNECTIONS == CONNECTIONS_PER_NODE);
