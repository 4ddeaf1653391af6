//! 4-Connection Neighbor Computation
//!
//! Every router on the torus has exactly 4 outgoing channels, one per
//! direction:
//! - North: row - 1 (mod rows)
//! - South: row + 1 (mod rows)
//! - West: column - 1 (mod cols)
//! - East: column + 1 (mod cols)
//!
//! Coordinates wrap, they are never clamped. On a torus with 2 rows the
//! north and south neighbors coincide, and on a torus with 1 row both are
//! the node itself. The direction still distinguishes the channels.

use crate::{Node, CONNECTIONS_PER_NODE};

/// A link direction out of a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions, in the order channels are laid out per node.
    pub const ALL: [Self; CONNECTIONS_PER_NODE] =
        [Self::North, Self::South, Self::West, Self::East];

    /// The direction that undoes this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Position of this direction within [`Direction::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
        }
    }

    /// The node one hop away from `node` in this direction.
    ///
    /// `rows` and `cols` must be non-zero.
    pub fn step(self, node: Node, rows: usize, cols: usize) -> Node {
        match self {
            Self::North => Node::new((node.row + rows - 1) % rows, node.col),
            Self::South => Node::new((node.row + 1) % rows, node.col),
            Self::West => Node::new(node.row, (node.col + cols - 1) % cols),
            Self::East => Node::new(node.row, (node.col + 1) % cols),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        };
        f.write_str(name)
    }
}

/// Neighbor tables for a torus of a given shape.
pub struct Neighbors;

impl Neighbors {
    /// Get all 4 neighbors of a node, indexed like [`Direction::ALL`].
    pub fn of(node: Node, rows: usize, cols: usize) -> [Node; CONNECTIONS_PER_NODE] {
        Direction::ALL.map(|dir| dir.step(node, rows, cols))
    }
}

/// Check if `b` is one hop away from `a` on a `rows` x `cols` torus.
pub fn are_neighbors(a: Node, b: Node, rows: usize, cols: usize) -> bool {
    Neighbors::of(a, rows, cols).contains(&b)
}
