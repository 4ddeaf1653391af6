//! Directed torus graph with uniform channel capacity.
//!
//! Channels are laid out densely: the channel leaving node `n` in direction
//! `d` has id `index(n) * 4 + d.index()`, where nodes are numbered in
//! row-major order. Lookups are therefore arithmetic and the graph never
//! changes after [`Torus::build`].

use crate::error::{Result, TopologyError};
use crate::{Direction, Node, CONNECTIONS_PER_NODE};

/// Dense identifier of a directed channel within one [`Torus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelId(pub usize);

impl ChannelId {
    /// Get the raw index value.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed link between two routers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Sending router
    pub from: Node,
    /// Receiving router, one wrapped hop away
    pub to: Node,
    /// Direction of travel out of `from`
    pub direction: Direction,
    /// Maximum load before the channel counts as overloaded
    pub capacity: u64,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// An immutable `rows` x `cols` torus.
#[derive(Debug, Clone)]
pub struct Torus {
    rows: usize,
    cols: usize,
    capacity: u64,
    channels: Vec<Channel>,
}

impl Torus {
    /// Build the torus with the same `capacity` on every channel.
    ///
    /// Every node gets one channel per direction, so the graph always has
    /// exactly `4 * rows * cols` channels. A capacity of zero is accepted;
    /// any committed load then overloads the channel.
    pub fn build(rows: usize, cols: usize, capacity: u64) -> Result<Self> {
        if rows == 0 {
            return Err(TopologyError::EmptyDimension { axis: "row" });
        }
        if cols == 0 {
            return Err(TopologyError::EmptyDimension { axis: "column" });
        }

        let channel_count = rows
            .checked_mul(cols)
            .and_then(|nodes| nodes.checked_mul(CONNECTIONS_PER_NODE))
            .ok_or(TopologyError::TooLarge { rows, cols })?;

        let mut channels = Vec::with_capacity(channel_count);
        for row in 0..rows {
            for col in 0..cols {
                let from = Node::new(row, col);
                for direction in Direction::ALL {
                    channels.push(Channel {
                        from,
                        to: direction.step(from, rows, cols),
                        direction,
                        capacity,
                    });
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            capacity,
            channels,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The uniform channel capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of routers.
    pub fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of directed channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Whether `node` lies inside this torus.
    pub fn contains(&self, node: Node) -> bool {
        node.fits(self.rows, self.cols)
    }

    /// Fail with [`TopologyError::NodeOutOfBounds`] unless `node` is inside.
    pub fn check_node(&self, node: Node) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(TopologyError::NodeOutOfBounds {
                node,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Row-major index of `node`, if it is inside the torus.
    pub fn node_index(&self, node: Node) -> Option<usize> {
        self.contains(node).then(|| node.row * self.cols + node.col)
    }

    /// Node at row-major `index`.
    pub fn node_at(&self, index: usize) -> Node {
        Node::new(index / self.cols, index % self.cols)
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.node_count()).map(|i| self.node_at(i))
    }

    /// All channels, indexed by [`ChannelId`].
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// All channel ids in ascending order.
    pub fn channel_ids(&self) -> impl Iterator<Item = ChannelId> {
        (0..self.channels.len()).map(ChannelId)
    }

    /// Look up a channel.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this torus.
    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.0]
    }

    /// Look up a channel, returning `None` for foreign ids.
    pub fn get(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id.0)
    }

    /// The channel leaving `node` in `direction`.
    ///
    /// `node` must be inside the torus.
    pub fn channel_toward(&self, node: Node, direction: Direction) -> ChannelId {
        debug_assert!(self.contains(node), "node {node} outside torus");
        ChannelId((node.row * self.cols + node.col) * CONNECTIONS_PER_NODE + direction.index())
    }

    /// The 4 channels leaving `node`, indexed like [`Direction::ALL`].
    pub fn outgoing(&self, node: Node) -> [ChannelId; CONNECTIONS_PER_NODE] {
        Direction::ALL.map(|dir| self.channel_toward(node, dir))
    }

    /// The 4 channels arriving at `node`.
    ///
    /// The channel arriving while travelling in direction `d` leaves the
    /// neighbor that lies one step in `d.opposite()`.
    pub fn incoming(&self, node: Node) -> [ChannelId; CONNECTIONS_PER_NODE] {
        Direction::ALL.map(|dir| {
            let source = dir.opposite().step(node, self.rows, self.cols);
            self.channel_toward(source, dir)
        })
    }

    /// Every channel from `from` to `to`.
    ///
    /// Yields more than one id on tori with 2 rows or columns, where two
    /// directions reach the same neighbor.
    pub fn channels_between(&self, from: Node, to: Node) -> impl Iterator<Item = ChannelId> + '_ {
        let candidates = if self.contains(from) {
            self.outgoing(from).to_vec()
        } else {
            Vec::new()
        };
        candidates
            .into_iter()
            .filter(move |&id| self.channels[id.0].to == to)
    }
}
