//! Point-to-point traffic demands.

use noc_topology::{Node, Torus};
use serde::Serialize;

use crate::error::{Error, Result};

/// A request to move `volume` units of traffic from `origin` to
/// `destination`.
///
/// Demands are immutable once built, and construction rejects the two
/// degenerate shapes: a demand to itself and an empty demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Demand {
    origin: Node,
    destination: Node,
    volume: u64,
}

impl Demand {
    /// Create a demand.
    ///
    /// # Errors
    ///
    /// [`Error::SameEndpoints`] if `origin == destination` and
    /// [`Error::ZeroVolume`] if `volume == 0`.
    pub fn new(origin: impl Into<Node>, destination: impl Into<Node>, volume: u64) -> Result<Self> {
        let origin = origin.into();
        let destination = destination.into();
        if origin == destination {
            return Err(Error::SameEndpoints { node: origin });
        }
        if volume == 0 {
            return Err(Error::ZeroVolume {
                origin,
                destination,
            });
        }
        Ok(Self {
            origin,
            destination,
            volume,
        })
    }

    /// Source router.
    pub fn origin(&self) -> Node {
        self.origin
    }

    /// Target router.
    pub fn destination(&self) -> Node {
        self.destination
    }

    /// Traffic carried on every channel of the admitted path.
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Check that both endpoints lie inside `torus`.
    pub fn check_fits(&self, torus: &Torus) -> Result<()> {
        torus.check_node(self.origin)?;
        torus.check_node(self.destination)?;
        Ok(())
    }
}

impl std::fmt::Display for Demand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.origin, self.destination, self.volume)
    }
}
