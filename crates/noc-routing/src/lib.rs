//! Congestion-Aware Torus Routing
//!
//! Routes a stream of point-to-point demands over a [`noc_topology::Torus`]
//! whose channels have finite capacity, and reports which channels ended up
//! overloaded and which demands were dropped.
//!
//! # Pipeline
//!
//! 1. [`noc_topology::Torus::build`] produces the immutable graph.
//! 2. [`Simulation::simulate`] walks the demands in order. For each one the
//!    [`Router`] weighs every channel by its current load, runs a
//!    least-weight search and checks the chosen path against capacity.
//! 3. An admitted path adds the demand's volume to every channel on it in
//!    the [`LoadLedger`]; a dropped demand changes nothing.
//! 4. [`detect_overloads`] scans the ledger for channels whose load
//!    strictly exceeds capacity.
//!
//! # Weighting
//!
//! A channel costs 1 until its load reaches 80% of capacity, then
//! `1 + load / capacity`. Congested channels look longer, so later demands
//! drift onto equal-length alternatives.
//!
//! # Example
//!
//! ```
//! use noc_routing::{Demand, RouterConfig, Simulation};
//!
//! let mut sim = Simulation::build(4, 4, 15, RouterConfig::default()).unwrap();
//! let demands: Vec<_> = (0..50)
//!     .map(|_| Demand::new((0, 0), (3, 3), 1).unwrap())
//!     .collect();
//!
//! let outcome = sim.simulate(&demands).unwrap();
//! assert_eq!(outcome.routed.len() + outcome.dropped.len(), 50);
//! ```

mod demand;
mod error;
mod ledger;
mod overload;
mod report;
mod router;
mod search;
mod simulation;
mod weight;

pub use demand::Demand;
pub use error::{Error, Result};
pub use ledger::LoadLedger;
pub use overload::{detect_overloads, is_overloaded, overload_details, Overload};
pub use report::{ChannelLoad, LoadReport};
pub use router::{
    DropReason, DroppedDemand, Path, RouteOutcome, RoutedDemand, Router, RouterConfig,
    RoutingPolicy, DEFAULT_MAX_RETRIES,
};
pub use simulation::{Simulation, SimulationOutcome};
pub use weight::{channel_weight, congestion_weights, unit_weights, utilization, CONGESTION_THRESHOLD};
