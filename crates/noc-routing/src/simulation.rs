//! Sequential demand admission over one torus.

use noc_topology::{ChannelId, Torus};
use tracing::{debug, info};

use crate::error::Result;
use crate::overload::detect_overloads;
use crate::report::LoadReport;
use crate::router::{DroppedDemand, RouteOutcome, RoutedDemand, Router, RouterConfig};
use crate::{Demand, LoadLedger};

/// What one call to [`Simulation::simulate`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Admitted demands with their paths, in input order
    pub routed: Vec<RoutedDemand>,
    /// Refused demands, in input order
    pub dropped: Vec<DroppedDemand>,
}

/// A torus, its load ledger and the router that fills it.
///
/// Demands are admitted strictly one after another: each routing decision
/// sees the load committed by every earlier demand. Runs that should not
/// influence each other need separate `Simulation` values.
#[derive(Debug, Clone)]
pub struct Simulation {
    torus: Torus,
    ledger: LoadLedger,
    router: Router,
    routed: Vec<RoutedDemand>,
    dropped: Vec<DroppedDemand>,
}

impl Simulation {
    /// Create a simulation with an all-zero ledger.
    pub fn new(torus: Torus, config: RouterConfig) -> Self {
        let ledger = LoadLedger::new(&torus);
        Self {
            torus,
            ledger,
            router: Router::new(config),
            routed: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Build the torus and wrap it in a simulation.
    pub fn build(rows: usize, cols: usize, capacity: u64, config: RouterConfig) -> Result<Self> {
        Ok(Self::new(Torus::build(rows, cols, capacity)?, config))
    }

    /// Route `demands` in order, committing each admitted path.
    ///
    /// Every demand is checked against the torus before anything is routed;
    /// a demand outside the torus fails the whole batch and leaves the
    /// ledger untouched. Can be called repeatedly to process a demand stream
    /// in chunks; the ledger carries over.
    pub fn simulate(&mut self, demands: &[Demand]) -> Result<SimulationOutcome> {
        for demand in demands {
            demand.check_fits(&self.torus)?;
        }

        let mut outcome = SimulationOutcome::default();
        for demand in demands {
            match self.router.route(&self.torus, &self.ledger, demand) {
                RouteOutcome::Routed(routed) => {
                    self.ledger.commit(&routed.path, demand.volume());
                    debug!(%demand, path = %routed.path, "Demand committed");
                    outcome.routed.push(routed);
                }
                RouteOutcome::Dropped(dropped) => outcome.dropped.push(dropped),
            }
        }

        info!(
            routed = outcome.routed.len(),
            dropped = outcome.dropped.len(),
            total_load = self.ledger.total(),
            "Demand batch processed"
        );

        self.routed.extend(outcome.routed.iter().cloned());
        self.dropped.extend(outcome.dropped.iter().copied());
        Ok(outcome)
    }

    /// The torus.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// The load ledger.
    pub fn ledger(&self) -> &LoadLedger {
        &self.ledger
    }

    /// Router settings.
    pub fn config(&self) -> &RouterConfig {
        self.router.config()
    }

    /// Every demand admitted so far.
    pub fn routed(&self) -> &[RoutedDemand] {
        &self.routed
    }

    /// Every demand dropped so far.
    pub fn dropped(&self) -> &[DroppedDemand] {
        &self.dropped
    }

    /// Channels whose load exceeds capacity right now.
    pub fn overloads(&self) -> Vec<ChannelId> {
        detect_overloads(&self.torus, &self.ledger)
    }

    /// Snapshot for renderers and exporters.
    pub fn report(&self) -> LoadReport {
        LoadReport::capture(&self.torus, &self.ledger, self.routed.len(), &self.dropped)
    }
}
