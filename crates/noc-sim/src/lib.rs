//! NoC Torus Simulation Driver
//!
//! Builds a torus, generates demands and runs them through the routing
//! core, one isolated simulation per run.
//!
//! # Usage
//!
//! ```text
//! noc-sim                                   # 50 hotspot demands on a 4x4 torus
//! noc-sim --pattern uniform --demands 10 --capacity 100 --seed 3
//! noc-sim --runs 20 --pattern uniform --json loads.json
//! ```

mod config;
mod error;
mod traffic;

use noc_routing::{LoadReport, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub use config::{parse_node, SimArgs};
pub use error::{Error, Result};
pub use traffic::{hotspot, TrafficPattern, UniformTraffic};

/// Drop and overload counts over several runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub runs: u64,
    pub routed: usize,
    pub dropped: usize,
    pub overloaded_channels: usize,
    pub runs_with_overloads: u64,
}

impl RunTotals {
    /// Fold one report into the totals.
    pub fn record(&mut self, report: &LoadReport) {
        self.runs += 1;
        self.routed += report.routed;
        self.dropped += report.dropped.len();
        self.overloaded_channels += report.overloads.len();
        if !report.overloads.is_empty() {
            self.runs_with_overloads += 1;
        }
    }
}

impl std::fmt::Display for RunTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} runs: {} routed, {} dropped, {} overloaded channels ({} runs with overloads)",
            self.runs, self.routed, self.dropped, self.overloaded_channels, self.runs_with_overloads
        )
    }
}

/// Run one simulation with its own torus and ledger.
pub fn run_once(args: &SimArgs, seed: u64) -> Result<Simulation> {
    let mut sim = Simulation::build(args.rows, args.cols, args.capacity, args.router_config())?;

    let demands = match args.pattern {
        TrafficPattern::Hotspot => hotspot(args.origin, args.destination, args.volume, args.demands)?,
        TrafficPattern::Uniform => {
            let mut rng = StdRng::seed_from_u64(seed);
            UniformTraffic::new(args.rows, args.cols, args.min_volume, args.max_volume)?
                .generate(&mut rng, args.demands)?
        }
    };

    let outcome = sim.simulate(&demands)?;
    for routed in &outcome.routed {
        info!("Path for {}: {}", routed.demand, routed.path);
    }
    for dropped in &outcome.dropped {
        info!("No valid path for {}. Traffic dropped ({}).", dropped.demand, dropped.reason);
    }

    Ok(sim)
}

/// Run `args.runs` independent simulations and collect their reports.
pub fn run_all(args: &SimArgs) -> Result<(Vec<LoadReport>, RunTotals)> {
    info!(
        rows = args.rows,
        cols = args.cols,
        capacity = args.capacity,
        pattern = %args.pattern,
        policy = %args.policy,
        runs = args.runs,
        "Starting simulation"
    );

    let mut reports = Vec::new();
    let mut totals = RunTotals::default();
    for run in 0..args.runs {
        let sim = run_once(args, args.seed.wrapping_add(run))?;
        let report = sim.report();
        totals.record(&report);
        reports.push(report);
    }
    Ok((reports, totals))
}

/// Serialize reports to pretty JSON.
pub fn reports_to_json(reports: &[LoadReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
