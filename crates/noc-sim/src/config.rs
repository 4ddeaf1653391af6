//! Run configuration from command-line arguments and environment variables.
//!
//! Every option can also be set through a `NOC_*` environment variable; an
//! explicit flag wins over the environment. Defaults reproduce the classic
//! hotspot run: 50 unit demands from (0, 0) to (3, 3) on a 4x4 torus with
//! capacity 15.

use std::path::PathBuf;

use clap::Parser;
use noc_routing::{RouterConfig, RoutingPolicy, DEFAULT_MAX_RETRIES};
use noc_topology::Node;

use crate::traffic::TrafficPattern;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "noc-sim", about = "Congestion-aware traffic routing on a 2D torus")]
pub struct SimArgs {
    /// Number of rows in the torus.
    #[arg(long, env = "NOC_ROWS", default_value_t = 4)]
    pub rows: usize,

    /// Number of columns in the torus.
    #[arg(long, env = "NOC_COLS", default_value_t = 4)]
    pub cols: usize,

    /// Capacity of every channel.
    #[arg(long, env = "NOC_CAPACITY", default_value_t = 15)]
    pub capacity: u64,

    /// Routing attempts per demand before it is dropped.
    #[arg(long, env = "NOC_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Path selection policy (`congestion-aware` or `shortest-path`).
    #[arg(long, env = "NOC_POLICY", default_value_t = RoutingPolicy::CongestionAware)]
    pub policy: RoutingPolicy,

    /// Number of demands per run.
    #[arg(long, env = "NOC_DEMANDS", default_value_t = 50)]
    pub demands: usize,

    /// Demand generator.
    #[arg(long, env = "NOC_PATTERN", value_enum, default_value_t)]
    pub pattern: TrafficPattern,

    /// Hotspot origin as `row,col`.
    #[arg(long, env = "NOC_ORIGIN", value_parser = parse_node, default_value = "0,0")]
    pub origin: Node,

    /// Hotspot destination as `row,col`.
    #[arg(long, env = "NOC_DESTINATION", value_parser = parse_node, default_value = "3,3")]
    pub destination: Node,

    /// Hotspot demand volume.
    #[arg(long, env = "NOC_VOLUME", default_value_t = 1)]
    pub volume: u64,

    /// Smallest uniform demand volume.
    #[arg(long, env = "NOC_MIN_VOLUME", default_value_t = 5)]
    pub min_volume: u64,

    /// Largest uniform demand volume.
    #[arg(long, env = "NOC_MAX_VOLUME", default_value_t = 20)]
    pub max_volume: u64,

    /// Seed for the first run; run `i` uses `seed + i`.
    #[arg(long, env = "NOC_SEED", default_value_t = 1)]
    pub seed: u64,

    /// Number of independent runs, each with its own ledger.
    #[arg(long, env = "NOC_RUNS", default_value_t = 1)]
    pub runs: u64,

    /// Write the load reports of all runs to this file as JSON.
    #[arg(long, env = "NOC_JSON")]
    pub json: Option<PathBuf>,
}

impl SimArgs {
    /// Router settings selected by these arguments.
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            max_retries: self.max_retries,
            policy: self.policy,
        }
    }
}

/// Parse `row,col` into a node.
pub fn parse_node(s: &str) -> Result<Node, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got {s:?}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row {row:?}: {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column {col:?}: {e}"))?;
    Ok(Node::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hotspot_run() {
        let args = SimArgs::try_parse_from(["noc-sim"]).unwrap();
        assert_eq!((args.rows, args.cols, args.capacity), (4, 4, 15));
        assert_eq!(args.demands, 50);
        assert_eq!(args.pattern, TrafficPattern::Hotspot);
        assert_eq!(args.origin, Node::ORIGIN);
        assert_eq!(args.destination, Node::new(3, 3));
        assert_eq!(args.router_config(), RouterConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = SimArgs::try_parse_from([
            "noc-sim",
            "--rows",
            "8",
            "--pattern",
            "uniform",
            "--policy",
            "shortest-path",
            "--max-retries",
            "5",
        ])
        .unwrap();
        assert_eq!(args.rows, 8);
        assert_eq!(args.pattern, TrafficPattern::Uniform);
        assert_eq!(args.router_config().policy, RoutingPolicy::ShortestPath);
        assert_eq!(args.router_config().max_retries, 5);
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(SimArgs::try_parse_from(["noc-sim", "--policy", "random"]).is_err());
    }

    #[test]
    fn parses_nodes() {
        assert_eq!(parse_node("2,3"), Ok(Node::new(2, 3)));
        assert_eq!(parse_node(" 1 , 0 "), Ok(Node::new(1, 0)));
        assert!(parse_node("2").is_err());
        assert!(parse_node("a,1").is_err());
    }
}
