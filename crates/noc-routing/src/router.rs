//! Congestion-aware path selection for a single demand.
//!
//! Each attempt recomputes every channel weight from the ledger, runs a
//! least-weight search and then checks the chosen path against capacity.
//! The check reads the load already committed, not the load the demand
//! would add, so a path can pass here and still overload a channel once
//! committed.
//!
//! The router never writes the ledger. Because nothing changes between two
//! attempts of one call, a path that fails the check fails on every retry
//! and the retry budget only bounds the work done before the drop.

use std::str::FromStr;

use noc_topology::{ChannelId, Node, Torus};
use serde::Serialize;
use tracing::{debug, warn};

use crate::search::shortest_path;
use crate::weight::{congestion_weights, unit_weights};
use crate::{Demand, LoadLedger};

/// Attempts per demand before it is dropped for congestion.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// An ordered walk through the torus.
///
/// `nodes` runs from origin to destination inclusive; `channels[i]` links
/// `nodes[i]` to `nodes[i + 1]`. Channels are kept alongside nodes because
/// two distinct channels can join the same pair of routers on small tori.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    nodes: Vec<Node>,
    channels: Vec<ChannelId>,
}

impl Path {
    pub(crate) fn new(nodes: Vec<Node>, channels: Vec<ChannelId>) -> Self {
        debug_assert_eq!(nodes.len(), channels.len() + 1);
        Self { nodes, channels }
    }

    /// Routers visited, origin and destination included.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Channels traversed, in order.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Number of channels traversed.
    pub fn hops(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel on the path already carries more than its
    /// capacity.
    pub fn within_capacity(&self, torus: &Torus, ledger: &LoadLedger) -> bool {
        self.channels
            .iter()
            .all(|&id| ledger.load(id) <= torus.channel(id).capacity)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// How a router picks paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingPolicy {
    /// Load-weighted search with capacity check and bounded retries.
    #[default]
    CongestionAware,
    /// Minimum-hop search, no capacity check, no retries.
    ShortestPath,
}

impl FromStr for RoutingPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "congestion-aware" => Ok(Self::CongestionAware),
            "shortest-path" => Ok(Self::ShortestPath),
            other => Err(format!("unknown routing policy: {other}")),
        }
    }
}

impl std::fmt::Display for RoutingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CongestionAware => f.write_str("congestion-aware"),
            Self::ShortestPath => f.write_str("shortest-path"),
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Attempts before a congested demand is dropped
    pub max_retries: u32,
    /// Path selection strategy
    pub policy: RoutingPolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            policy: RoutingPolicy::CongestionAware,
        }
    }
}

/// Why a demand was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DropReason {
    /// No path joins origin and destination.
    Unreachable,
    /// Every attempt picked a path through an over-capacity channel.
    Congested { attempts: u32 },
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable => f.write_str("destination unreachable"),
            Self::Congested { attempts } => write!(f, "congested after {attempts} attempts"),
        }
    }
}

/// A demand that was admitted, with the path it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedDemand {
    /// The admitted demand.
    pub demand: Demand,
    /// Walk whose channels received the demand's volume.
    pub path: Path,
}

/// A demand that was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DroppedDemand {
    /// The refused demand.
    pub demand: Demand,
    /// Why no path was admitted.
    pub reason: DropReason,
}

/// Result of routing one demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A path passed validation.
    Routed(RoutedDemand),
    /// The demand was refused; the ledger must stay untouched.
    Dropped(DroppedDemand),
}

impl RouteOutcome {
    /// The admitted path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Routed(routed) => Some(&routed.path),
            Self::Dropped(_) => None,
        }
    }

    /// Whether the demand was dropped.
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

/// Chooses paths for demands against a read-only ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Create a router.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Router settings.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route `demand` given the current `ledger`.
    pub fn route(&self, torus: &Torus, ledger: &LoadLedger, demand: &Demand) -> RouteOutcome {
        match self.find_path(torus, ledger, demand.origin(), demand.destination()) {
            Ok(path) => RouteOutcome::Routed(RoutedDemand {
                demand: *demand,
                path,
            }),
            Err(reason) => {
                warn!(%demand, %reason, "Demand dropped");
                RouteOutcome::Dropped(DroppedDemand {
                    demand: *demand,
                    reason,
                })
            }
        }
    }

    /// Pick a path from `origin` to `destination`.
    ///
    /// Callers pass the endpoints of a constructed [`Demand`], so they are
    /// always distinct.
    pub(crate) fn find_path(
        &self,
        torus: &Torus,
        ledger: &LoadLedger,
        origin: Node,
        destination: Node,
    ) -> std::result::Result<Path, DropReason> {
        match self.config.policy {
            RoutingPolicy::CongestionAware => self.congestion_aware(torus, ledger, origin, destination),
            RoutingPolicy::ShortestPath => {
                let (path, _) = shortest_path(torus, &unit_weights(torus), origin, destination)
                    .ok_or_else(|| unreachable_drop(origin, destination))?;
                debug!(%origin, %destination, hops = path.hops(), "Shortest path selected");
                Ok(path)
            }
        }
    }

    fn congestion_aware(
        &self,
        torus: &Torus,
        ledger: &LoadLedger,
        origin: Node,
        destination: Node,
    ) -> std::result::Result<Path, DropReason> {
        let mut retries = 0;
        while retries < self.config.max_retries {
            let weights = congestion_weights(torus, ledger);
            let (path, cost) = shortest_path(torus, &weights, origin, destination)
                .ok_or_else(|| unreachable_drop(origin, destination))?;

            if path.within_capacity(torus, ledger) {
                debug!(
                    %origin,
                    %destination,
                    attempt = retries + 1,
                    hops = path.hops(),
                    cost,
                    "Path accepted"
                );
                return Ok(path);
            }

            retries += 1;
            debug!(%origin, %destination, attempt = retries, "Path crosses an over-capacity channel");
        }

        Err(DropReason::Congested { attempts: retries })
    }
}

fn unreachable_drop(origin: Node, destination: Node) -> DropReason {
    // Cannot happen on a well-formed torus with in-bounds endpoints
    warn!(%origin, %destination, "No path between endpoints");
    DropReason::Unreachable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torus() -> Torus {
        Torus::build(4, 4, 15).unwrap()
    }

    fn demand(from: (usize, usize), to: (usize, usize), volume: u64) -> Demand {
        Demand::new(from, to, volume).unwrap()
    }

    fn commit(ledger: &mut LoadLedger, path: &Path, volume: u64) {
        ledger.commit(path, volume);
    }

    #[test]
    fn empty_ledger_routes_minimum_hops() {
        let torus = torus();
        let ledger = LoadLedger::new(&torus);
        let outcome = Router::default().route(&torus, &ledger, &demand((0, 0), (3, 3), 1));

        let path = outcome.path().unwrap();
        assert_eq!(path.hops(), 2);
        assert_eq!(path.nodes().first(), Some(&Node::ORIGIN));
        assert_eq!(path.nodes().last(), Some(&Node::new(3, 3)));
    }

    #[test]
    fn router_does_not_touch_ledger() {
        let torus = torus();
        let ledger = LoadLedger::new(&torus);
        let before = ledger.clone();
        let _ = Router::default().route(&torus, &ledger, &demand((0, 0), (2, 2), 4));
        assert_eq!(ledger, before);
    }

    #[test]
    fn validation_uses_committed_load_only() {
        let torus = Torus::build(4, 4, 1).unwrap();
        let ledger = LoadLedger::new(&torus);
        // Volume 2 on capacity 1 still passes: the channel is empty now.
        let outcome = Router::default().route(&torus, &ledger, &demand((0, 0), (0, 1), 2));
        assert_eq!(outcome.path().unwrap().hops(), 1);
    }

    #[test]
    fn at_capacity_still_passes() {
        let torus = Torus::build(4, 4, 1).unwrap();
        let mut ledger = LoadLedger::new(&torus);
        let router = Router::default();

        let first = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(0, 1)).unwrap();
        commit(&mut ledger, &first, 1);

        // Load 1 <= capacity 1 on the direct channel, but its weight is now 2,
        // so the search may go around; either way the check passes.
        assert!(router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(0, 1)).is_ok());
    }

    #[test]
    fn over_capacity_path_is_dropped_after_all_retries() {
        // A 1x2 torus has only east/west channels between the two columns.
        let torus = Torus::build(1, 2, 1).unwrap();
        let mut ledger = LoadLedger::new(&torus);
        let router = Router::default();

        for id in torus.channel_ids() {
            let channel = torus.channel(id);
            if channel.from != channel.to {
                let path = Path::new(vec![channel.from, channel.to], vec![id]);
                commit(&mut ledger, &path, 5);
            }
        }

        let outcome = router.route(&torus, &ledger, &demand((0, 0), (0, 1), 1));
        assert_eq!(
            outcome,
            RouteOutcome::Dropped(DroppedDemand {
                demand: demand((0, 0), (0, 1), 1),
                reason: DropReason::Congested {
                    attempts: DEFAULT_MAX_RETRIES
                },
            })
        );
    }

    #[test]
    fn zero_retries_drops_without_search() {
        let torus = torus();
        let ledger = LoadLedger::new(&torus);
        let router = Router::new(RouterConfig {
            max_retries: 0,
            ..RouterConfig::default()
        });
        let outcome = router.route(&torus, &ledger, &demand((0, 0), (1, 1), 1));
        assert!(outcome.is_dropped());
    }

    #[test]
    fn retries_are_deterministic() {
        let torus = torus();
        let mut ledger = LoadLedger::new(&torus);
        let router = Router::default();
        let first = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(2, 1)).unwrap();
        commit(&mut ledger, &first, 13);

        let a = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(2, 1));
        let b = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(2, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn congested_channel_is_avoided() {
        let torus = torus();
        let mut ledger = LoadLedger::new(&torus);
        let router = Router::default();

        let first = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(3, 3)).unwrap();
        commit(&mut ledger, &first, 12);

        let second = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(3, 3)).unwrap();
        assert_eq!(second.hops(), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn shortest_path_policy_ignores_load() {
        let torus = Torus::build(1, 2, 1).unwrap();
        let mut ledger = LoadLedger::new(&torus);
        let router = Router::new(RouterConfig {
            policy: RoutingPolicy::ShortestPath,
            ..RouterConfig::default()
        });

        let path = router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(0, 1)).unwrap();
        commit(&mut ledger, &path, 50);

        assert!(router.find_path(&torus, &ledger, Node::ORIGIN, Node::new(0, 1)).is_ok());
    }

    #[test]
    fn unreachable_when_endpoint_outside() {
        let torus = torus();
        let ledger = LoadLedger::new(&torus);
        let result = Router::default().find_path(&torus, &ledger, Node::ORIGIN, Node::new(7, 7));
        assert_eq!(result, Err(DropReason::Unreachable));
    }

    #[test]
    fn routed_paths_always_leave_the_origin() {
        let torus = Torus::build(3, 3, 15).unwrap();
        let ledger = LoadLedger::new(&torus);
        let router = Router::default();

        for origin in torus.nodes() {
            for destination in torus.nodes().filter(|&n| n != origin) {
                let demand = Demand::new(origin, destination, 1).unwrap();
                let outcome = router.route(&torus, &ledger, &demand);
                let path = outcome.path().unwrap();
                assert!(path.nodes().len() >= 2);
                assert!(path.hops() >= 1);
                assert_eq!(path.nodes().first(), Some(&origin));
                assert_eq!(path.nodes().last(), Some(&destination));
            }
        }
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!(
            "congestion-aware".parse::<RoutingPolicy>(),
            Ok(RoutingPolicy::CongestionAware)
        );
        assert_eq!(
            "shortest-path".parse::<RoutingPolicy>(),
            Ok(RoutingPolicy::ShortestPath)
        );
        assert!("random".parse::<RoutingPolicy>().is_err());
        assert_eq!(RoutingPolicy::ShortestPath.to_string(), "shortest-path");
    }

    #[test]
    fn path_display() {
        let torus = torus();
        let ledger = LoadLedger::new(&torus);
        let path = Router::default()
            .find_path(&torus, &ledger, Node::ORIGIN, Node::new(0, 1))
            .unwrap();
        assert_eq!(path.to_string(), "(0, 0) -> (0, 1)");
    }
}
