//! End-to-end routing scenarios on small tori.

use noc_integration_tests::{is_walk, loads, repeated, simulation};
use noc_routing::{
    detect_overloads, Demand, DropReason, Error, RouterConfig, RoutingPolicy, Simulation,
};
use noc_topology::{Node, TopologyError};

#[test]
fn hotspot_spills_onto_alternate_paths_after_threshold() {
    let mut sim = simulation(4, 4, 15);
    let outcome = sim.simulate(&repeated((0, 0), (3, 3), 1, 50)).unwrap();

    assert!(outcome.dropped.is_empty());
    assert_eq!(outcome.routed.len(), 50);

    // The first minimum-hop path absorbs load until it reaches 12 (80% of 15).
    let first = &outcome.routed[0].path;
    assert_eq!(first.hops(), 2);
    for routed in &outcome.routed[..12] {
        assert_eq!(&routed.path, first);
    }

    // The 13th demand prefers the other equal-length path.
    let thirteenth = &outcome.routed[12].path;
    assert_eq!(thirteenth.hops(), 2);
    assert_ne!(thirteenth, first);
}

#[test]
fn hotspot_paths_are_valid_walks() {
    let mut sim = simulation(4, 4, 15);
    let outcome = sim.simulate(&repeated((0, 0), (3, 3), 1, 50)).unwrap();

    for routed in &outcome.routed {
        let nodes = routed.path.nodes();
        assert!(nodes.len() >= 2);
        assert_eq!(nodes.first(), Some(&Node::new(0, 0)));
        assert_eq!(nodes.last(), Some(&Node::new(3, 3)));
        assert!(is_walk(&sim, nodes));
    }
}

#[test]
fn hotspot_overloads_only_the_minimum_hop_channels() {
    let mut sim = simulation(4, 4, 15);
    sim.simulate(&repeated((0, 0), (3, 3), 1, 50)).unwrap();

    let overloaded = detect_overloads(sim.torus(), sim.ledger());
    let mut endpoints: Vec<_> = overloaded
        .iter()
        .map(|&id| {
            let channel = sim.torus().channel(id);
            (channel.from, channel.to)
        })
        .collect();
    endpoints.sort();

    assert_eq!(
        endpoints,
        vec![
            (Node::new(0, 0), Node::new(0, 3)),
            (Node::new(0, 0), Node::new(3, 0)),
            (Node::new(0, 3), Node::new(3, 3)),
            (Node::new(3, 0), Node::new(3, 3)),
        ]
    );
    for id in overloaded {
        assert_eq!(sim.ledger().load(id), 16);
    }
    assert_eq!(sim.ledger().total(), 32 * 2 + 18 * 4);
}

#[test]
fn validation_checks_prior_load_not_projected_load() {
    let mut sim = simulation(4, 4, 1);
    let demand = Demand::new((0, 0), (0, 1), 2).unwrap();
    let outcome = sim.simulate(&[demand]).unwrap();

    // Routed over the single direct channel even though 2 > capacity 1.
    assert_eq!(outcome.routed.len(), 1);
    assert!(outcome.dropped.is_empty());
    assert_eq!(
        outcome.routed[0].path.nodes(),
        &[Node::new(0, 0), Node::new(0, 1)]
    );

    let overloaded = sim.overloads();
    assert_eq!(overloaded.len(), 1);
    let channel = sim.torus().channel(overloaded[0]);
    assert_eq!((channel.from, channel.to), (Node::new(0, 0), Node::new(0, 1)));
    assert_eq!(sim.ledger().load(overloaded[0]), 2);
}

#[test]
fn same_endpoints_fail_at_construction() {
    assert!(matches!(
        Demand::new((0, 0), (0, 0), 1),
        Err(Error::SameEndpoints { .. })
    ));

    // A single-node torus only admits demands to itself, so nothing can be
    // routed on it at all.
    let sim = simulation(1, 1, 1);
    assert_eq!(sim.torus().node_count(), 1);
    assert!(Demand::new((0, 0), (0, 0), 3).is_err());
}

#[test]
fn invalid_topology_fails_before_simulation() {
    let err = Simulation::build(4, 0, 15, RouterConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Topology(TopologyError::EmptyDimension { axis: "column" })
    ));
}

#[test]
fn exhausted_retries_drop_without_side_effects() {
    let mut sim = simulation(1, 2, 1);
    let demand = Demand::new((0, 0), (0, 1), 5).unwrap();
    let outcome = sim.simulate(&[demand, demand, demand]).unwrap();

    assert_eq!(outcome.routed.len(), 2);
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(
        outcome.dropped[0].reason,
        DropReason::Congested { attempts: 3 }
    );
    assert_eq!(sim.ledger().total(), 10);
}

#[test]
fn shortest_path_policy_keeps_piling_on() {
    let config = RouterConfig {
        policy: RoutingPolicy::ShortestPath,
        ..RouterConfig::default()
    };
    let mut sim = Simulation::build(4, 4, 15, config).unwrap();
    let outcome = sim.simulate(&repeated((0, 0), (3, 3), 1, 50)).unwrap();

    assert!(outcome.dropped.is_empty());
    let first = &outcome.routed[0].path;
    assert!(outcome.routed.iter().all(|r| &r.path == first));
    for &id in first.channels() {
        assert_eq!(sim.ledger().load(id), 50);
    }
    assert_eq!(sim.overloads().len(), 2);
}

#[test]
fn small_tori_route_over_parallel_channels() {
    let mut sim = simulation(2, 2, 3);
    let outcome = sim
        .simulate(&repeated((0, 0), (1, 1), 1, 8))
        .unwrap();

    assert_eq!(outcome.routed.len() + outcome.dropped.len(), 8);
    for routed in &outcome.routed {
        assert_eq!(routed.path.hops(), 2);
    }
    let total: u64 = loads(&sim).iter().sum();
    assert_eq!(total, 2 * outcome.routed.len() as u64);
}

#[test]
fn report_exposes_observation_surface() {
    let mut sim = simulation(4, 4, 1);
    sim.simulate(&[Demand::new((0, 0), (0, 1), 2).unwrap()]).unwrap();

    let report = sim.report();
    assert_eq!(report.channels.len(), sim.torus().channel_count());
    assert_eq!(report.overloads.len(), 1);
    assert!(report.dropped.is_empty());
    assert!(report.to_string().contains("Overloaded Channels:"));
    assert!(report.to_json().unwrap().contains("\"overloads\""));
}
