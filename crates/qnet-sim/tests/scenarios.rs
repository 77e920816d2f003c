//! End-to-end scenarios across topology, entanglement, and routing.

use qnet_entanglement::{CapacityGraph, EntanglementEngine};
use qnet_routing::{find_all_simple_paths, DemandScheduler, SdPair};
use qnet_sim::{run, Simulation, SimulationConfig, TrialError};
use qnet_topology::{Topology, TopologyConfig};

fn seeded(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

fn granted(outcome: &qnet_routing::ScheduleOutcome) -> Vec<Vec<usize>> {
    outcome.demands()[0]
        .paths()
        .iter()
        .map(|p| p.nodes().to_vec())
        .collect()
}

#[test]
fn ring_of_four_routes_both_ways_round() {
    let sim = Simulation::with_topology(seeded(0), Topology::ring(4), &[2, 2, 2, 2]).unwrap();

    let expected = vec![vec![0, 1, 0, 1], vec![1, 0, 1, 0], vec![0, 1, 0, 1], vec![1, 0, 1, 0]];
    assert_eq!(sim.capacity_graph().rows(), expected);
    assert!(sim.nodes().iter().all(|n| n.free() == 0));

    let outcome = sim.schedule(&[SdPair::new(0, 2).unwrap()]).unwrap();
    assert_eq!(granted(&outcome), vec![vec![0, 1, 2], vec![0, 3, 2]]);
    assert_eq!(outcome.score(), Some(2));
    assert_eq!(outcome.rounds(), 3);
}

#[test]
fn complete_four_prefers_short_paths() {
    let rows: Vec<Vec<u32>> = (0..4)
        .map(|i| (0..4).map(|j| u32::from(i != j)).collect())
        .collect();
    let graph = CapacityGraph::from_rows(&rows).unwrap();

    let paths: Vec<Vec<usize>> = find_all_simple_paths(&graph, 0, 3)
        .iter()
        .map(|p| p.nodes().to_vec())
        .collect();
    assert_eq!(
        paths,
        vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 3],
            vec![0, 2, 1, 3],
            vec![0, 2, 3],
            vec![0, 3],
        ]
    );

    let mut scheduler = DemandScheduler::new(graph);
    let outcome = scheduler.schedule(&[SdPair::new(0, 3).unwrap()]).unwrap();
    assert_eq!(granted(&outcome), vec![vec![0, 3], vec![0, 1, 3], vec![0, 2, 3]]);
    assert_eq!(outcome.rounds(), 4);

    let left = scheduler.remaining_capacity();
    assert_eq!(left.get(1, 2), 1);
    assert!(left.neighbors(0).next().is_none());
}

#[test]
fn derived_capacity_is_stable() {
    let mut engine = EntanglementEngine::with_capacities(Topology::complete(5), &[4, 3, 5, 2, 4]).unwrap();
    engine.entangle_all();

    let first = engine.derive_capacity_graph();
    let second = engine.derive_capacity_graph();
    assert_eq!(first, second);
    assert!(first.is_symmetric());

    for node in engine.nodes() {
        let linked: u32 = first.neighbors(node.index()).map(|m| first.get(node.index(), m)).sum();
        assert_eq!(linked as usize, node.occupied());
    }
}

#[test]
fn seeded_trials_are_deterministic() {
    let config = SimulationConfig {
        topology: TopologyConfig::fixed(7),
        min_qubits: 3,
        max_qubits: 7,
        num_pairs: 2,
        ..seeded(99)
    };
    let first = run(config.clone());
    let second = run(config);
    assert_eq!(first, second);

    let report = first.unwrap();
    assert_eq!(report.num_nodes, 7);
    assert_eq!(report.num_sd_pairs, 2);
    assert!(report.k <= report.total_paths);
}

#[test]
fn stages_report_their_failures() {
    let err = Simulation::with_topology(seeded(1), Topology::ring(3), &[2, 0, 2])
        .err()
        .unwrap();
    assert_eq!(err.stage(), "entanglement");
    assert!(!err.is_transient());

    let lonely = Topology::from_rows(&[[0, 1, 0], [1, 0, 0], [0, 0, 0]]).unwrap();
    let mut sim = Simulation::with_topology(seeded(1), lonely, &[1, 1, 1]).unwrap();
    let err = sim.run_trial().unwrap_err();
    assert_eq!(err, TrialError::Disconnected { isolated: vec![2] });
    assert!(err.is_transient());
}
