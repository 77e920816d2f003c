//! Qubit assignment and the proportional entanglement pass.
//!
//! # Entanglement Pass
//!
//! Nodes are processed once, in index order. Node `v` with degree `d(v)`
//! offers `share = floor(cap(v) / d(v))` pairings to each neighbor (all of
//! `cap(v)` when isolated). Each unvisited neighbor `u` accepts up to
//! `ratio = floor(cap(u) / d(u))` attempts. A share of zero with a non-zero
//! budget means every attempt is tried, so low-capacity nodes still link.
//!
//! Once processed, `v` is never a neighbor target again, so every pair is
//! handled from its lower-index end only. The outcome is first-come and
//! depends on node order; it is not a global optimum.

use rand::Rng;
use tracing::{debug, info};

use qnet_topology::Topology;

use crate::{CapacityGraph, EntanglementError, Node, NodeIndex, Result};

/// Min/max capacity and occupied slots across all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityStats {
    pub min_capacity: usize,
    pub max_capacity: usize,
    pub min_occupied: usize,
    pub max_occupied: usize,
}

/// Owns the topology and node set for one simulation run.
#[derive(Debug, Clone)]
pub struct EntanglementEngine {
    topology: Topology,
    nodes: Vec<Node>,
}

impl EntanglementEngine {
    /// Assign each topology node a capacity drawn uniformly from `[min, max]`.
    pub fn assign_qubits<R: Rng + ?Sized>(
        topology: Topology,
        rng: &mut R,
        min: usize,
        max: usize,
    ) -> Result<Self> {
        if min > max {
            return Err(EntanglementError::InvalidCapacityRange { min, max });
        }
        if min == 0 {
            return Err(EntanglementError::ZeroCapacity(0));
        }

        let nodes = (0..topology.len())
            .map(|i| Node::new(i, rng.gen_range(min..=max)))
            .collect();
        Ok(Self { topology, nodes })
    }

    /// Use fixed per-node capacities.
    pub fn with_capacities(topology: Topology, capacities: &[usize]) -> Result<Self> {
        if capacities.len() != topology.len() {
            return Err(EntanglementError::CapacityCountMismatch {
                given: capacities.len(),
                nodes: topology.len(),
            });
        }
        if let Some(index) = capacities.iter().position(|&c| c == 0) {
            return Err(EntanglementError::ZeroCapacity(index));
        }

        let nodes = capacities
            .iter()
            .enumerate()
            .map(|(i, &capacity)| Node::new(i, capacity))
            .collect();
        Ok(Self { topology, nodes })
    }

    /// The raw topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// All nodes, indexed by topology position.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Run the single proportional entanglement pass.
    ///
    /// Returns the number of pairings created.
    pub fn entangle_all(&mut self) -> usize {
        let n = self.nodes.len();
        let mut visited = vec![false; n];
        let mut created = 0;

        for v in 0..n {
            let capacity = self.nodes[v].capacity();
            let degree = self.topology.degree(v);
            let share = if degree > 0 { capacity / degree } else { capacity };

            let neighbors: Vec<NodeIndex> = self.topology.neighbors(v).collect();
            for u in neighbors {
                if visited[u] {
                    continue;
                }
                let ratio = self.nodes[u].capacity() / self.topology.degree(u);

                for k in 0..ratio {
                    if (share == 0 && capacity > 0) || k < share {
                        let (node, target) = pair_mut(&mut self.nodes, v, u);
                        if node.consume(target) {
                            created += 1;
                        }
                    }
                }
            }
            visited[v] = true;
        }

        info!(nodes = n, pairings = created, "entanglement pass complete");
        created
    }

    /// Count pairings per node pair into a fresh capacity graph.
    ///
    /// Reads node state only, so repeated calls give identical graphs.
    pub fn derive_capacity_graph(&self) -> CapacityGraph {
        let mut graph = CapacityGraph::zeros(self.nodes.len());
        for node in &self.nodes {
            for remote in node.linked_nodes() {
                graph.increment_directed(node.index(), remote);
            }
        }
        debug!(links = graph.total_links(), "derived capacity graph");
        graph
    }

    /// Capacity and occupancy extremes for reporting.
    pub fn capacity_stats(&self) -> CapacityStats {
        let capacities = self.nodes.iter().map(Node::capacity);
        let occupied = self.nodes.iter().map(Node::occupied);
        CapacityStats {
            min_capacity: capacities.clone().min().unwrap_or(0),
            max_capacity: capacities.max().unwrap_or(0),
            min_occupied: occupied.clone().min().unwrap_or(0),
            max_occupied: occupied.max().unwrap_or(0),
        }
    }
}

/// Borrow two distinct nodes mutably.
fn pair_mut(nodes: &mut [Node], a: NodeIndex, b: NodeIndex) -> (&mut Node, &mut Node) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = nodes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = nodes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qnet_topology::{TopologyConfig, TopologyGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::SlotRef;

    #[test]
    fn assign_qubits_respects_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let engine = EntanglementEngine::assign_qubits(Topology::complete(10), &mut rng, 2, 6).unwrap();
        assert_eq!(engine.nodes().len(), 10);
        for (i, node) in engine.nodes().iter().enumerate() {
            assert_eq!(node.index(), i);
            assert!((2..=6).contains(&node.capacity()));
        }
    }

    #[test]
    fn assign_qubits_rejects_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            EntanglementEngine::assign_qubits(Topology::ring(4), &mut rng, 6, 2).unwrap_err(),
            EntanglementError::InvalidCapacityRange { min: 6, max: 2 }
        );
        assert_eq!(
            EntanglementEngine::assign_qubits(Topology::ring(4), &mut rng, 0, 2).unwrap_err(),
            EntanglementError::ZeroCapacity(0)
        );
    }

    #[test]
    fn with_capacities_checks_length() {
        assert_eq!(
            EntanglementEngine::with_capacities(Topology::ring(4), &[2, 2]).unwrap_err(),
            EntanglementError::CapacityCountMismatch { given: 2, nodes: 4 }
        );
        assert_eq!(
            EntanglementEngine::with_capacities(Topology::ring(3), &[2, 0, 2]).unwrap_err(),
            EntanglementError::ZeroCapacity(1)
        );
    }

    #[test]
    fn proportional_share_on_complete_graph() {
        // Every node: capacity 3, degree 3 → share 1, ratio 1
        let mut engine = EntanglementEngine::with_capacities(Topology::complete(4), &[3, 3, 3, 3]).unwrap();
        assert_eq!(engine.entangle_all(), 6);

        let graph = engine.derive_capacity_graph();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(graph.get(i, j), u32::from(i != j));
            }
        }
    }

    #[test]
    fn low_capacity_node_still_links() {
        // Node 0 has capacity 1 and degree 2 → share 0, so every attempt is tried
        let mut engine = EntanglementEngine::with_capacities(Topology::complete(3), &[1, 4, 4]).unwrap();
        engine.entangle_all();

        let nodes = engine.nodes();
        assert_eq!(nodes[0].occupied(), 1);
        assert_eq!(nodes[0].pairing(0), Some(SlotRef { node: 1, slot: 0 }));
        // 1 ↔ 2 gets ratio(2) = 2 attempts at share(1) = 2
        let graph = engine.derive_capacity_graph();
        assert_eq!(graph.get(1, 2), 2);
        assert_eq!(graph.get(0, 2), 0);
    }

    #[test]
    fn neighbor_ratio_caps_attempts() {
        // Path 0 - 1 - 2: node 0 offers 6, node 1 accepts floor(2 / 2) = 1
        let topology = Topology::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
        let mut engine = EntanglementEngine::with_capacities(topology, &[6, 2, 6]).unwrap();
        engine.entangle_all();

        let graph = engine.derive_capacity_graph();
        assert_eq!(graph.get(0, 1), 1);
        // Node 1 offers floor(2 / 2) = 1, node 2 accepts 6
        assert_eq!(graph.get(1, 2), 1);
    }

    #[test]
    fn isolated_node_stays_free() {
        let topology = Topology::from_rows(&[[0, 1, 0], [1, 0, 0], [0, 0, 0]]).unwrap();
        let mut engine = EntanglementEngine::with_capacities(topology, &[2, 2, 5]).unwrap();
        engine.entangle_all();

        assert_eq!(engine.nodes()[2].occupied(), 0);
        assert!(!engine.derive_capacity_graph().is_connected());
    }

    #[test]
    fn capacity_stats_extremes() {
        let mut engine = EntanglementEngine::with_capacities(Topology::ring(4), &[2, 5, 3, 2]).unwrap();
        engine.entangle_all();

        let stats = engine.capacity_stats();
        assert_eq!(stats.min_capacity, 2);
        assert_eq!(stats.max_capacity, 5);
        assert!(stats.min_occupied <= stats.max_occupied);
        assert!(stats.max_occupied <= 5);
    }

    #[test]
    fn derive_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let topology = TopologyGenerator::new(TopologyConfig::fixed(12)).build(&mut rng).unwrap();
        let mut engine = EntanglementEngine::assign_qubits(topology, &mut rng, 2, 8).unwrap();
        engine.entangle_all();

        assert_eq!(engine.derive_capacity_graph(), engine.derive_capacity_graph());
    }

    proptest! {
        #[test]
        fn pairings_are_symmetric(seed in any::<u64>(), n in 2usize..16, min in 1usize..5, spread in 0usize..6) {
            let mut rng = StdRng::seed_from_u64(seed);
            let topology = TopologyGenerator::new(TopologyConfig::fixed(n)).build(&mut rng).unwrap();
            let mut engine = EntanglementEngine::assign_qubits(topology, &mut rng, min, min + spread).unwrap();
            engine.entangle_all();

            let nodes = engine.nodes();
            for node in nodes {
                prop_assert!(node.occupied() <= node.capacity());
                prop_assert_eq!(node.slots().iter().flatten().count(), node.occupied());

                for (slot, pairing) in node.slots().iter().enumerate() {
                    if let Some(remote) = pairing {
                        let back = nodes[remote.node].pairing(remote.slot);
                        prop_assert_eq!(back, Some(SlotRef { node: node.index(), slot }));
                        prop_assert!(engine.topology().is_linked(node.index(), remote.node));
                    }
                }
            }

            let graph = engine.derive_capacity_graph();
            prop_assert!(graph.is_symmetric());
            for i in 0..n {
                prop_assert_eq!(graph.get(i, i), 0);
            }
        }
    }
}
