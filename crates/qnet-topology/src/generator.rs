//! Random topology generation with a minimum-degree floor.
//!
//! # Procedure
//!
//! 1. Draw `n` uniformly from `[min_nodes, max_nodes]`
//! 2. Decide each unordered pair `{i, j}` once with a fair coin, mirrored
//! 3. For each node below the degree floor, link it to randomly chosen
//!    non-neighbors until it reaches the floor
//!
//! Step 3 only ever adds links, so a node that met the floor earlier can
//! never drop below it later. The floor holds for every node once the pass
//! finishes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::{NodeIndex, Result, Topology, TopologyError, MIN_NODES};

/// Default degree floor: `ceil(n / 2)`.
///
/// With every degree at least `ceil(n / 2)`, any two non-adjacent nodes
/// share a neighbor, so the generated topology is always connected.
pub const fn default_min_degree(n: usize) -> usize {
    n.div_ceil(2)
}

/// Parameters for [`TopologyGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyConfig {
    /// Smallest node count (inclusive)
    pub min_nodes: usize,
    /// Largest node count (inclusive)
    pub max_nodes: usize,
    /// Degree floor; `None` means `ceil(n / 2)`
    pub min_degree: Option<usize>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            min_nodes: 4,
            max_nodes: 8,
            min_degree: None,
        }
    }
}

impl TopologyConfig {
    /// Exactly `n` nodes with the default degree floor.
    pub fn fixed(n: usize) -> Self {
        Self {
            min_nodes: n,
            max_nodes: n,
            min_degree: None,
        }
    }

    /// Check the node range.
    pub fn validate(&self) -> Result<()> {
        if self.min_nodes > self.max_nodes {
            return Err(TopologyError::InvalidRange {
                min: self.min_nodes,
                max: self.max_nodes,
            });
        }
        if self.min_nodes < MIN_NODES {
            return Err(TopologyError::TooSmall {
                min: MIN_NODES,
                actual: self.min_nodes,
            });
        }
        Ok(())
    }

    /// Degree floor for an `n`-node topology, capped at `n - 1`.
    pub fn degree_floor(&self, n: usize) -> usize {
        self.min_degree
            .unwrap_or_else(|| default_min_degree(n))
            .min(n.saturating_sub(1))
    }
}

/// Builds random topologies from a [`TopologyConfig`].
#[derive(Debug, Clone, Default)]
pub struct TopologyGenerator {
    config: TopologyConfig,
}

impl TopologyGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: TopologyConfig) -> Self {
        Self { config }
    }

    /// The generator's configuration.
    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Build a random topology with a node count drawn from the range.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Topology> {
        self.config.validate()?;
        let n = rng.gen_range(self.config.min_nodes..=self.config.max_nodes);
        Ok(self.build_with_size(rng, n))
    }

    /// Build a random topology with exactly `n` nodes.
    pub fn build_with_size<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Topology {
        let mut topology = Topology::empty(n);

        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(0.5) {
                    topology.link(i, j);
                }
            }
        }
        let random_links = topology.edge_count();

        let floor = self.config.degree_floor(n);
        for node in 0..n {
            raise_degree(&mut topology, node, floor, rng);
        }

        debug!(
            nodes = n,
            random_links,
            repaired_links = topology.edge_count() - random_links,
            floor,
            "built topology"
        );
        topology
    }
}

/// Link `node` to random non-neighbors until its degree reaches `floor`.
fn raise_degree<R: Rng + ?Sized>(topology: &mut Topology, node: NodeIndex, floor: usize, rng: &mut R) {
    let missing = floor.saturating_sub(topology.degree(node));
    if missing == 0 {
        return;
    }

    let candidates: Vec<NodeIndex> = (0..topology.len())
        .filter(|&other| other != node && !topology.is_linked(node, other))
        .collect();

    for &other in candidates.choose_multiple(rng, missing) {
        topology.link(node, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_empty_range() {
        let generator = TopologyGenerator::new(TopologyConfig {
            min_nodes: 8,
            max_nodes: 4,
            min_degree: None,
        });
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generator.build(&mut rng),
            Err(TopologyError::InvalidRange { min: 8, max: 4 })
        );
    }

    #[test]
    fn rejects_single_node() {
        let generator = TopologyGenerator::new(TopologyConfig::fixed(1));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generator.build(&mut rng),
            Err(TopologyError::TooSmall { actual: 1, .. })
        ));
    }

    #[test]
    fn floor_is_capped() {
        let config = TopologyConfig {
            min_nodes: 3,
            max_nodes: 3,
            min_degree: Some(10),
        };
        assert_eq!(config.degree_floor(3), 2);

        let mut rng = StdRng::seed_from_u64(7);
        let topology = TopologyGenerator::new(config).build(&mut rng).unwrap();
        assert_eq!(topology, Topology::complete(3));
    }

    #[test]
    fn same_seed_same_topology() {
        let generator = TopologyGenerator::new(TopologyConfig::fixed(12));
        let a = generator.build(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = generator.build(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn generated_topology_invariants(
            seed in any::<u64>(),
            min_nodes in 2usize..20,
            extra in 0usize..10,
        ) {
            let config = TopologyConfig {
                min_nodes,
                max_nodes: min_nodes + extra,
                min_degree: None,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let topology = TopologyGenerator::new(config.clone()).build(&mut rng).unwrap();
            let n = topology.len();

            prop_assert!(n >= config.min_nodes && n <= config.max_nodes);
            prop_assert!(topology.is_symmetric());
            for i in 0..n {
                prop_assert!(!topology.is_linked(i, i));
            }
            prop_assert!(topology.min_degree() >= config.degree_floor(n));
            prop_assert!(topology.is_connected());
        }

        #[test]
        fn explicit_floor_holds(seed in any::<u64>(), n in 2usize..25, floor in 0usize..25) {
            let config = TopologyConfig {
                min_nodes: n,
                max_nodes: n,
                min_degree: Some(floor),
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let topology = TopologyGenerator::new(config).build(&mut rng).unwrap();
            prop_assert!(topology.min_degree() >= floor.min(n - 1));
        }
    }
}
