//! One simulation run: topology, entanglement, demands, scheduling.
//!
//! [`Simulation`] owns everything a run touches: its random generator, the
//! topology and node set (through the engine), and the derived capacity
//! snapshot. Scheduling works on a private copy of that snapshot, so the
//! simulation can be scheduled against more than once.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, info_span};

use qnet_entanglement::{CapacityGraph, EntanglementEngine, Node};
use qnet_routing::{DemandScheduler, ScheduleOutcome, SdPair, SdPairGenerator};
use qnet_topology::{Topology, TopologyGenerator};

use crate::{Result, SimulationConfig, TrialError, TrialReport};

/// Simulation context for one run.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    rng: StdRng,
    engine: EntanglementEngine,
    capacity: CapacityGraph,
}

impl Simulation {
    /// Generate a topology, assign qubits, entangle, and derive capacity.
    pub fn build(config: SimulationConfig) -> Result<Self> {
        let mut rng = seeded_rng(config.seed);
        let topology = TopologyGenerator::new(config.topology.clone()).build(&mut rng)?;
        let engine = EntanglementEngine::assign_qubits(topology, &mut rng, config.min_qubits, config.max_qubits)?;
        Ok(Self::entangle(config, rng, engine))
    }

    /// Use a fixed topology and fixed per-node capacities.
    ///
    /// The topology and qubit fields of `config` are ignored; the seed still
    /// drives demand generation.
    pub fn with_topology(config: SimulationConfig, topology: Topology, capacities: &[usize]) -> Result<Self> {
        let rng = seeded_rng(config.seed);
        let engine = EntanglementEngine::with_capacities(topology, capacities)?;
        Ok(Self::entangle(config, rng, engine))
    }

    fn entangle(config: SimulationConfig, rng: StdRng, mut engine: EntanglementEngine) -> Self {
        engine.entangle_all();
        let capacity = engine.derive_capacity_graph();
        Self {
            config,
            rng,
            engine,
            capacity,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        self.engine.topology()
    }

    pub fn nodes(&self) -> &[Node] {
        self.engine.nodes()
    }

    /// The capacity snapshot taken right after entanglement.
    pub fn capacity_graph(&self) -> &CapacityGraph {
        &self.capacity
    }

    /// Fail with [`TrialError::Disconnected`] if any node has no capacity.
    pub fn check_connected(&self) -> Result<()> {
        let isolated = self.capacity.isolated_nodes();
        if isolated.is_empty() {
            Ok(())
        } else {
            Err(TrialError::Disconnected { isolated })
        }
    }

    /// Draw `num_pairs` demands routable on the capacity snapshot.
    pub fn generate_demands(&mut self) -> Result<Vec<SdPair>> {
        let generator = SdPairGenerator::new(self.config.pair_config.clone());
        let pairs = generator.generate(&mut self.rng, &self.capacity, self.config.num_pairs);
        if pairs.is_empty() {
            return Err(TrialError::NoDemands {
                requested: self.config.num_pairs,
                nodes: self.capacity.len(),
            });
        }
        Ok(pairs)
    }

    /// Schedule `pairs` against a copy of the capacity snapshot.
    pub fn schedule(&self, pairs: &[SdPair]) -> Result<ScheduleOutcome> {
        let mut scheduler = DemandScheduler::new(self.capacity.clone());
        Ok(scheduler.schedule(pairs)?)
    }

    /// Run the remaining stages and summarize the trial.
    pub fn run_trial(&mut self) -> Result<TrialReport> {
        let nodes = self.capacity.len();
        let span = info_span!("trial", nodes);
        let _enter = span.enter();

        if self.config.require_connected {
            self.check_connected()?;
        }

        let pairs = self.generate_demands()?;
        debug!(?pairs, "generated demands");

        let outcome = self.schedule(&pairs)?;
        let k = outcome.score().ok_or(TrialError::NoDemands {
            requested: self.config.num_pairs,
            nodes,
        })?;

        let report = TrialReport::new(nodes, self.engine.capacity_stats(), &outcome, k);
        info!(k, demands = report.num_sd_pairs, paths = report.total_paths, "trial complete");
        Ok(report)
    }
}

/// Deterministic generator for `Some(seed)`, OS entropy otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Build a simulation from `config` and run one trial.
pub fn run(config: SimulationConfig) -> Result<TrialReport> {
    Simulation::build(config)?.run_trial()
}
