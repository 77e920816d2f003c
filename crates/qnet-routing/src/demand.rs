//! Source-destination demands and their random generation.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::{has_path, CapacityGraph, NodeIndex, Path, Result, RoutingError};

/// A routing request from `source` to `dest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdPair {
    pub source: NodeIndex,
    pub dest: NodeIndex,
}

impl SdPair {
    /// Create a pair; source and destination must differ.
    pub fn new(source: NodeIndex, dest: NodeIndex) -> Result<Self> {
        if source == dest {
            return Err(RoutingError::SelfDemand(source));
        }
        Ok(Self { source, dest })
    }

    /// True if both pairs join the same two nodes, in either direction.
    pub fn same_endpoints(&self, other: &SdPair) -> bool {
        (self.source == other.source && self.dest == other.dest)
            || (self.source == other.dest && self.dest == other.source)
    }

    /// True if the endpoints are consecutive node indices.
    pub fn is_index_adjacent(&self) -> bool {
        self.source.abs_diff(self.dest) == 1
    }
}

impl std::fmt::Display for SdPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.source, self.dest)
    }
}

/// A demand and the paths granted to it so far, in grant order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    pair: SdPair,
    paths: Vec<Path>,
}

impl Demand {
    pub fn new(pair: SdPair) -> Self {
        Self {
            pair,
            paths: Vec::new(),
        }
    }

    pub fn pair(&self) -> SdPair {
        self.pair
    }

    /// Paths granted so far.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of paths granted.
    pub fn allocated(&self) -> usize {
        self.paths.len()
    }

    pub(crate) fn grant(&mut self, path: Path) {
        self.paths.push(path);
    }
}

/// Parameters for [`SdPairGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdPairConfig {
    /// Never draw pairs whose indices differ by exactly one
    pub exclude_index_adjacent: bool,
    /// Redraws allowed before the last candidate is taken as-is
    pub max_retries: usize,
}

impl Default for SdPairConfig {
    fn default() -> Self {
        Self {
            exclude_index_adjacent: true,
            max_retries: 11,
        }
    }
}

/// Draws random demands that are routable on a capacity graph.
#[derive(Debug, Clone, Default)]
pub struct SdPairGenerator {
    config: SdPairConfig,
}

impl SdPairGenerator {
    pub fn new(config: SdPairConfig) -> Self {
        Self { config }
    }

    /// Draw `count` demands.
    ///
    /// Needs `2 × count < node count`; otherwise logs a warning and returns
    /// nothing. A candidate is accepted when it has a path and is not
    /// already chosen (in either direction). After `max_retries` redraws the
    /// last candidate is accepted regardless, so the result may hold an
    /// infeasible or duplicate pair.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, graph: &CapacityGraph, count: usize) -> Vec<SdPair> {
        let nodes = graph.len();
        if 2 * count >= nodes {
            warn!(requested = count, nodes, "too many demands for node count, generating none");
            return Vec::new();
        }

        let candidates = self.candidates(nodes);
        if candidates.is_empty() {
            warn!(nodes, "no eligible source-destination pairs");
            return Vec::new();
        }

        let mut pairs: Vec<SdPair> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut attempt = 0;
            let pair = loop {
                let Some(&candidate) = candidates.choose(rng) else {
                    return pairs;
                };
                let fresh = !pairs.iter().any(|p| p.same_endpoints(&candidate));
                if fresh && has_path(graph, candidate.source, candidate.dest) {
                    break candidate;
                }
                if attempt == self.config.max_retries {
                    debug!(%candidate, fresh, "retries exhausted, accepting last candidate");
                    break candidate;
                }
                attempt += 1;
            };
            pairs.push(pair);
        }
        pairs
    }

    /// Every ordered pair the generator may draw.
    fn candidates(&self, nodes: usize) -> Vec<SdPair> {
        (0..nodes)
            .flat_map(|source| (0..nodes).map(move |dest| SdPair { source, dest }))
            .filter(|pair| pair.source != pair.dest)
            .filter(|pair| !(self.config.exclude_index_adjacent && pair.is_index_adjacent()))
            .collect()
    }
}
