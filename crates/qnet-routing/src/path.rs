//! Simple-path enumeration and selection over a capacity graph.

use std::collections::VecDeque;

use crate::{CapacityGraph, NodeIndex, Result, RoutingError};

/// An ordered sequence of distinct nodes from source to destination.
///
/// Only meaningful against the capacity snapshot it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<NodeIndex>);

impl Path {
    /// Wrap a node sequence; needs at least one hop.
    pub fn new(nodes: Vec<NodeIndex>) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(RoutingError::PathTooShort(nodes.len()));
        }
        Ok(Self(nodes))
    }

    /// The nodes, source first.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.0
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a path has at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    pub fn source(&self) -> NodeIndex {
        self.0[0]
    }

    pub fn dest(&self) -> NodeIndex {
        self.0[self.0.len() - 1]
    }

    /// Consecutive node pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes: Vec<String> = self.0.iter().map(NodeIndex::to_string).collect();
        write!(f, "{}", nodes.join(" -> "))
    }
}

/// Every simple path from `source` to `dest` over edges with capacity left.
///
/// Depth-first with explicit backtracking; neighbors are tried in ascending
/// index order, so results come out in that order too. Out-of-range nodes
/// and `source == dest` give no paths.
///
/// Exponential in the worst case. Fine for graphs of a few dozen nodes.
pub fn find_all_simple_paths(graph: &CapacityGraph, source: NodeIndex, dest: NodeIndex) -> Vec<Path> {
    let mut paths = Vec::new();
    if source >= graph.len() || dest >= graph.len() || source == dest {
        return paths;
    }

    let mut on_path = vec![false; graph.len()];
    let mut current = vec![source];
    on_path[source] = true;
    extend_paths(graph, dest, &mut current, &mut on_path, &mut paths);
    paths
}

fn extend_paths(
    graph: &CapacityGraph,
    dest: NodeIndex,
    current: &mut Vec<NodeIndex>,
    on_path: &mut [bool],
    paths: &mut Vec<Path>,
) {
    let Some(&tip) = current.last() else {
        return;
    };

    for next in graph.neighbors(tip) {
        if on_path[next] {
            continue;
        }
        current.push(next);
        if next == dest {
            paths.push(Path(current.clone()));
        } else {
            on_path[next] = true;
            extend_paths(graph, dest, current, on_path, paths);
            on_path[next] = false;
        }
        current.pop();
    }
}

/// The path with the fewest nodes; the first one wins ties.
pub fn select_path(paths: &[Path]) -> Option<&Path> {
    paths.iter().min_by_key(|path| path.len())
}

/// True if `dest` is reachable from `source` over edges with capacity left.
pub fn has_path(graph: &CapacityGraph, source: NodeIndex, dest: NodeIndex) -> bool {
    if source >= graph.len() || dest >= graph.len() || source == dest {
        return false;
    }

    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if next == dest {
                return true;
            }
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}
