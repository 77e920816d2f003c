//! Symmetric 0/1 adjacency matrix.

use crate::{Result, TopologyError};

/// Index of a node in a topology (row/column of the matrix).
pub type NodeIndex = usize;

/// Raw physical adjacency between `n` nodes.
///
/// Stored row-major as a flat vector. Every constructor upholds the
/// invariants: square, symmetric, zero diagonal, entries in {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    n: usize,
    links: Vec<u8>,
}

impl Topology {
    /// A topology with `n` nodes and no links.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            links: vec![0; n * n],
        }
    }

    /// Every pair of distinct nodes linked.
    pub fn complete(n: usize) -> Self {
        let mut topology = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                topology.link(i, j);
            }
        }
        topology
    }

    /// Nodes linked in a cycle `0 - 1 - ... - (n-1) - 0`.
    pub fn ring(n: usize) -> Self {
        let mut topology = Self::empty(n);
        if n >= 2 {
            for i in 0..n {
                topology.link(i, (i + 1) % n);
            }
        }
        topology
    }

    /// Build a topology from integer rows, validating every invariant.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut links = Vec::with_capacity(n * n);

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(TopologyError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => links.push(0),
                    1 if row == col => return Err(TopologyError::SelfLink(row)),
                    1 => links.push(1),
                    _ => return Err(TopologyError::InvalidLink { row, col, value }),
                }
            }
        }

        let topology = Self { n, links };
        for row in 0..n {
            for col in (row + 1)..n {
                if topology.is_linked(row, col) != topology.is_linked(col, row) {
                    return Err(TopologyError::Asymmetric { row, col });
                }
            }
        }
        Ok(topology)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the topology has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// True if `a` and `b` are physically adjacent.
    ///
    /// Out-of-range indices are never linked.
    pub fn is_linked(&self, a: NodeIndex, b: NodeIndex) -> bool {
        a < self.n && b < self.n && self.links[a * self.n + b] == 1
    }

    /// Neighbors of `node` in ascending index order.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let row: &[u8] = if node < self.n {
            &self.links[node * self.n..(node + 1) * self.n]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|&(_, &link)| link == 1)
            .map(|(j, _)| j)
    }

    /// Number of neighbors of `node`.
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.neighbors(node).count()
    }

    /// Smallest degree over all nodes (0 for an empty topology).
    pub fn min_degree(&self) -> usize {
        (0..self.n).map(|i| self.degree(i)).min().unwrap_or(0)
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.links.iter().filter(|&&l| l == 1).count() / 2
    }

    /// True if every node can reach every other node over physical links.
    pub fn is_connected(&self) -> bool {
        if self.n == 0 {
            return true;
        }
        let mut seen = vec![false; self.n];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(node) = stack.pop() {
            for next in self.neighbors(node) {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// True if every entry is mirrored across the diagonal.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..self.n).all(|j| self.is_linked(i, j) == self.is_linked(j, i)))
    }

    /// Export as rows of 0/1 integers for rendering collaborators.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.links.chunks(self.n.max(1)).take(self.n).map(<[u8]>::to_vec).collect()
    }

    /// Set the link between two distinct nodes in both directions.
    pub(crate) fn link(&mut self, a: NodeIndex, b: NodeIndex) {
        debug_assert!(a != b, "self link on node {a}");
        self.links[a * self.n + b] = 1;
        self.links[b * self.n + a] = 1;
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
