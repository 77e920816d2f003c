//! Capacity graph: entangled link units available between node pairs.

use crate::{EntanglementError, NodeIndex, Result};

/// Number of link units on one edge.
pub type Capacity = u32;

/// Symmetric n×n matrix of available link units.
///
/// Derived once from node pairing state, then owned and depleted by a
/// scheduler run. Every mutation touches both directions of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityGraph {
    n: usize,
    cells: Vec<Capacity>,
}

impl CapacityGraph {
    /// An `n`-node graph with no capacity anywhere.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Build from rows, validating squareness, symmetry and a zero diagonal.
    pub fn from_rows<R: AsRef<[Capacity]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(EntanglementError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            if values[row] != 0 {
                return Err(EntanglementError::SelfCapacity(row));
            }
            cells.extend_from_slice(values);
        }

        let graph = Self { n, cells };
        for row in 0..n {
            for col in (row + 1)..n {
                if graph.get(row, col) != graph.get(col, row) {
                    return Err(EntanglementError::Asymmetric { row, col });
                }
            }
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Link units between `a` and `b` (0 when out of range).
    pub fn get(&self, a: NodeIndex, b: NodeIndex) -> Capacity {
        if a < self.n && b < self.n {
            self.cells[a * self.n + b]
        } else {
            0
        }
    }

    /// Nodes reachable from `node` over an edge with capacity left,
    /// in ascending index order.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let row: &[Capacity] = if node < self.n {
            &self.cells[node * self.n..(node + 1) * self.n]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|&(_, &units)| units > 0)
            .map(|(j, _)| j)
    }

    /// Add one link unit on `a -> b` only.
    ///
    /// Pairings are recorded at both endpoints, so deriving from node state
    /// calls this once per direction.
    pub(crate) fn increment_directed(&mut self, a: NodeIndex, b: NodeIndex) {
        self.cells[a * self.n + b] += 1;
    }

    /// Remove one link unit from the edge `{a, b}` in both directions.
    pub fn decrement_edge(&mut self, a: NodeIndex, b: NodeIndex) -> Result<()> {
        for index in [a, b] {
            if index >= self.n {
                return Err(EntanglementError::NodeOutOfRange {
                    index,
                    nodes: self.n,
                });
            }
        }
        if self.get(a, b) == 0 || self.get(b, a) == 0 {
            return Err(EntanglementError::EdgeExhausted { from: a, to: b });
        }
        self.cells[a * self.n + b] -= 1;
        self.cells[b * self.n + a] -= 1;
        Ok(())
    }

    /// True if `graph[i][j] == graph[j][i]` everywhere.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| ((i + 1)..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// False if any node has an all-zero row.
    ///
    /// This only detects isolated nodes; it does not prove every pair
    /// is mutually reachable.
    pub fn is_connected(&self) -> bool {
        (0..self.n).all(|i| self.neighbors(i).next().is_some())
    }

    /// Nodes whose row is all zero.
    pub fn isolated_nodes(&self) -> Vec<NodeIndex> {
        (0..self.n)
            .filter(|&i| self.neighbors(i).next().is_none())
            .collect()
    }

    /// Total link units over all undirected edges.
    pub fn total_links(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum::<u64>() / 2
    }

    /// Export as integer rows for rendering or reporting.
    pub fn rows(&self) -> Vec<Vec<Capacity>> {
        (0..self.n)
            .map(|i| self.cells[i * self.n..(i + 1) * self.n].to_vec())
            .collect()
    }
}

impl std::fmt::Display for CapacityGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(Capacity::to_string).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
