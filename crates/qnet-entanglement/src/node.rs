//! Nodes with a fixed table of qubit slots.
//!
//! A slot is either free or paired with exactly one slot on a remote node.
//! Pairings are recorded at both ends, and slots are filled first-fit.

use crate::NodeIndex;

/// Reference to a slot on a (remote) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRef {
    /// Node owning the slot
    pub node: NodeIndex,
    /// Slot position on that node
    pub slot: usize,
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.node, self.slot)
    }
}

/// A network node with `capacity` qubit slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    index: NodeIndex,
    slots: Vec<Option<SlotRef>>,
    occupied: usize,
}

impl Node {
    /// Create a node with all slots free.
    pub fn new(index: NodeIndex, capacity: usize) -> Self {
        Self {
            index,
            slots: vec![None; capacity],
            occupied: 0,
        }
    }

    /// Position of this node in the topology.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of paired slots.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Number of free slots.
    pub fn free(&self) -> usize {
        self.capacity() - self.occupied
    }

    /// The full slot table.
    pub fn slots(&self) -> &[Option<SlotRef>] {
        &self.slots
    }

    /// The remote end paired with `slot`, if any.
    pub fn pairing(&self, slot: usize) -> Option<SlotRef> {
        self.slots.get(slot).copied().flatten()
    }

    /// Remote node of every occupied slot, in slot order.
    pub fn linked_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.slots.iter().flatten().map(|remote| remote.node)
    }

    /// Pair one free slot here with one free slot on `target`.
    ///
    /// Returns `false` without touching either node if one side is full.
    pub fn consume(&mut self, target: &mut Node) -> bool {
        let (Some(local), Some(remote)) = (self.first_free(), target.first_free()) else {
            return false;
        };

        self.slots[local] = Some(SlotRef {
            node: target.index,
            slot: remote,
        });
        target.slots[remote] = Some(SlotRef {
            node: self.index,
            slot: local,
        });
        self.occupied += 1;
        target.occupied += 1;
        true
    }

    fn first_free(&self) -> Option<usize> {
        if self.occupied == self.capacity() {
            return None;
        }
        self.slots.iter().position(Option::is_none)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Node: {}", self.index)?;
        writeln!(f, "Capacity: {}", self.capacity())?;
        writeln!(f, "Slots:")?;
        for (slot, pairing) in self.slots.iter().enumerate() {
            match pairing {
                Some(remote) => writeln!(f, "  {}:{} -> {}", self.index, slot, remote)?,
                None => writeln!(f, "  {}:{} -> free", self.index, slot)?,
            }
        }
        write!(f, "Occupied: {}", self.occupied)
    }
}
