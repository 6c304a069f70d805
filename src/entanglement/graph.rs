// src/entanglement/graph.rs

use crate::core::{QentlError, QuantumRegister, Result};
use std::fmt;
use tracing::debug;

use super::entropy::calculate_entanglement;

/// A declared coupling between two qubits. `qubit_a < qubit_b` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntanglementNode {
    qubit_a: usize,
    qubit_b: usize,
    strength: f64,
}

impl EntanglementNode {
    pub fn qubit_a(&self) -> usize {
        self.qubit_a
    }

    pub fn qubit_b(&self) -> usize {
        self.qubit_b
    }

    /// Declared strength in [0, 1].
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Returns `true` if `qubit` is either endpoint.
    pub fn touches(&self, qubit: usize) -> bool {
        self.qubit_a == qubit || self.qubit_b == qubit
    }

    /// The endpoint opposite `qubit`, or `None` if the edge does not touch it.
    pub fn other(&self, qubit: usize) -> Option<usize> {
        if self.qubit_a == qubit {
            Some(self.qubit_b)
        } else if self.qubit_b == qubit {
            Some(self.qubit_a)
        } else {
            None
        }
    }
}

impl fmt::Display for EntanglementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{} <-> q{} ({:.3})", self.qubit_a, self.qubit_b, self.strength)
    }
}

/// Declared pairwise entanglement annotations.
///
/// The graph is bookkeeping only: strengths are whatever the caller declares
/// and are never derived from, or checked against, a register's amplitudes.
/// Use [`calculate_entanglement`] for the entropy actually present in a state,
/// or [`record_computed_entanglement`](Self::record_computed_entanglement) to
/// store that value as an annotation.
///
/// At most one edge exists per unordered pair; adding an existing pair
/// overwrites its strength.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntanglementGraph {
    nodes: Vec<EntanglementNode>,
}

fn ordered_pair(a: usize, b: usize) -> Result<(usize, usize)> {
    if a == b {
        return Err(QentlError::SelfEntanglement { qubit: a });
    }
    Ok((a.min(b), a.max(b)))
}

fn check_strength(strength: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&strength) {
        return Err(QentlError::InvalidStrength { strength });
    }
    Ok(())
}

impl EntanglementGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `strength` between `a` and `b` (in either order).
    /// A new pair goes to the front of the graph; an existing pair is
    /// updated where it stands.
    ///
    /// # Errors
    /// * `SelfEntanglement` if `a == b`.
    /// * `InvalidStrength` if `strength` is NaN or outside [0, 1].
    pub fn add_entanglement(&mut self, a: usize, b: usize, strength: f64) -> Result<()> {
        let (qubit_a, qubit_b) = ordered_pair(a, b)?;
        check_strength(strength)?;

        match self.position(qubit_a, qubit_b) {
            Some(index) => {
                let node = &mut self.nodes[index];
                debug!(qubit_a, qubit_b, old = node.strength, new = strength, "updated entanglement");
                node.strength = strength;
            }
            None => {
                debug!(qubit_a, qubit_b, strength, "added entanglement");
                self.nodes.insert(0, EntanglementNode { qubit_a, qubit_b, strength });
            }
        }
        Ok(())
    }

    /// Looks up the edge between `a` and `b`, in either order.
    pub fn find_entanglement(&self, a: usize, b: usize) -> Option<&EntanglementNode> {
        let (qubit_a, qubit_b) = (a.min(b), a.max(b));
        self.position(qubit_a, qubit_b).map(|i| &self.nodes[i])
    }

    /// Changes the strength of an existing edge.
    ///
    /// # Errors
    /// `UnknownEntanglement` if no edge exists for the pair, plus the
    /// validation errors of [`add_entanglement`](Self::add_entanglement).
    pub fn update_entanglement(&mut self, a: usize, b: usize, strength: f64) -> Result<()> {
        let (qubit_a, qubit_b) = ordered_pair(a, b)?;
        check_strength(strength)?;
        let index = self
            .position(qubit_a, qubit_b)
            .ok_or(QentlError::UnknownEntanglement { qubit_a, qubit_b })?;
        self.nodes[index].strength = strength;
        Ok(())
    }

    /// Removes the edge between `a` and `b`. Returns the removed edge,
    /// or `None` (leaving the graph unchanged) if the pair was not present.
    pub fn remove_entanglement(&mut self, a: usize, b: usize) -> Option<EntanglementNode> {
        let (qubit_a, qubit_b) = (a.min(b), a.max(b));
        let index = self.position(qubit_a, qubit_b)?;
        debug!(qubit_a, qubit_b, "removed entanglement");
        Some(self.nodes.remove(index))
    }

    /// Computes the entanglement entropy of `(a, b)` in `register` and stores
    /// it as the declared strength. Returns the stored value.
    pub fn record_computed_entanglement(
        &mut self,
        register: &QuantumRegister,
        a: usize,
        b: usize,
    ) -> Result<f64> {
        let strength = calculate_entanglement(register, a, b)?;
        self.add_entanglement(a, b, strength)?;
        Ok(strength)
    }

    /// Number of edges.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all edges, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = &EntanglementNode> {
        self.nodes.iter()
    }

    /// Edges touching `qubit`.
    pub fn neighbors(&self, qubit: usize) -> impl Iterator<Item = &EntanglementNode> {
        self.nodes.iter().filter(move |node| node.touches(qubit))
    }

    /// Removes every edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn position(&self, qubit_a: usize, qubit_b: usize) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.qubit_a == qubit_a && node.qubit_b == qubit_b)
    }
}

impl fmt::Display for EntanglementGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EntanglementGraph ({} edges):", self.nodes.len())?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}
