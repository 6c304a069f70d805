// src/entanglement/propagation.rs

//! Scripted side effects of declared entanglement.
//!
//! When a qubit changes, every declared neighbour receives a gate chosen
//! from the edge strength alone. This is a fixed heuristic over the
//! annotation graph, not a consequence of the register's actual state.

use super::graph::EntanglementGraph;
use crate::core::constants::propagation::{MODERATE, STRONG, WEAK};
use crate::core::{QuantumRegister, Result};
use crate::operations::Gate;
use std::f64::consts::PI;
use tracing::trace;

/// Gate propagated from `changed` to `other` for an edge of `strength`:
///
/// | strength            | gate                              |
/// |---------------------|-----------------------------------|
/// | > 0.8               | CNOT(changed → other)             |
/// | 0.5 ..= 0.8         | CZ(changed, other)                |
/// | 0.2 .. 0.5          | controlled phase of π·strength    |
/// | < 0.2               | none                              |
pub fn coupling_gate(changed: usize, other: usize, strength: f64) -> Option<Gate> {
    if strength > STRONG {
        Some(Gate::Cnot { control: changed, target: other })
    } else if strength >= MODERATE {
        Some(Gate::Cz { control: changed, target: other })
    } else if strength >= WEAK {
        Some(Gate::ControlledPhase { control: changed, target: other, theta: PI * strength })
    } else {
        None
    }
}

/// Applies [`coupling_gate`] for every edge of `graph` touching `changed`.
///
/// All gates are validated against `register` before any is applied, so an
/// edge naming a qubit outside the register fails the whole call with
/// `InvalidQubitIndex` and leaves the amplitudes untouched.
///
/// Returns the number of gates applied.
pub fn propagate_entanglement_effects(
    graph: &EntanglementGraph,
    register: &mut QuantumRegister,
    changed: usize,
) -> Result<usize> {
    register.check_qubit(changed)?;
    let gates: Vec<Gate> = graph
        .neighbors(changed)
        .filter_map(|node| {
            let other = node.other(changed)?;
            coupling_gate(changed, other, node.strength())
        })
        .collect();

    for gate in &gates {
        register.validate_gate(gate)?;
    }
    for gate in &gates {
        trace!(changed, gate = %gate, "propagating entanglement effect");
        register.apply_gate(gate)?;
    }
    Ok(gates.len())
}
