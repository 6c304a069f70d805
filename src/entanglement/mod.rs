// src/entanglement/mod.rs

//! Two notions of entanglement, kept deliberately apart:
//!
//! * **Declared**: [`EntanglementGraph`] stores caller-supplied pairwise
//!   strengths. It annotates a register but is never derived from it, so the
//!   two can disagree.
//! * **Computed**: [`calculate_entanglement`] measures the reduced-state
//!   entropy actually present in a [`QuantumRegister`](crate::QuantumRegister).
//!
//! [`propagate_entanglement_effects`] acts on the declared graph only.

mod entropy;
mod graph;
mod propagation;

pub use entropy::{Matrix4, calculate_entanglement, reduced_density_matrix};
pub use graph::{EntanglementGraph, EntanglementNode};
pub use propagation::{coupling_gate, propagate_entanglement_effects};
