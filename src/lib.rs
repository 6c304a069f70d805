// src/lib.rs

//! `qentl` - multi-qubit state-vector simulation
//!
//! The crate models n qubits as 2^n complex amplitudes, applies unitary
//! gates in place, measures qubits with an explicit random source, and keeps
//! a separate graph of *declared* pairwise entanglement that can drive a
//! scripted propagation heuristic.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod entanglement;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{QentlError, QuantumRegister, QubitState, Result};
pub use operations::{Gate, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{MeasurementResult, SimulationResult, Simulator, SimulatorConfig, measure_qubit_in_register};
pub use entanglement::{
    EntanglementGraph,
    EntanglementNode,
    calculate_entanglement,
    propagate_entanglement_effects,
};
pub use validation::{check_normalization, check_unitary, validate_register};

// Example 1: Bell pair on a bare register
// Builds (|00> + |11>)/√2 with direct gate calls and measures both qubits
// with a seeded RNG.
/// ```
/// use qentl::{QuantumRegister, QentlError, calculate_entanglement};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut reg = QuantumRegister::new(2)?;
/// reg.hadamard(0)?;
/// reg.cnot(0, 1)?;
///
/// let amps = reg.amplitudes();
/// assert!((amps[0].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((amps[3].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((calculate_entanglement(&reg, 0, 1)? - 1.0).abs() < 1e-9);
///
/// let mut rng = StdRng::seed_from_u64(2024);
/// let first = reg.measure_qubit(0, &mut rng)?;
/// let second = reg.measure_qubit(1, &mut rng)?;
/// assert_eq!(first.result, second.result);
/// # Ok::<(), QentlError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Declared coupling driving propagation inside a circuit
/// ```
/// use qentl::{CircuitBuilder, EntanglementGraph, Gate, Operation, QentlError, Simulator, SimulatorConfig};
///
/// let mut graph = EntanglementGraph::new();
/// graph.add_entanglement(0, 2, 0.95)?; // strong: propagates a CNOT
///
/// let circuit = CircuitBuilder::new()
///     .gate(Gate::PauliX { target: 0 })
///     .add_op(Operation::Propagate { changed: 0 })
///     .measure([0, 1, 2])
///     .build();
/// println!("{}", circuit);
///
/// let simulator = Simulator::with_config(SimulatorConfig::new().with_seed(7))
///     .with_entanglement_graph(graph);
/// let result = simulator.run(&circuit)?;
/// assert_eq!(result.last_outcome(0), Some(1));
/// assert_eq!(result.last_outcome(1), Some(0));
/// assert_eq!(result.last_outcome(2), Some(1));
/// # Ok::<(), QentlError>(())
/// ```
#[doc(hidden)]
const _: () = ();
