// src/simulation/mod.rs

//! Executes [`Circuit`]s against a [`QuantumRegister`].
//!
//! This module contains the `Simulator` entry point, the bit-mask kernels in
//! `engine` that mutate amplitudes in place, and the measurement operator.

mod config;
pub(crate) mod engine;
pub(crate) mod measurement;
mod results;

pub use config::SimulatorConfig;
pub use measurement::{MeasurementResult, measure_qubit_in_register};
pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{QentlError, QuantumRegister, Result};
use crate::entanglement::{EntanglementGraph, propagate_entanglement_effects};
use crate::operations::Operation;
use crate::validation;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, debug_span, warn};

/// Runs circuits on a fresh register with a seeded measurement RNG.
///
/// An [`EntanglementGraph`] can be attached for circuits that contain
/// [`Operation::Propagate`] steps.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    graph: Option<EntanglementGraph>,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Simulator with the given configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config, graph: None }
    }

    /// Attaches the graph consulted by `Operation::Propagate`.
    pub fn with_entanglement_graph(mut self, graph: EntanglementGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn entanglement_graph(&self) -> Option<&EntanglementGraph> {
        self.graph.as_ref()
    }

    /// Runs `circuit` on a register of `circuit.num_qubits()` qubits in |0...0>.
    /// A circuit that references no qubits runs on a single idle qubit.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with every measurement and the final register.
    /// * `Err(QentlError)` on the first operation that fails; nothing after it runs.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let register = QuantumRegister::new(circuit.num_qubits().max(1))?;
        self.run_on_register(circuit, register)
    }

    /// Runs `circuit` starting from `register` instead of |0...0>.
    ///
    /// # Errors
    /// `InvalidOperation` if the register is narrower than the circuit.
    pub fn run_on_register(&self, circuit: &Circuit, register: QuantumRegister) -> Result<SimulationResult> {
        if register.num_qubits() < circuit.num_qubits() {
            return Err(QentlError::InvalidOperation {
                message: format!(
                    "circuit needs {} qubits but the register has {}",
                    circuit.num_qubits(),
                    register.num_qubits()
                ),
            });
        }

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        let _span = debug_span!("simulate", num_qubits = register.num_qubits(), ops = circuit.len(), seed).entered();
        debug!("starting simulation");

        let mut result = SimulationResult::new(register, seed);
        for (step, op) in circuit.operations().iter().enumerate() {
            match op {
                Operation::Apply(gate) => {
                    result.register_mut().apply_gate(gate)?;
                    result.record_gates(1);
                }
                Operation::Measure { targets } => {
                    for &qubit in targets {
                        let measured = result.register_mut().measure_qubit(qubit, &mut rng)?;
                        result.record_measurement(measured);
                    }
                }
                Operation::Propagate { changed } => {
                    let graph = self.graph.as_ref().ok_or_else(|| QentlError::InvalidOperation {
                        message: "propagation requested but no entanglement graph is attached".to_string(),
                    })?;
                    let applied = propagate_entanglement_effects(graph, result.register_mut(), *changed)?;
                    result.record_gates(applied);
                }
                Operation::Reset => result.register_mut().reset(),
            }

            if self.config.validate_each_step {
                validation::validate_register(result.final_register(), Some(self.config.norm_tolerance))
                    .inspect_err(|e| warn!(step, op = %op, error = %e, "state validation failed"))?;
            }
        }

        debug!(measurements = result.measurements().len(), gates = result.gates_applied(), "simulation finished");
        Ok(result)
    }
}
