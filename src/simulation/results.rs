// src/simulation/results.rs
use super::measurement::MeasurementResult;
use crate::core::QuantumRegister;
use std::collections::BTreeMap;
use std::fmt;

/// Holds the results of a circuit simulation: every measurement in
/// execution order, and the register as it stood after the last operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    measurements: Vec<MeasurementResult>,
    final_register: QuantumRegister,
    seed: u64,
    gates_applied: usize,
}

impl SimulationResult {
    pub(crate) fn new(final_register: QuantumRegister, seed: u64) -> Self {
        Self {
            measurements: Vec::new(),
            final_register,
            seed,
            gates_applied: 0,
        }
    }

    pub(crate) fn record_measurement(&mut self, measurement: MeasurementResult) {
        self.measurements.push(measurement);
    }

    pub(crate) fn record_gates(&mut self, count: usize) {
        self.gates_applied += count;
    }

    pub(crate) fn register_mut(&mut self) -> &mut QuantumRegister {
        &mut self.final_register
    }

    /// All measurements, in the order they were taken.
    pub fn measurements(&self) -> &[MeasurementResult] {
        &self.measurements
    }

    /// Most recent measured bit of `qubit`, or `None` if it was never measured.
    pub fn last_outcome(&self, qubit: usize) -> Option<u8> {
        self.measurements
            .iter()
            .rev()
            .find(|m| m.qubit == qubit)
            .map(|m| m.result)
    }

    /// Latest measured bit per qubit.
    pub fn outcomes(&self) -> BTreeMap<usize, u8> {
        self.measurements.iter().map(|m| (m.qubit, m.result)).collect()
    }

    /// The register after the final operation.
    pub fn final_register(&self) -> &QuantumRegister {
        &self.final_register
    }

    /// Consumes the result, returning the final register.
    pub fn into_register(self) -> QuantumRegister {
        self.final_register
    }

    /// Seed the measurement RNG was initialised with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Gates applied, including those added by propagation.
    pub fn gates_applied(&self) -> usize {
        self.gates_applied
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results (seed {}, {} gates):", self.seed, self.gates_applied)?;
        if self.measurements.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            writeln!(f, "  Measurements:")?;
            for m in &self.measurements {
                writeln!(f, "    {}", m)?;
            }
        }
        write!(f, "{}", self.final_register)
    }
}
