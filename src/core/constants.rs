//! Numeric limits and tolerances shared across the simulator.

/// Largest register width accepted by [`QuantumRegister::new`](crate::QuantumRegister::new).
/// 2^26 amplitudes occupy 1 GiB.
pub const MAX_QUBITS: usize = 26;

/// Allowed deviation of the squared norm from 1.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Probabilities at or below this value are treated as zero.
pub const PROBABILITY_EPSILON: f64 = 1e-12;

/// Allowed deviation of `U†U` from the identity for custom gates.
pub const UNITARY_TOLERANCE: f64 = 1e-9;

/// Thresholds for the entanglement propagation heuristic.
pub mod propagation {
    /// Above this strength a CNOT is propagated.
    pub const STRONG: f64 = 0.8;
    /// At or above this strength (up to `STRONG`) a CZ is propagated.
    pub const MODERATE: f64 = 0.5;
    /// At or above this strength (below `MODERATE`) a partial phase is propagated.
    pub const WEAK: f64 = 0.2;
}
