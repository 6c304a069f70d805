//! Error handling logic

use thiserror::Error;

/// Errors raised by register, measurement and entanglement operations.
///
/// Every fallible call in the crate validates its inputs before touching the
/// amplitude vector, so an `Err` always leaves the register untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QentlError {
    /// A qubit index is outside the register.
    #[error("Invalid qubit index {index} for {num_qubits}-qubit register")]
    InvalidQubitIndex {
        /// Offending index
        index: usize,
        /// Width of the register it was applied to
        num_qubits: usize,
    },

    /// A multi-qubit gate named the same qubit more than once.
    #[error("Qubit {qubit} appears more than once in a multi-qubit gate")]
    DuplicateQubit {
        /// Repeated qubit index
        qubit: usize,
    },

    /// Requested register width is zero or exceeds the supported maximum.
    #[error("Cannot allocate a register of {requested} qubits (supported: 1..={max})")]
    InvalidQubitCount {
        /// Requested width
        requested: usize,
        /// Largest supported width
        max: usize,
    },

    /// Amplitude buffer length does not match 2^n.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Squared norm deviates from 1 beyond tolerance.
    #[error("State is not normalized: sum(|c_i|^2) = {norm_sqr}")]
    NotNormalized {
        /// Observed squared norm
        norm_sqr: f64,
    },

    /// A gate angle is NaN or infinite.
    #[error("Gate {gate} has a non-finite angle {theta}")]
    NonFiniteAngle {
        /// Gate name
        gate: &'static str,
        /// Rejected angle
        theta: f64,
    },

    /// A custom gate matrix is not unitary.
    #[error("Gate matrix is not unitary (max deviation from identity {deviation:.3e})")]
    NotUnitary {
        /// Largest element of |U†U - I|
        deviation: f64,
    },

    /// The register carries no probability mass on the measured qubit.
    #[error("Degenerate measurement on qubit {qubit}: total probability {total_probability:.3e}")]
    DegenerateMeasurement {
        /// Measured qubit
        qubit: usize,
        /// p(0) + p(1) observed before collapse
        total_probability: f64,
    },

    /// Declared entanglement strength outside [0, 1].
    #[error("Entanglement strength {strength} is outside [0, 1]")]
    InvalidStrength {
        /// Offending strength
        strength: f64,
    },

    /// Attempted to annotate a qubit as entangled with itself.
    #[error("Qubit {qubit} cannot be entangled with itself")]
    SelfEntanglement {
        /// Qubit named on both ends
        qubit: usize,
    },

    /// No annotation exists for the requested pair.
    #[error("No entanglement recorded between qubits {qubit_a} and {qubit_b}")]
    UnknownEntanglement {
        /// Lower qubit index of the pair
        qubit_a: usize,
        /// Higher qubit index of the pair
        qubit_b: usize,
    },

    /// An operation is inconsistent with the current simulation context.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Failure message
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QentlError>;
