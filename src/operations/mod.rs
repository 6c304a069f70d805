// src/operations/mod.rs

//! Gates and circuit operations.
//!
//! A [`Gate`] is a unitary transformation naming the qubits it acts on.
//! An [`Operation`] is one step of a [`Circuit`](crate::Circuit): a gate,
//! a measurement, a propagation pass over the entanglement graph, or a reset.

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Row-major 2x2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Hadamard: |0> -> |+>, |1> -> |->.
pub fn hadamard_matrix() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// Pauli-X (bit flip).
pub fn pauli_x_matrix() -> Matrix2 {
    [
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()],
    ]
}

/// Pauli-Y.
pub fn pauli_y_matrix() -> Matrix2 {
    let i = Complex64::i();
    [[Complex64::zero(), -i], [i, Complex64::zero()]]
}

/// Pauli-Z (phase flip).
pub fn pauli_z_matrix() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), -Complex64::one()],
    ]
}

/// Rx(θ) = exp(-iθX/2).
pub fn rotate_x_matrix(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    let c = Complex64::new(cos, 0.0);
    let s = Complex64::new(0.0, -sin);
    [[c, s], [s, c]]
}

/// Ry(θ) = exp(-iθY/2).
pub fn rotate_y_matrix(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
        [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
    ]
}

/// Rz(θ) = exp(-iθZ/2).
pub fn rotate_z_matrix(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// diag(1, e^(iθ)).
pub fn phase_matrix(theta: f64) -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, theta)],
    ]
}

/// A unitary gate together with the qubits it targets.
///
/// Qubit `q` corresponds to bit `q` of a basis index, so `Cnot { control: 0, target: 1 }`
/// maps |01> (index 1) to |11> (index 3).
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    Hadamard { target: usize },
    PauliX { target: usize },
    PauliY { target: usize },
    PauliZ { target: usize },
    RotateX { target: usize, theta: f64 },
    RotateY { target: usize, theta: f64 },
    RotateZ { target: usize, theta: f64 },
    /// diag(1, e^(iθ))
    Phase { target: usize, theta: f64 },
    /// Phase(π/2)
    S { target: usize },
    /// Phase(π/4)
    T { target: usize },
    /// Caller-supplied single-qubit matrix. Rejected unless unitary.
    Unitary { target: usize, matrix: Matrix2 },
    Cnot { control: usize, target: usize },
    /// Symmetric in its two qubits.
    Cz { control: usize, target: usize },
    /// Multiplies |11> on (control, target) by e^(iθ).
    ControlledPhase { control: usize, target: usize, theta: f64 },
    Toffoli { control_a: usize, control_b: usize, target: usize },
    Swap { qubit_a: usize, qubit_b: usize },
}

impl Gate {
    /// Qubits touched by the gate, in declaration order.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::Hadamard { target }
            | Gate::PauliX { target }
            | Gate::PauliY { target }
            | Gate::PauliZ { target }
            | Gate::RotateX { target, .. }
            | Gate::RotateY { target, .. }
            | Gate::RotateZ { target, .. }
            | Gate::Phase { target, .. }
            | Gate::S { target }
            | Gate::T { target }
            | Gate::Unitary { target, .. } => vec![*target],
            Gate::Cnot { control, target }
            | Gate::Cz { control, target }
            | Gate::ControlledPhase { control, target, .. } => vec![*control, *target],
            Gate::Toffoli { control_a, control_b, target } => vec![*control_a, *control_b, *target],
            Gate::Swap { qubit_a, qubit_b } => vec![*qubit_a, *qubit_b],
        }
    }

    /// Short mnemonic used in logs and circuit listings.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Hadamard { .. } => "H",
            Gate::PauliX { .. } => "X",
            Gate::PauliY { .. } => "Y",
            Gate::PauliZ { .. } => "Z",
            Gate::RotateX { .. } => "Rx",
            Gate::RotateY { .. } => "Ry",
            Gate::RotateZ { .. } => "Rz",
            Gate::Phase { .. } => "P",
            Gate::S { .. } => "S",
            Gate::T { .. } => "T",
            Gate::Unitary { .. } => "U",
            Gate::Cnot { .. } => "CNOT",
            Gate::Cz { .. } => "CZ",
            Gate::ControlledPhase { .. } => "CP",
            Gate::Toffoli { .. } => "CCX",
            Gate::Swap { .. } => "SWAP",
        }
    }

    /// Rotation or phase angle of parameterised gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Gate::RotateX { theta, .. }
            | Gate::RotateY { theta, .. }
            | Gate::RotateZ { theta, .. }
            | Gate::Phase { theta, .. }
            | Gate::ControlledPhase { theta, .. } => Some(*theta),
            _ => None,
        }
    }

    /// Returns `(target, matrix)` for single-qubit gates, `None` otherwise.
    pub fn single_qubit_matrix(&self) -> Option<(usize, Matrix2)> {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
        let pair = match self {
            Gate::Hadamard { target } => (*target, hadamard_matrix()),
            Gate::PauliX { target } => (*target, pauli_x_matrix()),
            Gate::PauliY { target } => (*target, pauli_y_matrix()),
            Gate::PauliZ { target } => (*target, pauli_z_matrix()),
            Gate::RotateX { target, theta } => (*target, rotate_x_matrix(*theta)),
            Gate::RotateY { target, theta } => (*target, rotate_y_matrix(*theta)),
            Gate::RotateZ { target, theta } => (*target, rotate_z_matrix(*theta)),
            Gate::Phase { target, theta } => (*target, phase_matrix(*theta)),
            Gate::S { target } => (*target, phase_matrix(FRAC_PI_2)),
            Gate::T { target } => (*target, phase_matrix(FRAC_PI_4)),
            Gate::Unitary { target, matrix } => (*target, *matrix),
            _ => return None,
        };
        Some(pair)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::RotateX { target, theta }
            | Gate::RotateY { target, theta }
            | Gate::RotateZ { target, theta }
            | Gate::Phase { target, theta } => write!(f, "{}({:.4}) q{}", self.name(), theta, target),
            Gate::ControlledPhase { control, target, theta } => {
                write!(f, "{}({:.4}) q{}, q{}", self.name(), theta, control, target)
            }
            _ => {
                let qubits: Vec<String> = self.qubits().iter().map(|q| format!("q{}", q)).collect();
                write!(f, "{} {}", self.name(), qubits.join(", "))
            }
        }
    }
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Apply a unitary gate.
    Apply(Gate),

    /// Measure each target qubit in the computational basis, in order.
    Measure {
        /// Qubits to measure.
        targets: Vec<usize>,
    },

    /// Run the entanglement propagation heuristic for `changed`
    /// against the simulator's attached graph.
    Propagate {
        /// The qubit whose state just changed.
        changed: usize,
    },

    /// Return the register to |0...0>.
    Reset,
}

impl Operation {
    /// Returns every qubit index referenced by the operation.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Apply(gate) => gate.qubits(),
            Operation::Measure { targets } => targets.clone(),
            Operation::Propagate { changed } => vec![*changed],
            Operation::Reset => Vec::new(),
        }
    }
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Apply(gate)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Apply(gate) => write!(f, "{}", gate),
            Operation::Measure { targets } => {
                let qubits: Vec<String> = targets.iter().map(|q| format!("q{}", q)).collect();
                write!(f, "MEASURE {}", qubits.join(", "))
            }
            Operation::Propagate { changed } => write!(f, "PROPAGATE q{}", changed),
            Operation::Reset => write!(f, "RESET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_qubits_follow_declaration_order() {
        let gate = Gate::Toffoli { control_a: 2, control_b: 0, target: 1 };
        assert_eq!(gate.qubits(), vec![2, 0, 1]);
        assert!(gate.single_qubit_matrix().is_none());
    }

    #[test]
    fn test_rotation_by_pi_matches_pauli_up_to_phase() {
        // Rx(π) = -i X
        let rx = rotate_x_matrix(PI);
        let x = pauli_x_matrix();
        for row in 0..2 {
            for col in 0..2 {
                let expected = -Complex64::i() * x[row][col];
                assert_abs_diff_eq!(rx[row][col].re, expected.re, epsilon = 1e-12);
                assert_abs_diff_eq!(rx[row][col].im, expected.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_display_lists_parameters() {
        assert_eq!(Gate::Cnot { control: 0, target: 1 }.to_string(), "CNOT q0, q1");
        assert_eq!(
            Operation::Apply(Gate::Phase { target: 2, theta: 0.5 }).to_string(),
            "P(0.5000) q2"
        );
        assert_eq!(Operation::Measure { targets: vec![0, 3] }.to_string(), "MEASURE q0, q3");
    }
}
