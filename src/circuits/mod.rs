// src/circuits/mod.rs

//! Programs for the simulator: ordered lists of [`Operation`]s.
//!
//! A [`Circuit`] is the program a [`Simulator`](crate::Simulator) runs
//! against a fresh register: gates, measurements, propagation passes and
//! resets, in order.

use crate::core::constants::MAX_QUBITS;
use crate::operations::{Gate, Operation};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered sequence of operations over qubits `0..num_qubits()`.
///
/// Analogy: similar to `qiskit.QuantumCircuit`, without classical control flow.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Every qubit index referenced by an operation.
    qubits: BTreeSet<usize>,

    /// The ordered sequence of operations.
    operations: Vec<Operation>,

    /// Lower bound on the register width, for circuits with idle qubits.
    min_qubits: usize,
}

impl Circuit {
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
            min_qubits: 0,
        }
    }

    /// Appends `op`, recording the qubits it touches.
    pub fn add_operation(&mut self, op: Operation) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    /// Appends each operation in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Ensures the circuit runs on at least `num_qubits` qubits.
    pub fn reserve_qubits(&mut self, num_qubits: usize) {
        self.min_qubits = self.min_qubits.max(num_qubits);
    }

    /// Register width needed to run the circuit: one past the highest
    /// referenced qubit, or the reserved width if larger.
    pub fn num_qubits(&self) -> usize {
        let referenced = self.qubits.iter().next_back().map_or(0, |q| q.saturating_add(1));
        referenced.max(self.min_qubits)
    }

    /// Qubits referenced by at least one operation.
    pub fn qubits(&self) -> &BTreeSet<usize> {
        &self.qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

/// Chained construction of a [`Circuit`].
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Appends any operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Shorthand for `add_op(Operation::Apply(gate))`.
    pub fn gate(self, gate: Gate) -> Self {
        self.add_op(Operation::Apply(gate))
    }

    /// Shorthand for `add_op(Operation::Measure { targets })`.
    pub fn measure(self, targets: impl IntoIterator<Item = usize>) -> Self {
        self.add_op(Operation::Measure { targets: targets.into_iter().collect() })
    }

    /// Runs at least `num_qubits` qubits even if some stay idle.
    pub fn with_qubits(mut self, num_qubits: usize) -> Self {
        self.circuit.reserve_qubits(num_qubits);
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const CELL_WIDTH: usize = 7; // "───H───"
const WIRE: char = '─';
const LINK: char = '│';

/// Centres `symbol` in a wire cell, truncating symbols wider than the cell.
fn wire_cell(symbol: &str) -> String {
    let width = symbol.chars().count();
    if width >= CELL_WIDTH {
        return symbol.chars().take(CELL_WIDTH).collect();
    }
    let left = (CELL_WIDTH - width) / 2;
    let right = CELL_WIDTH - width - left;
    let wire = |n: usize| WIRE.to_string().repeat(n);
    format!("{}{}{}", wire(left), symbol, wire(right))
}

/// Row markers for gates that span more than one qubit.
fn gate_markers(gate: &Gate) -> Vec<(usize, &'static str)> {
    match gate {
        Gate::Cnot { control, target } => vec![(*control, "@"), (*target, "X")],
        Gate::Cz { control, target } => vec![(*control, "@"), (*target, "@")],
        Gate::ControlledPhase { control, target, .. } => vec![(*control, "@"), (*target, "P")],
        Gate::Toffoli { control_a, control_b, target } => {
            vec![(*control_a, "@"), (*control_b, "@"), (*target, "X")]
        }
        Gate::Swap { qubit_a, qubit_b } => vec![(*qubit_a, "x"), (*qubit_b, "x")],
        _ => Vec::new(),
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_qubits();
        let steps = self.operations.len();
        writeln!(f, "qentl::Circuit[{} operations on {} qubits]", steps, width)?;
        if steps == 0 || width == 0 {
            return Ok(());
        }
        if width > MAX_QUBITS {
            // Too wide to simulate, so too wide to draw
            return writeln!(f, "(not drawn: more than {} qubits)", MAX_QUBITS);
        }

        // cells[qubit][step] is the wire segment; links[qubit][step] joins qubit to qubit + 1
        let empty = wire_cell("");
        let mut cells = vec![vec![empty; steps]; width];
        let mut links = vec![vec![false; steps]; width];

        for (step, op) in self.operations.iter().enumerate() {
            match op {
                Operation::Apply(gate) => match gate.single_qubit_matrix() {
                    Some((target, _)) => cells[target][step] = wire_cell(gate.name()),
                    None => {
                        let markers = gate_markers(gate);
                        for (row, symbol) in &markers {
                            cells[*row][step] = wire_cell(symbol);
                        }
                        let top = markers.iter().map(|(r, _)| *r).min().unwrap_or(0);
                        let bottom = markers.iter().map(|(r, _)| *r).max().unwrap_or(0);
                        for row in links.iter_mut().take(bottom).skip(top) {
                            row[step] = true;
                        }
                    }
                },
                Operation::Measure { targets } => {
                    for &target in targets {
                        cells[target][step] = wire_cell("M");
                    }
                }
                Operation::Propagate { changed } => cells[*changed][step] = wire_cell("~"),
                Operation::Reset => {
                    for row in cells.iter_mut() {
                        row[step] = wire_cell("|0>");
                    }
                }
            }
        }

        let label_width = format!("q{}", width - 1).len() + 2;
        let gap = " ".repeat(CELL_WIDTH / 2);
        for (qubit, row) in cells.iter().enumerate() {
            writeln!(f, "{:<label_width$}{}", format!("q{}: ", qubit), row.concat())?;
            if qubit + 1 < width {
                let joins: String = links[qubit]
                    .iter()
                    .map(|&linked| format!("{}{}{}", gap, if linked { LINK } else { ' ' }, gap))
                    .collect();
                writeln!(f, "{}{}", " ".repeat(label_width), joins)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tracks_qubits_and_width() {
        let circuit = CircuitBuilder::new()
            .gate(Gate::Hadamard { target: 0 })
            .gate(Gate::Cnot { control: 0, target: 3 })
            .measure([0, 3])
            .build();

        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.qubits().iter().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(circuit.num_qubits(), 4);
    }

    #[test]
    fn test_reserved_width_only_grows() {
        let circuit = CircuitBuilder::new()
            .with_qubits(2)
            .gate(Gate::PauliX { target: 4 })
            .build();
        assert_eq!(circuit.num_qubits(), 5);

        let idle = CircuitBuilder::new().with_qubits(3).gate(Gate::PauliX { target: 0 }).build();
        assert_eq!(idle.num_qubits(), 3);
    }

    #[test]
    fn test_display_draws_controls_and_measurements() {
        let circuit = CircuitBuilder::new()
            .gate(Gate::Hadamard { target: 0 })
            .gate(Gate::Cnot { control: 0, target: 1 })
            .measure([0, 1])
            .build();
        let rendered = circuit.to_string();

        assert!(rendered.starts_with("qentl::Circuit[3 operations on 2 qubits]"));
        assert!(rendered.contains("q0: ───H──────@──────M───"));
        assert!(rendered.contains("q1: ──────────X──────M───"));
        assert!(rendered.contains('│'));
    }

    #[test]
    fn test_huge_qubit_index_does_not_overflow() {
        let circuit = CircuitBuilder::new().gate(Gate::PauliX { target: usize::MAX }).build();
        assert_eq!(circuit.num_qubits(), usize::MAX);
        let rendered = circuit.to_string();
        assert!(rendered.contains("not drawn"));
    }

    #[test]
    fn test_empty_circuit_display() {
        assert_eq!(Circuit::new().to_string(), "qentl::Circuit[0 operations on 0 qubits]\n");
    }
}
