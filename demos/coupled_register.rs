//! Declares couplings between qubits and lets a change on one qubit
//! propagate to its neighbours, comparing declared and computed entanglement.

use qentl::{
    CircuitBuilder, EntanglementGraph, Gate, Operation, QentlError, QuantumRegister, Simulator, SimulatorConfig,
    calculate_entanglement, propagate_entanglement_effects,
};

fn main() -> Result<(), QentlError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut graph = EntanglementGraph::new();
    graph.add_entanglement(0, 1, 0.9)?; // CNOT
    graph.add_entanglement(0, 2, 0.6)?; // CZ
    graph.add_entanglement(0, 3, 0.3)?; // controlled phase
    graph.add_entanglement(0, 4, 0.1)?; // no effect
    println!("{}", graph);

    // --- Propagation on a bare register ---
    let mut reg = QuantumRegister::new(5)?;
    reg.hadamard(0)?;
    reg.hadamard(2)?;
    reg.hadamard(3)?;
    let applied = propagate_entanglement_effects(&graph, &mut reg, 0)?;
    println!("Propagated {} gates from q0", applied);

    println!("Declared vs computed entanglement:");
    for node in graph.iter() {
        let computed = calculate_entanglement(&reg, node.qubit_a(), node.qubit_b())?;
        println!("  {}  computed={:.4}", node, computed);
    }

    // --- Same coupling inside a circuit ---
    let circuit = CircuitBuilder::new()
        .gate(Gate::PauliX { target: 0 })
        .add_op(Operation::Propagate { changed: 0 })
        .measure(0..5)
        .build();
    println!("\nCoupled Circuit:\n{}", circuit);

    let simulator = Simulator::with_config(SimulatorConfig::new().with_seed(17)).with_entanglement_graph(graph);
    match simulator.run(&circuit) {
        Ok(result) => println!("{}", result),
        Err(e) => eprintln!("Simulation failed: {}", e),
    }
    Ok(())
}
