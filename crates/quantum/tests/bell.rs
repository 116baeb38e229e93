use quantum::{Circuit, Moment, Operation, Qubit, Register};
use rng::ONDRng;
use tn::truncation::Truncation;

fn bell() -> Circuit {
    let (q0, q1) = (Qubit(0), Qubit(1));
    Circuit::from_moments(vec![
        Moment::new(vec![Operation::H(q0)]),
        Moment::new(vec![Operation::Cnot { control: q0, target: q1 }]),
        Moment::new(vec![Operation::measure(&[q0, q1], "z")]),
    ])
}

#[test]
fn bell_state_z_correlation() {
    let circuit = bell();
    let mut reg = Register::for_circuit(&circuit, Truncation::exact());
    reg.apply_circuit(&circuit).unwrap();

    let qubits = circuit.measurement("z").unwrap();
    let mut rng = ONDRng::new(b"bell");
    let bits = reg.sample(&qubits, 400, &mut rng).unwrap();

    let mut counts = [[0usize; 2]; 2];
    for row in bits.iter_rows() {
        counts[row[0] as usize][row[1] as usize] += 1;
    }

    assert_eq!(counts[0][1], 0, "Found |01> in Bell state");
    assert_eq!(counts[1][0], 0, "Found |10> in Bell state");
    assert!(counts[0][0] > 0, "Never observed |00>, counts = {:?}", counts);
    assert!(counts[1][1] > 0, "Never observed |11>, counts = {:?}", counts);
}

#[test]
fn reversed_cnot_orientation() {
    let (q0, q1) = (Qubit(0), Qubit(1));
    let circuit = Circuit::from_moments(vec![
        Moment::new(vec![Operation::x_pow(q1, 1.0)]),
        Moment::new(vec![Operation::Cnot { control: q1, target: q0 }]),
    ]);
    let mut reg = Register::for_circuit(&circuit, Truncation::exact());
    reg.apply_circuit(&circuit).unwrap();

    let [p0, p1] = reg.probabilities(q0).unwrap();
    assert!(p0 < 1e-12 && (p1 - 1.0).abs() < 1e-12);
}

#[test]
fn distant_two_qubit_gate_is_rejected() {
    let circuit = Circuit::from_moments(vec![
        Moment::new(vec![Operation::Cz(Qubit(0), Qubit(2))]),
        Moment::new(vec![Operation::H(Qubit(1))]),
    ]);
    let mut reg = Register::for_circuit(&circuit, Truncation::exact());
    assert!(matches!(
        reg.apply_circuit(&circuit),
        Err(quantum::QuantumError::NonAdjacent { .. })
    ));
}
