use quantum::{Circuit, Moment, NamedState, Operation, Pauli, PauliString, Qubit, Register};
use tn::truncation::Truncation;

/// Prepare `state` on one qubit the same way the basis-change layers do.
fn prepare(state: NamedState) -> Circuit {
    let q = Qubit(0);
    let (x, y) = match state {
        NamedState::Plus => (0.0, 0.5),
        NamedState::Minus => (0.0, -0.5),
        NamedState::PlusI => (-0.5, 0.0),
        NamedState::MinusI => (0.5, 0.0),
        NamedState::Zero => (0.0, 0.0),
        NamedState::One => (1.0, 0.0),
    };
    Circuit::from_moments(vec![
        Moment::new(vec![Operation::x_pow(q, x)]),
        Moment::new(vec![Operation::y_pow(q, y)]),
    ])
}

#[test]
fn power_gate_preparations_are_eigenstates() {
    for pauli in [Pauli::X, Pauli::Y, Pauli::Z] {
        for positive in [true, false] {
            let state = NamedState::eigenstate(pauli, positive);
            let circuit = prepare(state);
            let mut reg = Register::new([Qubit(0)], Truncation::exact());
            reg.apply_circuit(&circuit).unwrap();

            let e = reg.expectation(&PauliString::single(Qubit(0), pauli)).unwrap();
            let expected = if positive { 1.0 } else { -1.0 };
            assert!((e - expected).abs() < 1e-12, "{} gave <{}> = {}", state, pauli, e);
        }
    }
}

#[test]
fn coefficient_scales_expectation() {
    let mut reg = Register::new([Qubit(0)], Truncation::exact());
    reg.apply_circuit(&prepare(NamedState::One)).unwrap();
    let e = reg
        .expectation(&PauliString::single(Qubit(0), Pauli::Z).scaled(0.25))
        .unwrap();
    assert!((e + 0.25).abs() < 1e-12);
}
