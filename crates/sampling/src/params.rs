//! Basis-change circuit template and the rotation angles that drive it.
//!
//! The template flanks the user circuit with symbolic `X^t`/`Y^t` layers.
//! The initial pair (`{q}-Xi`, `{q}-Yi`) prepares each qubit's named input
//! state from |0⟩; the final pair (`{q}-Xf`, `{q}-Yf`) rotates the qubit's
//! observable onto Z just before a joint measurement keyed
//! [`MEASUREMENT_KEY`]. A flip bit adds an extra X on the final layer for
//! readout symmetrization; the caller undoes it classically.

use crate::error::{MeasurementError, MeasurementResult};
use quantum::{
    Circuit, InitObsSetting, Moment, NamedState, Operation, Param, ParamResolver, Pauli, Qubit,
};

pub const MEASUREMENT_KEY: &str = "z";

pub fn param_name(q: Qubit, slot: &str) -> String {
    format!("{}-{}", q, slot)
}

/// Copy of `circuit` wrapped in the parameterized basis-change layers.
/// The initial layers are left out when `needs_init_layer` is false.
pub fn with_parameterized_layers(
    circuit: &Circuit,
    qubits: &[Qubit],
    needs_init_layer: bool,
) -> Circuit {
    let layer = |slot: &str, gate: fn(Qubit, Param) -> Operation| {
        Moment::new(
            qubits
                .iter()
                .map(|&q| gate(q, Param::symbol(param_name(q, slot))))
                .collect(),
        )
    };
    let x_gate: fn(Qubit, Param) -> Operation = |q, t| Operation::x_pow(q, t);
    let y_gate: fn(Qubit, Param) -> Operation = |q, t| Operation::y_pow(q, t);

    let mut total = Circuit::new();
    if needs_init_layer {
        total.push(layer("Xi", x_gate));
        total.push(layer("Yi", y_gate));
    }
    total.append(circuit);
    total.push(layer("Xf", x_gate));
    total.push(layer("Yf", y_gate));
    total.push(Moment::new(vec![Operation::measure(qubits, MEASUREMENT_KEY)]));
    total
}

/// (X, Y) exponents of the final layer that map `pauli`'s +1 eigenstate to
/// |0⟩, or to |1⟩ when `flip` is set.
fn obs_to_param_val(pauli: Pauli, flip: bool) -> (f64, f64) {
    match (pauli, flip) {
        (Pauli::X, false) => (0.0, -0.5),
        (Pauli::X, true) => (0.0, 0.5),
        (Pauli::Y, false) => (0.5, 0.0),
        (Pauli::Y, true) => (-0.5, 0.0),
        (Pauli::Z, false) => (0.0, 0.0),
        (Pauli::Z, true) => (1.0, 0.0),
    }
}

/// (X, Y) exponents of the initial layer that prepare `state` from |0⟩.
fn state_to_param_val(state: NamedState) -> (f64, f64) {
    match state {
        NamedState::Plus => (0.0, 0.5),
        NamedState::Minus => (0.0, -0.5),
        NamedState::PlusI => (-0.5, 0.0),
        NamedState::MinusI => (0.5, 0.0),
        NamedState::Zero => (0.0, 0.0),
        NamedState::One => (1.0, 0.0),
    }
}

/// Bindings for a template built by [`with_parameterized_layers`].
///
/// `setting` must already be padded to every qubit in `qubits`; `flips`
/// pairs one flip bit with each qubit.
pub fn params_for_setting(
    setting: &InitObsSetting,
    flips: &[bool],
    qubits: &[Qubit],
    needs_init_layer: bool,
) -> MeasurementResult<ParamResolver> {
    if qubits.len() != flips.len() {
        return Err(MeasurementError::LengthMismatch {
            qubits: qubits.len(),
            flips: flips.len(),
        });
    }

    let mut params = ParamResolver::new();
    for (&q, &flip) in qubits.iter().zip(flips) {
        let pauli = setting
            .observable
            .get(q)
            .ok_or(MeasurementError::UnpaddedSetting {
                qubit: q,
                what: "observable",
            })?;
        let (xf, yf) = obs_to_param_val(pauli, flip);
        params.set(param_name(q, "Xf"), xf);
        params.set(param_name(q, "Yf"), yf);

        if needs_init_layer {
            let state = setting
                .init_state
                .get(q)
                .ok_or(MeasurementError::UnpaddedSetting {
                    qubit: q,
                    what: "initial state",
                })?;
            let (xi, yi) = state_to_param_val(state);
            params.set(param_name(q, "Xi"), xi);
            params.set(param_name(q, "Yi"), yi);
        }
    }
    Ok(params)
}

/// Extend `max_setting` with Z and |0⟩ on the `qubits` it does not touch,
/// so every group resolves the same parameter names.
pub fn pad_setting(
    max_setting: &InitObsSetting,
    qubits: &[Qubit],
) -> MeasurementResult<InitObsSetting> {
    let mut obs = max_setting.observable.clone();
    if obs.coefficient != 1.0 {
        return Err(MeasurementError::UnscaledPadding(obs.coefficient));
    }
    for &q in qubits {
        if !obs.contains(q) {
            obs = obs.with(q, Pauli::Z)?;
        }
    }

    let mut init_state = max_setting.init_state.clone();
    for &q in qubits {
        if !init_state.contains(q) {
            init_state = init_state.with(q, NamedState::Zero)?;
        }
    }

    Ok(InitObsSetting::new(init_state, obs))
}

/// Whether any group starts from something other than |0…0⟩.
pub fn needs_init_layer<'a, I>(max_settings: I) -> bool
where
    I: IntoIterator<Item = &'a InitObsSetting>,
{
    max_settings
        .into_iter()
        .any(|s| !s.init_state.is_all_zero())
}
