//! Expansion of pending measurement specs into concrete sweep points.

use crate::error::MeasurementResult;
use crate::meas_spec::MeasurementSpec;
use crate::params::params_for_setting;
use quantum::{ParamResolver, Qubit, Sweep};

/// A [`MeasurementSpec`] paired with the readout flips to apply when
/// executing it. `index` points back at the spec's accumulator.
#[derive(Clone, Debug, PartialEq)]
pub struct FlippyMeasurementSpec<'a> {
    pub index: usize,
    pub meas_spec: &'a MeasurementSpec,
    pub flips: Vec<bool>,
    pub qubits: &'a [Qubit],
}

impl<'a> FlippyMeasurementSpec<'a> {
    /// Rotation bindings first, then the spec's own circuit parameters.
    pub fn param_resolver(&self, needs_init_layer: bool) -> MeasurementResult<ParamResolver> {
        let mut params = params_for_setting(
            &self.meas_spec.max_setting,
            &self.flips,
            self.qubits,
            needs_init_layer,
        )?;
        params.extend(&self.meas_spec.circuit_params);
        Ok(params)
    }
}

/// Split each pending spec (`todo` indexes into `specs`) into the flip
/// variants to execute and return the per-variant repetition count.
///
/// Without symmetrization every spec runs once, unflipped, for the full
/// `repetitions`. With it, an unflipped and an all-flipped variant each run
/// `repetitions / 2` (rounded down).
pub fn subdivide_meas_specs<'a>(
    todo: &[usize],
    specs: &'a [MeasurementSpec],
    repetitions: usize,
    qubits: &'a [Qubit],
    readout_symmetrization: bool,
) -> (Vec<FlippyMeasurementSpec<'a>>, usize) {
    let n = qubits.len();
    let mut flippy = Vec::with_capacity(todo.len() * if readout_symmetrization { 2 } else { 1 });
    for &index in todo {
        let meas_spec = &specs[index];
        let variants: &[bool] = if readout_symmetrization {
            &[false, true]
        } else {
            &[false]
        };
        for &flip in variants {
            flippy.push(FlippyMeasurementSpec {
                index,
                meas_spec,
                flips: vec![flip; n],
                qubits,
            });
        }
    }

    let repetitions = if readout_symmetrization {
        repetitions / 2
    } else {
        repetitions
    };
    (flippy, repetitions)
}

/// One sweep point per flippy spec, in the same order.
pub fn to_sweep(
    flippy: &[FlippyMeasurementSpec<'_>],
    needs_init_layer: bool,
) -> MeasurementResult<Sweep> {
    let points = flippy
        .iter()
        .map(|f| f.param_resolver(needs_init_layer))
        .collect::<MeasurementResult<Vec<_>>>()?;
    Ok(Sweep::from_resolvers(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum::{InitObsSetting, Pauli, PauliString};

    fn specs() -> Vec<MeasurementSpec> {
        let zz = InitObsSetting::observable_only(
            PauliString::new(1.0, [(Qubit(0), Pauli::Z), (Qubit(1), Pauli::Z)]).unwrap(),
        );
        let xx = InitObsSetting::observable_only(
            PauliString::new(1.0, [(Qubit(0), Pauli::X), (Qubit(1), Pauli::X)]).unwrap(),
        );
        let theta: ParamResolver = [("theta", 0.25)].into_iter().collect();
        vec![
            MeasurementSpec::new(zz, theta.clone()),
            MeasurementSpec::new(xx, theta),
        ]
    }

    #[test]
    fn plain_split_keeps_repetitions() {
        let specs = specs();
        let qubits = Qubit::range(2);
        let (flippy, reps) = subdivide_meas_specs(&[1], &specs, 1_000, &qubits, false);
        assert_eq!(reps, 1_000);
        assert_eq!(flippy.len(), 1);
        assert_eq!(flippy[0].index, 1);
        assert_eq!(flippy[0].flips, vec![false, false]);
    }

    #[test]
    fn symmetrized_split_halves_repetitions() {
        let specs = specs();
        let qubits = Qubit::range(2);
        let (flippy, reps) = subdivide_meas_specs(&[0, 1], &specs, 1_001, &qubits, true);
        assert_eq!(reps, 500);
        let shape: Vec<(usize, bool)> = flippy.iter().map(|f| (f.index, f.flips[0])).collect();
        assert_eq!(shape, vec![(0, false), (0, true), (1, false), (1, true)]);
        assert!(flippy.iter().all(|f| f.flips.iter().all(|&b| b == f.flips[0])));
    }

    #[test]
    fn resolver_puts_rotations_before_circuit_params() {
        let specs = specs();
        let qubits = Qubit::range(2);
        let (flippy, _) = subdivide_meas_specs(&[1], &specs, 10, &qubits, true);
        let flipped = flippy[1].param_resolver(false).unwrap();
        let names: Vec<&str> = flipped.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["q(0)-Xf", "q(0)-Yf", "q(1)-Xf", "q(1)-Yf", "theta"]
        );
        assert_eq!(flipped.get("q(0)-Yf"), Some(0.5));
        assert_eq!(flipped.get("theta"), Some(0.25));

        let sweep = to_sweep(&flippy, false).unwrap();
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.iter().next().unwrap().get("q(1)-Yf"), Some(-0.5));
    }
}
