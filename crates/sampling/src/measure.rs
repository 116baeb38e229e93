//! The adaptive measurement loop.
//!
//! Every round asks the stopping criteria which groups still need shots,
//! submits one batched sweep covering all of them and folds the results back
//! into the per-group accumulators. The loop ends when no group asks for more.

use crate::accumulator::BitstringAccumulator;
use crate::config::MeasurementConfig;
use crate::error::{MeasurementError, MeasurementResult};
use crate::meas_spec::MeasurementSpec;
use crate::params::{needs_init_layer, pad_setting, with_parameterized_layers, MEASUREMENT_KEY};
use crate::sampler::Sampler;
use crate::splitter::{subdivide_meas_specs, to_sweep};
use crate::stopping::StoppingCriteria;
use crate::throttle::{check_meas_specs_still_todo, Notice};
use quantum::{Circuit, InitObsSetting, QuantumError, Qubit, Sweep};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Outcome of [`measure_grouped_settings`].
#[derive(Clone, Debug)]
pub struct MeasurementRun {
    /// One per (group, circuit sweep point), group-major.
    pub accumulators: Vec<BitstringAccumulator>,
    /// Every warning raised while planning rounds.
    pub notices: Vec<Notice>,
    /// Number of sampler calls made.
    pub rounds: usize,
}

/// Measure groups of simultaneously measurable settings on `circuit`.
///
/// `grouped_settings` pairs each max setting, which fixes the basis change,
/// with the settings estimated from its shots. `circuit_sweep` binds any
/// symbols of `circuit` itself; every group is measured at every point.
pub fn measure_grouped_settings<S, C>(
    circuit: &Circuit,
    grouped_settings: &[(InitObsSetting, Vec<InitObsSetting>)],
    sampler: &S,
    criteria: &C,
    config: &MeasurementConfig,
    circuit_sweep: Option<&Sweep>,
) -> MeasurementResult<MeasurementRun>
where
    S: Sampler + ?Sized,
    C: StoppingCriteria + ?Sized,
{
    let qubits: Vec<Qubit> = grouped_settings
        .iter()
        .flat_map(|(max, _)| max.init_state.qubits().chain(max.observable.qubits()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let qubit_to_index: BTreeMap<Qubit, usize> =
        qubits.iter().enumerate().map(|(i, &q)| (q, i)).collect();

    let needs_init = needs_init_layer(grouped_settings.iter().map(|(max, _)| max));
    let program = with_parameterized_layers(circuit, &qubits, needs_init);

    let unit = Sweep::unit();
    let circuit_sweep = circuit_sweep.unwrap_or(&unit);

    let mut specs = Vec::with_capacity(grouped_settings.len() * circuit_sweep.len());
    let mut accumulators = Vec::with_capacity(specs.capacity());
    for (max_setting, settings) in grouped_settings {
        let padded = pad_setting(max_setting, &qubits)?;
        if let Some(bad) = settings.iter().find(|s| !s.is_compatible_with(&padded)) {
            return Err(MeasurementError::IncompatibleSetting {
                setting: bad.to_string(),
                max_setting: max_setting.to_string(),
            });
        }
        for circuit_params in circuit_sweep.iter() {
            let spec = MeasurementSpec::new(padded.clone(), circuit_params.clone());
            accumulators.push(BitstringAccumulator::new(
                spec.clone(),
                settings.clone(),
                qubit_to_index.clone(),
            ));
            specs.push(spec);
        }
    }
    info!(
        groups = grouped_settings.len(),
        specs = specs.len(),
        qubits = qubits.len(),
        needs_init,
        "starting measurement"
    );

    let mut todo: Vec<usize> = (0..specs.len()).collect();
    let mut notices = Vec::new();
    let mut rounds = 0;
    loop {
        let plan = check_meas_specs_still_todo(
            &todo,
            &accumulators,
            criteria,
            config.max_repetitions_per_job,
        )?;
        notices.extend(plan.notices);
        todo = plan.still_todo;
        if todo.is_empty() {
            break;
        }
        if let Some(limit) = config.max_rounds {
            if rounds >= limit {
                return Err(MeasurementError::RoundLimitExceeded(limit));
            }
        }

        let (flippy, repetitions) = subdivide_meas_specs(
            &todo,
            &specs,
            plan.repetitions,
            &qubits,
            config.readout_symmetrization,
        );
        if repetitions == 0 {
            return Err(MeasurementError::ZeroRepetitions {
                requested: plan.repetitions,
            });
        }
        let sweep = to_sweep(&flippy, needs_init)?;
        debug!(
            round = rounds,
            pending = todo.len(),
            points = sweep.len(),
            repetitions,
            "submitting sweep"
        );

        let results = sampler
            .run_sweep(&program, &sweep, repetitions)
            .map_err(MeasurementError::Sampler)?;
        rounds += 1;
        if results.len() != flippy.len() {
            return Err(MeasurementError::ResultCountMismatch {
                expected: flippy.len(),
                got: results.len(),
            });
        }

        for (f, result) in flippy.iter().zip(&results) {
            let bits = result
                .measurement(MEASUREMENT_KEY)
                .ok_or_else(|| QuantumError::MissingKey(MEASUREMENT_KEY.to_string()))?;
            let corrected = bits.xor_mask(&f.flips)?;
            accumulators[f.index].consume_results(&corrected)?;
        }
    }

    info!(rounds, "measurement converged");
    Ok(MeasurementRun {
        accumulators,
        notices,
        rounds,
    })
}
