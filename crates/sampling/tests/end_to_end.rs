use quantum::noise::ReadoutError;
use quantum::setting::group_settings_greedy;
use quantum::{
    Circuit, InitObsSetting, Moment, NamedState, Operation, Param, Pauli, PauliString, Qubit,
    Sweep,
};
use sampling::{
    estimate_sum, measure_grouped_settings, MeasurementConfig, MpsSampler,
    RepetitionsStoppingCriteria, StoppingPolicy, VarianceStoppingCriteria,
};

fn bell() -> Circuit {
    Circuit::from_moments(vec![
        Moment::new(vec![Operation::H(Qubit(0))]),
        Moment::new(vec![Operation::Cnot {
            control: Qubit(0),
            target: Qubit(1),
        }]),
    ])
}

fn pair(p: Pauli, coefficient: f64) -> InitObsSetting {
    InitObsSetting::observable_only(
        PauliString::new(coefficient, [(Qubit(0), p), (Qubit(1), p)]).unwrap(),
    )
}

#[test]
fn bell_correlators_are_recovered() {
    let z0 = InitObsSetting::observable_only(PauliString::single(Qubit(0), Pauli::Z));
    let settings = vec![
        pair(Pauli::X, 1.0),
        pair(Pauli::Y, 1.0),
        pair(Pauli::Z, 1.0),
        z0.clone(),
    ];
    let grouped = group_settings_greedy(&settings);
    assert_eq!(grouped.len(), 3);

    let sampler = MpsSampler::new("bell");
    let crit = RepetitionsStoppingCriteria::new(2_000).with_repetitions_per_chunk(1_000);
    let run = measure_grouped_settings(
        &bell(),
        &grouped,
        &sampler,
        &crit,
        &MeasurementConfig::default(),
        None,
    )
    .unwrap();

    assert_eq!(run.rounds, 2);
    assert_eq!(sampler.calls(), 2);

    let results: Vec<_> = run
        .accumulators
        .iter()
        .flat_map(|acc| acc.results().unwrap())
        .collect();
    assert_eq!(results.len(), 4);
    for r in &results {
        assert_eq!(r.repetitions, 2_000);
    }
    let mean_of = |s: &InitObsSetting| {
        results
            .iter()
            .find(|r| &r.setting == s)
            .map(|r| r.mean)
            .unwrap()
    };
    assert!((mean_of(&pair(Pauli::X, 1.0)) - 1.0).abs() < 1e-12);
    assert!((mean_of(&pair(Pauli::Y, 1.0)) + 1.0).abs() < 1e-12);
    assert!((mean_of(&pair(Pauli::Z, 1.0)) - 1.0).abs() < 1e-12);
    assert!(mean_of(&z0).abs() < 0.1, "<Z0> = {}", mean_of(&z0));
}

#[test]
fn heisenberg_bond_energy_on_bell_pair() {
    // XX + YY + ZZ = 1 - 1 + 1 on the Bell pair
    let settings = vec![
        pair(Pauli::X, 0.5),
        pair(Pauli::Y, 0.5),
        pair(Pauli::Z, 0.5),
    ];
    let grouped = group_settings_greedy(&settings);
    let crit: StoppingPolicy = VarianceStoppingCriteria::new(1e-4)
        .with_repetitions_per_chunk(500)
        .into();
    let run = measure_grouped_settings(
        &bell(),
        &grouped,
        &MpsSampler::new("heisenberg"),
        &crit,
        &MeasurementConfig::default(),
        None,
    )
    .unwrap();

    assert_eq!(run.rounds, 1);
    let energy = estimate_sum(&run.accumulators).unwrap();
    assert!((energy.value - 0.5).abs() < 1e-12);
    assert!(energy.stderr < 1e-12);
}

#[test]
fn readout_symmetrization_balances_asymmetric_errors() {
    let flip = Circuit::from_moments(vec![Moment::new(vec![Operation::x_pow(Qubit(0), 1.0)])]);
    let z0 = InitObsSetting::observable_only(PauliString::single(Qubit(0), Pauli::Z));
    let grouped = vec![(z0.clone(), vec![z0.clone()])];
    let crit = RepetitionsStoppingCriteria::new(20_000).with_repetitions_per_chunk(20_000);

    let measure = |symmetrize: bool| {
        let sampler = MpsSampler::new("readout").with_readout_error(ReadoutError::new(0.0, 0.2));
        let config = MeasurementConfig::new().with_readout_symmetrization(symmetrize);
        let run =
            measure_grouped_settings(&flip, &grouped, &sampler, &crit, &config, None).unwrap();
        run.accumulators[0].mean(&z0).unwrap()
    };

    let plain = measure(false);
    let symmetric = measure(true);
    assert!((plain + 0.6).abs() < 0.03, "plain <Z> = {}", plain);
    assert!((symmetric + 0.8).abs() < 0.03, "symmetrized <Z> = {}", symmetric);
}

#[test]
fn prepared_input_states_are_measured() {
    let plus_x = InitObsSetting::new(
        [(Qubit(0), NamedState::Plus)].into_iter().collect(),
        PauliString::single(Qubit(0), Pauli::X),
    );
    let minus_y = InitObsSetting::new(
        [(Qubit(1), NamedState::MinusI)].into_iter().collect(),
        PauliString::single(Qubit(1), Pauli::Y),
    );
    let grouped = group_settings_greedy(&[plus_x.clone(), minus_y.clone()]);
    assert_eq!(grouped.len(), 1);

    let run = measure_grouped_settings(
        &Circuit::new(),
        &grouped,
        &MpsSampler::new("inputs"),
        &RepetitionsStoppingCriteria::new(200),
        &MeasurementConfig::new().with_readout_symmetrization(true),
        None,
    )
    .unwrap();

    let acc = &run.accumulators[0];
    assert_eq!(acc.n_repetitions(), 200);
    assert!((acc.mean(&plus_x).unwrap() - 1.0).abs() < 1e-12);
    assert!((acc.mean(&minus_y).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn circuit_sweep_points_are_measured_separately() {
    let circuit = Circuit::from_moments(vec![Moment::new(vec![Operation::x_pow(
        Qubit(0),
        Param::symbol("theta"),
    )])]);
    let z0 = InitObsSetting::observable_only(PauliString::single(Qubit(0), Pauli::Z));
    let sweep = Sweep::points("theta", &[0.0, 1.0]);

    let run = measure_grouped_settings(
        &circuit,
        &[(z0.clone(), vec![z0.clone()])],
        &MpsSampler::new("sweep"),
        &RepetitionsStoppingCriteria::new(50),
        &MeasurementConfig::default(),
        Some(&sweep),
    )
    .unwrap();

    let means: Vec<f64> = run
        .accumulators
        .iter()
        .map(|acc| acc.mean(&z0).unwrap())
        .collect();
    assert_eq!(means, vec![1.0, -1.0]);
}
