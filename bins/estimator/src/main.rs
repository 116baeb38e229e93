use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use quantum::hamiltonian::{Hamiltonian, Heisenberg};
use quantum::noise::ReadoutError;
use quantum::setting::group_settings_greedy;
use quantum::{
    Circuit, InitObsSetting, Moment, Operation, PauliString, QuantumResult, Qubit, Register,
};
use sampling::{
    estimate_sum, measure_grouped_settings, MeasurementConfig, MpsSampler, ObservableResult,
    RepetitionsStoppingCriteria, StoppingPolicy, VarianceStoppingCriteria,
    MAX_REPETITIONS_PER_JOB,
};
use tn::truncation::Truncation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

/// Adaptive shot-based energy estimation on a GHZ state
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of qubits (at most 24)
    #[arg(long, default_value_t = 4)]
    n: usize,

    /// Hamiltonian whose terms are measured
    #[arg(long, value_enum, default_value_t = Model::Heisenberg)]
    model: Model,

    /// Z field h (Ising only)
    #[arg(long, default_value_t = 0.5)]
    field: f64,

    /// Nearest-neighbour coupling J
    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    /// When a measurement group is done
    #[arg(long, value_enum, default_value_t = Policy::Variance)]
    policy: Policy,

    /// Target variance per term (variance policy)
    #[arg(long, default_value_t = 1e-4)]
    variance_bound: f64,

    /// Shots per group (repetitions policy)
    #[arg(long, default_value_t = 10_000)]
    total_repetitions: usize,

    /// Largest number of shots requested per group per round
    #[arg(long, default_value_t = 10_000)]
    chunk: usize,

    /// Pair every request with a bit-flipped twin
    #[arg(long)]
    symmetrize: bool,

    /// Ceiling on repetitions x sweep points per sampler call
    #[arg(long, default_value_t = MAX_REPETITIONS_PER_JOB)]
    max_repetitions_per_job: usize,

    /// Give up after this many rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Maximum MPS bond dimension
    #[arg(long, default_value_t = 64)]
    max_bond: usize,

    /// SVD cutoff
    #[arg(long, default_value_t = 1e-10)]
    cutoff: f64,

    /// Depolarizing noise probability per gate
    #[arg(long, default_value_t = 0.0)]
    p: f64,

    /// Noisy trajectories per sweep point
    #[arg(long, default_value_t = 16)]
    trajectories: usize,

    /// Readout error p(0 -> 1)
    #[arg(long, default_value_t = 0.0)]
    p01: f64,

    /// Readout error p(1 -> 0)
    #[arg(long, default_value_t = 0.0)]
    p10: f64,

    /// RNG seed (full reproducibility)
    #[arg(long, default_value = "estimator")]
    seed: String,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Optional per-term CSV output
    #[arg(long)]
    out: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Model {
    Ising,
    Heisenberg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Policy {
    Variance,
    Repetitions,
}

/// H on q0, then a CNOT ladder.
fn ghz(n: usize) -> Circuit {
    let mut c = Circuit::new();
    c.push(Moment::new(vec![Operation::H(Qubit(0))]));
    for i in 0..n.saturating_sub(1) {
        c.push(Moment::new(vec![Operation::Cnot {
            control: Qubit(i),
            target: Qubit(i + 1),
        }]));
    }
    c
}

fn write_csv(path: &str, rows: &[(ObservableResult, f64)]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "term,mean,stderr,exact,repetitions")?;
    for (r, exact) in rows {
        writeln!(
            w,
            "{},{},{},{},{}",
            r.setting.observable,
            r.mean,
            r.stderr(),
            exact,
            r.repetitions
        )?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    if args.n < 2 {
        bail!("n must be at least 2, got {}", args.n);
    }
    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("failed to build Rayon thread pool")?;
    }

    let terms: Vec<PauliString> = match args.model {
        Model::Ising => Hamiltonian::ising(args.n, args.field, args.coupling).terms(),
        Model::Heisenberg => Heisenberg::uniform(args.n, args.coupling).terms(),
    };
    let settings: Vec<InitObsSetting> = terms
        .iter()
        .cloned()
        .map(InitObsSetting::observable_only)
        .collect();
    let grouped = group_settings_greedy(&settings);
    info!(terms = settings.len(), groups = grouped.len(), "grouped observables");

    let criteria: StoppingPolicy = match args.policy {
        Policy::Variance => VarianceStoppingCriteria::new(args.variance_bound)
            .with_repetitions_per_chunk(args.chunk)
            .into(),
        Policy::Repetitions => RepetitionsStoppingCriteria::new(args.total_repetitions)
            .with_repetitions_per_chunk(args.chunk)
            .into(),
    };
    let mut config = MeasurementConfig::new()
        .with_readout_symmetrization(args.symmetrize)
        .with_max_repetitions_per_job(args.max_repetitions_per_job);
    if let Some(rounds) = args.max_rounds {
        config = config.with_max_rounds(rounds);
    }

    let trunc = Truncation {
        max_bond: args.max_bond,
        cutoff: args.cutoff,
    };
    let sampler = MpsSampler::new(args.seed.clone())
        .with_truncation(trunc)
        .with_depolarizing(args.p)
        .with_trajectories(args.trajectories)
        .with_readout_error(ReadoutError::new(args.p01, args.p10));

    let circuit = ghz(args.n);
    let start = Instant::now();
    let run = measure_grouped_settings(&circuit, &grouped, &sampler, &criteria, &config, None)
        .context("measurement failed")?;
    let elapsed = start.elapsed().as_secs_f64();

    let mut reference = Register::for_circuit(&circuit, Truncation::exact());
    reference.apply_circuit(&circuit)?;

    let mut rows = Vec::with_capacity(settings.len());
    for acc in &run.accumulators {
        for r in acc.results()? {
            let exact = reference.expectation(&r.setting.observable)?;
            rows.push((r, exact));
        }
    }
    for (r, exact) in &rows {
        println!(
            "{:<24} {:>10.6} ± {:.6}   exact {:>9.6}   shots {}",
            r.setting.observable.to_string(),
            r.mean,
            r.stderr(),
            exact,
            r.repetitions
        );
    }

    let energy = estimate_sum(&run.accumulators)?;
    let exact: f64 = terms
        .iter()
        .map(|t| reference.expectation(t))
        .sum::<QuantumResult<f64>>()?;
    let shots: usize = run.accumulators.iter().map(|a| a.n_repetitions()).sum();
    println!(
        "Energy = {} (exact {:.6}) | rounds = {}, shots = {}, {:.3} s",
        energy, exact, run.rounds, shots, elapsed
    );
    for notice in &run.notices {
        println!("note: {}", notice);
    }

    if let Some(path) = &args.out {
        write_csv(path, &rows)?;
        info!(path = path.as_str(), "wrote per-term results");
    }
    Ok(())
}
