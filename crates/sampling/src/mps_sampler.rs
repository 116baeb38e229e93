//! [`Sampler`] backed by the MPS register, with optional gate and readout noise.

use crate::error::SamplerError;
use crate::sampler::{Sampler, SweepResult};
use quantum::noise::ReadoutError;
use quantum::{BitMatrix, Circuit, Operation, ParamResolver, QuantumResult, Qubit, Register, Sweep};
use rayon::prelude::*;
use rng::ONDRng;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tn::truncation::Truncation;
use tracing::trace;

pub const DEFAULT_TRAJECTORIES: usize = 16;

/// Sweep points run in parallel, each on its own forked random stream.
///
/// With `depolarizing > 0` the shots of a point are split across
/// `trajectories` independent noisy runs of the circuit.
#[derive(Debug)]
pub struct MpsSampler {
    seed: String,
    trunc: Truncation,
    depolarizing: f64,
    trajectories: usize,
    readout: ReadoutError,
    calls: AtomicU64,
}

impl MpsSampler {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            trunc: Truncation::default(),
            depolarizing: 0.0,
            trajectories: DEFAULT_TRAJECTORIES,
            readout: ReadoutError::default(),
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_truncation(mut self, trunc: Truncation) -> Self {
        self.trunc = trunc;
        self
    }

    pub fn with_depolarizing(mut self, p: f64) -> Self {
        self.depolarizing = p;
        self
    }

    pub fn with_trajectories(mut self, trajectories: usize) -> Self {
        self.trajectories = trajectories.max(1);
        self
    }

    pub fn with_readout_error(mut self, readout: ReadoutError) -> Self {
        self.readout = readout;
        self
    }

    /// Number of `run_sweep` calls served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn run_point(
        &self,
        program: &Circuit,
        params: &ParamResolver,
        repetitions: usize,
        rng: &mut ONDRng,
    ) -> QuantumResult<SweepResult> {
        let resolved = program.resolve(params)?;
        let keys = measurement_keys(&resolved);
        let measured: Vec<Qubit> = keys.iter().flat_map(|(_, qs)| qs.iter().copied()).collect();

        let bits = if self.depolarizing > 0.0 {
            let mut bits = BitMatrix::new(measured.len());
            let base = repetitions / self.trajectories;
            let extra = repetitions % self.trajectories;
            for t in 0..self.trajectories {
                let shots = base + usize::from(t < extra);
                if shots == 0 {
                    continue;
                }
                let mut traj_rng = rng.fork(format!("trajectory{}", t).as_bytes());
                let mut reg = Register::for_circuit(&resolved, self.trunc);
                reg.apply_circuit_noisy(&resolved, self.depolarizing, &mut traj_rng)?;
                bits.extend(&reg.sample(&measured, shots, &mut traj_rng)?)?;
            }
            bits
        } else {
            let mut reg = Register::for_circuit(&resolved, self.trunc);
            reg.apply_circuit(&resolved)?;
            reg.sample(&measured, repetitions, rng)?
        };
        let bits = self.readout.apply(&bits, rng);

        let mut measurements = BTreeMap::new();
        let mut offset = 0;
        for (key, qubits) in keys {
            let columns: Vec<usize> = (offset..offset + qubits.len()).collect();
            offset += qubits.len();
            measurements.insert(key, bits.select_columns(&columns));
        }
        Ok(SweepResult {
            params: params.clone(),
            measurements,
        })
    }
}

/// Every measurement in the circuit, in program order.
fn measurement_keys(circuit: &Circuit) -> Vec<(String, Vec<Qubit>)> {
    circuit
        .operations()
        .filter_map(|op| match op {
            Operation::Measure { qubits, key } => Some((key.clone(), qubits.clone())),
            _ => None,
        })
        .collect()
}

impl Sampler for MpsSampler {
    fn run_sweep(
        &self,
        program: &Circuit,
        params: &Sweep,
        repetitions: usize,
    ) -> Result<Vec<SweepResult>, SamplerError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        trace!(call, points = params.len(), repetitions, "mps run_sweep");

        let root = ONDRng::new(self.seed.as_bytes()).fork(format!("call{}", call).as_bytes());
        let points: Vec<&ParamResolver> = params.iter().collect();
        let results = points
            .into_par_iter()
            .enumerate()
            .map(|(i, p)| {
                let mut rng = root.fork(format!("point{}", i).as_bytes());
                self.run_point(program, p, repetitions, &mut rng)
            })
            .collect::<QuantumResult<Vec<_>>>()?;
        Ok(results)
    }
}
