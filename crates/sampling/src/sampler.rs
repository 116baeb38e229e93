use crate::error::SamplerError;
use quantum::{BitMatrix, Circuit, ParamResolver, Sweep};
use std::collections::BTreeMap;

/// Bitstrings recorded at one sweep point, by measurement key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepResult {
    pub params: ParamResolver,
    pub measurements: BTreeMap<String, BitMatrix>,
}

impl SweepResult {
    pub fn measurement(&self, key: &str) -> Option<&BitMatrix> {
        self.measurements.get(key)
    }
}

/// Anything that can execute a parameterized circuit.
///
/// `run_sweep` must return exactly one result per point of `params`, in
/// sweep order, each holding `repetitions` rows per measurement key.
pub trait Sampler {
    fn run_sweep(
        &self,
        program: &Circuit,
        params: &Sweep,
        repetitions: usize,
    ) -> Result<Vec<SweepResult>, SamplerError>;
}

impl<S: Sampler + ?Sized> Sampler for &S {
    fn run_sweep(
        &self,
        program: &Circuit,
        params: &Sweep,
        repetitions: usize,
    ) -> Result<Vec<SweepResult>, SamplerError> {
        (**self).run_sweep(program, params, repetitions)
    }
}
