//! Raw shot storage and statistics for one measurement group.

use crate::error::{MeasurementError, MeasurementResult};
use crate::meas_spec::MeasurementSpec;
use faer::Mat;
use quantum::{BitMatrix, InitObsSetting, QuantumError, Qubit};
use std::collections::BTreeMap;

/// Summary of one estimated setting.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservableResult {
    pub setting: InitObsSetting,
    pub mean: f64,
    /// Variance of the mean.
    pub variance: f64,
    pub repetitions: usize,
}

impl ObservableResult {
    pub fn stderr(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Collects bitstrings for a [`MeasurementSpec`] and estimates every setting
/// measured alongside it.
#[derive(Clone, Debug)]
pub struct BitstringAccumulator {
    meas_spec: MeasurementSpec,
    simul_settings: Vec<InitObsSetting>,
    qubit_to_index: BTreeMap<Qubit, usize>,
    bitstrings: BitMatrix,
    chunk_sizes: Vec<usize>,
}

impl BitstringAccumulator {
    pub fn new(
        meas_spec: MeasurementSpec,
        simul_settings: Vec<InitObsSetting>,
        qubit_to_index: BTreeMap<Qubit, usize>,
    ) -> Self {
        let cols = qubit_to_index.len();
        Self {
            meas_spec,
            simul_settings,
            qubit_to_index,
            bitstrings: BitMatrix::new(cols),
            chunk_sizes: Vec::new(),
        }
    }

    pub fn meas_spec(&self) -> &MeasurementSpec {
        &self.meas_spec
    }

    pub fn simul_settings(&self) -> &[InitObsSetting] {
        &self.simul_settings
    }

    pub fn bitstrings(&self) -> &BitMatrix {
        &self.bitstrings
    }

    /// Sizes of every consumed batch, in arrival order.
    pub fn chunk_sizes(&self) -> &[usize] {
        &self.chunk_sizes
    }

    pub fn n_repetitions(&self) -> usize {
        self.bitstrings.rows()
    }

    /// Ingest one batch of already flip-corrected rows.
    pub fn consume_results(&mut self, bitstrings: &BitMatrix) -> MeasurementResult<()> {
        self.bitstrings.extend(bitstrings)?;
        self.chunk_sizes.push(bitstrings.rows());
        Ok(())
    }

    /// Per-shot value of `setting`'s observable: coefficient × parity of its qubits.
    pub fn observable_values(&self, setting: &InitObsSetting) -> MeasurementResult<Vec<f64>> {
        let obs = &setting.observable;
        let cols = obs
            .qubits()
            .map(|q| {
                self.qubit_to_index
                    .get(&q)
                    .copied()
                    .ok_or(MeasurementError::Quantum(QuantumError::UnknownQubit(q)))
            })
            .collect::<MeasurementResult<Vec<_>>>()?;

        Ok(self
            .bitstrings
            .iter_rows()
            .map(|row| {
                let parity = cols.iter().fold(0u8, |acc, &c| acc ^ row[c]);
                obs.coefficient * (1.0 - 2.0 * f64::from(parity))
            })
            .collect())
    }

    fn validate_setting(&self, setting: &InitObsSetting) -> MeasurementResult<()> {
        if self.simul_settings.contains(setting) {
            Ok(())
        } else {
            Err(MeasurementError::UnknownSetting(setting.to_string()))
        }
    }

    /// Sample mean; NaN before any shot arrived.
    pub fn mean(&self, setting: &InitObsSetting) -> MeasurementResult<f64> {
        self.validate_setting(setting)?;
        Ok(mean(&self.observable_values(setting)?))
    }

    /// Variance of the mean (ddof = 1); NaN below two shots.
    pub fn variance(&self, setting: &InitObsSetting) -> MeasurementResult<f64> {
        self.validate_setting(setting)?;
        let vals = self.observable_values(setting)?;
        Ok(sample_variance(&vals) / vals.len() as f64)
    }

    pub fn stderr(&self, setting: &InitObsSetting) -> MeasurementResult<f64> {
        Ok(self.variance(setting)?.sqrt())
    }

    /// Sample covariance (ddof = 1) between the per-shot values of every
    /// simultaneous setting. All entries are NaN below two shots.
    pub fn covariance(&self) -> MeasurementResult<Mat<f64>> {
        let k = self.simul_settings.len();
        let n = self.n_repetitions();

        let centered = self
            .simul_settings
            .iter()
            .map(|s| {
                let vals = self.observable_values(s)?;
                let m = mean(&vals);
                Ok(vals.into_iter().map(|v| v - m).collect::<Vec<_>>())
            })
            .collect::<MeasurementResult<Vec<_>>>()?;

        let mut cov = Mat::<f64>::zeros(k, k);
        for a in 0..k {
            for b in a..k {
                let c = if n < 2 {
                    f64::NAN
                } else {
                    let dot: f64 = centered[a].iter().zip(&centered[b]).map(|(x, y)| x * y).sum();
                    dot / (n - 1) as f64
                };
                cov.write(a, b, c);
                cov.write(b, a, c);
            }
        }
        Ok(cov)
    }

    pub fn results(&self) -> MeasurementResult<Vec<ObservableResult>> {
        self.simul_settings
            .iter()
            .map(|s| {
                Ok(ObservableResult {
                    setting: s.clone(),
                    mean: self.mean(s)?,
                    variance: self.variance(s)?,
                    repetitions: self.n_repetitions(),
                })
            })
            .collect()
    }
}

fn mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

fn sample_variance(vals: &[f64]) -> f64 {
    if vals.len() < 2 {
        return f64::NAN;
    }
    let m = mean(vals);
    vals.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (vals.len() - 1) as f64
}
