//! Policies deciding how many more shots a measurement group needs.

use crate::accumulator::BitstringAccumulator;
use tracing::warn;

pub const DEFAULT_REPETITIONS_PER_CHUNK: usize = 10_000;

/// Queried once per round for every unfinished group.
///
/// `more_repetitions` returns how many further repetitions to take, 0 once
/// the group is done. Negative values are a broken policy and abort the
/// measurement. Implementations should cap requests at some chunk size.
pub trait StoppingCriteria {
    fn more_repetitions(&self, accumulator: &BitstringAccumulator) -> i64;
}

/// Stop once the mean per-term variance of the group's estimate is small enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VarianceStoppingCriteria {
    pub variance_bound: f64,
    pub repetitions_per_chunk: usize,
}

impl VarianceStoppingCriteria {
    pub fn new(variance_bound: f64) -> Self {
        Self {
            variance_bound,
            repetitions_per_chunk: DEFAULT_REPETITIONS_PER_CHUNK,
        }
    }

    pub fn with_repetitions_per_chunk(mut self, chunk: usize) -> Self {
        self.repetitions_per_chunk = chunk;
        self
    }
}

impl StoppingCriteria for VarianceStoppingCriteria {
    fn more_repetitions(&self, accumulator: &BitstringAccumulator) -> i64 {
        let chunk = self.repetitions_per_chunk as i64;
        let n = accumulator.n_repetitions();
        if n == 0 {
            return chunk;
        }

        let cov = match accumulator.covariance() {
            Ok(cov) => cov,
            Err(err) => {
                // reading the results will report the same error
                warn!(%err, "covariance unavailable; requesting no more repetitions");
                return 0;
            }
        };
        let n_terms = cov.nrows();
        if n_terms == 0 {
            // nothing to estimate
            return 0;
        }

        let mut sum_variance = 0.0;
        for a in 0..n_terms {
            for b in 0..n_terms {
                sum_variance += cov.read(a, b);
            }
        }
        let var_of_the_e = sum_variance / n as f64;
        let vpt = var_of_the_e / n_terms as f64;

        // NaN (a single shot so far) compares false and keeps sampling.
        if vpt <= self.variance_bound {
            return 0;
        }
        chunk
    }
}

/// Stop once a fixed number of repetitions has been collected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepetitionsStoppingCriteria {
    pub total_repetitions: usize,
    pub repetitions_per_chunk: usize,
}

impl RepetitionsStoppingCriteria {
    pub fn new(total_repetitions: usize) -> Self {
        Self {
            total_repetitions,
            repetitions_per_chunk: DEFAULT_REPETITIONS_PER_CHUNK,
        }
    }

    pub fn with_repetitions_per_chunk(mut self, chunk: usize) -> Self {
        self.repetitions_per_chunk = chunk;
        self
    }
}

impl StoppingCriteria for RepetitionsStoppingCriteria {
    fn more_repetitions(&self, accumulator: &BitstringAccumulator) -> i64 {
        let done = accumulator.n_repetitions() as i64;
        let todo = self.total_repetitions as i64 - done;
        if todo <= 0 {
            return 0;
        }
        todo.min(self.repetitions_per_chunk as i64)
    }
}

/// The built-in policies as one closed set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingPolicy {
    Variance(VarianceStoppingCriteria),
    Repetitions(RepetitionsStoppingCriteria),
}

impl StoppingCriteria for StoppingPolicy {
    fn more_repetitions(&self, accumulator: &BitstringAccumulator) -> i64 {
        match self {
            StoppingPolicy::Variance(c) => c.more_repetitions(accumulator),
            StoppingPolicy::Repetitions(c) => c.more_repetitions(accumulator),
        }
    }
}

impl From<VarianceStoppingCriteria> for StoppingPolicy {
    fn from(c: VarianceStoppingCriteria) -> Self {
        StoppingPolicy::Variance(c)
    }
}

impl From<RepetitionsStoppingCriteria> for StoppingPolicy {
    fn from(c: RepetitionsStoppingCriteria) -> Self {
        StoppingPolicy::Repetitions(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meas_spec::MeasurementSpec;
    use quantum::{BitMatrix, InitObsSetting, ParamResolver, Pauli, PauliString, Qubit};

    fn z_accumulator(settings: &[(usize, f64)]) -> BitstringAccumulator {
        let max = InitObsSetting::observable_only(
            PauliString::new(1.0, [(Qubit(0), Pauli::Z), (Qubit(1), Pauli::Z)]).unwrap(),
        );
        let simul = settings
            .iter()
            .map(|&(q, c)| {
                InitObsSetting::observable_only(PauliString::single(Qubit(q), Pauli::Z).scaled(c))
            })
            .collect();
        let index = [(Qubit(0), 0), (Qubit(1), 1)].into_iter().collect();
        BitstringAccumulator::new(MeasurementSpec::new(max, ParamResolver::new()), simul, index)
    }

    #[test]
    fn repetitions_chunks_sum_to_total() {
        for &(total, chunk) in &[(10_000usize, 10_000usize), (25_000, 10_000), (7, 3), (1, 5)] {
            let crit = RepetitionsStoppingCriteria::new(total).with_repetitions_per_chunk(chunk);
            let mut acc = z_accumulator(&[(0, 1.0)]);
            let mut requested = 0usize;
            loop {
                let more = crit.more_repetitions(&acc);
                assert!(more >= 0);
                if more == 0 {
                    break;
                }
                let remaining = (total - acc.n_repetitions()) as i64;
                assert_eq!(more, remaining.min(chunk as i64));
                requested += more as usize;
                acc.consume_results(&BitMatrix::repeat_row(&[0, 0], more as usize))
                    .unwrap();
            }
            assert_eq!(requested, total);
            assert_eq!(crit.more_repetitions(&acc), 0);
        }
    }

    #[test]
    fn repetitions_done_when_overshot() {
        let crit = RepetitionsStoppingCriteria::new(5);
        let mut acc = z_accumulator(&[(0, 1.0)]);
        acc.consume_results(&BitMatrix::repeat_row(&[0, 0], 8)).unwrap();
        assert_eq!(crit.more_repetitions(&acc), 0);
    }

    #[test]
    fn variance_requests_chunk_when_empty() {
        let crit = VarianceStoppingCriteria::new(1e-12).with_repetitions_per_chunk(123);
        let acc = z_accumulator(&[(0, 1.0)]);
        assert_eq!(crit.more_repetitions(&acc), 123);
    }

    #[test]
    fn variance_stops_on_deterministic_outcomes() {
        let crit = VarianceStoppingCriteria::new(1e-3);
        let mut acc = z_accumulator(&[(0, 1.0), (1, 0.5)]);
        acc.consume_results(&BitMatrix::repeat_row(&[0, 1], 50)).unwrap();
        assert_eq!(crit.more_repetitions(&acc), 0);
        assert_eq!(crit.more_repetitions(&acc), 0);
    }

    #[test]
    fn variance_keeps_sampling_noisy_group() {
        // z0 alternates ±1: per-shot variance ~1, so 1/n per term.
        let mut acc = z_accumulator(&[(0, 1.0)]);
        let rows: Vec<Vec<u8>> = (0..100).map(|i| vec![(i % 2) as u8, 0]).collect();
        acc.consume_results(&BitMatrix::from_rows(2, &rows).unwrap()).unwrap();

        let strict = VarianceStoppingCriteria::new(1e-3).with_repetitions_per_chunk(500);
        assert_eq!(strict.more_repetitions(&acc), 500);

        let loose = VarianceStoppingCriteria::new(0.05);
        assert_eq!(loose.more_repetitions(&acc), 0);
    }

    #[test]
    fn single_shot_is_not_enough() {
        let crit = VarianceStoppingCriteria::new(10.0).with_repetitions_per_chunk(7);
        let mut acc = z_accumulator(&[(0, 1.0)]);
        acc.consume_results(&BitMatrix::repeat_row(&[0, 0], 1)).unwrap();
        assert_eq!(crit.more_repetitions(&acc), 7);
    }

    #[test]
    fn unreadable_group_requests_nothing() {
        let crit = VarianceStoppingCriteria::new(1.0).with_repetitions_per_chunk(50);
        let mut acc = z_accumulator(&[(5, 1.0)]);
        acc.consume_results(&BitMatrix::repeat_row(&[0, 0], 10)).unwrap();
        assert_eq!(crit.more_repetitions(&acc), 0);
        assert!(acc.covariance().is_err());
    }

    #[test]
    fn policy_enum_delegates() {
        let acc = z_accumulator(&[(0, 1.0)]);
        let p: StoppingPolicy = RepetitionsStoppingCriteria::new(40)
            .with_repetitions_per_chunk(15)
            .into();
        assert_eq!(p.more_repetitions(&acc), 15);
        let v: StoppingPolicy = VarianceStoppingCriteria::new(0.1).into();
        assert_eq!(v.more_repetitions(&acc), DEFAULT_REPETITIONS_PER_CHUNK as i64);
    }
}
