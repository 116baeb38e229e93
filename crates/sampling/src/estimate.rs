use crate::accumulator::BitstringAccumulator;
use crate::error::MeasurementResult;
use std::fmt;

/// Value with its standard error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub stderr: f64,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} ± {:.6}", self.value, self.stderr)
    }
}

/// Sum of every setting's mean over all accumulators.
///
/// Settings sharing an accumulator were read from the same shots, so their
/// covariance enters the error; distinct accumulators are independent.
pub fn estimate_sum(accumulators: &[BitstringAccumulator]) -> MeasurementResult<Estimate> {
    let mut value = 0.0;
    let mut variance = 0.0;
    for acc in accumulators {
        for setting in acc.simul_settings() {
            value += acc.mean(setting)?;
        }
        let cov = acc.covariance()?;
        let mut total = 0.0;
        for a in 0..cov.nrows() {
            for b in 0..cov.ncols() {
                total += cov.read(a, b);
            }
        }
        variance += total / acc.n_repetitions() as f64;
    }
    Ok(Estimate {
        value,
        stderr: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meas_spec::MeasurementSpec;
    use quantum::{BitMatrix, InitObsSetting, ParamResolver, Pauli, PauliString, Qubit};

    #[test]
    fn perfectly_correlated_terms_add_their_errors() {
        let z0 = InitObsSetting::observable_only(PauliString::single(Qubit(0), Pauli::Z));
        let z0_twice = InitObsSetting::observable_only(
            PauliString::single(Qubit(0), Pauli::Z).scaled(2.0),
        );
        let index = [(Qubit(0), 0)].into_iter().collect();
        let mut acc = BitstringAccumulator::new(
            MeasurementSpec::new(z0.clone(), ParamResolver::new()),
            vec![z0.clone(), z0_twice.clone()],
            index,
        );
        let rows: Vec<Vec<u8>> = (0..4).map(|i| vec![(i % 2) as u8]).collect();
        acc.consume_results(&BitMatrix::from_rows(1, &rows).unwrap()).unwrap();

        let est = estimate_sum(&[acc.clone()]).unwrap();
        assert!(est.value.abs() < 1e-12);
        // 3·Z0 on alternating shots: sample variance 12, over 4 shots
        let expected = (acc.stderr(&z0).unwrap() + acc.stderr(&z0_twice).unwrap()).powi(2);
        assert!((est.stderr.powi(2) - expected).abs() < 1e-12);
        assert!((est.stderr.powi(2) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn no_groups_is_zero() {
        let est = estimate_sum(&[]).unwrap();
        assert_eq!(est, Estimate { value: 0.0, stderr: 0.0 });
    }
}
