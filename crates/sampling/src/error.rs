use quantum::{QuantumError, Qubit};
use thiserror::Error;

/// Failure reported by a [`Sampler`](crate::sampler::Sampler), passed through untouched.
pub type SamplerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("stopping criteria's `more_repetitions` returned {0}; it must be 0 or positive")]
    NegativeRepetitions(i64),

    #[error("`qubits` ({qubits}) and `flips` ({flips}) must be equal length")]
    LengthMismatch { qubits: usize, flips: usize },

    /// The sampler broke the one-result-per-sweep-point contract.
    #[error("not as many results received as sweeps requested: {got} for {expected}")]
    ResultCountMismatch { expected: usize, got: usize },

    #[error(
        "{groups} parameter settings leave {repetitions} repetitions each under the \
         {ceiling}-repetition job limit; use fewer sweeps or split the job manually"
    )]
    TooManySweeps {
        groups: usize,
        repetitions: usize,
        ceiling: usize,
    },

    #[error("only a max setting with coefficient 1 can be padded, got {0}")]
    UnscaledPadding(f64),

    #[error("max setting has no {what} on {qubit}; pad it before resolving parameters")]
    UnpaddedSetting { qubit: Qubit, what: &'static str },

    #[error("setting `{setting}` cannot be read from the shots of max setting `{max_setting}`")]
    IncompatibleSetting {
        setting: String,
        max_setting: String,
    },

    /// Readout symmetrization halved a request below one shot per half.
    #[error("{requested} repetition(s) cannot be split across a flipped and an unflipped sweep")]
    ZeroRepetitions { requested: usize },

    #[error("setting `{0}` is not measured by this accumulator")]
    UnknownSetting(String),

    #[error("stopping criteria still unsatisfied after {0} rounds")]
    RoundLimitExceeded(usize),

    #[error("sampler failed: {0}")]
    Sampler(#[source] SamplerError),

    #[error(transparent)]
    Quantum(#[from] QuantumError),
}

pub type MeasurementResult<T> = Result<T, MeasurementError>;
