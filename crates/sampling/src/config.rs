/// Default ceiling on the total repetitions of one batched sweep. Sized for
/// tens of minutes of sampling at roughly a thousand shots per second.
pub const MAX_REPETITIONS_PER_JOB: usize = 3_000_000;

/// Knobs of [`measure_grouped_settings`](crate::measure::measure_grouped_settings).
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementConfig {
    /// Hard limit on repetitions × sweep points per sampler call.
    pub max_repetitions_per_job: usize,
    /// Pair every request with a bit-flipped twin and fold both into one accumulator.
    pub readout_symmetrization: bool,
    /// Abort once this many rounds ran without every group finishing. `None` is
    /// unbounded: a [`StoppingCriteria`](crate::stopping::StoppingCriteria) that
    /// never returns 0 then keeps the loop running forever, so set a limit when
    /// using a custom one.
    pub max_rounds: Option<usize>,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            max_repetitions_per_job: MAX_REPETITIONS_PER_JOB,
            readout_symmetrization: false,
            max_rounds: None,
        }
    }
}

impl MeasurementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readout_symmetrization(mut self, enabled: bool) -> Self {
        self.readout_symmetrization = enabled;
        self
    }

    pub fn with_max_repetitions_per_job(mut self, ceiling: usize) -> Self {
        self.max_repetitions_per_job = ceiling;
        self
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }
}
