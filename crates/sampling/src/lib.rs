//! Adaptive sampling of Pauli observables.
//!
//! [`measure_grouped_settings`] keeps submitting batched, basis-rotated
//! sweeps to a [`Sampler`] until a [`StoppingCriteria`] is satisfied for
//! every measurement group.

pub mod accumulator;
pub mod config;
pub mod error;
pub mod estimate;
pub mod meas_spec;
pub mod measure;
pub mod mps_sampler;
pub mod params;
pub mod sampler;
pub mod splitter;
pub mod stopping;
pub mod throttle;

pub use accumulator::{BitstringAccumulator, ObservableResult};
pub use config::{MeasurementConfig, MAX_REPETITIONS_PER_JOB};
pub use error::{MeasurementError, MeasurementResult, SamplerError};
pub use estimate::{estimate_sum, Estimate};
pub use meas_spec::MeasurementSpec;
pub use measure::{measure_grouped_settings, MeasurementRun};
pub use mps_sampler::MpsSampler;
pub use sampler::{Sampler, SweepResult};
pub use stopping::{
    RepetitionsStoppingCriteria, StoppingCriteria, StoppingPolicy, VarianceStoppingCriteria,
};
pub use throttle::Notice;
