use quantum::{InitObsSetting, ParamResolver};

/// One logical unit of work: a padded max setting at one point of the
/// circuit's own sweep. Keys exactly one accumulator.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementSpec {
    pub max_setting: InitObsSetting,
    pub circuit_params: ParamResolver,
}

impl MeasurementSpec {
    pub fn new(max_setting: InitObsSetting, circuit_params: ParamResolver) -> Self {
        Self {
            max_setting,
            circuit_params,
        }
    }
}
