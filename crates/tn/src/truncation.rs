/// Bond truncation policy applied after every two-site SVD.
#[derive(Clone, Copy, Debug)]
pub struct Truncation {
    pub max_bond: usize,
    /// Singular values at or below this are dropped.
    pub cutoff: f64,
}

impl Truncation {
    /// Effectively lossless for the register sizes the samplers handle.
    pub fn exact() -> Self {
        Self {
            max_bond: 1024,
            cutoff: 1e-14,
        }
    }
}

impl Default for Truncation {
    fn default() -> Self {
        Self {
            max_bond: 64,
            cutoff: 1e-10,
        }
    }
}
