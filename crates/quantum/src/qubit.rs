use std::fmt;

/// Line qubit addressed by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit(pub usize);

impl Qubit {
    pub fn range(n: usize) -> Vec<Qubit> {
        (0..n).map(Qubit).collect()
    }
}

impl From<usize> for Qubit {
    fn from(k: usize) -> Self {
        Self(k)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q({})", self.0)
    }
}
