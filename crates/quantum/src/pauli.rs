use crate::error::{QuantumError, QuantumResult};
use crate::qubit::Qubit;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        };
        write!(f, "{}", c)
    }
}

/// Real-weighted tensor product of single-qubit Paulis. Qubits absent from
/// the map carry identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PauliString {
    pub coefficient: f64,
    paulis: BTreeMap<Qubit, Pauli>,
}

impl PauliString {
    pub fn new<I>(coefficient: f64, factors: I) -> QuantumResult<Self>
    where
        I: IntoIterator<Item = (Qubit, Pauli)>,
    {
        let mut out = Self::identity(coefficient);
        for (q, p) in factors {
            out = out.with(q, p)?;
        }
        Ok(out)
    }

    pub fn identity(coefficient: f64) -> Self {
        Self {
            coefficient,
            paulis: BTreeMap::new(),
        }
    }

    pub fn single(q: Qubit, p: Pauli) -> Self {
        let mut paulis = BTreeMap::new();
        paulis.insert(q, p);
        Self {
            coefficient: 1.0,
            paulis,
        }
    }

    /// Multiply in `p` on a qubit the string does not act on yet.
    pub fn with(mut self, q: Qubit, p: Pauli) -> QuantumResult<Self> {
        if self.paulis.contains_key(&q) {
            return Err(QuantumError::OverlappingFactor(q));
        }
        self.paulis.insert(q, p);
        Ok(self)
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        self.coefficient *= factor;
        self
    }

    pub fn get(&self, q: Qubit) -> Option<Pauli> {
        self.paulis.get(&q).copied()
    }

    pub fn contains(&self, q: Qubit) -> bool {
        self.paulis.contains_key(&q)
    }

    pub fn qubits(&self) -> impl Iterator<Item = Qubit> + '_ {
        self.paulis.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Qubit, Pauli)> + '_ {
        self.paulis.iter().map(|(&q, &p)| (q, p))
    }

    pub fn weight(&self) -> usize {
        self.paulis.len()
    }
}

/// Unit-coefficient product; a repeated qubit keeps its last Pauli.
impl FromIterator<(Qubit, Pauli)> for PauliString {
    fn from_iter<I: IntoIterator<Item = (Qubit, Pauli)>>(iter: I) -> Self {
        Self {
            coefficient: 1.0,
            paulis: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.paulis.is_empty() {
            return write!(f, "{}*I", self.coefficient);
        }
        write!(f, "{}", self.coefficient)?;
        for (q, p) in &self.paulis {
            write!(f, "*{}{}", p, q)?;
        }
        Ok(())
    }
}
