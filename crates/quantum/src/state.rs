use crate::error::{QuantumError, QuantumResult};
use crate::pauli::Pauli;
use crate::qubit::Qubit;
use std::collections::BTreeMap;
use std::fmt;

/// The six single-qubit Pauli eigenstates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedState {
    Plus,
    Minus,
    PlusI,
    MinusI,
    Zero,
    One,
}

impl NamedState {
    /// Eigenstate of `pauli` with eigenvalue +1 (`positive`) or −1.
    pub fn eigenstate(pauli: Pauli, positive: bool) -> Self {
        match (pauli, positive) {
            (Pauli::X, true) => NamedState::Plus,
            (Pauli::X, false) => NamedState::Minus,
            (Pauli::Y, true) => NamedState::PlusI,
            (Pauli::Y, false) => NamedState::MinusI,
            (Pauli::Z, true) => NamedState::Zero,
            (Pauli::Z, false) => NamedState::One,
        }
    }
}

impl fmt::Display for NamedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NamedState::Plus => "+X",
            NamedState::Minus => "-X",
            NamedState::PlusI => "+Y",
            NamedState::MinusI => "-Y",
            NamedState::Zero => "+Z",
            NamedState::One => "-Z",
        };
        write!(f, "{}", s)
    }
}

/// Tensor product of named single-qubit states.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProductState {
    states: BTreeMap<Qubit, NamedState>,
}

impl ProductState {
    pub fn zeros<I: IntoIterator<Item = Qubit>>(qubits: I) -> Self {
        Self {
            states: qubits.into_iter().map(|q| (q, NamedState::Zero)).collect(),
        }
    }

    pub fn with(mut self, q: Qubit, state: NamedState) -> QuantumResult<Self> {
        if self.states.contains_key(&q) {
            return Err(QuantumError::OverlappingFactor(q));
        }
        self.states.insert(q, state);
        Ok(self)
    }

    pub fn get(&self, q: Qubit) -> Option<NamedState> {
        self.states.get(&q).copied()
    }

    pub fn contains(&self, q: Qubit) -> bool {
        self.states.contains_key(&q)
    }

    pub fn qubits(&self) -> impl Iterator<Item = Qubit> + '_ {
        self.states.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Qubit, NamedState)> + '_ {
        self.states.iter().map(|(&q, &s)| (q, s))
    }

    pub fn is_all_zero(&self) -> bool {
        self.states.values().all(|s| *s == NamedState::Zero)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(Qubit, NamedState)> for ProductState {
    fn from_iter<I: IntoIterator<Item = (Qubit, NamedState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ProductState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.states.iter().map(|(q, s)| format!("{}{}", s, q)).collect();
        write!(f, "{}", parts.join(" * "))
    }
}
