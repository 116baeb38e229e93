use crate::qubit::Qubit;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantumError {
    /// A symbolic exponent was left without a value when simulating.
    #[error("parameter `{0}` has no value in the resolver")]
    UnresolvedSymbol(String),

    #[error("{0} is not part of the register")]
    UnknownQubit(Qubit),

    /// Two-qubit gates act on neighbouring register sites only.
    #[error("two-qubit gate on {a} and {b} needs register-adjacent qubits")]
    NonAdjacent { a: Qubit, b: Qubit },

    #[error("{0} already carries a factor")]
    OverlappingFactor(Qubit),

    #[error("measurement key `{0}` not found")]
    MissingKey(String),

    #[error("row of width {got} does not fit a {expected}-column bit matrix")]
    RaggedRow { expected: usize, got: usize },

    #[error("register of {0} qubits is too large for dense sampling")]
    RegisterTooLarge(usize),
}

pub type QuantumResult<T> = Result<T, QuantumError>;
