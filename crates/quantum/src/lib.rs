pub mod bits;
pub mod circuit;
pub mod error;
pub mod gates;
pub mod hamiltonian;
pub mod measurement;
pub mod noise;
pub mod observables;
pub mod pauli;
pub mod qubit;
pub mod setting;
pub mod simulate;
pub mod state;
pub mod sweep;
mod env;

pub use bits::BitMatrix;
pub use circuit::{Circuit, Moment, Operation, Param};
pub use error::{QuantumError, QuantumResult};
pub use pauli::{Pauli, PauliString};
pub use qubit::Qubit;
pub use setting::InitObsSetting;
pub use simulate::Register;
pub use state::{NamedState, ProductState};
pub use sweep::{ParamResolver, Sweep};
