//! Spin-chain models expressed as lists of weighted Pauli terms.

use crate::pauli::{Pauli, PauliString};
use crate::qubit::Qubit;

#[derive(Clone, Debug)]
pub struct Hamiltonian {
    /// local fields h_i * Z_i
    pub z_fields: Vec<f64>,
    /// nearest-neighbor couplings J_i * Z_i Z_{i+1}
    pub zz_couplings: Vec<f64>,
}

impl Hamiltonian {
    pub fn ising(n: usize, h: f64, j: f64) -> Self {
        Self {
            z_fields: vec![h; n],
            zz_couplings: vec![j; n.saturating_sub(1)],
        }
    }

    /// Non-zero terms, fields first.
    pub fn terms(&self) -> Vec<PauliString> {
        let fields = self
            .z_fields
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h != 0.0)
            .map(|(i, &h)| PauliString::single(Qubit(i), Pauli::Z).scaled(h));
        let couplings = self
            .zz_couplings
            .iter()
            .enumerate()
            .filter(|&(_, &j)| j != 0.0)
            .map(|(i, &j)| bond(i, Pauli::Z, j));
        fields.chain(couplings).collect()
    }
}

#[derive(Clone, Debug)]
pub struct Heisenberg {
    pub jx: Vec<f64>,
    pub jy: Vec<f64>,
    pub jz: Vec<f64>,
}

impl Heisenberg {
    pub fn uniform(n: usize, j: f64) -> Self {
        Self {
            jx: vec![j; n.saturating_sub(1)],
            jy: vec![j; n.saturating_sub(1)],
            jz: vec![j; n.saturating_sub(1)],
        }
    }

    /// Non-zero XX, then YY, then ZZ bond terms.
    pub fn terms(&self) -> Vec<PauliString> {
        [(Pauli::X, &self.jx), (Pauli::Y, &self.jy), (Pauli::Z, &self.jz)]
            .into_iter()
            .flat_map(|(p, js)| {
                js.iter()
                    .enumerate()
                    .filter(|&(_, &j)| j != 0.0)
                    .map(move |(i, &j)| bond(i, p, j))
            })
            .collect()
    }
}

/// j * P_i P_{i+1}
fn bond(i: usize, p: Pauli, j: f64) -> PauliString {
    [(Qubit(i), p), (Qubit(i + 1), p)]
        .into_iter()
        .collect::<PauliString>()
        .scaled(j)
}
