//! Circuit execution on an MPS register.

use crate::bits::BitMatrix;
use crate::circuit::{Circuit, Operation, Param};
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{cnot, cz, hadamard, swap_qubits, x_pow, y_pow, z_pow, C64};
use crate::measurement::{sample_bitstrings, site_probabilities};
use crate::noise::depolarizing_1q;
use crate::observables::pauli_expectation;
use crate::pauli::PauliString;
use crate::qubit::Qubit;
use rng::ONDRng;
use tn::{mps::MPS, truncation::Truncation};

/// Qubits laid out on MPS sites in ascending order.
#[derive(Clone, Debug)]
pub struct Register {
    qubits: Vec<Qubit>,
    pub psi: MPS,
    trunc: Truncation,
}

impl Register {
    pub fn new<I: IntoIterator<Item = Qubit>>(qubits: I, trunc: Truncation) -> Self {
        let mut qubits: Vec<Qubit> = qubits.into_iter().collect();
        qubits.sort();
        qubits.dedup();
        let psi = MPS::new_zero(qubits.len());
        Self { qubits, psi, trunc }
    }

    pub fn for_circuit(circuit: &Circuit, trunc: Truncation) -> Self {
        Self::new(circuit.qubits(), trunc)
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn site(&self, q: Qubit) -> QuantumResult<usize> {
        self.qubits
            .binary_search(&q)
            .map_err(|_| QuantumError::UnknownQubit(q))
    }

    /// Apply every gate of a fully resolved circuit. Measurements are skipped;
    /// readout goes through [`Register::sample`].
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> QuantumResult<()> {
        for op in circuit.operations() {
            self.apply_operation(op)?;
        }
        Ok(())
    }

    /// Like [`Register::apply_circuit`], with a depolarizing kick of strength
    /// `p` on every qubit a gate touched.
    pub fn apply_circuit_noisy(
        &mut self,
        circuit: &Circuit,
        p: f64,
        rng: &mut ONDRng,
    ) -> QuantumResult<()> {
        for op in circuit.operations() {
            for site in self.apply_operation(op)? {
                depolarizing_1q(&mut self.psi, site, p, rng);
            }
        }
        Ok(())
    }

    /// Returns the sites the operation acted on.
    fn apply_operation(&mut self, op: &Operation) -> QuantumResult<Vec<usize>> {
        match op {
            Operation::XPow { qubit, exponent } => self.apply_1q(*qubit, x_pow(value(exponent)?)),
            Operation::YPow { qubit, exponent } => self.apply_1q(*qubit, y_pow(value(exponent)?)),
            Operation::ZPow { qubit, exponent } => self.apply_1q(*qubit, z_pow(value(exponent)?)),
            Operation::H(qubit) => self.apply_1q(*qubit, hadamard()),
            Operation::Cnot { control, target } => self.apply_2q(*control, *target, cnot()),
            Operation::Cz(a, b) => self.apply_2q(*a, *b, cz()),
            Operation::Measure { .. } => Ok(Vec::new()),
        }
    }

    fn apply_1q(&mut self, q: Qubit, u: [[C64; 2]; 2]) -> QuantumResult<Vec<usize>> {
        let k = self.site(q)?;
        self.psi.apply_1q(k, u);
        Ok(vec![k])
    }

    /// `u` is indexed with `a` as the high bit.
    fn apply_2q(&mut self, a: Qubit, b: Qubit, u: [[C64; 4]; 4]) -> QuantumResult<Vec<usize>> {
        let (ka, kb) = (self.site(a)?, self.site(b)?);
        if ka + 1 == kb {
            self.psi.apply_2q_svd(ka, u, self.trunc);
        } else if kb + 1 == ka {
            self.psi.apply_2q_svd(kb, swap_qubits(u), self.trunc);
        } else {
            return Err(QuantumError::NonAdjacent { a, b });
        }
        Ok(vec![ka, kb])
    }

    pub fn probabilities(&self, q: Qubit) -> QuantumResult<[f64; 2]> {
        Ok(site_probabilities(&self.psi, self.site(q)?))
    }

    /// Exact expectation of a weighted Pauli string, coefficient included.
    pub fn expectation(&self, obs: &PauliString) -> QuantumResult<f64> {
        let factors = obs
            .iter()
            .map(|(q, p)| self.site(q).map(|k| (k, p)))
            .collect::<QuantumResult<Vec<_>>>()?;
        Ok(obs.coefficient * pauli_expectation(&self.psi, &factors))
    }

    /// `shots` joint readouts of `qubits`, columns in the given order.
    pub fn sample(
        &self,
        qubits: &[Qubit],
        shots: usize,
        rng: &mut ONDRng,
    ) -> QuantumResult<BitMatrix> {
        let sites = qubits
            .iter()
            .map(|&q| self.site(q))
            .collect::<QuantumResult<Vec<_>>>()?;
        sample_bitstrings(&self.psi, &sites, shots, rng)
    }
}

fn value(p: &Param) -> QuantumResult<f64> {
    match p {
        Param::Value(v) => Ok(*v),
        Param::Symbol(name) => Err(QuantumError::UnresolvedSymbol(name.clone())),
    }
}
