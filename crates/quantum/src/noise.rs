use crate::bits::BitMatrix;
use crate::gates::{pauli_x, pauli_y, pauli_z};
use rng::ONDRng;
use tn::mps::MPS;

/// Single-qubit depolarizing channel implemented via random Pauli kicks.
pub fn depolarizing_1q(psi: &mut MPS, k: usize, p: f64, rng: &mut ONDRng) {
    if p <= 0.0 {
        return;
    }

    let x = rng.next_f64(b"DEPOL_1Q");
    if x >= p {
        return;
    }

    let r = x / p;
    if r < 1.0 / 3.0 {
        psi.apply_1q(k, pauli_x());
    } else if r < 2.0 / 3.0 {
        psi.apply_1q(k, pauli_y());
    } else {
        psi.apply_1q(k, pauli_z());
    }
}

/// Classical bit-flip model of an imperfect detector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReadoutError {
    /// Probability a true 0 is reported as 1.
    pub p0_to_1: f64,
    /// Probability a true 1 is reported as 0.
    pub p1_to_0: f64,
}

impl ReadoutError {
    pub fn new(p0_to_1: f64, p1_to_0: f64) -> Self {
        Self { p0_to_1, p1_to_0 }
    }

    pub fn is_noiseless(&self) -> bool {
        self.p0_to_1 <= 0.0 && self.p1_to_0 <= 0.0
    }

    /// Corrupt every recorded bit independently.
    pub fn apply(&self, bits: &BitMatrix, rng: &mut ONDRng) -> BitMatrix {
        if self.is_noiseless() {
            return bits.clone();
        }
        let mut out = BitMatrix::new(bits.cols());
        let mut row_buf = vec![0u8; bits.cols()];
        for row in bits.iter_rows() {
            for (dst, &b) in row_buf.iter_mut().zip(row) {
                let p = if b == 0 { self.p0_to_1 } else { self.p1_to_0 };
                *dst = if rng.chance(p, b"READOUT") { b ^ 1 } else { b };
            }
            // widths match by construction
            let _ = out.push_row(&row_buf);
        }
        out
    }
}
