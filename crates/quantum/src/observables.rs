use crate::pauli::Pauli;
use tn::mps::{C64, MPS};

/// Exact ⟨ψ|P|ψ⟩ for a Pauli product given as (site, Pauli) factors.
///
/// Goes through the dense state vector, so it is a reference value for
/// small registers rather than a scalable contraction. Site 0 is the most
/// significant bit of the basis index.
pub fn pauli_expectation(psi: &MPS, factors: &[(usize, Pauli)]) -> f64 {
    let n = psi.len();
    let v = psi.to_statevector();
    let i = C64::new(0.0, 1.0);

    let mut flip_mask = 0usize;
    for &(site, p) in factors {
        if p != Pauli::Z {
            flip_mask |= 1 << (n - 1 - site);
        }
    }

    let mut norm = 0.0;
    let mut acc = C64::new(0.0, 0.0);
    for (idx, &amp) in v.iter().enumerate() {
        norm += amp.norm_sqr();
        if amp == C64::new(0.0, 0.0) {
            continue;
        }
        // P|idx> = phase |idx ^ flip_mask>
        let mut phase = C64::new(1.0, 0.0);
        for &(site, p) in factors {
            let bit = (idx >> (n - 1 - site)) & 1;
            phase *= match (p, bit) {
                (Pauli::X, _) => C64::new(1.0, 0.0),
                (Pauli::Y, 0) => i,
                (Pauli::Y, _) => -i,
                (Pauli::Z, 0) => C64::new(1.0, 0.0),
                (Pauli::Z, _) => C64::new(-1.0, 0.0),
            };
        }
        acc += v[idx ^ flip_mask].conj() * phase * amp;
    }

    if norm == 0.0 {
        return 0.0;
    }
    acc.re / norm
}
