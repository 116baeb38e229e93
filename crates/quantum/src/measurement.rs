//! Computational-basis readout of an MPS register.

use crate::bits::BitMatrix;
use crate::env::{left_env, right_env};
use crate::error::{QuantumError, QuantumResult};
use rng::ONDRng;
use tn::mps::{C64, MPS};

/// Largest register sampled through its dense distribution.
pub const MAX_DENSE_SITES: usize = 24;

/// Exact marginal [p(0), p(1)] of site `k`, normalized.
pub fn site_probabilities(psi: &MPS, k: usize) -> [f64; 2] {
    let s = &psi.sites[k];
    let left = left_env(&psi.sites, k);
    let right = right_env(&psi.sites, k);

    let mut w = [0.0f64; 2];
    for (p, slot) in w.iter_mut().enumerate() {
        let mut acc = C64::new(0.0, 0.0);
        for l in 0..s.dl {
            for lp in 0..s.dl {
                let lval = left[l * s.dl + lp];
                for r in 0..s.dr {
                    for rp in 0..s.dr {
                        acc += lval
                            * s.get(l, p, r)
                            * s.get(lp, p, rp).conj()
                            * right[r * s.dr + rp];
                    }
                }
            }
        }
        *slot = acc.re.max(0.0);
    }

    let total = w[0] + w[1];
    if total == 0.0 {
        return [1.0, 0.0];
    }
    [w[0] / total, w[1] / total]
}

/// Cumulative distribution over all 2^n basis states, site 0 most significant.
fn cumulative(psi: &MPS) -> QuantumResult<Vec<f64>> {
    if psi.len() > MAX_DENSE_SITES {
        return Err(QuantumError::RegisterTooLarge(psi.len()));
    }
    let mut acc = 0.0;
    let cdf = psi
        .to_statevector()
        .iter()
        .map(|a| {
            acc += a.norm_sqr();
            acc
        })
        .collect();
    Ok(cdf)
}

/// Draw `shots` projective measurements of `sites` (in that column order).
pub fn sample_bitstrings(
    psi: &MPS,
    sites: &[usize],
    shots: usize,
    rng: &mut ONDRng,
) -> QuantumResult<BitMatrix> {
    let cdf = cumulative(psi)?;
    let total = cdf.last().copied().unwrap_or(0.0);
    let n = psi.len();

    let mut out = BitMatrix::new(sites.len());
    let mut row = vec![0u8; sites.len()];
    for _ in 0..shots {
        let x = rng.next_f64(b"MEASURE_Z") * total;
        let idx = cdf.partition_point(|&c| c <= x).min(cdf.len().saturating_sub(1));
        for (col, &site) in sites.iter().enumerate() {
            row[col] = ((idx >> (n - 1 - site)) & 1) as u8;
        }
        out.push_row(&row)?;
    }
    Ok(out)
}
