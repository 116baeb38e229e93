use crate::truncation::Truncation;
use faer::Mat;
use num_complex::Complex64;

pub type C64 = Complex64;

/// Rank-3 site tensor indexed (left bond, physical, right bond).
#[derive(Clone, Debug)]
pub struct Tensor3 {
    pub data: Vec<C64>,
    pub dl: usize,
    pub dp: usize,
    pub dr: usize,
}

impl Tensor3 {
    pub fn zeros(dl: usize, dp: usize, dr: usize) -> Self {
        Self {
            data: vec![C64::new(0.0, 0.0); dl * dp * dr],
            dl,
            dp,
            dr,
        }
    }

    #[inline]
    fn idx(&self, l: usize, p: usize, r: usize) -> usize {
        (l * self.dp + p) * self.dr + r
    }

    pub fn get(&self, l: usize, p: usize, r: usize) -> C64 {
        self.data[self.idx(l, p, r)]
    }

    pub fn set(&mut self, l: usize, p: usize, r: usize, v: C64) {
        let i = self.idx(l, p, r);
        self.data[i] = v;
    }
}

/// Open-boundary matrix product state over qubit sites.
#[derive(Clone, Debug)]
pub struct MPS {
    pub sites: Vec<Tensor3>,
}

impl MPS {
    /// |0…0⟩ on `n` sites.
    pub fn new_zero(n: usize) -> Self {
        let sites = (0..n)
            .map(|_| {
                let mut t = Tensor3::zeros(1, 2, 1);
                t.set(0, 0, 0, C64::new(1.0, 0.0));
                t
            })
            .collect();
        Self { sites }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn bond_dims(&self) -> Vec<usize> {
        self.sites.iter().skip(1).map(|s| s.dl).collect()
    }

    pub fn apply_1q(&mut self, k: usize, u: [[C64; 2]; 2]) {
        let s = &self.sites[k];
        let mut out = Tensor3::zeros(s.dl, s.dp, s.dr);

        for l in 0..s.dl {
            for r in 0..s.dr {
                let v0 = s.get(l, 0, r);
                let v1 = s.get(l, 1, r);
                out.set(l, 0, r, u[0][0] * v0 + u[0][1] * v1);
                out.set(l, 1, r, u[1][0] * v0 + u[1][1] * v1);
            }
        }
        self.sites[k] = out;
    }

    /// Apply a two-qubit gate on sites (k, k+1) and re-split with a truncated SVD.
    /// Row/column index of `u` is `2 * p_k + p_{k+1}`.
    pub fn apply_2q_svd(&mut self, k: usize, u: [[C64; 4]; 4], trunc: Truncation) {
        let a = &self.sites[k];
        let b = &self.sites[k + 1];
        let (dl, chi, dr) = (a.dl, a.dr, b.dr);

        // Contract the shared bond first: ab[l][q][r], q = 2 * q1 + q2.
        let mut ab = vec![C64::new(0.0, 0.0); dl * 4 * dr];
        for l in 0..dl {
            for q1 in 0..2 {
                for q2 in 0..2 {
                    for r in 0..dr {
                        let mut acc = C64::new(0.0, 0.0);
                        for m in 0..chi {
                            acc += a.get(l, q1, m) * b.get(m, q2, r);
                        }
                        ab[(l * 4 + q1 * 2 + q2) * dr + r] = acc;
                    }
                }
            }
        }

        let mut theta = Mat::<C64>::zeros(dl * 2, 2 * dr);
        for l in 0..dl {
            for r in 0..dr {
                for (i, row_u) in u.iter().enumerate() {
                    let mut v = C64::new(0.0, 0.0);
                    for (j, &uij) in row_u.iter().enumerate() {
                        v += uij * ab[(l * 4 + j) * dr + r];
                    }
                    let (p1, p2) = (i / 2, i % 2);
                    theta.write(l * 2 + p1, p2 * dr + r, v);
                }
            }
        }

        let svd = theta.thin_svd();
        let s = svd.s_diagonal();

        let kept = (0..s.nrows())
            .filter(|&i| s.read(i).re > trunc.cutoff)
            .count()
            .clamp(1, trunc.max_bond.max(1));

        let u_full = svd.u();
        let v_full = svd.v();

        let mut new_a = Tensor3::zeros(dl, 2, kept);
        let mut new_b = Tensor3::zeros(kept, 2, dr);
        for m in 0..kept {
            let sv = s.read(m).re;
            for p in 0..2 {
                for l in 0..dl {
                    new_a.set(l, p, m, u_full.read(l * 2 + p, m) * sv);
                }
                for r in 0..dr {
                    new_b.set(m, p, r, v_full.read(p * dr + r, m).conj());
                }
            }
        }

        self.sites[k] = new_a;
        self.sites[k + 1] = new_b;
    }

    /// Dense amplitudes, site 0 as the most significant bit. Exponential in
    /// the number of sites; meant for small reference registers.
    pub fn to_statevector(&self) -> Vec<C64> {
        let mut prefix = vec![C64::new(1.0, 0.0)];
        let mut bond = 1usize;

        for a in &self.sites {
            let count = prefix.len() / bond;
            let mut next = vec![C64::new(0.0, 0.0); count * 2 * a.dr];
            for idx in 0..count {
                for l in 0..a.dl {
                    let pv = prefix[idx * bond + l];
                    if pv == C64::new(0.0, 0.0) {
                        continue;
                    }
                    for p in 0..2 {
                        for r in 0..a.dr {
                            next[((idx * 2 + p) * a.dr) + r] += pv * a.get(l, p, r);
                        }
                    }
                }
            }
            prefix = next;
            bond = a.dr;
        }

        prefix
    }
}
