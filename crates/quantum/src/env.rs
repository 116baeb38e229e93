use tn::mps::{C64, Tensor3};

/// Push a bond environment one site to the right through `a` and its conjugate.
fn absorb_left(env: &[C64], a: &Tensor3) -> Vec<C64> {
    let mut next = vec![C64::new(0.0, 0.0); a.dr * a.dr];
    for l in 0..a.dl {
        for lp in 0..a.dl {
            let e = env[l * a.dl + lp];
            if e == C64::new(0.0, 0.0) {
                continue;
            }
            for p in 0..a.dp {
                for r in 0..a.dr {
                    let ket = e * a.get(l, p, r);
                    for rp in 0..a.dr {
                        next[r * a.dr + rp] += ket * a.get(lp, p, rp).conj();
                    }
                }
            }
        }
    }
    next
}

/// Push a bond environment one site to the left through `a` and its conjugate.
fn absorb_right(env: &[C64], a: &Tensor3) -> Vec<C64> {
    let mut next = vec![C64::new(0.0, 0.0); a.dl * a.dl];
    for r in 0..a.dr {
        for rp in 0..a.dr {
            let e = env[r * a.dr + rp];
            if e == C64::new(0.0, 0.0) {
                continue;
            }
            for p in 0..a.dp {
                for l in 0..a.dl {
                    let ket = a.get(l, p, r) * e;
                    for lp in 0..a.dl {
                        next[l * a.dl + lp] += ket * a.get(lp, p, rp).conj();
                    }
                }
            }
        }
    }
    next
}

/// Environment of sites `0..k`, indexed `l * dl + l'` on the left bond of site k.
pub(crate) fn left_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    sites[..k]
        .iter()
        .fold(vec![C64::new(1.0, 0.0)], |env, a| absorb_left(&env, a))
}

/// Environment of sites `k+1..`, indexed `r * dr + r'` on the right bond of site k.
pub(crate) fn right_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    sites[k + 1..]
        .iter()
        .rev()
        .fold(vec![C64::new(1.0, 0.0)], |env, a| absorb_right(&env, a))
}
