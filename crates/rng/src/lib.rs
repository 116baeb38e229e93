use sha3::{digest::{ExtendableOutput, Update, XofReader}, Shake256};

/// Deterministic SHAKE256 stream. Every draw is domain-separated by a
/// context label so independent consumers of one stream stay reproducible.
pub struct ONDRng {
    state: [u8; 32],
    step: u64,
}

impl ONDRng {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, b"OND_INIT"], &mut state);
        Self { state, step: 0 }
    }

    /// Child stream for a labelled sub-task (one sweep point, one trajectory).
    pub fn fork(&self, label: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[&self.state, label, b"OND_FORK"], &mut state);
        Self { state, step: 0 }
    }

    /// Uniform draw in [0, 1].
    pub fn next_f64(&mut self, ctx: &[u8]) -> f64 {
        self.step += 1;

        let mut next_state = [0u8; 32];
        shake(&[&self.state, &self.step.to_be_bytes(), b"QSIM"], &mut next_state);
        self.state = next_state;

        let mut out = [0u8; 8];
        shake(&[&self.state, ctx], &mut out);

        (u64::from_be_bytes(out) as f64) / (u64::MAX as f64)
    }

    /// Bernoulli draw: true with probability `p`.
    pub fn chance(&mut self, p: f64, ctx: &[u8]) -> bool {
        p > 0.0 && self.next_f64(ctx) < p
    }
}

fn shake(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for p in parts {
        h.update(p);
    }
    let mut r = h.finalize_xof();
    r.read(out);
}
