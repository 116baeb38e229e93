use num_complex::Complex64;
use std::f64::consts::PI;

pub type C64 = Complex64;

pub fn hadamard() -> [[C64; 2]; 2] {
    let s = 1.0 / 2.0_f64.sqrt();
    [
        [C64::new(s, 0.0), C64::new(s, 0.0)],
        [C64::new(s, 0.0), C64::new(-s, 0.0)],
    ]
}

pub fn pauli_x() -> [[C64; 2]; 2] {
    x_pow(1.0)
}

pub fn pauli_y() -> [[C64; 2]; 2] {
    y_pow(1.0)
}

pub fn pauli_z() -> [[C64; 2]; 2] {
    z_pow(1.0)
}

/// X^t: phase e^{iπt} on the −1 eigenspace of X. `x_pow(1.0)` is X.
pub fn x_pow(t: f64) -> [[C64; 2]; 2] {
    let g = C64::from_polar(1.0, PI * t);
    let a = (C64::new(1.0, 0.0) + g) * 0.5;
    let b = (C64::new(1.0, 0.0) - g) * 0.5;
    [[a, b], [b, a]]
}

/// Y^t: phase e^{iπt} on the −1 eigenspace of Y. `y_pow(1.0)` is Y.
pub fn y_pow(t: f64) -> [[C64; 2]; 2] {
    let g = C64::from_polar(1.0, PI * t);
    let a = (C64::new(1.0, 0.0) + g) * 0.5;
    let b = (C64::new(1.0, 0.0) - g) * 0.5;
    let i = C64::new(0.0, 1.0);
    [[a, -i * b], [i * b, a]]
}

/// Z^t = diag(1, e^{iπt}).
pub fn z_pow(t: f64) -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    [[C64::new(1.0, 0.0), z], [z, C64::from_polar(1.0, PI * t)]]
}

/// |00>→|00>, |01>→|01>, |10>→|11>, |11>→|10>
pub fn cnot() -> [[C64; 4]; 4] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [
        [o, z, z, z],
        [z, o, z, z],
        [z, z, z, o],
        [z, z, o, z],
    ]
}

/// diag(1, 1, 1, -1)
pub fn cz() -> [[C64; 4]; 4] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let m = C64::new(-1.0, 0.0);
    [
        [o, z, z, z],
        [z, o, z, z],
        [z, z, o, z],
        [z, z, z, m],
    ]
}

/// Same gate with the roles of its two qubits exchanged.
pub fn swap_qubits(u: [[C64; 4]; 4]) -> [[C64; 4]; 4] {
    const PERM: [usize; 4] = [0, 2, 1, 3];
    let mut out = [[C64::new(0.0, 0.0); 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            out[PERM[i]][PERM[j]] = u[i][j];
        }
    }
    out
}
