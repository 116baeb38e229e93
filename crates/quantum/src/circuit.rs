//! Moment-based circuits with optionally symbolic gate exponents.

use crate::error::{QuantumError, QuantumResult};
use crate::qubit::Qubit;
use crate::sweep::ParamResolver;
use std::collections::BTreeSet;

/// Gate exponent: a number, or a symbol bound later by a [`ParamResolver`].
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Value(f64),
    Symbol(String),
}

impl Param {
    pub fn symbol(name: impl Into<String>) -> Self {
        Param::Symbol(name.into())
    }

    pub fn resolve(&self, resolver: &ParamResolver) -> QuantumResult<f64> {
        match self {
            Param::Value(v) => Ok(*v),
            Param::Symbol(name) => resolver
                .get(name)
                .ok_or_else(|| QuantumError::UnresolvedSymbol(name.clone())),
        }
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Value(v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    XPow { qubit: Qubit, exponent: Param },
    YPow { qubit: Qubit, exponent: Param },
    ZPow { qubit: Qubit, exponent: Param },
    H(Qubit),
    Cnot { control: Qubit, target: Qubit },
    Cz(Qubit, Qubit),
    /// Joint computational-basis measurement; row order follows `qubits`.
    Measure { qubits: Vec<Qubit>, key: String },
}

impl Operation {
    pub fn x_pow(qubit: Qubit, exponent: impl Into<Param>) -> Self {
        Operation::XPow {
            qubit,
            exponent: exponent.into(),
        }
    }

    pub fn y_pow(qubit: Qubit, exponent: impl Into<Param>) -> Self {
        Operation::YPow {
            qubit,
            exponent: exponent.into(),
        }
    }

    pub fn z_pow(qubit: Qubit, exponent: impl Into<Param>) -> Self {
        Operation::ZPow {
            qubit,
            exponent: exponent.into(),
        }
    }

    pub fn measure(qubits: &[Qubit], key: &str) -> Self {
        Operation::Measure {
            qubits: qubits.to_vec(),
            key: key.to_string(),
        }
    }

    pub fn qubits(&self) -> Vec<Qubit> {
        match self {
            Operation::XPow { qubit, .. }
            | Operation::YPow { qubit, .. }
            | Operation::ZPow { qubit, .. }
            | Operation::H(qubit) => vec![*qubit],
            Operation::Cnot { control, target } => vec![*control, *target],
            Operation::Cz(a, b) => vec![*a, *b],
            Operation::Measure { qubits, .. } => qubits.clone(),
        }
    }

    fn exponent(&self) -> Option<&Param> {
        match self {
            Operation::XPow { exponent, .. }
            | Operation::YPow { exponent, .. }
            | Operation::ZPow { exponent, .. } => Some(exponent),
            _ => None,
        }
    }

    fn resolved(&self, resolver: &ParamResolver) -> QuantumResult<Operation> {
        let value = |p: &Param| p.resolve(resolver).map(Param::Value);
        Ok(match self {
            Operation::XPow { qubit, exponent } => Operation::XPow {
                qubit: *qubit,
                exponent: value(exponent)?,
            },
            Operation::YPow { qubit, exponent } => Operation::YPow {
                qubit: *qubit,
                exponent: value(exponent)?,
            },
            Operation::ZPow { qubit, exponent } => Operation::ZPow {
                qubit: *qubit,
                exponent: value(exponent)?,
            },
            other => other.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Moment {
    pub operations: Vec<Operation>,
}

impl Moment {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circuit {
    pub moments: Vec<Moment>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_moments(moments: Vec<Moment>) -> Self {
        Self { moments }
    }

    pub fn push(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    /// Append every moment of `other` after this circuit's moments.
    pub fn append(&mut self, other: &Circuit) {
        self.moments.extend(other.moments.iter().cloned());
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.moments.iter().flat_map(|m| m.operations.iter())
    }

    pub fn qubits(&self) -> BTreeSet<Qubit> {
        self.operations().flat_map(|op| op.qubits()).collect()
    }

    /// Symbol names in first-use order.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for op in self.operations() {
            if let Some(Param::Symbol(name)) = op.exponent() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    pub fn is_parameterized(&self) -> bool {
        self.operations()
            .any(|op| matches!(op.exponent(), Some(Param::Symbol(_))))
    }

    /// Measured qubits for `key`, in row order.
    pub fn measurement(&self, key: &str) -> QuantumResult<Vec<Qubit>> {
        self.operations()
            .find_map(|op| match op {
                Operation::Measure { qubits, key: k } if k == key => Some(qubits.clone()),
                _ => None,
            })
            .ok_or_else(|| QuantumError::MissingKey(key.to_string()))
    }

    /// Copy with every symbolic exponent replaced by its bound value.
    pub fn resolve(&self, resolver: &ParamResolver) -> QuantumResult<Circuit> {
        let moments = self
            .moments
            .iter()
            .map(|m| {
                m.operations
                    .iter()
                    .map(|op| op.resolved(resolver))
                    .collect::<QuantumResult<Vec<_>>>()
                    .map(Moment::new)
            })
            .collect::<QuantumResult<Vec<_>>>()?;
        Ok(Circuit { moments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Circuit {
        let q0 = Qubit(0);
        let q1 = Qubit(1);
        Circuit::from_moments(vec![
            Moment::new(vec![Operation::x_pow(q0, Param::symbol("theta"))]),
            Moment::new(vec![Operation::Cnot { control: q0, target: q1 }]),
            Moment::new(vec![
                Operation::y_pow(q1, Param::symbol("phi")),
                Operation::x_pow(q0, Param::symbol("theta")),
            ]),
            Moment::new(vec![Operation::measure(&[q0, q1], "m")]),
        ])
    }

    #[test]
    fn parameter_names_dedup_in_order() {
        let c = sample();
        assert!(c.is_parameterized());
        assert_eq!(c.parameter_names(), vec!["theta".to_string(), "phi".to_string()]);
    }

    #[test]
    fn resolve_binds_all_symbols() {
        let c = sample();
        let r: ParamResolver = [("theta", 0.5), ("phi", -0.5)].into_iter().collect();
        let resolved = c.resolve(&r).unwrap();
        assert!(!resolved.is_parameterized());
        assert_eq!(
            resolved.moments[0].operations[0],
            Operation::x_pow(Qubit(0), 0.5)
        );
    }

    #[test]
    fn resolve_reports_missing_symbol() {
        let r: ParamResolver = [("theta", 0.5)].into_iter().collect();
        match sample().resolve(&r) {
            Err(QuantumError::UnresolvedSymbol(name)) => assert_eq!(name, "phi"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn measurement_lookup() {
        let c = sample();
        assert_eq!(c.measurement("m").unwrap(), vec![Qubit(0), Qubit(1)]);
        assert!(matches!(c.measurement("z"), Err(QuantumError::MissingKey(_))));
    }
}
