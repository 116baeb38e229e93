use crate::pauli::PauliString;
use crate::state::ProductState;
use std::fmt;

/// An initial product state paired with the observable to estimate on it.
#[derive(Clone, Debug, PartialEq)]
pub struct InitObsSetting {
    pub init_state: ProductState,
    pub observable: PauliString,
}

impl InitObsSetting {
    pub fn new(init_state: ProductState, observable: PauliString) -> Self {
        Self {
            init_state,
            observable,
        }
    }

    /// |0…0⟩ on the observable's support.
    pub fn observable_only(observable: PauliString) -> Self {
        let init_state = ProductState::zeros(observable.qubits());
        Self {
            init_state,
            observable,
        }
    }

    /// True when every factor of `self` appears, with the same value, in
    /// `max_setting`. The coefficient is ignored.
    pub fn is_compatible_with(&self, max_setting: &InitObsSetting) -> bool {
        self.observable
            .iter()
            .all(|(q, p)| max_setting.observable.get(q) == Some(p))
            && self
                .init_state
                .iter()
                .all(|(q, s)| max_setting.init_state.get(q) == Some(s))
    }

    /// Smallest unscaled setting covering both, if they agree wherever
    /// their supports overlap.
    pub fn merged_with(&self, other: &InitObsSetting) -> Option<InitObsSetting> {
        let mut observable = PauliString::identity(1.0);
        for (q, p) in self.observable.iter() {
            observable = observable.with(q, p).ok()?;
        }
        for (q, p) in other.observable.iter() {
            match observable.get(q) {
                Some(existing) if existing != p => return None,
                Some(_) => {}
                None => observable = observable.with(q, p).ok()?,
            }
        }

        let mut init_state: ProductState = self.init_state.iter().collect();
        for (q, s) in other.init_state.iter() {
            match init_state.get(q) {
                Some(existing) if existing != s => return None,
                Some(_) => {}
                None => init_state = init_state.with(q, s).ok()?,
            }
        }

        Some(InitObsSetting::new(init_state, observable))
    }

    /// The same setting with its observable coefficient reset to 1.
    pub fn unscaled(&self) -> InitObsSetting {
        let mut out = self.clone();
        out.observable.coefficient = 1.0;
        out
    }
}

impl fmt::Display for InitObsSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.init_state, self.observable)
    }
}

/// Group settings so each group can be measured with one basis change.
///
/// Each setting joins the first group whose max setting it can be merged
/// with; otherwise it opens a new group. Groups keep their first-seen order.
pub fn group_settings_greedy(
    settings: &[InitObsSetting],
) -> Vec<(InitObsSetting, Vec<InitObsSetting>)> {
    let mut groups: Vec<(InitObsSetting, Vec<InitObsSetting>)> = Vec::new();

    'settings: for setting in settings {
        for (max_setting, members) in groups.iter_mut() {
            if let Some(merged) = max_setting.merged_with(setting) {
                *max_setting = merged;
                members.push(setting.clone());
                continue 'settings;
            }
        }
        groups.push((setting.unscaled(), vec![setting.clone()]));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::Pauli;
    use crate::qubit::Qubit;

    fn obs(coefficient: f64, factors: &[(usize, Pauli)]) -> InitObsSetting {
        let ps = PauliString::new(coefficient, factors.iter().map(|&(q, p)| (Qubit(q), p)))
            .unwrap();
        InitObsSetting::observable_only(ps)
    }

    #[test]
    fn compatible_ignores_coefficient() {
        let max = obs(1.0, &[(0, Pauli::Z), (1, Pauli::Z)]);
        assert!(obs(-0.3, &[(0, Pauli::Z)]).is_compatible_with(&max));
        assert!(!obs(1.0, &[(0, Pauli::X)]).is_compatible_with(&max));
    }

    #[test]
    fn greedy_grouping_splits_conflicting_bases() {
        let settings = vec![
            obs(0.5, &[(0, Pauli::Z)]),
            obs(0.5, &[(0, Pauli::X), (1, Pauli::X)]),
            obs(1.0, &[(0, Pauli::Z), (1, Pauli::Z)]),
            obs(2.0, &[(1, Pauli::X)]),
        ];

        let groups = group_settings_greedy(&settings);
        assert_eq!(groups.len(), 2);

        let (zz, members) = &groups[0];
        assert_eq!(zz.observable.coefficient, 1.0);
        assert_eq!(zz.observable.weight(), 2);
        assert_eq!(members.len(), 2);

        let (xx, members) = &groups[1];
        assert_eq!(xx.observable.get(Qubit(1)), Some(Pauli::X));
        assert_eq!(members.len(), 2);
        for m in members {
            assert!(m.is_compatible_with(xx));
        }
    }
}
