/// Ordered name → value bindings for symbolic circuit parameters.
///
/// Insertion order is kept so a resolver built from rotation parameters and
/// then circuit parameters iterates in exactly that order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamResolver {
    bindings: Vec<(String, f64)>,
}

impl ParamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, overwriting an earlier value in place.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.bindings.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.bindings.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn extend(&mut self, other: &ParamResolver) {
        for (name, value) in &other.bindings {
            self.set(name.clone(), *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.bindings.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParamResolver {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut out = ParamResolver::new();
        for (name, value) in iter {
            out.set(name, value);
        }
        out
    }
}

/// Ordered list of parameter assignments submitted together.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    points: Vec<ParamResolver>,
}

impl Sweep {
    /// A single empty assignment.
    pub fn unit() -> Self {
        Self {
            points: vec![ParamResolver::new()],
        }
    }

    pub fn from_resolvers(points: Vec<ParamResolver>) -> Self {
        Self { points }
    }

    pub fn points(name: &str, values: &[f64]) -> Self {
        Self {
            points: values
                .iter()
                .map(|&v| std::iter::once((name, v)).collect())
                .collect(),
        }
    }

    /// `n` evenly spaced values from `start` to `stop` inclusive.
    pub fn linspace(name: &str, start: f64, stop: f64, n: usize) -> Self {
        let values: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => (0..n)
                .map(|i| start + (stop - start) * (i as f64) / ((n - 1) as f64))
                .collect(),
        };
        Self::points(name, &values)
    }

    /// Cartesian product; `self` varies slowest.
    pub fn product(&self, other: &Sweep) -> Sweep {
        let mut points = Vec::with_capacity(self.points.len() * other.points.len());
        for a in &self.points {
            for b in &other.points {
                let mut p = a.clone();
                p.extend(b);
                points.push(p);
            }
        }
        Sweep { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamResolver> + '_ {
        self.points.iter()
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_keeps_insertion_order() {
        let mut r = ParamResolver::new();
        r.set("b", 1.0);
        r.set("a", 2.0);
        r.set("b", 3.0);
        let names: Vec<&str> = r.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(r.get("b"), Some(3.0));
    }

    #[test]
    fn product_is_left_major() {
        let s = Sweep::points("a", &[0.0, 1.0]).product(&Sweep::linspace("b", 0.0, 1.0, 3));
        assert_eq!(s.len(), 6);
        let first: Vec<(f64, f64)> = s
            .iter()
            .map(|p| (p.get("a").unwrap(), p.get("b").unwrap()))
            .collect();
        assert_eq!(first[0], (0.0, 0.0));
        assert_eq!(first[2], (0.0, 1.0));
        assert_eq!(first[3], (1.0, 0.0));
    }

    #[test]
    fn unit_is_one_empty_point() {
        let s = Sweep::unit();
        assert_eq!(s.len(), 1);
        assert!(s.iter().all(|p| p.is_empty()));
    }
}
