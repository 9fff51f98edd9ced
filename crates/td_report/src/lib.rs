//! The result of a run (trust/belief dictionaries plus derived views) and
//! the supervised accuracy evaluator that scores a result against known
//! true values.

pub mod errors;
pub mod evaluator;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use errors::ReportError;
pub use evaluator::{accuracy, SupervisedData};

/// A finished algorithm run: trust per source, belief per claim (grouped
/// by variable), how many iterations it took, and how long it took.
#[derive(Debug, Clone)]
pub struct Result<S, Var, Val> {
    pub trust: HashMap<S, f64>,
    pub belief: HashMap<Var, HashMap<Val, f64>>,
    pub iterations: Option<u64>,
    pub time_taken_secs: f64,
}

/// Elementwise difference between two results, taken over the
/// intersection of their keys.
#[derive(Debug, Clone)]
pub struct ResultDiff<S, Var, Val> {
    pub trust: HashMap<S, f64>,
    pub belief: HashMap<Var, HashMap<Val, f64>>,
    pub iterations: Option<i64>,
    pub time_taken_secs: f64,
}

impl<S, Var, Val> Result<S, Var, Val>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    pub fn new(
        trust: HashMap<S, f64>,
        belief: HashMap<Var, HashMap<Val, f64>>,
        iterations: Option<u64>,
        time_taken_secs: f64,
    ) -> Self {
        Result { trust, belief, iterations, time_taken_secs }
    }

    /// Every value for `var` whose belief equals the maximum belief for
    /// that variable. Empty if `var` wasn't scored by this run.
    pub fn most_believed_values(&self, var: &Var) -> HashSet<Val> {
        let Some(values) = self.belief.get(var) else {
            return HashSet::new();
        };
        let max = values.values().cloned().fold(f64::MIN, f64::max);
        values
            .iter()
            .filter(|&(_, &score)| score == max)
            .map(|(val, _)| val.clone())
            .collect()
    }

    /// A deep copy restricted to the given sources/variables. `None` keeps
    /// everything; `Some(set)` keeps only keys present in both this result
    /// and `set` (anything in `set` that isn't an actual key is dropped
    /// silently, including an empty `set`, which yields an empty result).
    pub fn filter(&self, sources: Option<&HashSet<S>>, variables: Option<&HashSet<Var>>) -> Self {
        let trust = match sources {
            None => self.trust.clone(),
            Some(keep) => self
                .trust
                .iter()
                .filter(|(s, _)| keep.contains(s))
                .map(|(s, &t)| (s.clone(), t))
                .collect(),
        };
        let belief = match variables {
            None => self.belief.clone(),
            Some(keep) => self
                .belief
                .iter()
                .filter(|(v, _)| keep.contains(v))
                .map(|(v, m)| (v.clone(), m.clone()))
                .collect(),
        };
        Result { trust, belief, iterations: self.iterations, time_taken_secs: self.time_taken_secs }
    }

    /// `(mean, population stddev)` over every trust value.
    pub fn trust_stats(&self) -> (f64, f64) {
        stats(self.trust.values().copied())
    }

    /// `(mean, population stddev)` per variable, over the belief scores of
    /// its claimed values.
    pub fn belief_stats(&self) -> HashMap<Var, (f64, f64)> {
        self.belief
            .iter()
            .map(|(var, values)| (var.clone(), stats(values.values().copied())))
            .collect()
    }

    /// Elementwise subtraction over the intersection of keys with `other`.
    pub fn diff(&self, other: &Self) -> ResultDiff<S, Var, Val> {
        let trust = self
            .trust
            .iter()
            .filter_map(|(s, &t)| other.trust.get(s).map(|&ot| (s.clone(), t - ot)))
            .collect();

        let belief = self
            .belief
            .iter()
            .filter_map(|(var, values)| {
                let other_values = other.belief.get(var)?;
                let diffed: HashMap<Val, f64> = values
                    .iter()
                    .filter_map(|(val, &b)| other_values.get(val).map(|&ob| (val.clone(), b - ob)))
                    .collect();
                Some((var.clone(), diffed))
            })
            .collect();

        let iterations = match (self.iterations, other.iterations) {
            (Some(a), Some(b)) => Some(a as i64 - b as i64),
            _ => None,
        };

        ResultDiff {
            trust,
            belief,
            iterations,
            time_taken_secs: self.time_taken_secs - other.time_taken_secs,
        }
    }
}

fn stats(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Result<&'static str, &'static str, &'static str> {
        let mut belief = HashMap::new();
        belief.insert("y", HashMap::from([("nine", 0.6), ("eight", 0.6), ("ten", 0.1)]));
        let trust = HashMap::from([("s1", 1.0), ("s2", 0.5)]);
        Result::new(trust, belief, Some(7), 0.002)
    }

    #[test]
    fn most_believed_returns_all_ties() {
        let r = sample();
        let mb = r.most_believed_values(&"y");
        assert_eq!(mb, HashSet::from(["nine", "eight"]));
    }

    #[test]
    fn filter_drops_unknown_keys_and_empty_set_yields_empty() {
        let r = sample();
        let kept = r.filter(Some(&HashSet::from(["s1", "s404"])), None);
        assert_eq!(kept.trust.len(), 1);
        assert!(kept.trust.contains_key("s1"));

        let emptied = r.filter(Some(&HashSet::new()), None);
        assert!(emptied.trust.is_empty());
    }

    #[test]
    fn diff_against_self_is_zero() {
        let r = sample();
        let d = r.diff(&r);
        assert!(d.trust.values().all(|&v| v == 0.0));
        assert!(d.belief[&"y"].values().all(|&v| v == 0.0));
        assert_eq!(d.iterations, Some(0));
        assert_eq!(d.time_taken_secs, 0.0);
    }

    #[test]
    fn trust_stats_matches_hand_computation() {
        let r = sample();
        let (mean, stddev) = r.trust_stats();
        assert!((mean - 0.75).abs() < 1e-9);
        assert!((stddev - 0.25).abs() < 1e-9);
    }
}
