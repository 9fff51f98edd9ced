//! The stopping-rule strategy that drives every iterative kernel.
//!
//! A tagged variant stands in for the inheritance hierarchy the reference
//! implementation uses (`FixedIterator`, `ConvergenceIterator`,
//! `OrdinalConvergenceIterator`): one type, three shapes.

use crate::errors::AlgoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMeasure {
    L1,
    L2,
    LInf,
    Cosine,
}

impl DistanceMeasure {
    pub fn distance(self, prev: &[f64], curr: &[f64]) -> f64 {
        assert_eq!(prev.len(), curr.len());
        match self {
            DistanceMeasure::L1 => prev.iter().zip(curr).map(|(a, b)| (a - b).abs()).sum(),
            DistanceMeasure::L2 => prev
                .iter()
                .zip(curr)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt(),
            DistanceMeasure::LInf => prev
                .iter()
                .zip(curr)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
            DistanceMeasure::Cosine => {
                let norm1 = prev.iter().map(|x| x * x).sum::<f64>().sqrt();
                let norm2 = curr.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm1 == 0.0 || norm2 == 0.0 {
                    return 1.0;
                }
                let dot: f64 = prev.iter().zip(curr).map(|(a, b)| a * b).sum();
                (1.0 - dot / (norm1 * norm2)).clamp(0.0, 1.0)
            }
        }
    }
}

/// The stopping rule a caller selects for an iterative kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoppingRule {
    /// Run exactly `limit` iterations, then finish.
    Fixed { limit: u64 },
    /// Finish once `distance(prev, curr) < threshold`; fail with
    /// `DidNotConverge` if `limit` iterations pass without that happening.
    Metric {
        measure: DistanceMeasure,
        threshold: f64,
        limit: u64,
    },
    /// Finish once the ranking of the compared vector has stayed the same
    /// for `threshold` consecutive calls.
    Ordinal { threshold: u64 },
}

impl StoppingRule {
    /// `Metric` with the reference implementation's default safety limit.
    pub fn metric(measure: DistanceMeasure, threshold: f64) -> Self {
        StoppingRule::Metric {
            measure,
            threshold,
            limit: 1_000_000,
        }
    }
}

/// Owns the iteration counter and whatever per-run state (last distance,
/// ranking run-length) its rule needs. Must be `reset` at the start of
/// every run; it is not safe to share across concurrent runs.
pub struct Iterator {
    rule: StoppingRule,
    count: u64,
    current_distance: Option<f64>,
    ordinal_run: u64,
}

impl Iterator {
    pub fn new(rule: StoppingRule) -> Self {
        Iterator {
            rule,
            count: 0,
            current_distance: None,
            ordinal_run: 0,
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.current_distance = None;
        self.ordinal_run = 0;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Record one iteration's step from `prev` to `curr`. Always bumps the
    /// counter; `Metric` also records the new distance and `Ordinal`
    /// tracks how long the ranking has stood still.
    pub fn compare(&mut self, prev: &[f64], curr: &[f64]) {
        self.count += 1;
        match self.rule {
            StoppingRule::Fixed { .. } => {}
            StoppingRule::Metric { measure, .. } => {
                self.current_distance = Some(measure.distance(prev, curr));
            }
            StoppingRule::Ordinal { .. } => {
                if ranking_vector(prev) == ranking_vector(curr) {
                    self.ordinal_run += 1;
                } else {
                    self.ordinal_run = 0;
                }
            }
        }
    }

    /// Whether the loop should stop. `Metric`'s safety limit surfaces as
    /// `DidNotConverge`; `Fixed` and `Ordinal` never fail.
    pub fn finished(&self) -> Result<bool, AlgoError> {
        match self.rule {
            StoppingRule::Fixed { limit } => Ok(self.count >= limit),
            StoppingRule::Metric { threshold, limit, .. } => {
                if let Some(d) = self.current_distance {
                    if d < threshold {
                        return Ok(true);
                    }
                }
                if self.count >= limit {
                    return Err(AlgoError::DidNotConverge { limit });
                }
                Ok(false)
            }
            StoppingRule::Ordinal { threshold } => Ok(self.ordinal_run >= threshold),
        }
    }
}

/// Dense-rank encoding of `v`: sort ascending, rank 0 for the smallest,
/// incrementing only on a strict increase, ties sharing a rank. Stable
/// under any strictly monotone transformation of the input.
pub fn ranking_vector(v: &[f64]) -> Vec<u64> {
    let mut order: Vec<usize> = (0..v.len()).collect();
    order.sort_by(|&a, &b| v[a].partial_cmp(&v[b]).unwrap());

    let mut ranks = vec![0u64; v.len()];
    let mut rank = 0u64;
    for (pos, &idx) in order.iter().enumerate() {
        if pos > 0 && v[idx] > v[order[pos - 1]] {
            rank += 1;
        }
        ranks[idx] = rank;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_stops_at_limit() {
        let mut it = Iterator::new(StoppingRule::Fixed { limit: 3 });
        for _ in 0..3 {
            assert_eq!(it.finished(), Ok(false));
            it.compare(&[0.0], &[1.0]);
        }
        assert_eq!(it.finished(), Ok(true));
        assert_eq!(it.count(), 3);
    }

    #[test]
    fn metric_converges_before_limit() {
        let mut it = Iterator::new(StoppingRule::metric(DistanceMeasure::L1, 0.5));
        it.compare(&[0.0, 0.0], &[0.1, 0.1]);
        assert_eq!(it.finished(), Ok(true));
    }

    #[test]
    fn metric_fails_when_limit_exhausted() {
        let mut it = Iterator::new(StoppingRule::Metric {
            measure: DistanceMeasure::L1,
            threshold: 0.0001,
            limit: 2,
        });
        it.compare(&[0.0], &[1.0]);
        it.compare(&[0.0], &[1.0]);
        assert!(matches!(
            it.finished(),
            Err(AlgoError::DidNotConverge { limit: 2 })
        ));
    }

    #[test]
    fn ranking_vector_is_stable_under_monotone_transform() {
        let v = vec![3.0, 1.0, 1.0, 5.0];
        let r1 = ranking_vector(&v);
        let transformed: Vec<f64> = v.iter().map(|x| x * 2.0 + 10.0).collect();
        let r2 = ranking_vector(&transformed);
        assert_eq!(r1, r2);
        assert_eq!(r1, vec![1, 0, 0, 2]);
    }

    #[test]
    fn ordinal_stops_after_stable_run() {
        let mut it = Iterator::new(StoppingRule::Ordinal { threshold: 2 });
        it.compare(&[1.0, 2.0], &[1.0, 2.0]);
        assert_eq!(it.finished(), Ok(false));
        it.compare(&[1.0, 2.0], &[1.0, 2.0]);
        assert_eq!(it.finished(), Ok(true));
    }
}
