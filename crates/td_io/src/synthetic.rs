//! Generates a supervised truth-discovery dataset from a trust-vector
//! specification: useful for exercising the kernels against a dataset whose
//! ground truth is known by construction, rather than gathered by hand.

use std::collections::{HashMap, HashSet};

use td_core::{CoreError, Dataset, TieRng};

/// A generated dataset paired with the true value of each variable, ready
/// to feed a [`td_report::SupervisedData`].
pub struct SyntheticDataset {
    pub dataset: Dataset<usize, usize, usize>,
    pub truth: HashMap<usize, usize>,
}

/// Draw a dataset of `trust.len()` sources and `num_variables` variables
/// over a domain of `domain_size` values, where each source independently
/// claims a value for each variable with probability `claim_probability`,
/// correctly with probability `trust[source]` and uniformly among the
/// wrong values otherwise. Every variable and every source is guaranteed
/// at least one claim, patched in after the main draw if needed.
pub fn generate(
    trust: &[f64],
    num_variables: usize,
    claim_probability: f64,
    domain_size: usize,
    rng: &mut TieRng,
) -> Result<SyntheticDataset, CoreError> {
    if trust.is_empty() {
        return Err(CoreError::BadParameter("trust vector must not be empty".into()));
    }
    if trust.iter().any(|&t| t.is_nan() || !(0.0..=1.0).contains(&t)) {
        return Err(CoreError::BadParameter(
            "trust values must be finite and lie in [0, 1]".into(),
        ));
    }
    if !(claim_probability > 0.0 && claim_probability <= 1.0) {
        return Err(CoreError::BadParameter(
            "claim probability must lie in (0, 1]".into(),
        ));
    }
    if domain_size < 2 {
        return Err(CoreError::BadParameter("domain size must be at least 2".into()));
    }

    let num_sources = trust.len();
    let true_value: Vec<usize> =
        (0..num_variables).map(|_| rng.gen_range(domain_size)).collect();

    let mut assigned: HashMap<(usize, usize), usize> = HashMap::new();
    for s in 0..num_sources {
        for v in 0..num_variables {
            if rng.bernoulli(claim_probability) {
                let value = if rng.bernoulli(trust[s]) {
                    true_value[v]
                } else {
                    wrong_value(true_value[v], domain_size, rng)
                };
                assigned.insert((s, v), value);
            }
        }
    }

    let mut claimed_sources: HashSet<usize> = assigned.keys().map(|&(s, _)| s).collect();
    let mut claimed_variables: HashSet<usize> = assigned.keys().map(|&(_, v)| v).collect();

    for v in 0..num_variables {
        if !claimed_variables.contains(&v) {
            let s = rng.gen_range(num_sources);
            assigned.insert((s, v), true_value[v]);
            claimed_sources.insert(s);
            claimed_variables.insert(v);
        }
    }
    for s in 0..num_sources {
        if num_variables > 0 && !claimed_sources.contains(&s) {
            // `s` made zero claims before this patch, so `(s, v)` cannot
            // already be assigned for any `v`.
            let v = rng.gen_range(num_variables);
            let value = if rng.bernoulli(trust[s]) {
                true_value[v]
            } else {
                wrong_value(true_value[v], domain_size, rng)
            };
            assigned.insert((s, v), value);
            claimed_sources.insert(s);
        }
    }

    let triples = assigned.into_iter().map(|((s, v), val)| (s, v, val));
    let dataset = Dataset::builder().build(triples)?;
    let truth = true_value.into_iter().enumerate().collect();
    Ok(SyntheticDataset { dataset, truth })
}

/// Uniform draw among the `domain_size - 1` values other than `true_val`.
fn wrong_value(true_val: usize, domain_size: usize, rng: &mut TieRng) -> usize {
    let idx = rng.gen_range(domain_size - 1);
    if idx < true_val {
        idx
    } else {
        idx + 1
    }
}
