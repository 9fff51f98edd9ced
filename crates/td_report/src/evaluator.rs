//! Scores a result's beliefs against known true values.

use std::collections::HashMap;
use std::hash::Hash;

use td_core::{Dataset, TieRng};

use crate::{ReportError, Result as RunResult};

/// Ground truth bound to a dataset: `{variable -> true value}`.
pub struct SupervisedData<'a, S, Var, Val> {
    dataset: &'a Dataset<S, Var, Val>,
    truth: HashMap<Var, Val>,
}

impl<'a, S, Var, Val> SupervisedData<'a, S, Var, Val>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    pub fn new(dataset: &'a Dataset<S, Var, Val>, truth: HashMap<Var, Val>) -> Self {
        SupervisedData { dataset, truth }
    }

    pub fn accuracy(
        &self,
        result: &RunResult<S, Var, Val>,
        rng: &mut TieRng,
    ) -> std::result::Result<f64, ReportError> {
        accuracy(self.dataset, &self.truth, result, rng)
    }
}

/// How many distinct values were claimed for `var` across the whole
/// dataset (used to skip variables only one source bothered to assert).
fn claimed_value_count<S, Var, Val>(dataset: &Dataset<S, Var, Val>, var: &Var) -> usize
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    let mut seen: Vec<&Val> = Vec::new();
    for claim_id in 0..dataset.num_claims() as u32 {
        let Some((claim_var, claim_val)) = dataset.var_of_claim(claim_id) else {
            continue;
        };
        if claim_var == var && !seen.contains(&claim_val) {
            seen.push(claim_val);
        }
    }
    seen.len()
}

/// `correct / scored` over every variable in `truth` that has more than
/// one claimed value, breaking ties among a result's most-believed values
/// uniformly at random via `rng`.
pub fn accuracy<S, Var, Val>(
    dataset: &Dataset<S, Var, Val>,
    truth: &HashMap<Var, Val>,
    result: &RunResult<S, Var, Val>,
    rng: &mut TieRng,
) -> std::result::Result<f64, ReportError>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    let mut scored = 0u64;
    let mut correct = 0u64;

    for (var, true_value) in truth {
        if dataset.var_id(var).is_none() {
            return Err(ReportError::UnknownVariable);
        }
        if claimed_value_count(dataset, var) <= 1 {
            continue;
        }
        scored += 1;

        let candidates: Vec<Val> = result.most_believed_values(var).into_iter().collect();
        if candidates.is_empty() {
            continue;
        }
        let chosen = if candidates.len() == 1 {
            &candidates[0]
        } else {
            &candidates[rng.pick_index(&candidates)]
        };
        if chosen == true_value {
            correct += 1;
        }
    }

    if scored == 0 {
        return Err(ReportError::NoScorableVariables);
    }
    Ok(correct as f64 / scored as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Map;

    fn d0() -> Dataset<&'static str, &'static str, &'static str> {
        Dataset::builder()
            .build(vec![
                ("s1", "x", "one"),
                ("s1", "y", "nine"),
                ("s1", "z", "seven"),
                ("s2", "x", "one"),
                ("s2", "y", "eight"),
                ("s3", "z", "seven"),
            ])
            .unwrap()
    }

    #[test]
    fn single_claim_variables_never_affect_accuracy() {
        let d = d0();
        let mut belief = Map::new();
        belief.insert("x", Map::from([("one", 1.0)]));
        belief.insert("z", Map::from([("seven", 1.0)]));
        let result = RunResult::new(Map::new(), belief, None, 0.0);

        let truth = Map::from([("x", "one"), ("z", "seven")]);
        let mut rng = TieRng::from_seed_u64(1);
        assert!(matches!(
            accuracy(&d, &truth, &result, &mut rng),
            Err(ReportError::NoScorableVariables)
        ));
    }

    #[test]
    fn perfect_belief_scores_one() {
        let d = d0();
        let mut belief = Map::new();
        belief.insert("y", Map::from([("nine", 1.0), ("eight", 0.2)]));
        let result = RunResult::new(Map::new(), belief, None, 0.0);

        let truth = Map::from([("y", "nine")]);
        let mut rng = TieRng::from_seed_u64(1);
        assert_eq!(accuracy(&d, &truth, &result, &mut rng).unwrap(), 1.0);
    }

    #[test]
    fn unknown_variable_is_rejected() {
        let d = d0();
        let result = RunResult::new(Map::new(), Map::new(), None, 0.0);
        let truth = Map::from([("not-a-variable", "whatever")]);
        let mut rng = TieRng::from_seed_u64(1);
        assert!(matches!(
            accuracy(&d, &truth, &result, &mut rng),
            Err(ReportError::UnknownVariable)
        ));
    }
}
