//! TruthFinder (Yin, Han and Yu): trust and belief interact through a
//! logistic link rather than a linear one, and an optional implication
//! function lets belief in one claim lend support to claims it implies.

use td_core::CsrMatrix;

use super::{KernelOutput, RunState};
use crate::errors::AlgoError;
use crate::iterator::Iterator;

pub const DEFAULT_RHO: f64 = 0.5;
pub const DEFAULT_GAMMA: f64 = 0.3;
pub const DEFAULT_INITIAL_TRUST: f64 = 0.9;

/// `tau(t) = -ln(1 - t)`, TruthFinder's trust-to-log-trust link. Undefined
/// at `t = 1`; callers must stop before a saturated trust reaches here.
fn tau(trust: &[f64]) -> Vec<f64> {
    trust.iter().map(|&t| -((1.0 - t).ln())).collect()
}

fn sigmoid_neg_gamma(sigma: &[f64], gamma: f64) -> Vec<f64> {
    sigma.iter().map(|&s| 1.0 / (1.0 + (-gamma * s).exp())).collect()
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    sc: &CsrMatrix,
    imp_t: Option<&CsrMatrix>,
    rho: f64,
    gamma: f64,
    initial_trust: f64,
    iterator: &mut Iterator,
) -> Result<KernelOutput, AlgoError> {
    let (num_sources, num_claims) = sc.shape();
    let sc_t = sc.transpose();
    let claims_per_source = sc.mat_vec(&vec![1.0; num_claims]);

    let mut trust = vec![initial_trust; num_sources];
    let mut belief = vec![0.0; num_claims];
    let mut state = RunState::Converged;

    iterator.reset();
    while !iterator.finished()? {
        if trust.iter().any(|&t| t >= 1.0) {
            state = RunState::EarlyStop;
            break;
        }

        let u = sc_t.mat_vec(&tau(&trust));
        let sigma = match imp_t {
            Some(imp_t) => {
                let spread = imp_t.mat_vec(&u);
                u.iter().zip(&spread).map(|(a, b)| a + rho * b).collect()
            }
            None => u,
        };
        belief = sigmoid_neg_gamma(&sigma, gamma);

        let raw = sc.mat_vec(&belief);
        let new_trust: Vec<f64> = raw
            .iter()
            .zip(&claims_per_source)
            .map(|(r, k)| r / k)
            .collect();

        iterator.compare(&trust, &new_trust);
        trust = new_trust;
    }

    Ok(KernelOutput {
        trust,
        belief,
        iterations: Some(iterator.count()),
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::{DistanceMeasure, StoppingRule};
    use td_core::Dataset;

    #[test]
    fn converges_on_d0_without_implication() {
        let d: Dataset<&str, &str, &str> = Dataset::builder()
            .build(vec![
                ("s1", "x", "one"),
                ("s1", "y", "nine"),
                ("s1", "z", "seven"),
                ("s2", "x", "one"),
                ("s2", "y", "eight"),
                ("s3", "z", "seven"),
            ])
            .unwrap();
        let mut it = Iterator::new(StoppingRule::metric(DistanceMeasure::Cosine, 0.001));
        let out = run(
            d.sc(),
            d.imp_t(),
            DEFAULT_RHO,
            DEFAULT_GAMMA,
            DEFAULT_INITIAL_TRUST,
            &mut it,
        )
        .unwrap();
        assert_eq!(out.state, RunState::Converged);
        let trust = d.trust_dict_from(&out.trust);
        assert!(trust[&"s1"] > 0.0 && trust[&"s1"] < 1.0);

        let belief = d.belief_dict_from(&out.belief);
        assert!(belief[&"y"][&"nine"] > belief[&"y"][&"eight"]);
    }

    #[test]
    fn implication_lends_support_to_implied_claims() {
        // y:big is implied by y:huge with strength 1.0: a source asserting
        // "huge" should lend some belief to "big" even without asserting it.
        let d: Dataset<&str, &str, &str> = Dataset::builder()
            .implication_fn(|_var, from, to| {
                if *from == "huge" && *to == "big" {
                    Some(1.0)
                } else {
                    None
                }
            })
            .build(vec![
                ("s1", "y", "huge"),
                ("s2", "y", "big"),
                ("s3", "y", "small"),
            ])
            .unwrap();
        assert!(d.imp().is_some());

        let mut it = Iterator::new(StoppingRule::Fixed { limit: 15 });
        let out = run(
            d.sc(),
            d.imp_t(),
            DEFAULT_RHO,
            DEFAULT_GAMMA,
            DEFAULT_INITIAL_TRUST,
            &mut it,
        )
        .unwrap();
        let belief = d.belief_dict_from(&out.belief);
        assert!(belief[&"y"][&"big"] > belief[&"y"][&"small"]);
    }

    #[test]
    fn matches_the_analytic_recurrence_with_explicit_parameters() {
        // Values read as the numbers they name ("nine" = 9, "eight" = 8):
        // f(y, a, b) = exp(-0.5*(a-b)^2) when a > b, else 0.4.
        fn number_of(word: &str) -> f64 {
            match word {
                "one" => 1.0,
                "seven" => 7.0,
                "eight" => 8.0,
                "nine" => 9.0,
                other => panic!("unexpected value {other}"),
            }
        }

        let d: Dataset<&str, &str, &str> = Dataset::builder()
            .implication_fn(|var, a, b| {
                if *var != "y" {
                    return None;
                }
                let (a, b) = (number_of(*a), number_of(*b));
                Some(if a > b { (-0.5 * (a - b) * (a - b)).exp() } else { 0.4 })
            })
            .build(vec![
                ("s1", "x", "one"),
                ("s1", "y", "nine"),
                ("s1", "z", "seven"),
                ("s2", "x", "one"),
                ("s2", "y", "eight"),
                ("s3", "z", "seven"),
            ])
            .unwrap();

        let mut it = Iterator::new(StoppingRule::Fixed { limit: 50 });
        let out = run(d.sc(), d.imp_t(), 0.25, 0.5, 0.4, &mut it).unwrap();
        assert_eq!(out.state, RunState::Converged);
        assert_eq!(out.iterations, Some(50));

        let trust = d.trust_dict_from(&out.trust);
        let belief = d.belief_dict_from(&out.belief);

        let tol = 1e-8;
        assert!((trust[&"s1"] - 0.7862980076721291).abs() < tol);
        assert!((trust[&"s2"] - 0.7534751796072571).abs() < tol);
        assert!((trust[&"s3"] - 0.8467711149941116).abs() < tol);

        assert!((belief[&"x"][&"one"] - 0.8133206044825957).abs() < tol);
        assert!((belief[&"y"][&"nine"] - 0.6988023035396802).abs() < tol);
        assert!((belief[&"y"][&"eight"] - 0.6936297547319185).abs() < tol);
        assert!((belief[&"z"][&"seven"] - 0.8467711149941116).abs() < tol);
    }
}
