//! PooledInvestment (Pasternack and Roth): like Investment, but the return
//! on each claim is renormalised against its mutually-exclusive group
//! rather than globally, so belief is "pooled" within each variable.

use td_core::CsrMatrix;

use super::investment::trust_update;
use super::{KernelOutput, RunState};
use crate::errors::AlgoError;
use crate::iterator::Iterator;
use crate::priors::{normalize, prior_beliefs, PriorBelief};

pub const DEFAULT_G: f64 = 1.4;

pub fn run(
    sc: &CsrMatrix,
    mut_ex: &CsrMatrix,
    g: f64,
    iterator: &mut Iterator,
) -> Result<KernelOutput, AlgoError> {
    let (num_sources, num_claims) = sc.shape();
    let sc_t = sc.transpose();
    let claim_counts = sc.mat_vec(&vec![1.0; num_claims]);

    let mut trust = vec![1.0; num_sources];
    let mut belief = prior_beliefs(sc, mut_ex, PriorBelief::Uniform);
    let mut state = RunState::Converged;

    iterator.reset();
    while !iterator.finished()? {
        let Some(mut new_trust) = trust_update(sc, &sc_t, &trust, &claim_counts, &belief) else {
            state = RunState::EarlyStop;
            break;
        };

        let base_returns = sc_t.mat_vec(
            &new_trust
                .iter()
                .zip(&claim_counts)
                .map(|(t, k)| t / k)
                .collect::<Vec<_>>(),
        );
        let returns: Vec<f64> = base_returns.iter().map(|&r| r.powf(g)).collect();
        let pool = mut_ex.mat_vec(&returns);

        if pool.iter().any(|&p| p == 0.0) {
            state = RunState::EarlyStop;
            break;
        }

        let mut new_belief: Vec<f64> = base_returns
            .iter()
            .zip(&returns)
            .zip(&pool)
            .map(|((base, ret), p)| base * (ret / p))
            .collect();

        if !normalize(&mut new_trust) || !normalize(&mut new_belief) {
            state = RunState::EarlyStop;
            break;
        }

        iterator.compare(&trust, &new_trust);
        trust = new_trust;
        belief = new_belief;
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
    use crate::iterator::StoppingRule;
    use td_core::Dataset;

    #[test]
    fn produces_bounded_belief_on_d0() {
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
        let mut it = Iterator::new(StoppingRule::Fixed { limit: 10 });
        let out = run(d.sc(), d.mut_ex(), DEFAULT_G, &mut it).unwrap();
        assert_eq!(out.iterations, Some(10));
        for &b in &out.belief {
            assert!((0.0..=1.0 + 1e-9).contains(&b));
        }
        let belief = d.belief_dict_from(&out.belief);
        assert!(belief[&"y"][&"nine"] > belief[&"y"][&"eight"]);
    }
}
