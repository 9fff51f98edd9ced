//! Investment (Pasternack and Roth): sources invest their trust uniformly
//! across the claims they make, and receive returns proportional to how
//! much of a claim's total investment they contributed.

use td_core::CsrMatrix;

use super::{KernelOutput, RunState};
use crate::errors::AlgoError;
use crate::iterator::Iterator;
use crate::priors::{normalize, prior_beliefs, PriorBelief};

pub const DEFAULT_G: f64 = 1.2;

/// One trust-update step shared with [`super::pooled_investment`]: invest
/// `trust` uniformly over each source's claims and collect the returns.
/// Returns `None` if some claim's total investment is zero (the division
/// that would follow is numerically infeasible).
pub(crate) fn trust_update(
    sc: &CsrMatrix,
    sc_t: &CsrMatrix,
    trust: &[f64],
    claim_counts: &[f64],
    belief: &[f64],
) -> Option<Vec<f64>> {
    let investment: Vec<f64> = trust.iter().zip(claim_counts).map(|(t, k)| t / k).collect();
    let ci = sc_t.mat_vec(&investment);
    if ci.iter().any(|&c| c == 0.0) {
        return None;
    }
    let scaled_belief: Vec<f64> = belief.iter().zip(&ci).map(|(b, c)| b / c).collect();
    Some(
        investment
            .iter()
            .zip(sc.mat_vec(&scaled_belief))
            .map(|(inv, r)| inv * r)
            .collect(),
    )
}

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
    let mut belief = prior_beliefs(sc, mut_ex, PriorBelief::Voted);
    let mut state = RunState::Converged;

    iterator.reset();
    while !iterator.finished()? {
        let Some(mut new_trust) = trust_update(sc, &sc_t, &trust, &claim_counts, &belief) else {
            state = RunState::EarlyStop;
            break;
        };

        let returns = sc_t.mat_vec(
            &new_trust
                .iter()
                .zip(&claim_counts)
                .map(|(t, k)| t / k)
                .collect::<Vec<_>>(),
        );
        let mut new_belief: Vec<f64> = returns.iter().map(|&r| r.powf(g)).collect();

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
