//! AverageLog (Pasternack and Roth): like Sums, but a source's trust
//! update is weighted by `log(claims made) / claims made`, so prolific
//! sources don't automatically dominate.

use td_core::CsrMatrix;

use super::{KernelOutput, RunState};
use crate::errors::AlgoError;
use crate::iterator::Iterator;
use crate::priors::{normalize, prior_beliefs, PriorBelief};

pub fn run(
    sc: &CsrMatrix,
    mut_ex: &CsrMatrix,
    iterator: &mut Iterator,
) -> Result<KernelOutput, AlgoError> {
    let (num_sources, num_claims) = sc.shape();
    let sc_t = sc.transpose();

    let claim_counts = sc.mat_vec(&vec![1.0; num_claims]);
    if claim_counts.iter().any(|&c| c == 0.0) {
        return Err(AlgoError::EmptyAssertion);
    }
    let weights: Vec<f64> = claim_counts.iter().map(|&c| c.ln() / c).collect();

    let mut trust = vec![0.0; num_sources];
    let mut belief = prior_beliefs(sc, mut_ex, PriorBelief::Fixed);
    let mut state = RunState::Converged;

    iterator.reset();
    while !iterator.finished()? {
        let raw = sc.mat_vec(&belief);
        let mut new_trust: Vec<f64> = weights.iter().zip(&raw).map(|(w, r)| w * r).collect();
        let mut new_belief = sc_t.mat_vec(&new_trust);

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
