//! Sums (Hubs and Authorities, adapted to truth discovery by Pasternack
//! and Roth): trust and belief bootstrap each other through the `SC`
//! incidence matrix, renormalised every iteration.

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
    let (num_sources, _) = sc.shape();
    let sc_t = sc.transpose();

    let mut trust = vec![0.0; num_sources];
    let mut belief = prior_beliefs(sc, mut_ex, PriorBelief::Fixed);
    let mut state = RunState::Converged;

    iterator.reset();
    while !iterator.finished()? {
        let mut new_trust = sc.mat_vec(&belief);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::{DistanceMeasure, StoppingRule};
    use td_core::Dataset;

    #[test]
    fn d0_matches_published_scenario() {
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
        let mut it = Iterator::new(StoppingRule::metric(DistanceMeasure::L1, 1e-5));
        let out = run(d.sc(), d.mut_ex(), &mut it).unwrap();
        let trust = d.trust_dict_from(&out.trust);
        assert!((trust[&"s1"] - 1.0).abs() < 1e-4);
        assert!((trust[&"s2"] - 0.532_09).abs() < 1e-4);
        assert!((trust[&"s3"] - 0.347_30).abs() < 1e-4);

        let belief = d.belief_dict_from(&out.belief);
        assert!((belief[&"y"][&"nine"] - 0.652_70).abs() < 1e-4);
        assert!((belief[&"y"][&"eight"] - 0.347_30).abs() < 1e-4);
    }
}
