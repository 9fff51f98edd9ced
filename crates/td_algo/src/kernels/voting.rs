//! Majority Voting: the non-iterative baseline. Every source is equally
//! trusted; belief in a claim is just how many sources assert it.

use td_core::CsrMatrix;

use super::{KernelOutput, RunState};
use crate::priors::normalize;

pub fn run(sc: &CsrMatrix) -> KernelOutput {
    let (num_sources, _) = sc.shape();
    let sc_t = sc.transpose();
    let mut belief = sc_t.mat_vec(&vec![1.0; num_sources]);

    let state = if normalize(&mut belief) {
        RunState::Converged
    } else {
        RunState::EarlyStop
    };

    KernelOutput {
        trust: vec![1.0; num_sources],
        belief,
        iterations: None,
        state,
    }
}
