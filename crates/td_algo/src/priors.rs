//! Prior belief initialisation, shared by every iterative kernel.

use td_core::CsrMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorBelief {
    /// `b0 = 0.5` for every claim.
    Fixed,
    /// Each claim's share of the vote count among claims competing for the
    /// same variable.
    Voted,
    /// `1/k` for every claim, where `k` is the number of claimed values for
    /// that claim's variable.
    Uniform,
}

/// `b0` per [`PriorBelief`]. `mut_ex` has a 1 diagonal (invariant 3 of the
/// dataset model) and every claim has at least one source (invariant 2),
/// so `mut_ex * ones` is never zero and this never divides by zero.
pub fn prior_beliefs(sc: &CsrMatrix, mut_ex: &CsrMatrix, prior: PriorBelief) -> Vec<f64> {
    let (num_sources, num_claims) = sc.shape();
    match prior {
        PriorBelief::Fixed => vec![0.5; num_claims],
        PriorBelief::Voted => {
            let sc_t = sc.transpose();
            let counts = sc_t.mat_vec(&vec![1.0; num_sources]);
            let denom = mut_ex.mat_vec(&counts);
            counts
                .iter()
                .zip(denom)
                .map(|(&c, d)| c / d)
                .collect()
        }
        PriorBelief::Uniform => {
            let denom = mut_ex.mat_vec(&vec![1.0; num_claims]);
            denom.iter().map(|&d| 1.0 / d).collect()
        }
    }
}

/// Divide every entry of `v` by its maximum. Returns `false` instead of
/// dividing (leaving `v` untouched) when the maximum is zero, since that
/// would otherwise produce `NaN`; callers treat a `false` return as an
/// early-stop signal.
pub fn normalize(v: &mut [f64]) -> bool {
    let max = v.iter().cloned().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return false;
    }
    for x in v.iter_mut() {
        *x /= max;
    }
    true
}
