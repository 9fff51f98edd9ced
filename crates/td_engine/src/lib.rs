//! Orchestration layer: picks an algorithm, wires its defaults, times the
//! run, and turns the raw per-source/per-claim vectors the kernels produce
//! into label-keyed dictionaries a caller can actually read.

pub mod errors;

use std::hash::Hash;
use std::time::Instant;

pub use errors::EngineError;

use td_algo::kernels::{self, RunState};
use td_algo::{DistanceMeasure, Iterator, StoppingRule};
use td_core::{CoreError, Dataset};
use td_report::Result as RunResult;

/// Which kernel to run, carrying whatever per-algorithm parameters the
/// reference hyperparameters expose. `iterator` is left to the caller
/// (via [`run`]'s `iterator` argument) since it is shared machinery, not
/// an algorithm-specific knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    Voting,
    Sums,
    AverageLog,
    Investment { g: f64 },
    PooledInvestment { g: f64 },
    TruthFinder { rho: f64, gamma: f64, initial_trust: f64 },
}

impl Algorithm {
    pub fn investment() -> Self {
        Algorithm::Investment { g: kernels::investment::DEFAULT_G }
    }

    pub fn pooled_investment() -> Self {
        Algorithm::PooledInvestment { g: kernels::pooled_investment::DEFAULT_G }
    }

    pub fn truth_finder() -> Self {
        Algorithm::TruthFinder {
            rho: kernels::truth_finder::DEFAULT_RHO,
            gamma: kernels::truth_finder::DEFAULT_GAMMA,
            initial_trust: kernels::truth_finder::DEFAULT_INITIAL_TRUST,
        }
    }

    /// The stopping rule each reference algorithm defaults to when the
    /// caller doesn't supply one explicitly.
    pub fn default_stopping_rule(self) -> StoppingRule {
        match self {
            Algorithm::Voting => StoppingRule::Fixed { limit: 0 },
            Algorithm::Sums | Algorithm::AverageLog | Algorithm::Investment { .. } => {
                StoppingRule::metric(DistanceMeasure::L2, 1e-6)
            }
            Algorithm::PooledInvestment { .. } => StoppingRule::Fixed { limit: 10 },
            Algorithm::TruthFinder { .. } => StoppingRule::metric(DistanceMeasure::Cosine, 0.001),
        }
    }
}

/// Run `algorithm` against `dataset` using `iterator` (reset internally,
/// so the same `Iterator` value can be reused across calls). Returns the
/// run's [`RunState`] alongside the packaged [`RunResult`] since
/// `EarlyStop` is not an error: the caller still gets the latest vectors.
pub fn run<S, Var, Val>(
    dataset: &Dataset<S, Var, Val>,
    algorithm: Algorithm,
    iterator: &mut Iterator,
) -> Result<(RunResult<S, Var, Val>, RunState), EngineError>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    if dataset.num_claims() == 0 || dataset.num_sources() == 0 {
        return Err(EngineError::Core(CoreError::EmptyDataset));
    }

    let started = Instant::now();
    let (trust, belief, iterations, state) = match algorithm {
        Algorithm::Voting => {
            let out = kernels::voting::run(dataset.sc());
            (out.trust, out.belief, out.iterations, out.state)
        }
        Algorithm::Sums => {
            let out = kernels::sums::run(dataset.sc(), dataset.mut_ex(), iterator)?;
            (out.trust, out.belief, out.iterations, out.state)
        }
        Algorithm::AverageLog => {
            let out = kernels::average_log::run(dataset.sc(), dataset.mut_ex(), iterator)?;
            (out.trust, out.belief, out.iterations, out.state)
        }
        Algorithm::Investment { g } => {
            let out = kernels::investment::run(dataset.sc(), dataset.mut_ex(), g, iterator)?;
            (out.trust, out.belief, out.iterations, out.state)
        }
        Algorithm::PooledInvestment { g } => {
            let out =
                kernels::pooled_investment::run(dataset.sc(), dataset.mut_ex(), g, iterator)?;
            (out.trust, out.belief, out.iterations, out.state)
        }
        Algorithm::TruthFinder { rho, gamma, initial_trust } => {
            let out = kernels::truth_finder::run(
                dataset.sc(),
                dataset.imp_t(),
                rho,
                gamma,
                initial_trust,
                iterator,
            )?;
            (out.trust, out.belief, out.iterations, out.state)
        }
    };
    let time_taken_secs = started.elapsed().as_secs_f64();

    let result = RunResult::new(
        dataset.trust_dict_from(&trust),
        dataset.belief_dict_from(&belief),
        iterations,
        time_taken_secs,
    );
    Ok((result, state))
}
