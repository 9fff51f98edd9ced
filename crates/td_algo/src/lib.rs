//! The six truth-discovery kernels and the iterator/prior machinery they
//! share. This crate knows nothing about labels or dictionaries: it works
//! purely in terms of [`td_core::CsrMatrix`] and dense `Vec<f64>` vectors
//! indexed by source/claim ID, leaving label-keyed results to `td_report`.

pub mod errors;
pub mod iterator;
pub mod kernels;
pub mod priors;

pub use errors::AlgoError;
pub use iterator::{DistanceMeasure, Iterator, StoppingRule};
pub use kernels::{KernelOutput, RunState};
pub use priors::PriorBelief;
