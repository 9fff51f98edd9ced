//! Error taxonomy for dataset construction. Kernel- and evaluator-level
//! errors live in their own crates (`td_algo`, `td_report`) since they
//! depend on types defined there.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("bad parameter: {0}")]
    BadParameter(String),

    #[error("bad shape: {0}")]
    BadShape(String),

    #[error("source made more than one assertion for the same variable")]
    DuplicateAssertion,

    #[error("dataset has no claims")]
    EmptyDataset,

    #[error("unknown label")]
    UnknownLabel,
}
