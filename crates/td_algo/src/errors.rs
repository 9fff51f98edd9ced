use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlgoError {
    #[error("every source must make at least one claim")]
    EmptyAssertion,

    #[error("did not converge in {limit} iterations")]
    DidNotConverge { limit: u64 },
}
