use thiserror::Error;

use td_algo::AlgoError;
use td_core::CoreError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Algo(#[from] AlgoError),
}
