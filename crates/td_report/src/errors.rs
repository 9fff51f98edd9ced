use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("unknown variable")]
    UnknownVariable,

    #[error("no variable has more than one claimed value; nothing to score")]
    NoScorableVariables,
}
