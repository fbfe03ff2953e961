use cosmwasm_std::StdError;
use covenant_utils::clock::ClockError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("multiple {0:?} entries")]
    DuplicateDenom(String),

    #[error("unauthorized denom distribution: {0}")]
    UnauthorizedDenom(String),

    #[error("no fallback split defined")]
    NoFallbackSplit {},
}
