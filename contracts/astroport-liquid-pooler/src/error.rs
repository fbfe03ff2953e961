use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError};
use covenant_utils::clock::ClockError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    OverflowError(#[from] OverflowError),

    #[error(transparent)]
    CheckedMultiplyRatioError(#[from] CheckedMultiplyRatioError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("Incomplete pool assets")]
    IncompletePoolAssets {},

    #[error("Price range error: pool ratio {ratio} outside of [{min}, {max}]")]
    PriceRangeError {
        ratio: String,
        min: String,
        max: String,
    },

    #[error("Pair type mismatch")]
    PairTypeMismatch {},

    #[error("Only holder can withdraw the position")]
    NotHolder {},
}
