use cosmwasm_std::StdError;
use covenant_utils::clock::ClockError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("Lockup config must not already be expired")]
    LockupAlreadyExpired {},

    #[error("Swap parties must contribute distinct denoms")]
    IdenticalDenoms {},

    #[error("Swap contribution of {0} must be non-zero")]
    ZeroContribution(String),
}
