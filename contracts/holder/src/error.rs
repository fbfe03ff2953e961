use cosmwasm_std::StdError;
use covenant_utils::clock::ClockError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Lockup period has not expired yet")]
    LockupNotExpired {},

    #[error("Lockup config must not already be expired")]
    LockupAlreadyExpired {},

    #[error("Holder must be configured with at least one denom")]
    NoDenoms {},

    #[error("No emergency committee configured")]
    EmergencyWithdrawDisabled {},

    #[error("Refund router configured for unknown denom: {0}")]
    UnknownRefundDenom(String),
}
