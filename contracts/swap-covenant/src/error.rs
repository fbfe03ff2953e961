use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("both parties provide the same denom: {0}")]
    PartyDenomCollision(String),

    #[error("split for {0} must be provided")]
    MissingSplit(String),
}
