use cosmwasm_std::StdError;
use covenant_utils::clock::ClockError;
use neutron_sdk::NeutronError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("unauthorized to distribute explicitly defined denom: {0}")]
    UnauthorizedDenomDistribution(String),

    #[error("multiple {0:?} entries")]
    DuplicateDenom(String),
}

impl From<ContractError> for NeutronError {
    fn from(val: ContractError) -> Self {
        NeutronError::Std(StdError::generic_err(val.to_string()))
    }
}
