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

    #[error("ica registration fee must be specified")]
    MissingRegistrationFee {},

    #[error("split receivers must be valid addresses")]
    InvalidSplitReceiver {},
}

impl From<ContractError> for NeutronError {
    fn from(value: ContractError) -> Self {
        NeutronError::Std(StdError::generic_err(value.to_string()))
    }
}
