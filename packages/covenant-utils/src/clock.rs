use cosmwasm_std::{Addr, StdError};
use neutron_sdk::NeutronError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ClockError {
    #[error("Caller is not the clock, only clock can tick contracts")]
    NotClock,
}

impl From<ClockError> for NeutronError {
    fn from(val: ClockError) -> Self {
        NeutronError::Std(StdError::generic_err(val.to_string()))
    }
}

impl From<ClockError> for StdError {
    fn from(val: ClockError) -> Self {
        StdError::generic_err(val.to_string())
    }
}

pub fn verify_clock(caller: &Addr, clock_addr: &Addr) -> Result<(), ClockError> {
    if caller != clock_addr {
        return Err(ClockError::NotClock);
    }

    Ok(())
}
