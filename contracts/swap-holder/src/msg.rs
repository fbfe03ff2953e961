use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Api, Coin};
use covenant_macros::{clocked, covenant_clock_address, covenant_deposit_address};
use covenant_utils::{instantiate2_helper::Instantiate2, state_machine::StateMachine};
use cw_utils::Expiration;

use crate::error::ContractError;

#[cw_serde]
pub struct InstantiateMsg {
    pub clock_address: String,
    /// splitter receiving both contributions once the swap is funded
    pub next_contract: String,
    /// both contributions must arrive before this expires, otherwise
    /// they are returned to their parties
    pub lockup_config: Expiration,
    pub parties_config: SwapPartiesConfig,
}

impl Instantiate2 for InstantiateMsg {}

#[cw_serde]
pub struct SwapParty {
    /// amount and denom the party is expected to deposit
    pub contribution: Coin,
    /// router receiving the contribution back if the swap falls through
    pub router: String,
}

#[cw_serde]
pub struct SwapPartiesConfig {
    pub party_a: SwapParty,
    pub party_b: SwapParty,
}

impl SwapPartiesConfig {
    pub fn validate(&self, api: &dyn Api) -> Result<(), ContractError> {
        if self.party_a.contribution.denom == self.party_b.contribution.denom {
            return Err(ContractError::IdenticalDenoms {});
        }
        for party in [&self.party_a, &self.party_b] {
            if party.contribution.amount.is_zero() {
                return Err(ContractError::ZeroContribution(
                    party.contribution.denom.to_string(),
                ));
            }
            api.addr_validate(&party.router)?;
        }
        Ok(())
    }

    pub fn parties(&self) -> [&SwapParty; 2] {
        [&self.party_a, &self.party_b]
    }
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {}

#[covenant_clock_address]
#[covenant_deposit_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    #[returns(Addr)]
    NextContract {},
    #[returns(Expiration)]
    LockupConfig {},
    #[returns(SwapPartiesConfig)]
    PartiesConfig {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        next_contract: Option<String>,
        lockup_config: Option<Expiration>,
        parties_config: Option<Box<SwapPartiesConfig>>,
    },
}

#[cw_serde]
pub enum ContractState {
    /// waiting for both contributions
    Instantiated,
    /// lockup passed before the swap was funded, deposits are refunded
    Expired,
    /// both contributions were forwarded. anything arriving afterwards
    /// goes back to whoever sent that denom.
    Complete,
}

pub struct SwapObservation {
    pub lockup_expired: bool,
    /// balance of every party denom covers its contribution
    pub terms_met: bool,
    /// non-zero balances of the party denoms
    pub balances: Vec<Coin>,
}

impl StateMachine for ContractState {
    type Observation = SwapObservation;

    fn precondition(&self, observed: &SwapObservation) -> bool {
        match self {
            ContractState::Instantiated => observed.lockup_expired || observed.terms_met,
            ContractState::Expired | ContractState::Complete => !observed.balances.is_empty(),
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            ContractState::Instantiated => 0,
            ContractState::Expired | ContractState::Complete => 1,
        }
    }

    fn is_terminal(&self) -> bool {
        !matches!(self, ContractState::Instantiated)
    }
}

impl ContractState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractState::Instantiated => "instantiated",
            ContractState::Expired => "expired",
            ContractState::Complete => "complete",
        }
    }
}
