use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128, Uint64};
use covenant_macros::{
    clocked, covenant_clock_address, covenant_deposit_address, covenant_ica_address,
    covenant_remote_chain,
};
use covenant_utils::{
    instantiate2_helper::Instantiate2, neutron::RemoteChainInfo, split::SplitConfig,
    state_machine::StateMachine, PresetIbcFee,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address for the clock. This contract verifies
    /// that only the clock can execute Ticks
    pub clock_address: String,

    pub remote_chain_connection_id: String,
    pub remote_chain_channel_id: String,
    pub denom: String,

    /// downstream stages keyed by contract address. each must answer
    /// the `DepositAddress` query with an account on the remote chain.
    pub split: SplitConfig,

    /// Neutron requires fees to be set to refund relayers for
    /// submission of ack and timeout messages.
    pub ibc_fee: PresetIbcFee,
    /// Time in seconds for ICA SubmitTX messages from Neutron
    pub ica_timeout: Uint64,
    /// Timeout in seconds for transfers leaving the remote chain
    pub ibc_transfer_timeout: Uint64,
    pub ica_registration_fee: Vec<Coin>,
}

impl Instantiate2 for InstantiateMsg {}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {}

#[covenant_clock_address]
#[covenant_remote_chain]
#[covenant_deposit_address]
#[covenant_ica_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    #[returns(SplitConfig)]
    SplitConfig {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        remote_chain_info: Option<RemoteChainInfo>,
        split: Option<SplitConfig>,
    },
}

#[cw_serde]
pub enum ContractState {
    Instantiated,
    IcaCreated,
    /// multi-send of the observed deposit was submitted
    Forwarding,
    /// the ICA was observed empty after splitting. late arrivals are
    /// split again.
    Complete,
}

pub struct SplitterObservation {
    pub ica_address: Option<String>,
    /// `None` until a balance reading newer than the last ICA tx exists
    pub ica_balance: Option<Uint128>,
    /// deposit addresses of every split receiver, if all are ready
    pub receiver_deposit_addresses: Option<Vec<String>>,
}

impl SplitterObservation {
    pub fn has_funds(&self) -> bool {
        self.ica_balance.is_some_and(|b| !b.is_zero())
    }
}

impl StateMachine for ContractState {
    type Observation = SplitterObservation;

    fn precondition(&self, observed: &SplitterObservation) -> bool {
        match self {
            ContractState::Instantiated => observed.ica_address.is_some(),
            ContractState::IcaCreated | ContractState::Complete => {
                observed.ica_address.is_some()
                    && observed.has_funds()
                    && observed.receiver_deposit_addresses.is_some()
            }
            ContractState::Forwarding => {
                observed.ica_address.is_some()
                    && observed.ica_balance.is_some()
                    && (!observed.has_funds() || observed.receiver_deposit_addresses.is_some())
            }
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            ContractState::Instantiated => 0,
            ContractState::IcaCreated => 1,
            ContractState::Forwarding => 2,
            ContractState::Complete => 3,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ContractState::Complete)
    }
}

impl ContractState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractState::Instantiated => "instantiated",
            ContractState::IcaCreated => "ica_created",
            ContractState::Forwarding => "forwarding",
            ContractState::Complete => "complete",
        }
    }
}
