use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Attribute, Coin, Uint128, Uint64};
use covenant_macros::{
    clocked, covenant_clock_address, covenant_deposit_address, covenant_ica_address,
    covenant_remote_chain,
};
use covenant_utils::{
    instantiate2_helper::Instantiate2, neutron::RemoteChainInfo, state_machine::StateMachine,
    PresetIbcFee,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// address for the clock. this contract verifies
    /// that only the clock can execute ticks
    pub clock_address: String,
    /// contract responsible for providing the address to forward the
    /// funds to
    pub next_contract: String,

    pub remote_chain_connection_id: String,
    pub remote_chain_channel_id: String,
    pub denom: String,

    /// timeout in seconds. this is used to craft a timeout timestamp
    /// that will be attached to the IBC transfer message from the ICA
    /// on the host chain to its destination. typically this timeout
    /// should be greater than the ICA timeout, otherwise if the ICA
    /// times out, the destination chain receiving the funds will also
    /// receive the IBC packet with an expired timestamp.
    pub ibc_transfer_timeout: Uint64,
    /// time in seconds for ICA SubmitTX messages from neutron
    /// note that ICA uses ordered channels, a timeout implies
    /// channel closed. We can reopen the channel by reregistering
    /// the ICA with the same port id and connection id
    pub ica_timeout: Uint64,
    /// relayer fees for the ICA packets
    pub ibc_fee: PresetIbcFee,
    /// fee charged by the interchain txs module for opening the ICA
    pub ica_registration_fee: Vec<Coin>,
}

impl Instantiate2 for InstantiateMsg {}

impl InstantiateMsg {
    pub fn to_remote_chain_info(&self) -> RemoteChainInfo {
        RemoteChainInfo {
            connection_id: self.remote_chain_connection_id.to_string(),
            channel_id: self.remote_chain_channel_id.to_string(),
            denom: self.denom.to_string(),
            ibc_transfer_timeout: self.ibc_transfer_timeout,
            ica_timeout: self.ica_timeout,
            ibc_fee: self.ibc_fee.to_ibc_fee(),
        }
    }

    pub fn get_response_attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new("clock_address", &self.clock_address),
            Attribute::new("next_contract", &self.next_contract),
            Attribute::new(
                "remote_chain_connection_id",
                &self.remote_chain_connection_id,
            ),
            Attribute::new("remote_chain_channel_id", &self.remote_chain_channel_id),
            Attribute::new("remote_chain_denom", &self.denom),
            Attribute::new(
                "ibc_transfer_timeout",
                self.ibc_transfer_timeout.to_string(),
            ),
            Attribute::new("ica_timeout", self.ica_timeout.to_string()),
        ]
    }
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        next_contract: Option<String>,
        remote_chain_info: Box<Option<RemoteChainInfo>>,
    },
}

#[covenant_deposit_address]
#[covenant_remote_chain]
#[covenant_clock_address]
#[covenant_ica_address]
#[derive(QueryResponses)]
#[cw_serde]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    #[returns(Addr)]
    NextContract {},
}

#[cw_serde]
pub enum ContractState {
    /// Contract was instantiated, waiting for the ICA to be confirmed
    Instantiated,
    /// ICA was created, waiting for the party deposit
    IcaCreated,
    /// transfer of the observed deposit was submitted
    Forwarding,
    /// the ICA was observed empty after forwarding. anything showing up
    /// later, such as a refunded transfer, is relayed again.
    Complete,
}

/// What a tick can see of the world
pub struct ForwarderObservation {
    pub ica_address: Option<String>,
    /// `None` until a balance reading newer than the last ICA tx exists
    pub ica_balance: Option<Uint128>,
}

impl ForwarderObservation {
    pub fn has_funds(&self) -> bool {
        self.ica_balance.is_some_and(|b| !b.is_zero())
    }
}

impl StateMachine for ContractState {
    type Observation = ForwarderObservation;

    fn precondition(&self, observed: &ForwarderObservation) -> bool {
        match self {
            ContractState::Instantiated => observed.ica_address.is_some(),
            ContractState::IcaCreated | ContractState::Complete => {
                observed.ica_address.is_some() && observed.has_funds()
            }
            // either the transfer landed and we complete, or we retry
            ContractState::Forwarding => {
                observed.ica_address.is_some() && observed.ica_balance.is_some()
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
