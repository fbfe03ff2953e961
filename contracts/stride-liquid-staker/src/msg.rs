use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128, Uint64};
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
    /// Address for the clock. This contract verifies
    /// that only the clock can execute Ticks
    pub clock_address: String,
    /// IBC transfer channel on Stride for Neutron
    /// This is used to IBC transfer stuatom on Stride
    /// to the LP contract
    pub stride_neutron_ibc_transfer_channel_id: String,
    /// IBC connection ID on Neutron for Stride
    /// We make an Interchain Account over this connection
    pub neutron_stride_ibc_connection_id: String,
    /// Address of the next contract to query for the deposit address
    pub next_contract: String,
    /// The liquid staked denom (e.g., stuatom). This is
    /// required because we only allow transfers of this denom
    /// out of the LSer
    pub ls_denom: String,
    /// Time in seconds for ICA SubmitTX messages from Neutron
    /// Note that ICA uses ordered channels, a timeout implies
    /// channel closed. We can reopen the channel by reregistering
    /// the ICA with the same port id and connection id
    pub ica_timeout: Uint64,
    /// Timeout in seconds. This is used to craft a timeout timestamp
    /// that will be attached to the IBC transfer message from the ICA
    /// on the host chain (Stride) to its destination. Typically
    /// this timeout should be greater than the ICA timeout, otherwise
    /// if the ICA times out, the destination chain receiving the funds
    /// will also receive the IBC packet with an expired timestamp.
    pub ibc_transfer_timeout: Uint64,
    pub ibc_fee: PresetIbcFee,
    pub ica_registration_fee: Vec<Coin>,
}

impl Instantiate2 for InstantiateMsg {}

impl InstantiateMsg {
    pub fn to_remote_chain_info(&self) -> RemoteChainInfo {
        RemoteChainInfo {
            connection_id: self.neutron_stride_ibc_connection_id.to_string(),
            channel_id: self.stride_neutron_ibc_transfer_channel_id.to_string(),
            denom: self.ls_denom.to_string(),
            ibc_transfer_timeout: self.ibc_transfer_timeout,
            ica_timeout: self.ica_timeout,
            ibc_fee: self.ibc_fee.to_ibc_fee(),
        }
    }
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// The transfer message allows anybody to permissionlessly
    /// transfer the observed balance of the preset ls_denom
    /// from the ICA of the host chain to the next contract
    Transfer {},
}

#[covenant_clock_address]
#[covenant_remote_chain]
#[covenant_deposit_address]
#[covenant_ica_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    /// autopilot instruction upstream transfers must carry
    #[returns(String)]
    NextMemo {},
    #[returns(Addr)]
    NextContract {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        next_contract: Option<String>,
        remote_chain_info: Option<RemoteChainInfo>,
    },
}

#[cw_serde]
pub enum ContractState {
    Instantiated,
    IcaCreated,
    /// first liquid staked batch was sent to the next contract
    Complete,
}

pub struct StakerObservation {
    pub ica_address: Option<String>,
    /// `None` until a balance reading newer than the last ICA tx exists
    pub ls_balance: Option<Uint128>,
}

impl StakerObservation {
    pub fn has_funds(&self) -> bool {
        self.ls_balance.is_some_and(|b| !b.is_zero())
    }
}

impl StateMachine for ContractState {
    type Observation = StakerObservation;

    fn precondition(&self, observed: &StakerObservation) -> bool {
        match self {
            ContractState::Instantiated => observed.ica_address.is_some(),
            // vouchers keep being relayed after the first batch
            ContractState::IcaCreated | ContractState::Complete => {
                observed.ica_address.is_some() && observed.has_funds()
            }
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            ContractState::Instantiated => 0,
            ContractState::IcaCreated => 1,
            ContractState::Complete => 2,
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
            ContractState::Complete => "complete",
        }
    }
}
