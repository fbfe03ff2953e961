use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint64};
use covenant_utils::{split::SplitConfig, CovenantPartyConfig, PresetIbcFee, Timeouts};
use cw_utils::Expiration;

pub const PARTY_A: &str = "party_a";
pub const PARTY_B: &str = "party_b";

#[cw_serde]
pub struct InstantiateMsg {
    pub label: String,
    pub timeouts: Timeouts,
    pub preset_ibc_fee: PresetIbcFee,
    pub contract_codes: SwapCovenantContractCodeIds,
    pub clock_tick_max_gas: Option<Uint64>,
    /// both contributions must be in before this expires
    pub lockup_config: Expiration,
    pub party_a_config: CovenantPartyConfig,
    pub party_b_config: CovenantPartyConfig,
    /// per-denom distribution of the swapped funds, keyed by the final
    /// receiver address of each party
    pub splits: BTreeMap<String, SplitConfig>,
    pub fallback_split: Option<SplitConfig>,
    /// fee charged for opening each forwarder ICA
    pub ica_registration_fee: Vec<Coin>,
}

#[cw_serde]
pub struct SwapCovenantContractCodeIds {
    pub ibc_forwarder_code: u64,
    pub interchain_router_code: u64,
    pub native_router_code: u64,
    pub splitter_code: u64,
    pub holder_code: u64,
    pub clock_code: u64,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Addr)]
    ClockAddress {},
    #[returns(Addr)]
    HolderAddress {},
    #[returns(Addr)]
    SplitterAddress {},
    /// `party_a` or `party_b`
    #[returns(Option<Addr>)]
    IbcForwarderAddress { party: String },
    #[returns(Addr)]
    InterchainRouterAddress { party: String },
    /// where the party should send its contribution. `None` while the
    /// forwarder ICA is not registered yet.
    #[returns(Option<String>)]
    PartyDepositAddress { party: String },
    #[returns(SwapCovenantContractCodeIds)]
    ContractCodes {},
}

#[cw_serde]
pub enum RouterMigrateMsg {
    Native(covenant_native_router::msg::MigrateMsg),
    Interchain(covenant_interchain_router::msg::MigrateMsg),
}

#[allow(clippy::large_enum_variant)]
#[cw_serde]
pub enum MigrateMsg {
    MigrateContracts {
        clock: Option<covenant_clock::msg::MigrateMsg>,
        holder: Option<covenant_swap_holder::msg::MigrateMsg>,
        splitter: Option<covenant_native_splitter::msg::MigrateMsg>,
        party_a_router: Option<RouterMigrateMsg>,
        party_b_router: Option<RouterMigrateMsg>,
        party_a_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
        party_b_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
    },
}
