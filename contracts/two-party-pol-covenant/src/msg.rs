use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint64};
use covenant_astroport_liquid_pooler::msg::AstroportLiquidPoolerConfig;
use covenant_utils::{
    split::SplitConfig, CovenantPartyConfig, PoolPriceConfig, PresetIbcFee, Timeouts,
};
use cw_utils::Expiration;

pub const PARTY_A: &str = "party_a";
pub const PARTY_B: &str = "party_b";

#[cw_serde]
pub struct InstantiateMsg {
    pub label: String,
    pub timeouts: Timeouts,
    pub preset_ibc_fee: PresetIbcFee,
    pub contract_codes: CovenantContractCodeIds,
    pub clock_tick_max_gas: Option<Uint64>,
    /// pool shares are held until this expires
    pub lockup_config: Expiration,
    pub party_a_config: CovenantPartyConfig,
    pub party_b_config: CovenantPartyConfig,
    /// liquidity is no longer provided after this
    pub deposit_deadline: Expiration,
    pub pool_price_config: PoolPriceConfig,
    /// per-denom distribution of the unwound position, keyed by the
    /// final receiver address of each party
    pub splits: BTreeMap<String, SplitConfig>,
    pub fallback_split: Option<SplitConfig>,
    /// only address allowed to claim from the holder, anyone if unset
    pub withdrawer: Option<String>,
    pub liquid_pooler_config: AstroportLiquidPoolerConfig,
    /// fee charged for opening each forwarder ICA. forwarders pay it
    /// from their own balance.
    pub ica_registration_fee: Vec<Coin>,
    /// may unwind the holder position before the lockup expires
    pub emergency_committee: Option<String>,
}

#[cw_serde]
pub struct CovenantContractCodeIds {
    pub ibc_forwarder_code: u64,
    pub interchain_router_code: u64,
    pub native_router_code: u64,
    pub splitter_code: u64,
    pub holder_code: u64,
    pub clock_code: u64,
    pub liquid_pooler_code: u64,
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
    #[returns(Addr)]
    LiquidPoolerAddress {},
    /// `party_a` or `party_b`
    #[returns(Option<Addr>)]
    IbcForwarderAddress { party: String },
    #[returns(Addr)]
    InterchainRouterAddress { party: String },
    /// where the party should send its contribution. `None` while the
    /// forwarder ICA is not registered yet.
    #[returns(Option<String>)]
    PartyDepositAddress { party: String },
    #[returns(CovenantContractCodeIds)]
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
        holder: Option<covenant_holder::msg::MigrateMsg>,
        splitter: Option<covenant_native_splitter::msg::MigrateMsg>,
        party_a_router: Option<RouterMigrateMsg>,
        party_b_router: Option<RouterMigrateMsg>,
        party_a_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
        party_b_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
        liquid_pooler: Option<covenant_astroport_liquid_pooler::msg::MigrateMsg>,
    },
}
