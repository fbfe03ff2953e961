use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Decimal, Uint64};
use covenant_astroport_liquid_pooler::msg::AstroportLiquidPoolerConfig;
use covenant_utils::{InterchainCovenantParty, PoolPriceConfig, PresetIbcFee, Timeouts};
use cw_utils::Expiration;

#[cw_serde]
pub struct InstantiateMsg {
    pub label: String,
    pub timeouts: Timeouts,
    pub preset_ibc_fee: PresetIbcFee,
    pub contract_codes: CovenantContractCodeIds,
    pub clock_tick_max_gas: Option<Uint64>,
    pub lockup_config: Expiration,
    /// the party deposits on its own chain, receives the unwound
    /// position back there and is the only one allowed to claim
    pub covenant_party_config: InterchainCovenantParty,
    pub ls_info: LsInfo,
    pub remote_chain_splitter_config: RemoteChainSplitterConfig,
    pub liquid_pooler_config: AstroportLiquidPoolerConfig,
    pub pool_price_config: PoolPriceConfig,
    pub deposit_deadline: Expiration,
    /// fee charged for opening each ICA. the ICA owners pay it from
    /// their own balance.
    pub ica_registration_fee: Vec<Coin>,
    /// may unwind the holder position before the lockup expires
    pub emergency_committee: Option<String>,
}

#[cw_serde]
pub struct LsInfo {
    /// liquid staked denom on the liquid staking chain
    pub ls_denom: String,
    /// liquid staked denom once it arrives on neutron
    pub ls_denom_on_neutron: String,
    pub ls_chain_to_neutron_channel_id: String,
    pub ls_neutron_connection_id: String,
    /// channel the party chain uses to reach the liquid staking chain
    pub party_chain_to_ls_chain_channel_id: String,
}

/// how the party deposit is divided between liquid staking and the
/// side that goes into the pool as is
#[cw_serde]
pub struct RemoteChainSplitterConfig {
    pub ls_share: Decimal,
    pub native_share: Decimal,
}

#[cw_serde]
pub struct CovenantContractCodeIds {
    pub ibc_forwarder_code: u64,
    pub remote_chain_splitter_code: u64,
    pub liquid_staker_code: u64,
    pub liquid_pooler_code: u64,
    pub holder_code: u64,
    pub interchain_router_code: u64,
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
    RemoteSplitterAddress {},
    /// `ls` or `lp`
    #[returns(Addr)]
    IbcForwarderAddress { ty: String },
    #[returns(Addr)]
    LiquidStakerAddress {},
    #[returns(Addr)]
    LiquidPoolerAddress {},
    #[returns(Addr)]
    InterchainRouterAddress {},
    /// remote splitter ICA, `None` until it is registered
    #[returns(Option<String>)]
    PartyDepositAddress {},
    #[returns(CovenantContractCodeIds)]
    ContractCodes {},
}

#[allow(clippy::large_enum_variant)]
#[cw_serde]
pub enum MigrateMsg {
    MigrateContracts {
        clock: Option<covenant_clock::msg::MigrateMsg>,
        remote_chain_splitter: Option<covenant_remote_chain_splitter::msg::MigrateMsg>,
        ls_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
        lp_forwarder: Option<covenant_ibc_forwarder::msg::MigrateMsg>,
        liquid_staker: Option<covenant_stride_liquid_staker::msg::MigrateMsg>,
        liquid_pooler: Option<covenant_astroport_liquid_pooler::msg::MigrateMsg>,
        holder: Option<covenant_holder::msg::MigrateMsg>,
        router: Option<covenant_interchain_router::msg::MigrateMsg>,
    },
}
