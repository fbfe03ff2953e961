use std::collections::BTreeMap;

use astroport::factory::PairType;
use cosmwasm_std::{coin, coins, Decimal, Uint128, Uint64};
use covenant_astroport_liquid_pooler::msg::AstroportLiquidPoolerConfig;
use covenant_single_party_pol::msg::{LsInfo, RemoteChainSplitterConfig};
use covenant_utils::{InterchainCovenantParty, PoolPriceConfig, SingleSideLpLimits, Timeouts};
use cw_utils::Expiration;

use crate::setup::{
    suite_builder::SuiteBuilder, DENOM_ATOM, DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN,
    DENOM_LS_ATOM_ON_STRIDE, DENOM_NTRN, HUB_STRIDE_CHANNEL, NTRN_HUB_CHANNEL,
    NTRN_STRIDE_CHANNEL,
};

use super::ibc_forwarder::default_ibc_fee;

#[derive(Clone)]
pub struct SinglePartyCovenantInstantiate {
    pub msg: covenant_single_party_pol::msg::InstantiateMsg,
}

impl From<SinglePartyCovenantInstantiate> for covenant_single_party_pol::msg::InstantiateMsg {
    fn from(value: SinglePartyCovenantInstantiate) -> Self {
        value.msg
    }
}

impl SinglePartyCovenantInstantiate {
    /// Atom on the hub, half liquid staked on stride, pooled against
    /// the other half on neutron.
    pub fn default(
        builder: &SuiteBuilder,
        pool_address: String,
        party_addr: String,
        party_receiver: String,
        contribution: u128,
    ) -> Self {
        let contract_codes = covenant_single_party_pol::msg::CovenantContractCodeIds {
            ibc_forwarder_code: builder.ibc_forwarder_code_id,
            remote_chain_splitter_code: builder.remote_splitter_code_id,
            liquid_staker_code: builder.stride_staker_code_id,
            liquid_pooler_code: builder.astro_pooler_code_id,
            holder_code: builder.holder_code_id,
            interchain_router_code: builder.interchain_router_code_id,
            clock_code: builder.clock_code_id,
        };

        let block_height = builder.app.block_info().height;

        Self {
            msg: covenant_single_party_pol::msg::InstantiateMsg {
                label: "single_party_covenant".to_string(),
                timeouts: Timeouts {
                    ica_timeout: Uint64::new(1000),
                    ibc_transfer_timeout: Uint64::new(1000),
                },
                preset_ibc_fee: default_ibc_fee(),
                contract_codes,
                clock_tick_max_gas: None,
                lockup_config: Expiration::AtHeight(block_height + 1_000),
                covenant_party_config: InterchainCovenantParty {
                    party_receiver_addr: party_receiver,
                    party_chain_connection_id: "connection-0".to_string(),
                    ibc_transfer_timeout: Uint64::new(1000),
                    party_to_host_chain_channel_id: NTRN_HUB_CHANNEL.1.to_string(),
                    host_to_party_chain_channel_id: NTRN_HUB_CHANNEL.0.to_string(),
                    remote_chain_denom: DENOM_ATOM.to_string(),
                    addr: party_addr,
                    native_denom: DENOM_ATOM_ON_NTRN.to_string(),
                    contribution: coin(contribution, DENOM_ATOM),
                    denom_to_pfm_map: BTreeMap::new(),
                },
                ls_info: LsInfo {
                    ls_denom: DENOM_LS_ATOM_ON_STRIDE.to_string(),
                    ls_denom_on_neutron: DENOM_LS_ATOM_ON_NTRN.to_string(),
                    ls_chain_to_neutron_channel_id: NTRN_STRIDE_CHANNEL.1.to_string(),
                    ls_neutron_connection_id: "connection-1".to_string(),
                    party_chain_to_ls_chain_channel_id: HUB_STRIDE_CHANNEL.0.to_string(),
                },
                remote_chain_splitter_config: RemoteChainSplitterConfig {
                    ls_share: Decimal::percent(50),
                    native_share: Decimal::percent(50),
                },
                liquid_pooler_config: AstroportLiquidPoolerConfig {
                    pool_address,
                    pool_pair_type: PairType::Stable {},
                    single_side_lp_limits: SingleSideLpLimits {
                        asset_a_limit: Uint128::new(10_000),
                        asset_b_limit: Uint128::new(10_000),
                    },
                    slippage_tolerance: None,
                },
                pool_price_config: PoolPriceConfig {
                    expected_spot_price: Decimal::one(),
                    acceptable_price_spread: Decimal::percent(10),
                },
                deposit_deadline: Expiration::AtHeight(block_height + 500),
                ica_registration_fee: coins(1_000_000, DENOM_NTRN),
                emergency_committee: None,
            },
        }
    }

    pub fn with_splitter_config(&mut self, config: RemoteChainSplitterConfig) -> &mut Self {
        self.msg.remote_chain_splitter_config = config;
        self
    }

    pub fn with_ls_denom_on_neutron(&mut self, denom: String) -> &mut Self {
        self.msg.ls_info.ls_denom_on_neutron = denom;
        self
    }
}
