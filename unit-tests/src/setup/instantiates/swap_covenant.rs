use std::collections::BTreeMap;

use cosmwasm_std::{coins, Decimal, Uint64};
use covenant_utils::{split::SplitConfig, CovenantPartyConfig, Timeouts};
use cw_utils::Expiration;

use crate::setup::{suite_builder::SuiteBuilder, DENOM_NTRN};

use super::ibc_forwarder::default_ibc_fee;

#[derive(Clone)]
pub struct SwapCovenantInstantiate {
    pub msg: covenant_swap::msg::InstantiateMsg,
}

impl From<SwapCovenantInstantiate> for covenant_swap::msg::InstantiateMsg {
    fn from(value: SwapCovenantInstantiate) -> Self {
        value.msg
    }
}

impl SwapCovenantInstantiate {
    /// Each party receives the whole contribution of the other one
    pub fn default(
        builder: &SuiteBuilder,
        party_a_config: CovenantPartyConfig,
        party_b_config: CovenantPartyConfig,
    ) -> Self {
        let contract_codes = covenant_swap::msg::SwapCovenantContractCodeIds {
            ibc_forwarder_code: builder.ibc_forwarder_code_id,
            interchain_router_code: builder.interchain_router_code_id,
            native_router_code: builder.native_router_code_id,
            splitter_code: builder.native_splitter_code_id,
            holder_code: builder.swap_holder_code_id,
            clock_code: builder.clock_code_id,
        };

        let to_party = |receiver: String| SplitConfig {
            receivers: BTreeMap::from([(receiver, Decimal::one())]),
        };
        let splits = BTreeMap::from([
            (
                party_a_config.get_native_denom(),
                to_party(party_b_config.get_final_receiver_address()),
            ),
            (
                party_b_config.get_native_denom(),
                to_party(party_a_config.get_final_receiver_address()),
            ),
        ]);

        let block_height = builder.app.block_info().height;

        Self {
            msg: covenant_swap::msg::InstantiateMsg {
                label: "swap_covenant".to_string(),
                timeouts: Timeouts {
                    ica_timeout: Uint64::new(1000),
                    ibc_transfer_timeout: Uint64::new(1000),
                },
                preset_ibc_fee: default_ibc_fee(),
                contract_codes,
                clock_tick_max_gas: None,
                lockup_config: Expiration::AtHeight(block_height + 1_000),
                party_a_config,
                party_b_config,
                splits,
                fallback_split: None,
                ica_registration_fee: coins(1_000_000, DENOM_NTRN),
            },
        }
    }

    pub fn with_lockup_config(&mut self, lockup_config: Expiration) -> &mut Self {
        self.msg.lockup_config = lockup_config;
        self
    }

    pub fn with_splits(&mut self, splits: BTreeMap<String, SplitConfig>) -> &mut Self {
        self.msg.splits = splits;
        self
    }
}
