use std::collections::BTreeMap;

use cosmwasm_std::Addr;
use covenant_native_splitter::msg::{ExecuteMsg, QueryMsg};
use covenant_utils::split::SplitConfig;
use cw_multi_test::{AppResponse, Executor};

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::{clock::ClockInstantiate, native_splitter::NativeSplitterInstantiate},
    suite_builder::SuiteBuilder,
    CustomApp, CLOCK_SALT, DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN, NATIVE_SPLITTER_SALT,
};

pub struct NativeSplitterBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: NativeSplitterInstantiate,
    pub receiver_a: Addr,
    pub receiver_b: Addr,
}

impl Default for NativeSplitterBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let clock_addr = builder.get_contract_addr(builder.clock_code_id, CLOCK_SALT);
        let splitter_addr =
            builder.get_contract_addr(builder.native_splitter_code_id, NATIVE_SPLITTER_SALT);

        let clock_instantiate =
            ClockInstantiate::new(None, vec![splitter_addr.to_string()], vec![]);
        builder.contract_init2(
            builder.clock_code_id,
            CLOCK_SALT,
            &clock_instantiate.msg,
            &[],
        );

        let receiver_a = builder.get_random_addr();
        let receiver_b = builder.get_random_addr();

        let splitter_instantiate = NativeSplitterInstantiate::default(
            clock_addr.to_string(),
            &[DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN],
            receiver_a.to_string(),
            receiver_b.to_string(),
        );

        Self {
            builder,
            instantiate_msg: splitter_instantiate,
            receiver_a,
            receiver_b,
        }
    }
}

impl NativeSplitterBuilder {
    pub fn with_clock_address(mut self, addr: String) -> Self {
        self.instantiate_msg.with_clock_address(addr);
        self
    }

    pub fn with_splits(mut self, splits: BTreeMap<String, SplitConfig>) -> Self {
        self.instantiate_msg.with_splits(splits);
        self
    }

    pub fn with_fallback_split(mut self, fallback_split: Option<SplitConfig>) -> Self {
        self.instantiate_msg.with_fallback_split(fallback_split);
        self
    }

    pub fn build(mut self) -> Suite {
        let splitter = self.builder.contract_init2(
            self.builder.native_splitter_code_id,
            NATIVE_SPLITTER_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let clock_addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(splitter.clone(), &QueryMsg::ClockAddress {})
            .unwrap();

        Suite {
            faucet: self.builder.faucet.clone(),
            admin: self.builder.admin.clone(),
            clock_addr,
            splitter,
            receiver_a: self.receiver_a,
            receiver_b: self.receiver_b,
            app: self.builder.build(),
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,

    pub clock_addr: Addr,
    pub splitter: Addr,
    pub receiver_a: Addr,
    pub receiver_b: Addr,
}

impl Suite {
    pub fn query_denom_split(&self, denom: &str) -> SplitConfig {
        self.app
            .wrap()
            .query_wasm_smart(
                self.splitter.clone(),
                &QueryMsg::DenomSplit {
                    denom: denom.to_string(),
                },
            )
            .unwrap()
    }

    pub fn query_all_splits(&self) -> Vec<(String, SplitConfig)> {
        self.app
            .wrap()
            .query_wasm_smart(self.splitter.clone(), &QueryMsg::Splits {})
            .unwrap()
    }

    pub fn query_fallback_split(&self) -> Option<SplitConfig> {
        self.app
            .wrap()
            .query_wasm_smart(self.splitter.clone(), &QueryMsg::FallbackSplit {})
            .unwrap()
    }

    pub fn query_deposit_address(&self) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(self.splitter.clone(), &QueryMsg::DepositAddress {})
            .unwrap()
    }

    pub fn distribute_fallback(&mut self, denoms: Vec<String>) -> AppResponse {
        self.app
            .execute_contract(
                self.faucet.clone(),
                self.splitter.clone(),
                &ExecuteMsg::DistributeFallback { denoms },
                &[],
            )
            .unwrap()
    }
}

impl BaseSuiteMut for Suite {
    fn get_app(&mut self) -> &mut CustomApp {
        &mut self.app
    }

    fn get_clock_addr(&mut self) -> Addr {
        self.clock_addr.clone()
    }

    fn get_faucet_addr(&mut self) -> Addr {
        self.faucet.clone()
    }
}

impl BaseSuite for Suite {
    fn get_app(&self) -> &CustomApp {
        &self.app
    }
}
