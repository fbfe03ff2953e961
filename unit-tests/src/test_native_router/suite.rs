use std::collections::BTreeSet;

use cosmwasm_std::Addr;
use covenant_native_router::msg::{ExecuteMsg, QueryMsg};
use covenant_utils::ReceiverConfig;
use cw_multi_test::{AppResponse, Executor};

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::{clock::ClockInstantiate, native_router::NativeRouterInstantiate},
    suite_builder::SuiteBuilder,
    CustomApp, CLOCK_SALT, DENOM_ATOM_ON_NTRN, NATIVE_ROUTER_SALT,
};

pub struct NativeRouterBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: NativeRouterInstantiate,
    pub clock_addr: Addr,
}

impl Default for NativeRouterBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let clock_addr = builder.get_contract_addr(builder.clock_code_id, CLOCK_SALT);
        let native_router_addr =
            builder.get_contract_addr(builder.native_router_code_id, NATIVE_ROUTER_SALT);

        let clock_instantiate = ClockInstantiate::default(vec![native_router_addr.to_string()]);
        builder.contract_init2(
            builder.clock_code_id,
            CLOCK_SALT,
            &clock_instantiate.msg,
            &[],
        );

        let party_receiver = builder.get_random_addr();
        let native_router_instantiate = NativeRouterInstantiate::default(
            clock_addr.to_string(),
            party_receiver.to_string(),
            &[DENOM_ATOM_ON_NTRN],
        );

        Self {
            builder,
            instantiate_msg: native_router_instantiate,
            clock_addr,
        }
    }
}

impl NativeRouterBuilder {
    pub fn with_clock_address(mut self, addr: &str) -> Self {
        self.instantiate_msg.with_clock_address(addr.to_string());
        self
    }

    pub fn with_receiver_address(mut self, addr: &str) -> Self {
        self.instantiate_msg.with_receiver_address(addr.to_string());
        self
    }

    pub fn with_denoms(mut self, denoms: Vec<String>) -> Self {
        self.instantiate_msg
            .with_denoms(BTreeSet::from_iter(denoms));
        self
    }

    pub fn build(mut self) -> Suite {
        let native_router_address = self.builder.contract_init2(
            self.builder.native_router_code_id,
            NATIVE_ROUTER_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let receiver_config: ReceiverConfig = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(native_router_address.clone(), &QueryMsg::ReceiverConfig {})
            .unwrap();
        let ReceiverConfig::Native(receiver_addr) = receiver_config else {
            panic!("native router must route to a local receiver");
        };

        let denoms = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(native_router_address.clone(), &QueryMsg::TargetDenoms {})
            .unwrap();

        Suite {
            router_addr: native_router_address,
            faucet: self.builder.faucet.clone(),
            admin: self.builder.admin.clone(),
            clock_addr: self.clock_addr,
            receiver_addr: Addr::unchecked(receiver_addr),
            denoms,
            app: self.builder.build(),
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,

    pub router_addr: Addr,
    pub clock_addr: Addr,
    pub receiver_addr: Addr,
    pub denoms: BTreeSet<String>,
}

impl Suite {
    pub fn query_receiver_config(&self) -> ReceiverConfig {
        self.app
            .wrap()
            .query_wasm_smart(self.router_addr.clone(), &QueryMsg::ReceiverConfig {})
            .unwrap()
    }

    pub fn query_clock_address(&self) -> Addr {
        self.app
            .wrap()
            .query_wasm_smart(self.router_addr.clone(), &QueryMsg::ClockAddress {})
            .unwrap()
    }

    pub fn query_deposit_address(&self) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(self.router_addr.clone(), &QueryMsg::DepositAddress {})
            .unwrap()
    }

    pub fn query_target_denoms(&self) -> BTreeSet<String> {
        self.app
            .wrap()
            .query_wasm_smart(self.router_addr.clone(), &QueryMsg::TargetDenoms {})
            .unwrap()
    }

    pub fn distribute_fallback(&mut self, denoms: Vec<String>) -> AppResponse {
        self.app
            .execute_contract(
                self.faucet.clone(),
                self.router_addr.clone(),
                &ExecuteMsg::DistributeFallback { denoms },
                &[],
            )
            .unwrap()
    }
}

impl BaseSuite for Suite {
    fn get_app(&self) -> &CustomApp {
        &self.app
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
