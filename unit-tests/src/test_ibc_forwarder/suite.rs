use cosmwasm_std::{Addr, Uint64};
use covenant_ibc_forwarder::msg::{ContractState, QueryMsg};
use covenant_utils::neutron::RemoteChainInfo;

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::{clock::ClockInstantiate, ibc_forwarder::IbcForwarderInstantiate},
    suite_builder::SuiteBuilder,
    CustomApp, CLOCK_SALT, IBC_FORWARDER_SALT,
};

pub const NEXT_FORWARDER_SALT: &str = "deposit_forwarder";

pub struct IbcForwarderBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: IbcForwarderInstantiate,
}

impl Default for IbcForwarderBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let clock_addr = builder.get_contract_addr(builder.clock_code_id, CLOCK_SALT);
        let ibc_forwarder_addr =
            builder.get_contract_addr(builder.ibc_forwarder_code_id, IBC_FORWARDER_SALT);
        let next_contract_addr =
            builder.get_contract_addr(builder.ibc_forwarder_code_id, NEXT_FORWARDER_SALT);

        let clock_instantiate = ClockInstantiate::new(
            None,
            vec![
                ibc_forwarder_addr.to_string(),
                next_contract_addr.to_string(),
            ],
            vec![],
        );
        builder.contract_init2(
            builder.clock_code_id,
            CLOCK_SALT,
            &clock_instantiate.msg,
            &[],
        );

        // another forwarder acts as the downstream stage, its ica is the deposit address
        let next_contract_instantiate =
            IbcForwarderInstantiate::default(clock_addr.to_string(), clock_addr.to_string());
        builder.contract_init2(
            builder.ibc_forwarder_code_id,
            NEXT_FORWARDER_SALT,
            &next_contract_instantiate.msg,
            &[],
        );

        let ibc_forwarder_instantiate = IbcForwarderInstantiate::default(
            clock_addr.to_string(),
            next_contract_addr.to_string(),
        );

        IbcForwarderBuilder {
            builder,
            instantiate_msg: ibc_forwarder_instantiate,
        }
    }
}

impl IbcForwarderBuilder {
    pub fn with_denom(mut self, denom: String) -> Self {
        self.instantiate_msg.with_denom(denom);
        self
    }

    pub fn with_next_contract(mut self, next_contract: String) -> Self {
        self.instantiate_msg.with_next_contract(next_contract);
        self
    }

    pub fn with_clock_address(mut self, clock_address: String) -> Self {
        self.instantiate_msg.with_clock_address(clock_address);
        self
    }

    pub fn with_ica_timeout(mut self, ica_timeout: Uint64) -> Self {
        self.instantiate_msg.msg.ica_timeout = ica_timeout;
        self
    }

    pub fn build(mut self) -> Suite {
        let ibc_forwarder_address = self.builder.contract_init2(
            self.builder.ibc_forwarder_code_id,
            IBC_FORWARDER_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let clock_addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(ibc_forwarder_address.clone(), &QueryMsg::ClockAddress {})
            .unwrap();

        let next_contract = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(ibc_forwarder_address.clone(), &QueryMsg::NextContract {})
            .unwrap();

        Suite {
            app: self.builder.app,
            faucet: self.builder.faucet,
            admin: self.builder.admin,
            clock_addr,
            ibc_forwarder: ibc_forwarder_address,
            next_contract,
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,
    pub clock_addr: Addr,
    pub ibc_forwarder: Addr,
    pub next_contract: Addr,
}

impl Suite {
    pub fn query_deposit_address(&self, addr: &Addr) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(addr, &QueryMsg::DepositAddress {})
            .unwrap()
    }

    pub fn query_ica_address(&self, addr: &Addr) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(addr, &QueryMsg::IcaAddress {})
            .unwrap()
    }

    pub fn query_remote_chain_info(&self) -> RemoteChainInfo {
        self.app
            .wrap()
            .query_wasm_smart(&self.ibc_forwarder, &QueryMsg::RemoteChainInfo {})
            .unwrap()
    }

    pub fn query_contract_state(&self) -> ContractState {
        self.app
            .wrap()
            .query_wasm_smart(&self.ibc_forwarder, &QueryMsg::ContractState {})
            .unwrap()
    }

    pub fn query_clock_address(&self) -> Addr {
        self.app
            .wrap()
            .query_wasm_smart(&self.ibc_forwarder, &QueryMsg::ClockAddress {})
            .unwrap()
    }

    pub fn query_next_contract(&self) -> Addr {
        self.app
            .wrap()
            .query_wasm_smart(&self.ibc_forwarder, &QueryMsg::NextContract {})
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
