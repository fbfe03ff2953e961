use cosmwasm_std::Addr;
use covenant_stride_liquid_staker::msg::{ContractState, QueryMsg};

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::{
        clock::ClockInstantiate, ibc_forwarder::IbcForwarderInstantiate,
        native_router::NativeRouterInstantiate, stride_staker::StrideStakerInstantiate,
    },
    suite_builder::SuiteBuilder,
    CustomApp, CLOCK_SALT, DENOM_ATOM, DENOM_LS_ATOM_ON_NTRN, HUB_STRIDE_CHANNEL,
    IBC_FORWARDER_SALT, NATIVE_ROUTER_SALT, STRIDE_STAKER_SALT,
};

pub struct StrideStakerBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: StrideStakerInstantiate,
    pub forwarder_instantiate_msg: IbcForwarderInstantiate,
}

impl Default for StrideStakerBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let clock_addr = builder.get_contract_addr(builder.clock_code_id, CLOCK_SALT);
        let forwarder_addr =
            builder.get_contract_addr(builder.ibc_forwarder_code_id, IBC_FORWARDER_SALT);
        let staker_addr =
            builder.get_contract_addr(builder.stride_staker_code_id, STRIDE_STAKER_SALT);
        let router_addr =
            builder.get_contract_addr(builder.native_router_code_id, NATIVE_ROUTER_SALT);

        let clock_instantiate = ClockInstantiate::new(
            None,
            vec![
                forwarder_addr.to_string(),
                staker_addr.to_string(),
                router_addr.to_string(),
            ],
            vec![],
        );
        builder.contract_init2(
            builder.clock_code_id,
            CLOCK_SALT,
            &clock_instantiate.msg,
            &[],
        );

        // stuatom lands in a router that hands it to a plain account
        let receiver = builder.get_random_addr();
        let router_instantiate = NativeRouterInstantiate::default(
            clock_addr.to_string(),
            receiver.to_string(),
            &[DENOM_LS_ATOM_ON_NTRN],
        );
        builder.contract_init2(
            builder.native_router_code_id,
            NATIVE_ROUTER_SALT,
            &router_instantiate.msg,
            &[],
        );

        let staker_instantiate =
            StrideStakerInstantiate::default(clock_addr.to_string(), router_addr.to_string());

        // atom leaves the hub straight towards stride
        let mut forwarder_instantiate =
            IbcForwarderInstantiate::default(clock_addr.to_string(), staker_addr.to_string());
        forwarder_instantiate
            .with_remote_chain_channel_id(HUB_STRIDE_CHANNEL.0.to_string())
            .with_denom(DENOM_ATOM.to_string());

        StrideStakerBuilder {
            builder,
            instantiate_msg: staker_instantiate,
            forwarder_instantiate_msg: forwarder_instantiate,
        }
    }
}

impl StrideStakerBuilder {
    pub fn with_next_contract(mut self, addr: String) -> Self {
        self.instantiate_msg.with_next_contract(addr);
        self
    }

    pub fn with_registration_fee(mut self, fee: Vec<cosmwasm_std::Coin>) -> Self {
        self.instantiate_msg.msg.ica_registration_fee = fee;
        self
    }

    pub fn build(mut self) -> Suite {
        let staker = self.builder.contract_init2(
            self.builder.stride_staker_code_id,
            STRIDE_STAKER_SALT,
            &self.instantiate_msg.msg,
            &[],
        );
        let forwarder = self.builder.contract_init2(
            self.builder.ibc_forwarder_code_id,
            IBC_FORWARDER_SALT,
            &self.forwarder_instantiate_msg.msg,
            &[],
        );

        let clock_addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(staker.clone(), &QueryMsg::ClockAddress {})
            .unwrap();
        let router: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(staker.clone(), &QueryMsg::NextContract {})
            .unwrap();
        let receiver = self
            .builder
            .app
            .wrap()
            .query_wasm_smart::<covenant_utils::ReceiverConfig>(
                router.clone(),
                &covenant_native_router::msg::QueryMsg::ReceiverConfig {},
            )
            .unwrap();
        let covenant_utils::ReceiverConfig::Native(receiver) = receiver else {
            panic!("native router must have a native receiver");
        };

        Suite {
            app: self.builder.app,
            faucet: self.builder.faucet,
            admin: self.builder.admin,
            clock_addr,
            staker,
            forwarder,
            router,
            receiver: Addr::unchecked(receiver),
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,
    pub clock_addr: Addr,
    pub staker: Addr,
    pub forwarder: Addr,
    pub router: Addr,
    pub receiver: Addr,
}

impl Suite {
    pub fn query_contract_state(&self) -> ContractState {
        self.app
            .wrap()
            .query_wasm_smart(&self.staker, &QueryMsg::ContractState {})
            .unwrap()
    }

    pub fn query_ica_address(&self) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(&self.staker, &QueryMsg::IcaAddress {})
            .unwrap()
    }

    pub fn query_deposit_address(&self, addr: &Addr) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(addr, &QueryMsg::DepositAddress {})
            .unwrap()
    }

    pub fn query_next_memo(&self) -> cosmwasm_std::StdResult<String> {
        self.app
            .wrap()
            .query_wasm_smart(&self.staker, &QueryMsg::NextMemo {})
    }

    pub fn query_forwarder_state(&self) -> covenant_ibc_forwarder::msg::ContractState {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.forwarder,
                &covenant_ibc_forwarder::msg::QueryMsg::ContractState {},
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
