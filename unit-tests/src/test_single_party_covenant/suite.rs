use astroport::factory::PairType;
use cosmwasm_std::{coin, coins, Addr};
use covenant_single_party_pol::msg::{CovenantContractCodeIds, MigrateMsg, QueryMsg};
use cw_multi_test::{AppResponse, Executor};

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::single_party_covenant::SinglePartyCovenantInstantiate,
    suite_builder::SuiteBuilder,
    CustomApp, ADMIN, DENOM_ATOM, DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN, DENOM_NTRN,
    SINGLE_PARTY_COVENANT_SALT,
};

pub const CONTRIBUTION: u128 = 100_000;

pub struct SinglePartyCovenantBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: SinglePartyCovenantInstantiate,
    pub party_addr: Addr,
    pub party_receiver: Addr,
}

impl Default for SinglePartyCovenantBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let (pool_addr, _lp_token_addr) = builder.init_astro_pool(
            PairType::Stable {},
            coin(10_000_000_000_000, DENOM_ATOM_ON_NTRN),
            coin(10_000_000_000_000, DENOM_LS_ATOM_ON_NTRN),
        );

        let party_addr = builder.get_random_addr();
        let party_receiver = builder.get_random_addr();

        let instantiate_msg = SinglePartyCovenantInstantiate::default(
            &builder,
            pool_addr.to_string(),
            party_addr.to_string(),
            party_receiver.to_string(),
            CONTRIBUTION,
        );

        Self {
            builder,
            instantiate_msg,
            party_addr,
            party_receiver,
        }
    }
}

impl SinglePartyCovenantBuilder {
    pub fn with_splitter_config(
        mut self,
        config: covenant_single_party_pol::msg::RemoteChainSplitterConfig,
    ) -> Self {
        self.instantiate_msg.with_splitter_config(config);
        self
    }

    pub fn with_ls_denom_on_neutron(mut self, denom: String) -> Self {
        self.instantiate_msg.with_ls_denom_on_neutron(denom);
        self
    }

    pub fn build(mut self) -> Suite {
        let covenant_addr = self.builder.contract_init2(
            self.builder.single_party_covenant_code_id,
            SINGLE_PARTY_COVENANT_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let query = |app: &CustomApp, msg: &QueryMsg| -> Addr {
            app.wrap()
                .query_wasm_smart(covenant_addr.clone(), msg)
                .unwrap()
        };
        let app = &self.builder.app;

        let clock_addr = query(app, &QueryMsg::ClockAddress {});
        let splitter_addr = query(app, &QueryMsg::RemoteSplitterAddress {});
        let ls_forwarder_addr = query(
            app,
            &QueryMsg::IbcForwarderAddress {
                ty: "ls".to_string(),
            },
        );
        let lp_forwarder_addr = query(
            app,
            &QueryMsg::IbcForwarderAddress {
                ty: "lp".to_string(),
            },
        );
        let liquid_staker_addr = query(app, &QueryMsg::LiquidStakerAddress {});
        let liquid_pooler_addr = query(app, &QueryMsg::LiquidPoolerAddress {});
        let holder_addr = query(app, &QueryMsg::HolderAddress {});
        let router_addr = query(app, &QueryMsg::InterchainRouterAddress {});

        Suite {
            faucet: self.builder.faucet.clone(),
            admin: self.builder.admin.clone(),
            covenant_addr,
            clock_addr,
            splitter_addr,
            ls_forwarder_addr,
            lp_forwarder_addr,
            liquid_staker_addr,
            liquid_pooler_addr,
            holder_addr,
            router_addr,
            party_addr: self.party_addr,
            party_receiver: self.party_receiver,
            app: self.builder.build(),
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,

    pub covenant_addr: Addr,
    pub clock_addr: Addr,
    pub splitter_addr: Addr,
    pub ls_forwarder_addr: Addr,
    pub lp_forwarder_addr: Addr,
    pub liquid_staker_addr: Addr,
    pub liquid_pooler_addr: Addr,
    pub holder_addr: Addr,
    pub router_addr: Addr,

    pub party_addr: Addr,
    pub party_receiver: Addr,
}

impl Suite {
    pub fn migrate_update(&mut self, msg: MigrateMsg) -> AppResponse {
        let code_id = self
            .app
            .wrap()
            .query_wasm_contract_info(self.covenant_addr.clone())
            .unwrap()
            .code_id;

        self.app
            .migrate_contract(
                Addr::unchecked(ADMIN),
                self.covenant_addr.clone(),
                &msg,
                code_id,
            )
            .unwrap()
    }

    pub fn query_party_deposit_address(&self) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(self.covenant_addr.clone(), &QueryMsg::PartyDepositAddress {})
            .unwrap()
    }

    pub fn query_contract_codes(&self) -> CovenantContractCodeIds {
        self.app
            .wrap()
            .query_wasm_smart(self.covenant_addr.clone(), &QueryMsg::ContractCodes {})
            .unwrap()
    }

    pub fn query_clock_queue(&self) -> Vec<Addr> {
        self.app
            .wrap()
            .query_wasm_smart(
                self.clock_addr.clone(),
                &covenant_clock::msg::QueryMsg::Queue {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap()
    }

    pub fn query_ica_address(&self, owner: &Addr) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(
                owner.clone(),
                &covenant_ibc_forwarder::msg::QueryMsg::DepositAddress {},
            )
            .unwrap()
    }

    pub fn query_pooler_state(&self) -> covenant_astroport_liquid_pooler::msg::ContractState {
        self.app
            .wrap()
            .query_wasm_smart(
                self.liquid_pooler_addr.clone(),
                &covenant_astroport_liquid_pooler::msg::QueryMsg::ContractState {},
            )
            .unwrap()
    }

    pub fn query_holder_state(&self) -> covenant_holder::msg::ContractState {
        self.app
            .wrap()
            .query_wasm_smart(
                self.holder_addr.clone(),
                &covenant_holder::msg::QueryMsg::ContractState {},
            )
            .unwrap()
    }

    pub fn claim(&mut self, sender: &Addr) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.holder_addr.clone(),
            &covenant_holder::msg::ExecuteMsg::Claim {},
            &[],
        )
    }

    /// permissionless push of the liquid staked balance to the pooler
    pub fn liquid_staker_transfer(&mut self) -> AppResponse {
        self.app
            .execute_contract(
                self.faucet.clone(),
                self.liquid_staker_addr.clone(),
                &covenant_stride_liquid_staker::msg::ExecuteMsg::Transfer {},
                &[],
            )
            .unwrap()
    }

    /// every ica owning stage pays its own registration and ibc fees
    pub fn fund_ica_owners(&mut self) {
        for addr in [
            self.splitter_addr.clone(),
            self.ls_forwarder_addr.clone(),
            self.lp_forwarder_addr.clone(),
            self.liquid_staker_addr.clone(),
            self.router_addr.clone(),
        ] {
            self.fund_contract(&coins(2_000_000, DENOM_NTRN), addr);
        }
    }

    /// registers every ica and deposits the party contribution into
    /// the remote splitter ica
    pub fn deposit_contribution(&mut self) -> Addr {
        self.fund_ica_owners();
        self.tick("register icas");
        self.tick("confirm icas");

        let deposit_address = Addr::unchecked(self.query_party_deposit_address().unwrap());
        self.fund_contract(&coins(CONTRIBUTION, DENOM_ATOM), deposit_address.clone());
        deposit_address
    }

    /// runs the pipeline until the position is held by the holder
    pub fn enter_position(&mut self) {
        self.deposit_contribution();
        self.tick("split the deposit and forward both halves");
        self.tick("forwarders drain their icas");
        self.liquid_staker_transfer();
        self.tick("provide liquidity");
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
