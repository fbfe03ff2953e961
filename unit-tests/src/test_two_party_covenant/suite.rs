use std::collections::BTreeMap;

use astroport::factory::PairType;
use cosmwasm_std::{coin, Addr};
use covenant_two_party_pol::msg::{CovenantContractCodeIds, MigrateMsg, QueryMsg, PARTY_A, PARTY_B};
use covenant_utils::{split::SplitConfig, CovenantPartyConfig};
use cw_multi_test::{AppResponse, Executor};
use cw_utils::Expiration;

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::two_party_covenant::{
        interchain_party, native_party, TwoPartyCovenantInstantiate,
    },
    suite_builder::SuiteBuilder,
    CustomApp, ADMIN, DENOM_ATOM, DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN,
    TWO_PARTY_COVENANT_SALT,
};

pub const PARTY_A_CONTRIBUTION: u128 = 100_000;
pub const PARTY_B_CONTRIBUTION: u128 = 100_000;

pub struct TwoPartyCovenantBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: TwoPartyCovenantInstantiate,
    pub party_a_addr: Addr,
    pub party_a_receiver: Addr,
    pub party_b_addr: Addr,
    pub party_b_receiver: Addr,
}

impl Default for TwoPartyCovenantBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let (pool_addr, _lp_token_addr) = builder.init_astro_pool(
            PairType::Stable {},
            coin(10_000_000_000_000, DENOM_ATOM_ON_NTRN),
            coin(10_000_000_000_000, DENOM_LS_ATOM_ON_NTRN),
        );

        // party a contributes atom from the hub, party b is on neutron
        let party_a_addr = builder.get_random_addr();
        let party_a_receiver = builder.get_random_addr();
        let party_b_addr = builder.get_random_addr();
        let party_b_receiver = builder.get_random_addr();

        let instantiate_msg = TwoPartyCovenantInstantiate::default(
            &builder,
            pool_addr.to_string(),
            interchain_party(
                party_a_addr.to_string(),
                party_a_receiver.to_string(),
                DENOM_ATOM,
                DENOM_ATOM_ON_NTRN,
                PARTY_A_CONTRIBUTION,
            ),
            native_party(
                party_b_addr.to_string(),
                party_b_receiver.to_string(),
                DENOM_LS_ATOM_ON_NTRN,
                PARTY_B_CONTRIBUTION,
            ),
        );

        Self {
            builder,
            instantiate_msg,
            party_a_addr,
            party_a_receiver,
            party_b_addr,
            party_b_receiver,
        }
    }
}

impl TwoPartyCovenantBuilder {
    pub fn with_withdrawer(mut self, withdrawer: Option<String>) -> Self {
        self.instantiate_msg.with_withdrawer(withdrawer);
        self
    }

    pub fn with_lockup_config(mut self, lockup_config: Expiration) -> Self {
        self.instantiate_msg.with_lockup_config(lockup_config);
        self
    }

    pub fn with_splits(mut self, splits: BTreeMap<String, SplitConfig>) -> Self {
        self.instantiate_msg.with_splits(splits);
        self
    }

    pub fn with_party_b_config(mut self, party_b_config: CovenantPartyConfig) -> Self {
        self.instantiate_msg.with_party_b_config(party_b_config);
        self
    }

    pub fn build(mut self) -> Suite {
        let covenant_addr = self.builder.contract_init2(
            self.builder.two_party_covenant_code_id,
            TWO_PARTY_COVENANT_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let clock_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(covenant_addr.clone(), &QueryMsg::ClockAddress {})
            .unwrap();

        let holder_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(covenant_addr.clone(), &QueryMsg::HolderAddress {})
            .unwrap();

        let splitter_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(covenant_addr.clone(), &QueryMsg::SplitterAddress {})
            .unwrap();

        let liquid_pooler_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(covenant_addr.clone(), &QueryMsg::LiquidPoolerAddress {})
            .unwrap();

        Suite {
            faucet: self.builder.faucet.clone(),
            admin: self.builder.admin.clone(),
            covenant_addr,
            clock_addr,
            holder_addr,
            splitter_addr,
            liquid_pooler_addr,
            party_a_addr: self.party_a_addr,
            party_a_receiver: self.party_a_receiver,
            party_b_addr: self.party_b_addr,
            party_b_receiver: self.party_b_receiver,
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
    pub holder_addr: Addr,
    pub splitter_addr: Addr,
    pub liquid_pooler_addr: Addr,

    pub party_a_addr: Addr,
    pub party_a_receiver: Addr,
    pub party_b_addr: Addr,
    pub party_b_receiver: Addr,
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

    pub fn claim(&mut self, sender: &Addr) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.holder_addr.clone(),
            &covenant_holder::msg::ExecuteMsg::Claim {},
            &[],
        )
    }

    pub fn query_ibc_forwarder_address(&self, party: &str) -> Option<Addr> {
        self.app
            .wrap()
            .query_wasm_smart(
                self.covenant_addr.clone(),
                &QueryMsg::IbcForwarderAddress {
                    party: party.to_string(),
                },
            )
            .unwrap()
    }

    pub fn query_router_address(&self, party: &str) -> Addr {
        self.app
            .wrap()
            .query_wasm_smart(
                self.covenant_addr.clone(),
                &QueryMsg::InterchainRouterAddress {
                    party: party.to_string(),
                },
            )
            .unwrap()
    }

    pub fn query_party_deposit_address(&self, party: &str) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(
                self.covenant_addr.clone(),
                &QueryMsg::PartyDepositAddress {
                    party: party.to_string(),
                },
            )
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

    /// ticks the clock until party a's forwarder ica exists and returns
    /// the address party a deposits to
    pub fn setup_party_a_deposit_address(&mut self) -> Addr {
        let forwarder = self.query_ibc_forwarder_address(PARTY_A).unwrap();
        self.fund_contract(&[coin(2_000_000, crate::setup::DENOM_NTRN)], forwarder);

        self.tick("register forwarder ica");
        self.tick("confirm forwarder ica");

        Addr::unchecked(self.query_party_deposit_address(PARTY_A).unwrap())
    }

    /// both parties deposit their full contribution
    pub fn deposit_contributions(&mut self) {
        let party_a_deposit = self.setup_party_a_deposit_address();
        let party_b_deposit =
            Addr::unchecked(self.query_party_deposit_address(PARTY_B).unwrap());

        self.fund_contract(&[coin(PARTY_A_CONTRIBUTION, DENOM_ATOM)], party_a_deposit);
        self.fund_contract(
            &[coin(PARTY_B_CONTRIBUTION, DENOM_LS_ATOM_ON_NTRN)],
            party_b_deposit,
        );
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
