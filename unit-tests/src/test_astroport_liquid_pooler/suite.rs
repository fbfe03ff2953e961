use astroport::factory::PairType;
use cosmwasm_std::{coin, Addr, Coin, Uint128};
use covenant_astroport_liquid_pooler::msg::{
    ContractState, ExecuteMsg, LpConfig, ProvidedLiquidityInfo, QueryMsg,
};
use covenant_utils::{PoolPriceConfig, SingleSideLpLimits};
use cw_multi_test::{AppResponse, Executor};
use cw_utils::Expiration;

use crate::setup::{
    base_suite::{BaseSuite, BaseSuiteMut},
    instantiates::{astro_liquid_pooler::AstroLiquidPoolerInstantiate, clock::ClockInstantiate},
    suite_builder::SuiteBuilder,
    CustomApp, ASTRO_LIQUID_POOLER_SALT, CLOCK_SALT, DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN,
};

/// size of each side of the default 1:1 stable pool
pub const POOL_DEPTH: u128 = 10_000_000_000_000;

pub struct AstroLiquidPoolerBuilder {
    pub builder: SuiteBuilder,
    pub instantiate_msg: AstroLiquidPoolerInstantiate,
    pub lp_token_addr: Addr,
}

impl Default for AstroLiquidPoolerBuilder {
    fn default() -> Self {
        let mut builder = SuiteBuilder::new();

        let (pool_addr, lp_token_addr) = builder.init_astro_pool(
            PairType::Stable {},
            coin(POOL_DEPTH, DENOM_ATOM_ON_NTRN),
            coin(POOL_DEPTH, DENOM_LS_ATOM_ON_NTRN),
        );

        let clock_addr = builder.get_contract_addr(builder.clock_code_id, CLOCK_SALT);
        let liquid_pooler_addr =
            builder.get_contract_addr(builder.astro_pooler_code_id, ASTRO_LIQUID_POOLER_SALT);
        let holder_addr = builder.get_random_addr();

        let clock_instantiate =
            ClockInstantiate::new(None, vec![liquid_pooler_addr.to_string()], vec![]);
        builder.contract_init2(
            builder.clock_code_id,
            CLOCK_SALT,
            &clock_instantiate.msg,
            &[],
        );

        let liquid_pooler_instantiate = AstroLiquidPoolerInstantiate::default(
            pool_addr.to_string(),
            clock_addr.to_string(),
            holder_addr.to_string(),
        );

        AstroLiquidPoolerBuilder {
            builder,
            instantiate_msg: liquid_pooler_instantiate,
            lp_token_addr,
        }
    }
}

impl AstroLiquidPoolerBuilder {
    pub fn with_custom_astroport_pool(
        mut self,
        pair_type: PairType,
        coin_a: Coin,
        coin_b: Coin,
    ) -> Self {
        let (pool_addr, lp_token_addr) = self.builder.init_astro_pool(pair_type, coin_a, coin_b);
        self.instantiate_msg.with_pool_address(pool_addr.to_string());
        self.lp_token_addr = lp_token_addr;
        self
    }

    pub fn with_pool_address(mut self, pool_address: String) -> Self {
        self.instantiate_msg.with_pool_address(pool_address);
        self
    }

    pub fn with_clock_address(mut self, clock_address: String) -> Self {
        self.instantiate_msg.with_clock_address(clock_address);
        self
    }

    pub fn with_holder_address(mut self, holder_address: String) -> Self {
        self.instantiate_msg.with_holder_address(holder_address);
        self
    }

    pub fn with_single_side_lp_limits(mut self, single_side_lp_limits: SingleSideLpLimits) -> Self {
        self.instantiate_msg
            .with_single_side_lp_limits(single_side_lp_limits);
        self
    }

    pub fn with_pool_price_config(mut self, pool_price_config: PoolPriceConfig) -> Self {
        self.instantiate_msg
            .with_pool_price_config(pool_price_config);
        self
    }

    pub fn with_pair_type(mut self, pair_type: PairType) -> Self {
        self.instantiate_msg.with_pair_type(pair_type);
        self
    }

    /// deadline relative to the current block height
    pub fn with_deposit_deadline_in_blocks(mut self, blocks: u64) -> Self {
        let height = self.builder.app.block_info().height;
        self.instantiate_msg
            .with_deposit_deadline(Expiration::AtHeight(height + blocks));
        self
    }

    pub fn build(mut self) -> Suite {
        let liquid_pooler_addr = self.builder.contract_init2(
            self.builder.astro_pooler_code_id,
            ASTRO_LIQUID_POOLER_SALT,
            &self.instantiate_msg.msg,
            &[],
        );

        let clock_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(liquid_pooler_addr.to_string(), &QueryMsg::ClockAddress {})
            .unwrap();

        let holder_addr: Addr = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(liquid_pooler_addr.to_string(), &QueryMsg::HolderAddress {})
            .unwrap();

        let lp_config: LpConfig = self
            .builder
            .app
            .wrap()
            .query_wasm_smart(liquid_pooler_addr.to_string(), &QueryMsg::LpConfig {})
            .unwrap();

        Suite {
            faucet: self.builder.faucet.clone(),
            admin: self.builder.admin.clone(),
            liquid_pooler_addr,
            clock_addr,
            holder_addr,
            lp_token_addr: self.lp_token_addr,
            lp_config,
            app: self.builder.build(),
        }
    }
}

pub struct Suite {
    pub app: CustomApp,

    pub faucet: Addr,
    pub admin: Addr,

    pub liquid_pooler_addr: Addr,
    pub clock_addr: Addr,
    pub holder_addr: Addr,
    pub lp_token_addr: Addr,
    pub lp_config: LpConfig,
}

impl Suite {
    pub fn query_contract_state(&self) -> ContractState {
        self.app
            .wrap()
            .query_wasm_smart(self.liquid_pooler_addr.clone(), &QueryMsg::ContractState {})
            .unwrap()
    }

    pub fn query_provided_liquidity_info(&self) -> ProvidedLiquidityInfo {
        self.app
            .wrap()
            .query_wasm_smart(
                self.liquid_pooler_addr.clone(),
                &QueryMsg::ProvidedLiquidityInfo {},
            )
            .unwrap()
    }

    pub fn query_deposit_address(&self) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart(self.liquid_pooler_addr.clone(), &QueryMsg::DepositAddress {})
            .unwrap()
    }

    pub fn query_lp_token_balance(&self, addr: &Addr) -> Uint128 {
        let resp: cw20::BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                self.lp_token_addr.clone(),
                &cw20::Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        resp.balance
    }

    pub fn withdraw(&mut self, sender: &Addr) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.liquid_pooler_addr.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
    }

    pub fn try_tick(&mut self) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.clock_addr.clone(),
            self.liquid_pooler_addr.clone(),
            &ExecuteMsg::Tick {},
            &[],
        )
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
