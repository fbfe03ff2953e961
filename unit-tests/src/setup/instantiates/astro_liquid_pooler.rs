use astroport::factory::PairType;
use cosmwasm_std::{Decimal, Uint128};
use covenant_astroport_liquid_pooler::msg::AssetData;
use covenant_utils::{PoolPriceConfig, SingleSideLpLimits};
use cw_utils::Expiration;

use crate::setup::{DENOM_ATOM_ON_NTRN, DENOM_LS_ATOM_ON_NTRN};

#[derive(Clone)]
pub struct AstroLiquidPoolerInstantiate {
    pub msg: covenant_astroport_liquid_pooler::msg::InstantiateMsg,
}

impl From<AstroLiquidPoolerInstantiate> for covenant_astroport_liquid_pooler::msg::InstantiateMsg {
    fn from(value: AstroLiquidPoolerInstantiate) -> Self {
        value.msg
    }
}

impl AstroLiquidPoolerInstantiate {
    pub fn new(
        pool_address: String,
        clock_address: String,
        holder_address: String,
        slippage_tolerance: Option<Decimal>,
        assets: AssetData,
        single_side_lp_limits: SingleSideLpLimits,
        pool_price_config: PoolPriceConfig,
        pair_type: PairType,
        deposit_deadline: Expiration,
    ) -> Self {
        Self {
            msg: covenant_astroport_liquid_pooler::msg::InstantiateMsg {
                pool_address,
                clock_address,
                holder_address,
                slippage_tolerance,
                assets,
                single_side_lp_limits,
                pool_price_config,
                pair_type,
                deposit_deadline,
            },
        }
    }

    pub fn with_pool_address(&mut self, pool_address: String) -> &mut Self {
        self.msg.pool_address = pool_address;
        self
    }

    pub fn with_clock_address(&mut self, clock_address: String) -> &mut Self {
        self.msg.clock_address = clock_address;
        self
    }

    pub fn with_holder_address(&mut self, holder_address: String) -> &mut Self {
        self.msg.holder_address = holder_address;
        self
    }

    pub fn with_single_side_lp_limits(
        &mut self,
        single_side_lp_limits: SingleSideLpLimits,
    ) -> &mut Self {
        self.msg.single_side_lp_limits = single_side_lp_limits;
        self
    }

    pub fn with_pool_price_config(&mut self, pool_price_config: PoolPriceConfig) -> &mut Self {
        self.msg.pool_price_config = pool_price_config;
        self
    }

    pub fn with_pair_type(&mut self, pair_type: PairType) -> &mut Self {
        self.msg.pair_type = pair_type;
        self
    }

    pub fn with_deposit_deadline(&mut self, deposit_deadline: Expiration) -> &mut Self {
        self.msg.deposit_deadline = deposit_deadline;
        self
    }
}

impl AstroLiquidPoolerInstantiate {
    /// atom / stuatom stable pool expected around 1:1
    pub fn default(pool_address: String, clock_address: String, holder_address: String) -> Self {
        Self::new(
            pool_address,
            clock_address,
            holder_address,
            None,
            AssetData {
                asset_a_denom: DENOM_ATOM_ON_NTRN.to_string(),
                asset_b_denom: DENOM_LS_ATOM_ON_NTRN.to_string(),
            },
            SingleSideLpLimits {
                asset_a_limit: Uint128::new(100_000),
                asset_b_limit: Uint128::new(100_000),
            },
            PoolPriceConfig {
                expected_spot_price: Decimal::one(),
                acceptable_price_spread: Decimal::percent(50),
            },
            PairType::Stable {},
            Expiration::Never {},
        )
    }
}
