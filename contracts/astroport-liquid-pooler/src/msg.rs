use astroport::{
    asset::{Asset, AssetInfo},
    factory::PairType,
};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Attribute, Decimal, Uint128};
use covenant_macros::{
    clocked, covenant_clock_address, covenant_deposit_address, covenant_holder_address,
};
use covenant_utils::{
    instantiate2_helper::Instantiate2, state_machine::StateMachine, DecimalRange,
    PoolPriceConfig, SingleSideLpLimits,
};
use cw_utils::Expiration;

#[cw_serde]
pub struct InstantiateMsg {
    pub pool_address: String,
    pub clock_address: String,
    pub holder_address: String,
    pub slippage_tolerance: Option<Decimal>,
    pub assets: AssetData,
    pub single_side_lp_limits: SingleSideLpLimits,
    pub pool_price_config: PoolPriceConfig,
    /// pair type the pool is expected to have
    pub pair_type: PairType,
    /// after this, liquidity is no longer provided
    pub deposit_deadline: Expiration,
}

impl Instantiate2 for InstantiateMsg {}

/// Pool related part of the liquid pooler configuration, as provided to
/// a covenant. The covenant fills in the addresses it precomputed.
#[cw_serde]
pub struct AstroportLiquidPoolerConfig {
    pub pool_address: String,
    pub pool_pair_type: PairType,
    pub single_side_lp_limits: SingleSideLpLimits,
    pub slippage_tolerance: Option<Decimal>,
}

impl AstroportLiquidPoolerConfig {
    pub fn to_instantiate_msg(
        &self,
        clock_address: String,
        holder_address: String,
        assets: AssetData,
        pool_price_config: PoolPriceConfig,
        deposit_deadline: Expiration,
    ) -> InstantiateMsg {
        InstantiateMsg {
            pool_address: self.pool_address.to_string(),
            clock_address,
            holder_address,
            slippage_tolerance: self.slippage_tolerance,
            assets,
            single_side_lp_limits: self.single_side_lp_limits.clone(),
            pool_price_config,
            pair_type: self.pool_pair_type.clone(),
            deposit_deadline,
        }
    }
}

#[cw_serde]
pub struct LpConfig {
    /// address of the liquidity pool we plan to enter
    pub pool_address: Addr,
    /// amounts of both tokens we consider ok to single-side lp
    pub single_side_lp_limits: SingleSideLpLimits,
    /// slippage tolerance parameter for liquidity provisioning
    pub slippage_tolerance: Option<Decimal>,
    /// expected price range
    pub expected_pool_ratio_range: DecimalRange,
    /// pair type specified in the covenant
    pub pair_type: PairType,
    pub asset_data: AssetData,
    pub deposit_deadline: Expiration,
}

impl LpConfig {
    pub fn to_response_attributes(&self) -> Vec<Attribute> {
        let slippage_tolerance = match self.slippage_tolerance {
            Some(val) => val.to_string(),
            None => "None".to_string(),
        };
        vec![
            Attribute::new("pool_address", self.pool_address.to_string()),
            Attribute::new(
                "single_side_asset_a_limit",
                self.single_side_lp_limits.asset_a_limit.to_string(),
            ),
            Attribute::new(
                "single_side_asset_b_limit",
                self.single_side_lp_limits.asset_b_limit.to_string(),
            ),
            Attribute::new("slippage_tolerance", slippage_tolerance),
            Attribute::new(
                "expected_pool_ratio_range",
                format!(
                    "[{}, {}]",
                    self.expected_pool_ratio_range.min, self.expected_pool_ratio_range.max
                ),
            ),
            Attribute::new("pair_type", self.pair_type.to_string()),
            Attribute::new("asset_a_denom", &self.asset_data.asset_a_denom),
            Attribute::new("asset_b_denom", &self.asset_data.asset_b_denom),
            Attribute::new("deposit_deadline", self.deposit_deadline.to_string()),
        ]
    }
}

/// holds the both asset denoms relevant for providing liquidity
#[cw_serde]
pub struct AssetData {
    pub asset_a_denom: String,
    pub asset_b_denom: String,
}

impl AssetData {
    pub fn to_asset_vec(&self, a_bal: Uint128, b_bal: Uint128) -> Vec<Asset> {
        vec![
            Asset {
                info: AssetInfo::NativeToken {
                    denom: self.asset_a_denom.to_string(),
                },
                amount: a_bal,
            },
            Asset {
                info: AssetInfo::NativeToken {
                    denom: self.asset_b_denom.to_string(),
                },
                amount: b_bal,
            },
        ]
    }

    pub fn denoms(&self) -> Vec<String> {
        vec![self.asset_a_denom.to_string(), self.asset_b_denom.to_string()]
    }
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// holder-only. sends any balance that never made it into the pool
    /// to the holder.
    Withdraw {},
}

#[covenant_clock_address]
#[covenant_deposit_address]
#[covenant_holder_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    #[returns(LpConfig)]
    LpConfig {},
    #[returns(ProvidedLiquidityInfo)]
    ProvidedLiquidityInfo {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        holder_address: Option<String>,
        lp_config: Option<Box<LpConfig>>,
    },
}

/// keeps track of provided asset liquidities in `Uint128`.
#[cw_serde]
#[derive(Default)]
pub struct ProvidedLiquidityInfo {
    pub provided_amount_a: Uint128,
    pub provided_amount_b: Uint128,
}

/// state of the LP state machine
#[cw_serde]
pub enum ContractState {
    /// nothing was provided yet
    AwaitingFunds,
    /// some liquidity was provided, but either one of the denoms never
    /// entered the pool or some leftover remains
    Provided,
    /// both denoms were provided and nothing is left over
    Complete,
}

pub struct PoolerObservation {
    pub balance_a: Uint128,
    pub balance_b: Uint128,
    pub deadline_expired: bool,
}

impl StateMachine for ContractState {
    type Observation = PoolerObservation;

    fn precondition(&self, observed: &PoolerObservation) -> bool {
        if observed.deadline_expired {
            return false;
        }
        match self {
            // a lone denom may still fit into the single side limits
            ContractState::AwaitingFunds | ContractState::Provided => {
                !observed.balance_a.is_zero() || !observed.balance_b.is_zero()
            }
            ContractState::Complete => false,
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            ContractState::AwaitingFunds => 0,
            ContractState::Provided => 1,
            ContractState::Complete => 2,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ContractState::Complete)
    }
}

impl ContractState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractState::AwaitingFunds => "awaiting_funds",
            ContractState::Provided => "provided",
            ContractState::Complete => "complete",
        }
    }
}
