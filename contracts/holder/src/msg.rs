use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};
use covenant_macros::{clocked, covenant_clock_address};
use covenant_utils::{instantiate2_helper::Instantiate2, state_machine::StateMachine};
use cw_utils::Expiration;

#[cw_serde]
pub struct InstantiateMsg {
    pub clock_address: String,
    /// A withdrawer is the only authorized address that can claim
    /// from the contract. If none is set, anyone can trigger the claim
    /// as the funds only ever go to `next_contract`.
    pub withdrawer: Option<String>,
    /// pool address is the address of the pool where liquidity has been provided
    /// The holder holds LP tokens associated with this pool
    pub pool_address: String,
    /// liquid pooler that provided the liquidity
    pub liquid_pooler_address: String,
    /// splitter or router receiving the unwound position
    pub next_contract: String,
    /// block height or timestamp after which the position can be claimed
    pub lockup_config: Expiration,
    /// denoms of the pool assets
    pub denoms: Vec<String>,
    /// returns contributions that never entered the pool once the
    /// deposit deadline passed
    pub refund_config: Option<RefundConfig>,
    /// may unwind the position before the lockup expires
    pub emergency_committee: Option<String>,
}

impl Instantiate2 for InstantiateMsg {}

#[cw_serde]
pub struct RefundConfig {
    /// after this, deposits are no longer provided to the pool
    pub deposit_deadline: Expiration,
    /// contribution denom to the router of the party that contributed it
    pub routers: BTreeMap<String, String>,
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// Unwinds the position once the lockup expired: burns the pool
    /// shares, collects the liquid pooler leftovers and forwards
    /// everything to the next contract.
    Claim {},
    /// internal callback, only callable by the holder itself
    Distribute {},
    /// internal callback sending unmatched contributions back to the
    /// routers of the parties that made them
    Refund {},
    /// Unwinds the position regardless of the lockup. Each denom goes
    /// back to the router of the party that contributed it, or to the
    /// next contract without a refund config.
    EmergencyWithdraw {},
}

#[covenant_clock_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractState)]
    ContractState {},
    #[returns(Option<Addr>)]
    Withdrawer {},
    #[returns(Addr)]
    PoolAddress {},
    #[returns(Addr)]
    LiquidPoolerAddress {},
    #[returns(Addr)]
    NextContract {},
    #[returns(Expiration)]
    LockupConfig {},
    #[returns(Option<RefundConfig>)]
    RefundConfig {},
    #[returns(Option<Addr>)]
    EmergencyCommittee {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        withdrawer: Option<String>,
        next_contract: Option<String>,
        lockup_config: Option<Expiration>,
        emergency_committee: Option<String>,
    },
}

#[cw_serde]
pub enum ContractState {
    /// pool shares are locked up
    Active,
    /// lockup expired, the position may be claimed
    Expired,
    /// the position was unwound and forwarded, or the deposit deadline
    /// passed before anything entered the pool. late contributions keep
    /// getting refunded.
    Complete,
}

pub struct HolderObservation {
    pub lockup_expired: bool,
    /// always false without a refund config
    pub deposit_deadline_expired: bool,
    pub lp_token_balance: Uint128,
    /// own and liquid pooler non-zero balances of the pool denoms
    pub balances: Vec<Coin>,
}

impl StateMachine for ContractState {
    type Observation = HolderObservation;

    fn precondition(&self, observed: &HolderObservation) -> bool {
        match self {
            ContractState::Active => {
                observed.lockup_expired
                    || (observed.deposit_deadline_expired && observed.lp_token_balance.is_zero())
            }
            ContractState::Expired => {
                !observed.lp_token_balance.is_zero() || !observed.balances.is_empty()
            }
            ContractState::Complete => {
                observed.deposit_deadline_expired && !observed.balances.is_empty()
            }
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            ContractState::Active => 0,
            ContractState::Expired => 1,
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
            ContractState::Active => "active",
            ContractState::Expired => "expired",
            ContractState::Complete => "complete",
        }
    }
}
