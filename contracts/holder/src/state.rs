use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use cw_utils::Expiration;

use crate::msg::{ContractState, RefundConfig};

pub const CONTRACT_STATE: Item<ContractState> = Item::new("contract_state");
pub const CLOCK_ADDRESS: Item<Addr> = Item::new("clock_address");

/// the only address allowed to claim, if set. anyone may claim otherwise.
pub const WITHDRAWER: Item<Addr> = Item::new("withdrawer");

/// pool the pool shares held here belong to
pub const POOL_ADDRESS: Item<Addr> = Item::new("pool_address");
/// liquid pooler which may still hold funds that never entered the pool
pub const LIQUID_POOLER_ADDRESS: Item<Addr> = Item::new("liquid_pooler_address");
/// distribution contract the unwound position is forwarded to
pub const NEXT_CONTRACT: Item<Addr> = Item::new("next_contract");

pub const LOCKUP_CONFIG: Item<Expiration> = Item::new("lockup_config");
/// denoms of the underlying pool assets
pub const DENOMS: Item<Vec<String>> = Item::new("denoms");

/// the only address allowed to unwind before the lockup, if set
pub const EMERGENCY_COMMITTEE: Item<Addr> = Item::new("emergency_committee");

/// where unmatched contributions go after the deposit deadline
pub const REFUND_CONFIG: Item<RefundConfig> = Item::new("refund_config");
