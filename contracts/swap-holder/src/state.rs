use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use cw_utils::Expiration;

use crate::msg::{ContractState, SwapPartiesConfig};

pub const CONTRACT_STATE: Item<ContractState> = Item::new("contract_state");
pub const CLOCK_ADDRESS: Item<Addr> = Item::new("clock_address");

/// splitter receiving both contributions once the swap is funded
pub const NEXT_CONTRACT: Item<Addr> = Item::new("next_contract");

/// deposits must arrive before this expires
pub const LOCKUP_CONFIG: Item<Expiration> = Item::new("lockup_config");
pub const PARTIES_CONFIG: Item<SwapPartiesConfig> = Item::new("parties_config");
