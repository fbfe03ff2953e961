use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::msg::SwapCovenantContractCodeIds;

pub const COVENANT_CLOCK_ADDR: Item<Addr> = Item::new("covenant_clock_addr");
pub const COVENANT_SWAP_HOLDER_ADDR: Item<Addr> = Item::new("covenant_swap_holder_addr");
pub const SPLITTER_ADDR: Item<Addr> = Item::new("splitter_addr");

pub const PARTY_A_ROUTER_ADDR: Item<Addr> = Item::new("party_a_router_addr");
pub const PARTY_B_ROUTER_ADDR: Item<Addr> = Item::new("party_b_router_addr");

/// only set for interchain parties
pub const PARTY_A_IBC_FORWARDER_ADDR: Item<Addr> = Item::new("party_a_ibc_forwarder_addr");
pub const PARTY_B_IBC_FORWARDER_ADDR: Item<Addr> = Item::new("party_b_ibc_forwarder_addr");

pub const CONTRACT_CODES: Item<SwapCovenantContractCodeIds> = Item::new("contract_codes");
