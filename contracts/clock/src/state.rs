use cosmwasm_std::{Addr, Uint64};
use cw_storage_plus::Item;

/// tick receivers, ticked in this order on every clock tick
pub const QUEUE: Item<Vec<Addr>> = Item::new("queue");
/// contracts allowed to enqueue themselves
pub const WHITELIST: Item<Vec<Addr>> = Item::new("whitelist");
pub const PAUSED: Item<bool> = Item::new("paused");
/// gas limit attached to every forwarded tick
pub const TICK_MAX_GAS: Item<Uint64> = Item::new("tick_max_gas");
/// number of completed clock ticks. only ever increases.
pub const TICK_COUNT: Item<u64> = Item::new("tick_count");
