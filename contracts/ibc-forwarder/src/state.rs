use cosmwasm_std::{Addr, Coin};
use cw_storage_plus::Item;
use covenant_utils::{ica::IcaTxStatus, neutron::RemoteChainInfo};

use crate::msg::ContractState;

/// tracks the current state of state machine
pub const CONTRACT_STATE: Item<ContractState> = Item::new("contract_state");

/// clock module address to verify the sender of incoming ticks
pub const CLOCK_ADDRESS: Item<Addr> = Item::new("clock_address");

/// stage receiving the forwarded funds
pub const NEXT_CONTRACT: Item<Addr> = Item::new("next_contract");

/// information needed for an ibc transfer from the remote chain
pub const REMOTE_CHAIN_INFO: Item<RemoteChainInfo> = Item::new("r_c_info");

/// fee paid to the interchain txs module for registering the ICA
pub const ICA_REGISTRATION_FEE: Item<Vec<Coin>> = Item::new("ica_registration_fee");

/// height of the last registration request, cleared on channel timeout.
/// keeps repeated ticks from paying the registration fee twice.
pub const ICA_REQUESTED_AT: Item<u64> = Item::new("ica_requested_at");

/// interchain query watching the ICA balance of the forwarded denom
pub const BALANCE_QUERY_ID: Item<u64> = Item::new("balance_query_id");

pub const ICA_TX_STATUS: Item<IcaTxStatus> = Item::new("ica_tx_status");
