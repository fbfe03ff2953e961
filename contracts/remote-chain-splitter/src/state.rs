use cosmwasm_std::{Addr, Coin};
use covenant_utils::{ica::IcaTxStatus, neutron::RemoteChainInfo, split::SplitConfig};
use cw_storage_plus::Item;

use crate::msg::ContractState;

pub const CONTRACT_STATE: Item<ContractState> = Item::new("contract_state");
pub const CLOCK_ADDRESS: Item<Addr> = Item::new("clock_address");
pub const REMOTE_CHAIN_INFO: Item<RemoteChainInfo> = Item::new("r_c_info");

/// downstream stages and their share of the remote deposit
pub const SPLIT_CONFIG: Item<SplitConfig> = Item::new("split_config");

pub const ICA_REGISTRATION_FEE: Item<Vec<Coin>> = Item::new("ica_registration_fee");
/// height of the last registration request, cleared on channel timeout
pub const ICA_REQUESTED_AT: Item<u64> = Item::new("ica_requested_at");

pub const BALANCE_QUERY_ID: Item<u64> = Item::new("balance_query_id");
pub const ICA_TX_STATUS: Item<IcaTxStatus> = Item::new("ica_tx_status");
