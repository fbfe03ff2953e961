use std::collections::BTreeSet;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use covenant_macros::{clocked, covenant_clock_address, covenant_deposit_address};
use covenant_utils::{instantiate2_helper::Instantiate2, ReceiverConfig};

#[cw_serde]
pub struct InstantiateMsg {
    /// address for the clock. this contract verifies
    /// that only the clock can execute ticks
    pub clock_address: String,
    /// receiver address on local chain
    pub receiver_address: String,
    /// specified denoms to route
    pub denoms: BTreeSet<String>,
}

impl Instantiate2 for InstantiateMsg {}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// routes the listed non-target denoms to the receiver
    DistributeFallback { denoms: Vec<String> },
}

#[covenant_clock_address]
#[covenant_deposit_address]
#[derive(QueryResponses)]
#[cw_serde]
pub enum QueryMsg {
    #[returns(ReceiverConfig)]
    ReceiverConfig {},
    #[returns(BTreeSet<String>)]
    TargetDenoms {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        receiver_address: Option<String>,
        target_denoms: Option<Vec<String>>,
    },
}
