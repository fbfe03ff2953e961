use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use covenant_macros::{clocked, covenant_clock_address, covenant_deposit_address};
use covenant_utils::{instantiate2_helper::Instantiate2, split::SplitConfig};

#[cw_serde]
pub struct InstantiateMsg {
    /// address of the associated clock
    pub clock_address: String,
    /// map of denom to its split configuration
    pub splits: BTreeMap<String, SplitConfig>,
    /// a split for all denoms that are not covered in the
    /// regular `splits` map
    pub fallback_split: Option<SplitConfig>,
}

impl Instantiate2 for InstantiateMsg {}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// distributes the listed denoms according to the fallback split.
    /// denoms covered by the regular splits are rejected.
    DistributeFallback { denoms: Vec<String> },
}

#[covenant_clock_address]
#[covenant_deposit_address]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(SplitConfig)]
    DenomSplit { denom: String },
    #[returns(Vec<(String, SplitConfig)>)]
    Splits {},
    #[returns(Option<SplitConfig>)]
    FallbackSplit {},
}

#[cw_serde]
pub enum MigrateMsg {
    UpdateConfig {
        clock_addr: Option<String>,
        fallback_split: Option<SplitConfig>,
        splits: Option<BTreeMap<String, SplitConfig>>,
    },
}
