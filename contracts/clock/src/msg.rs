use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint64};
use covenant_macros::clocked;
use covenant_utils::instantiate2_helper::Instantiate2;

#[cw_serde]
pub struct InstantiateMsg {
    /// gas limit for each forwarded tick. clamped to
    /// `[MIN_TICK_MAX_GAS, MAX_TICK_MAX_GAS]`, defaults to
    /// `DEFAULT_TICK_MAX_GAS`.
    pub tick_max_gas: Option<Uint64>,
    /// contracts allowed to enqueue themselves
    pub whitelist: Vec<String>,
    /// receivers enqueued at instantiation, in tick order.
    /// every entry must be whitelisted.
    pub initial_queue: Vec<String>,
}

impl Instantiate2 for InstantiateMsg {}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    /// Appends the whitelisted sender to the end of the tick queue
    Enqueue {},
    /// Removes the sender from the tick queue
    Dequeue {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Uint64)]
    TickMaxGas {},
    #[returns(bool)]
    Paused {},
    /// Receivers in tick order
    #[returns(Vec<Addr>)]
    Queue {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Vec<Addr>)]
    Whitelist {},
    #[returns(Uint64)]
    TickCount {},
}

#[cw_serde]
pub enum MigrateMsg {
    Pause {},
    Unpause {},
    UpdateTickMaxGas {
        new_value: Uint64,
    },
    ManageWhitelist {
        add: Option<Vec<String>>,
        remove: Option<Vec<String>>,
    },
}
