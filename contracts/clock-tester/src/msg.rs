use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint64;
use covenant_macros::clocked;

#[cw_serde]
pub enum Mode {
    /// count every tick
    Accept,
    /// fail every tick
    Error,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub mode: Mode,
}

#[clocked]
#[cw_serde]
pub enum ExecuteMsg {
    SetMode { mode: Mode },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Number of ticks received and accepted
    #[returns(Uint64)]
    TickCount {},
}
