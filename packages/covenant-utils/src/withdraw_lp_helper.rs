use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, StdResult, WasmMsg};

/// Messages the holder sends while unwinding a position
#[cw_serde]
pub enum WithdrawLPMsgs {
    /// asks the liquid pooler for everything it never provided
    Withdraw {},
    /// holder callback forwarding the unwound balances downstream
    Distribute {},
    /// holder callback returning unmatched contributions to their parties
    Refund {},
}

pub fn generate_withdraw_msg(liquid_pooler: String) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: liquid_pooler,
        msg: to_json_binary(&WithdrawLPMsgs::Withdraw {})?,
        funds: vec![],
    })
}

pub fn generate_distribute_msg(holder: String) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: holder,
        msg: to_json_binary(&WithdrawLPMsgs::Distribute {})?,
        funds: vec![],
    })
}

pub fn generate_refund_msg(holder: String) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: holder,
        msg: to_json_binary(&WithdrawLPMsgs::Refund {})?,
        funds: vec![],
    })
}
