use astroport::{
    asset::{Asset, PairInfo},
    pair::{Cw20HookMsg, PoolResponse, QueryMsg},
};
use cosmwasm_std::{
    to_json_binary, CustomQuery, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg};

/// queries the liquidity token balance of given address
pub fn query_liquidity_token_balance<C: CustomQuery>(
    querier: QuerierWrapper<C>,
    liquidity_token: &str,
    addr: &str,
) -> StdResult<Uint128> {
    let liquidity_token_balance: BalanceResponse = querier.query_wasm_smart(
        liquidity_token,
        &cw20::Cw20QueryMsg::Balance {
            address: addr.to_string(),
        },
    )?;
    Ok(liquidity_token_balance.balance)
}

pub fn query_pair_info<C: CustomQuery>(querier: QuerierWrapper<C>, pool: &str) -> StdResult<PairInfo> {
    querier.query_wasm_smart(pool, &QueryMsg::Pair {})
}

pub fn query_pool_assets<C: CustomQuery>(
    querier: QuerierWrapper<C>,
    pool: &str,
) -> StdResult<Vec<Asset>> {
    let response: PoolResponse = querier.query_wasm_smart(pool, &QueryMsg::Pool {})?;
    Ok(response.assets)
}

/// underlying assets `amount` pool shares are worth right now
pub fn query_share_value<C: CustomQuery>(
    querier: QuerierWrapper<C>,
    pool: &str,
    amount: Uint128,
) -> StdResult<Vec<Asset>> {
    querier.query_wasm_smart(pool, &QueryMsg::Share { amount })
}

/// Burns `amount` pool shares through the cw20 hook, releasing the
/// underlying assets to the sender.
pub fn withdraw_liquidity_msg(
    liquidity_token: &str,
    pool: &str,
    amount: Uint128,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: liquidity_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Send {
            contract: pool.to_string(),
            amount,
            msg: to_json_binary(&Cw20HookMsg::WithdrawLiquidity { assets: vec![] })?,
        })?,
        funds: vec![],
    })
}
