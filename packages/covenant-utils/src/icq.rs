//! Balances held by interchain accounts live on the remote chain and are
//! only visible on neutron through interchain queries. A stage registers
//! one KV query per watched (account, denom) pair once its ICA exists, and
//! reads back whatever result the relayer submitted last.

use cosmwasm_std::{from_json, Deps, Env, Reply, StdError, StdResult, SubMsg, Uint128};
use neutron_sdk::{
    bindings::{
        msg::{MsgRegisterInterchainQueryResponse, NeutronMsg},
        query::NeutronQuery,
    },
    interchain_queries::v045::{
        queries::query_balance, register_queries::new_register_balance_query_msg,
    },
    NeutronResult,
};

/// reply id carrying the id of a freshly registered balance query
pub const BALANCE_QUERY_REPLY_ID: u64 = 1;

/// remote blocks between two submissions of the query result
pub const BALANCE_QUERY_UPDATE_PERIOD: u64 = 5;

/// Balance of a remote account as of the last submitted query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBalance {
    pub amount: Uint128,
    /// neutron height at which the result was submitted
    pub local_height: u64,
}

pub fn register_balance_query_msg(
    connection_id: &str,
    addr: &str,
    denom: &str,
) -> NeutronResult<SubMsg<NeutronMsg>> {
    let msg = new_register_balance_query_msg(
        connection_id.to_string(),
        addr.to_string(),
        denom.to_string(),
        BALANCE_QUERY_UPDATE_PERIOD,
    )?;
    Ok(SubMsg::reply_on_success(msg, BALANCE_QUERY_REPLY_ID))
}

/// Extracts the query id neutron assigned to a registration
pub fn registered_query_id(reply: Reply) -> StdResult<u64> {
    let data = reply
        .result
        .into_result()
        .map_err(StdError::generic_err)?
        .data
        .ok_or_else(|| StdError::generic_err("interchain query registration returned no data"))?;

    let resp: MsgRegisterInterchainQueryResponse = from_json(data.as_slice())?;
    Ok(resp.id)
}

/// Last known balance of `denom` under the query `query_id`. `None` while
/// the relayer has not submitted any result yet, or when the query cannot
/// be read at all. A missing coin in a submitted result means zero.
pub fn query_remote_balance(
    deps: Deps<NeutronQuery>,
    env: Env,
    query_id: u64,
    denom: &str,
) -> Option<RemoteBalance> {
    let resp = query_balance(deps, env, query_id).ok()?;
    if resp.last_submitted_local_height == 0 {
        return None;
    }

    let amount = resp
        .balances
        .coins
        .into_iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or_default();

    Some(RemoteBalance {
        amount,
        local_height: resp.last_submitted_local_height,
    })
}
