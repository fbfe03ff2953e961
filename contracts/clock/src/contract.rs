#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
    SubMsg, SubMsgResult, Uint64, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{PAUSED, QUEUE, TICK_COUNT, TICK_MAX_GAS, WHITELIST};

const CONTRACT_NAME: &str = "crates.io:covenant-clock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_TICK_MAX_GAS: Uint64 = Uint64::new(2_900_000);
pub const MIN_TICK_MAX_GAS: Uint64 = Uint64::new(200_000);
pub const MAX_TICK_MAX_GAS: Uint64 = Uint64::new(3_000_000);

const TICK_REPLY_ID: u64 = 0;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let tick_max_gas = clamp_tick_max_gas(msg.tick_max_gas.unwrap_or(DEFAULT_TICK_MAX_GAS));
    TICK_MAX_GAS.save(deps.storage, &tick_max_gas)?;
    PAUSED.save(deps.storage, &false)?;
    TICK_COUNT.save(deps.storage, &0)?;

    let whitelist = validate_addresses(deps.as_ref(), &msg.whitelist)?;
    WHITELIST.save(deps.storage, &whitelist)?;

    let mut queue: Vec<Addr> = Vec::with_capacity(msg.initial_queue.len());
    for addr in validate_addresses(deps.as_ref(), &msg.initial_queue)? {
        if !whitelist.contains(&addr) {
            return Err(ContractError::NotWhitelisted(addr.to_string()));
        }
        if queue.contains(&addr) {
            return Err(ContractError::AlreadyEnqueued);
        }
        queue.push(addr);
    }
    QUEUE.save(deps.storage, &queue)?;

    Ok(Response::default()
        .add_attribute("method", "clock_instantiate")
        .add_attribute("tick_max_gas", tick_max_gas)
        .add_attribute("queue_length", queue.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    if PAUSED.load(deps.storage)? {
        return Err(ContractError::Paused);
    }

    match msg {
        ExecuteMsg::Tick {} => try_tick(deps),
        ExecuteMsg::Enqueue {} => try_enqueue(deps, info.sender),
        ExecuteMsg::Dequeue {} => try_dequeue(deps, info.sender),
    }
}

/// Ticks every queued receiver in queue order. Each tick is a separate
/// submessage that replies only on error, so a failing receiver is
/// reported without reverting the ticks of the others.
fn try_tick(deps: DepsMut) -> Result<Response, ContractError> {
    let queue = QUEUE.load(deps.storage)?;
    let tick_max_gas = TICK_MAX_GAS.load(deps.storage)?;
    let tick_count = TICK_COUNT.update(deps.storage, |count| -> Result<u64, ContractError> {
        count.checked_add(1).ok_or(ContractError::TickCountOverflow)
    })?;

    let tick_msg = to_json_binary(&ExecuteMsg::Tick {})?;
    let ticks = queue.iter().map(|receiver| {
        SubMsg::reply_on_error(
            WasmMsg::Execute {
                contract_addr: receiver.to_string(),
                msg: tick_msg.clone(),
                funds: vec![],
            },
            TICK_REPLY_ID,
        )
        .with_gas_limit(tick_max_gas.u64())
    });

    Ok(Response::default()
        .add_attribute("method", "execute_tick")
        .add_attribute("tick_count", tick_count.to_string())
        .add_attribute("receivers", queue.len().to_string())
        .add_submessages(ticks))
}

fn try_enqueue(deps: DepsMut, sender: Addr) -> Result<Response, ContractError> {
    if !WHITELIST.load(deps.storage)?.contains(&sender) {
        return Err(ContractError::NotWhitelisted(sender.to_string()));
    }

    let mut queue = QUEUE.load(deps.storage)?;
    if queue.contains(&sender) {
        return Err(ContractError::AlreadyEnqueued);
    }
    queue.push(sender.clone());
    QUEUE.save(deps.storage, &queue)?;

    Ok(Response::default()
        .add_attribute("method", "execute_enqueue")
        .add_attribute("sender", sender))
}

fn try_dequeue(deps: DepsMut, sender: Addr) -> Result<Response, ContractError> {
    let mut queue = QUEUE.load(deps.storage)?;
    let Some(position) = queue.iter().position(|addr| *addr == sender) else {
        return Err(ContractError::NotEnqueued);
    };
    queue.remove(position);
    QUEUE.save(deps.storage, &queue)?;

    Ok(Response::default()
        .add_attribute("method", "execute_dequeue")
        .add_attribute("sender", sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TickMaxGas {} => to_json_binary(&TICK_MAX_GAS.load(deps.storage)?),
        QueryMsg::Paused {} => to_json_binary(&PAUSED.load(deps.storage)?),
        QueryMsg::Queue { start_after, limit } => {
            let queue = QUEUE.load(deps.storage)?;
            let skip = match start_after {
                Some(addr) => queue
                    .iter()
                    .position(|queued| queued.as_str() == addr)
                    .map_or(queue.len(), |i| i + 1),
                None => 0,
            };
            let limit = limit.map_or(queue.len(), |l| l as usize);
            let page: Vec<Addr> = queue.into_iter().skip(skip).take(limit).collect();
            to_json_binary(&page)
        }
        QueryMsg::Whitelist {} => to_json_binary(&WHITELIST.load(deps.storage)?),
        QueryMsg::TickCount {} => to_json_binary(&Uint64::new(TICK_COUNT.load(deps.storage)?)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != TICK_REPLY_ID {
        return Err(ContractError::UnexpectedReplyId(msg.id));
    }

    match msg.result {
        SubMsgResult::Err(error) => {
            deps.api
                .debug(format!("WASMDEBUG: tick receiver errored: {error}").as_str());
            Ok(Response::default()
                .add_attribute("method", "reply_on_error")
                .add_attribute("error", error))
        }
        SubMsgResult::Ok(_) => Ok(Response::default().add_attribute("method", "reply_on_error")),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    match msg {
        MigrateMsg::Pause {} => {
            PAUSED.save(deps.storage, &true)?;
            Ok(Response::default().add_attribute("method", "pause"))
        }
        MigrateMsg::Unpause {} => {
            PAUSED.save(deps.storage, &false)?;
            Ok(Response::default().add_attribute("method", "unpause"))
        }
        MigrateMsg::UpdateTickMaxGas { new_value } => {
            let tick_max_gas = clamp_tick_max_gas(new_value);
            TICK_MAX_GAS.save(deps.storage, &tick_max_gas)?;
            Ok(Response::default()
                .add_attribute("method", "update_tick_max_gas")
                .add_attribute("tick_max_gas", tick_max_gas))
        }
        MigrateMsg::ManageWhitelist { add, remove } => {
            let mut whitelist = WHITELIST.load(deps.storage)?;

            if let Some(add) = add {
                for addr in validate_addresses(deps.as_ref(), &add)? {
                    if !whitelist.contains(&addr) {
                        whitelist.push(addr);
                    }
                }
            }

            // removing from the whitelist also stops the ticks
            if let Some(remove) = remove {
                let remove = validate_addresses(deps.as_ref(), &remove)?;
                whitelist.retain(|addr| !remove.contains(addr));
                QUEUE.update(deps.storage, |mut queue| -> StdResult<_> {
                    queue.retain(|addr| !remove.contains(addr));
                    Ok(queue)
                })?;
            }

            WHITELIST.save(deps.storage, &whitelist)?;
            Ok(Response::default()
                .add_attribute("method", "manage_whitelist")
                .add_attribute("whitelist_length", whitelist.len().to_string()))
        }
    }
}

fn clamp_tick_max_gas(value: Uint64) -> Uint64 {
    value.clamp(MIN_TICK_MAX_GAS, MAX_TICK_MAX_GAS)
}

fn validate_addresses(deps: Deps, addresses: &[String]) -> StdResult<Vec<Addr>> {
    addresses
        .iter()
        .map(|addr| deps.api.addr_validate(addr))
        .collect()
}
