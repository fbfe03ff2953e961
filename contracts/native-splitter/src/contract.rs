use std::collections::BTreeSet;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Order, Response, StdError,
    StdResult,
};
use covenant_utils::{
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    split::SplitConfig,
    state_machine::noop_attributes,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{CLOCK_ADDRESS, FALLBACK_SPLIT, SPLIT_CONFIG_MAP};

const CONTRACT_NAME: &str = "crates.io:covenant-native-splitter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    deps.api.debug("WASMDEBUG: native splitter instantiate");
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut resp = Response::default().add_attribute("method", "native_splitter_instantiate");

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    resp = resp.add_attribute("clock_addr", clock_addr.to_string());

    // we validate the splits and store them per-denom
    for (denom, split) in msg.splits {
        split.validate_shares()?;
        SPLIT_CONFIG_MAP.save(deps.storage, denom.to_string(), &split)?;
        resp = resp.add_attributes(vec![split.get_response_attribute(denom)]);
    }

    // if a fallback split is provided we validate and store it
    if let Some(split) = msg.fallback_split {
        split.validate_shares()?;
        resp = resp.add_attributes(vec![split.get_response_attribute("fallback".to_string())]);
        FALLBACK_SPLIT.save(deps.storage, &split)?;
    } else {
        resp = resp.add_attribute("fallback", "None");
    }

    Ok(resp)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Tick {} => {
            verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)?;
            try_distribute(deps, env)
        }
        ExecuteMsg::DistributeFallback { denoms } => try_distribute_fallback(deps, env, denoms),
    }
}

/// disburses the current balance of every configured denom by weight
pub fn try_distribute(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let ledger = BankLedger::new(deps.querier);
    let mut distribution_messages: Vec<CosmosMsg> = vec![];
    let mut distributed: Vec<String> = vec![];

    for entry in SPLIT_CONFIG_MAP.range(deps.storage, None, None, Order::Ascending) {
        let (denom, config) = entry?;
        let balance = ledger.balance_of(env.contract.address.as_str(), &denom)?;

        if !balance.is_zero() {
            // stored shares are checked again before any funds move
            config.validate_shares()?;
            let mut transfer_messages = config.get_transfer_messages(balance, &denom)?;
            distribution_messages.append(&mut transfer_messages);
            distributed.push(format!("{balance}{denom}"));
        }
    }

    if distribution_messages.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_distribute", "no_funds_to_distribute")));
    }

    Ok(Response::default()
        .add_attribute("method", "try_distribute")
        .add_attribute("distributed", distributed.join(","))
        .add_messages(distribution_messages))
}

fn try_distribute_fallback(
    deps: DepsMut,
    env: Env,
    denoms: Vec<String>,
) -> Result<Response, ContractError> {
    let split = FALLBACK_SPLIT
        .may_load(deps.storage)?
        .ok_or(ContractError::NoFallbackSplit {})?;

    let explicit_denoms = SPLIT_CONFIG_MAP
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<BTreeSet<String>>>()?;

    let ledger = BankLedger::new(deps.querier);
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut distribution_messages: Vec<CosmosMsg> = vec![];

    for denom in denoms {
        // the main covenant denoms only ever follow their own split
        if explicit_denoms.contains(&denom) {
            return Err(ContractError::UnauthorizedDenom(denom));
        }
        if !seen.insert(denom.to_string()) {
            return Err(ContractError::DuplicateDenom(denom));
        }

        let balance = ledger.balance_of(env.contract.address.as_str(), &denom)?;
        if !balance.is_zero() {
            let mut fallback_messages = split.get_transfer_messages(balance, &denom)?;
            distribution_messages.append(&mut fallback_messages);
        }
    }

    Ok(Response::default()
        .add_attribute("method", "try_distribute_fallback")
        .add_messages(distribution_messages))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::DenomSplit { denom } => to_json_binary(&query_split(deps, denom)?),
        QueryMsg::Splits {} => to_json_binary(&query_all_splits(deps)?),
        QueryMsg::FallbackSplit {} => to_json_binary(&FALLBACK_SPLIT.may_load(deps.storage)?),
        QueryMsg::DepositAddress {} => to_json_binary(&Some(env.contract.address)),
    }
}

pub fn query_all_splits(deps: Deps) -> StdResult<Vec<(String, SplitConfig)>> {
    SPLIT_CONFIG_MAP
        .range(deps.storage, None, None, Order::Ascending)
        .collect()
}

pub fn query_split(deps: Deps, denom: String) -> StdResult<SplitConfig> {
    SPLIT_CONFIG_MAP
        .may_load(deps.storage, denom.to_string())?
        .ok_or_else(|| StdError::not_found(format!("split for {denom}")))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    deps.api.debug("WASMDEBUG: migrate");

    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            splits,
            fallback_split,
        } => {
            let mut resp = Response::default().add_attribute("method", "update_config");

            if let Some(clock_addr) = clock_addr {
                CLOCK_ADDRESS.save(deps.storage, &deps.api.addr_validate(&clock_addr)?)?;
                resp = resp.add_attribute("clock_addr", clock_addr);
            }

            if let Some(splits) = splits {
                // clear all current split configs before storing new values
                SPLIT_CONFIG_MAP.clear(deps.storage);
                for (denom, split) in splits {
                    split.validate_shares()?;
                    SPLIT_CONFIG_MAP.save(deps.storage, denom.to_string(), &split)?;
                    resp = resp.add_attributes(vec![split.get_response_attribute(denom)]);
                }
            }

            if let Some(split) = fallback_split {
                split.validate_shares()?;
                FALLBACK_SPLIT.save(deps.storage, &split)?;
                resp =
                    resp.add_attributes(vec![split.get_response_attribute("fallback".to_string())]);
            }

            Ok(resp)
        }
    }
}
