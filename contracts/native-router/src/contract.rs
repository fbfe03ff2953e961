use std::collections::BTreeSet;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Attribute, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use covenant_utils::{
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    state_machine::noop_attributes,
    ReceiverConfig,
};
use cw2::set_contract_version;

use crate::{
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg},
    state::{CLOCK_ADDRESS, RECEIVER_ADDRESS, TARGET_DENOMS},
};

const CONTRACT_NAME: &str = "crates.io:covenant-native-router";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    let receiver_addr = deps.api.addr_validate(&msg.receiver_address)?;

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    RECEIVER_ADDRESS.save(deps.storage, &receiver_addr)?;
    TARGET_DENOMS.save(deps.storage, &msg.denoms)?;

    Ok(Response::default()
        .add_attribute("method", "native_router_instantiate")
        .add_attribute("clock_address", clock_addr)
        .add_attribute("receiver_address", receiver_addr)
        .add_attribute(
            "target_denoms",
            msg.denoms.into_iter().collect::<Vec<String>>().join(","),
        ))
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
            // Verify caller is the clock
            verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)?;
            try_route_balances(deps, env)
        }
        ExecuteMsg::DistributeFallback { denoms } => try_distribute_fallback(deps, env, denoms),
    }
}

fn try_distribute_fallback(
    deps: DepsMut,
    env: Env,
    denoms: Vec<String>,
) -> Result<Response, ContractError> {
    let receiver_address = RECEIVER_ADDRESS.load(deps.storage)?;
    let explicit_denoms = TARGET_DENOMS.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);

    let mut seen = BTreeSet::new();
    for denom in &denoms {
        // the main covenant denoms are only ever routed by ticks
        if explicit_denoms.contains(denom) {
            return Err(ContractError::UnauthorizedDenomDistribution(
                denom.to_string(),
            ));
        }
        if !seen.insert(denom) {
            return Err(ContractError::DuplicateDenom(denom.to_string()));
        }
    }

    let available_balances = ledger.non_zero_balances(env.contract.address.as_str(), &denoms)?;
    if available_balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_distribute_fallback", "no_balances")));
    }

    Ok(Response::default()
        .add_attribute("method", "try_distribute_fallback")
        .add_attributes(balance_attributes(&available_balances))
        .add_message(ledger.transfer(
            env.contract.address.as_str(),
            receiver_address.as_str(),
            available_balances,
        )?))
}

/// method that attempts to transfer out all available balances to the receiver
fn try_route_balances(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let receiver_addr = RECEIVER_ADDRESS.load(deps.storage)?;
    let denoms_to_route: Vec<String> = TARGET_DENOMS.load(deps.storage)?.into_iter().collect();
    let ledger = BankLedger::new(deps.querier);

    let denom_balances =
        ledger.non_zero_balances(env.contract.address.as_str(), &denoms_to_route)?;

    // if there are no balances, we return early
    if denom_balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_route_balances", "no_balances")));
    }

    Ok(Response::default()
        .add_attribute("method", "try_route_balances")
        .add_attributes(balance_attributes(&denom_balances))
        .add_message(ledger.transfer(
            env.contract.address.as_str(),
            receiver_addr.as_str(),
            denom_balances,
        )?))
}

fn balance_attributes(balances: &[Coin]) -> Vec<Attribute> {
    balances
        .iter()
        .map(|c| Attribute::new(c.denom.to_string(), c.amount))
        .collect()
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ReceiverConfig {} => to_json_binary(&ReceiverConfig::Native(
            RECEIVER_ADDRESS.load(deps.storage)?.to_string(),
        )),
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::TargetDenoms {} => to_json_binary(&TARGET_DENOMS.load(deps.storage)?),
        QueryMsg::DepositAddress {} => to_json_binary(&Some(env.contract.address)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            receiver_address,
            target_denoms,
        } => {
            let mut response = Response::default().add_attribute("method", "update_native_router");

            if let Some(addr) = clock_addr {
                CLOCK_ADDRESS.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("clock_addr", addr);
            }

            if let Some(denoms) = target_denoms {
                let denoms_str = denoms.join(",");
                let denom_set: BTreeSet<String> = denoms.into_iter().collect();
                TARGET_DENOMS.save(deps.storage, &denom_set)?;
                response = response.add_attribute("target_denoms", denoms_str);
            }

            if let Some(addr) = receiver_address {
                RECEIVER_ADDRESS.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("receiver_addr", addr);
            }

            Ok(response)
        }
    }
}
