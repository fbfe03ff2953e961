use std::collections::BTreeSet;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Attribute, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use covenant_utils::{
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    soft_validate_remote_chain_addr,
    state_machine::noop_attributes,
    ReceiverConfig,
};
use cw2::set_contract_version;
use neutron_sdk::{
    bindings::{msg::NeutronMsg, query::NeutronQuery},
    NeutronResult,
};

use crate::{
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg},
    state::{CLOCK_ADDRESS, DESTINATION_CONFIG, IBC_FEE, TARGET_DENOMS},
};

type ExecuteDeps<'a> = DepsMut<'a, NeutronQuery>;
type QueryDeps<'a> = Deps<'a, NeutronQuery>;

const CONTRACT_NAME: &str = "crates.io:covenant-interchain-router";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: ExecuteDeps,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    soft_validate_remote_chain_addr(
        deps.api,
        &msg.destination_config.destination_receiver_addr,
    )?;

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    DESTINATION_CONFIG.save(deps.storage, &msg.destination_config)?;
    TARGET_DENOMS.save(deps.storage, &msg.denoms)?;
    IBC_FEE.save(deps.storage, &msg.ibc_fee)?;

    Ok(Response::default()
        .add_attribute("method", "interchain_router_instantiate")
        .add_attribute("clock_address", clock_addr)
        .add_attributes(msg.destination_config.get_response_attributes()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: ExecuteDeps,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    deps.api
        .debug(format!("WASMDEBUG: execute: received msg: {msg:?}").as_str());
    match msg {
        ExecuteMsg::Tick {} => {
            // Verify caller is the clock
            verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)
                .map_err(ContractError::from)?;
            try_route_balances(deps, env)
        }
        ExecuteMsg::DistributeFallback { denoms } => try_distribute_fallback(deps, env, denoms),
    }
}

fn try_distribute_fallback(
    deps: ExecuteDeps,
    env: Env,
    denoms: Vec<String>,
) -> NeutronResult<Response<NeutronMsg>> {
    let explicit_denoms = TARGET_DENOMS.load(deps.storage)?;

    let mut seen = BTreeSet::new();
    for denom in &denoms {
        // the main covenant denoms are only ever routed by ticks
        if explicit_denoms.contains(denom) {
            return Err(ContractError::UnauthorizedDenomDistribution(denom.to_string()).into());
        }
        if !seen.insert(denom) {
            return Err(ContractError::DuplicateDenom(denom.to_string()).into());
        }
    }

    let available_balances = BankLedger::new(deps.querier)
        .non_zero_balances(env.contract.address.as_str(), &denoms)?;
    if available_balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_distribute_fallback", "no_balances")));
    }

    let fallback_distribution_messages = DESTINATION_CONFIG
        .load(deps.storage)?
        .get_ibc_transfer_messages_for_coins(
            available_balances,
            env.block.time,
            env.contract.address.to_string(),
            IBC_FEE.load(deps.storage)?.to_ibc_fee(),
        )?;

    Ok(Response::default()
        .add_attribute("method", "try_distribute_fallback")
        .add_messages(fallback_distribution_messages))
}

/// method that attempts to transfer out all available balances to the receiver
fn try_route_balances(deps: ExecuteDeps, env: Env) -> NeutronResult<Response<NeutronMsg>> {
    let destination_config = DESTINATION_CONFIG.load(deps.storage)?;
    let denoms_to_route: Vec<String> = TARGET_DENOMS.load(deps.storage)?.into_iter().collect();

    let denom_balances = BankLedger::new(deps.querier)
        .non_zero_balances(env.contract.address.as_str(), &denoms_to_route)?;

    // if there are no balances, we return early
    if denom_balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_route_balances", "no_balances")));
    }

    let balance_attributes: Vec<Attribute> = denom_balances
        .iter()
        .map(|c| Attribute::new(c.denom.to_string(), c.amount))
        .collect();

    // one transfer per denom
    let messages = destination_config.get_ibc_transfer_messages_for_coins(
        denom_balances,
        env.block.time,
        env.contract.address.to_string(),
        IBC_FEE.load(deps.storage)?.to_ibc_fee(),
    )?;

    Ok(Response::default()
        .add_attribute("method", "try_route_balances")
        .add_attributes(balance_attributes)
        .add_messages(messages))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: QueryDeps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ReceiverConfig {} => to_json_binary(&ReceiverConfig::Ibc(
            DESTINATION_CONFIG.load(deps.storage)?,
        )),
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::TargetDenoms {} => to_json_binary(&TARGET_DENOMS.load(deps.storage)?),
        QueryMsg::DepositAddress {} => to_json_binary(&Some(env.contract.address)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(
    deps: ExecuteDeps,
    _env: Env,
    msg: MigrateMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    deps.api.debug("WASMDEBUG: migrate");

    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            destination_config,
            target_denoms,
            ibc_fee,
        } => {
            let mut response =
                Response::default().add_attribute("method", "update_interchain_router");

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

            if let Some(config) = destination_config {
                soft_validate_remote_chain_addr(deps.api, &config.destination_receiver_addr)?;
                DESTINATION_CONFIG.save(deps.storage, &config)?;
                response = response.add_attributes(config.get_response_attributes());
            }

            if let Some(fee) = ibc_fee {
                response = response
                    .add_attribute("ack_fee", fee.ack_fee)
                    .add_attribute("timeout_fee", fee.timeout_fee);
                IBC_FEE.save(deps.storage, &fee)?;
            }

            Ok(response)
        }
    }
}
