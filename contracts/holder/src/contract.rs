#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage, Uint128,
};
use covenant_utils::{
    astroport::{query_liquidity_token_balance, query_pair_info, withdraw_liquidity_msg},
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    state_machine::{noop_attributes, StateMachine},
    withdraw_lp_helper::{generate_distribute_msg, generate_refund_msg, generate_withdraw_msg},
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    ContractState, ExecuteMsg, HolderObservation, InstantiateMsg, MigrateMsg, QueryMsg,
};
use crate::state::{
    CLOCK_ADDRESS, CONTRACT_STATE, DENOMS, EMERGENCY_COMMITTEE, LIQUID_POOLER_ADDRESS,
    LOCKUP_CONFIG, NEXT_CONTRACT, POOL_ADDRESS, REFUND_CONFIG, WITHDRAWER,
};

const CONTRACT_NAME: &str = "crates.io:covenant-holder";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    deps.api.debug("WASMDEBUG: holder instantiate");
    let mut resp = Response::default().add_attribute("method", "holder_instantiate");

    // withdrawer is optional on instantiation
    if let Some(addr) = msg.withdrawer {
        WITHDRAWER.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
        resp = resp.add_attribute("withdrawer", addr);
    };

    if let Some(addr) = msg.emergency_committee {
        EMERGENCY_COMMITTEE.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
        resp = resp.add_attribute("emergency_committee", addr);
    }

    if msg.lockup_config.is_expired(&env.block) {
        return Err(ContractError::LockupAlreadyExpired {});
    }
    if msg.denoms.is_empty() {
        return Err(ContractError::NoDenoms {});
    }

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    let pool_addr = deps.api.addr_validate(&msg.pool_address)?;
    let liquid_pooler_addr = deps.api.addr_validate(&msg.liquid_pooler_address)?;
    let next_contract = deps.api.addr_validate(&msg.next_contract)?;

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    POOL_ADDRESS.save(deps.storage, &pool_addr)?;
    LIQUID_POOLER_ADDRESS.save(deps.storage, &liquid_pooler_addr)?;
    NEXT_CONTRACT.save(deps.storage, &next_contract)?;
    LOCKUP_CONFIG.save(deps.storage, &msg.lockup_config)?;
    DENOMS.save(deps.storage, &msg.denoms)?;
    CONTRACT_STATE.save(deps.storage, &ContractState::Active)?;

    if let Some(refund_config) = msg.refund_config {
        for (denom, router) in refund_config.routers.iter() {
            if !msg.denoms.contains(denom) {
                return Err(ContractError::UnknownRefundDenom(denom.to_string()));
            }
            deps.api.addr_validate(router)?;
        }
        resp = resp.add_attribute(
            "refund_deposit_deadline",
            refund_config.deposit_deadline.to_string(),
        );
        REFUND_CONFIG.save(deps.storage, &refund_config)?;
    }

    Ok(resp
        .add_attribute("clock_address", clock_addr)
        .add_attribute("pool_address", pool_addr)
        .add_attribute("liquid_pooler_address", liquid_pooler_addr)
        .add_attribute("next_contract", next_contract)
        .add_attribute("lockup_config", msg.lockup_config.to_string())
        .add_attribute("denoms", msg.denoms.join(",")))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Tick {} => try_tick(deps, env, info),
        ExecuteMsg::Claim {} => try_claim(deps, env, info),
        ExecuteMsg::Distribute {} => try_distribute(deps, env, info),
        ExecuteMsg::Refund {} => try_refund(deps, env, info),
        ExecuteMsg::EmergencyWithdraw {} => try_emergency_withdraw(deps, env, info),
    }
}

fn try_tick(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    let lockup_expired = LOCKUP_CONFIG.load(deps.storage)?.is_expired(&env.block);

    match current_state {
        ContractState::Active if lockup_expired => {
            advance_state(deps.storage, &current_state, ContractState::Expired)?;
            Ok(Response::default()
                .add_attribute("method", "try_tick")
                .add_attribute("contract_state", ContractState::Expired.as_str()))
        }
        ContractState::Active | ContractState::Complete => {
            try_refund_unmatched(deps, env, current_state)
        }
        ContractState::Expired => Ok(Response::default()
            .add_attribute("method", "try_tick")
            .add_attribute("contract_state", current_state.as_str())),
    }
}

/// once the deposit deadline passed, whatever never entered the pool is
/// collected from the liquid pooler and sent back to the parties. if no
/// pool shares were ever minted there is nothing to hold on to and the
/// holder completes right away.
fn try_refund_unmatched(
    deps: DepsMut,
    env: Env,
    current_state: ContractState,
) -> Result<Response, ContractError> {
    if !deposit_deadline_expired(deps.as_ref(), &env)? {
        return Ok(Response::default()
            .add_attribute("method", "try_tick")
            .add_attribute("contract_state", current_state.as_str()));
    }
    let observation = observe(deps.as_ref(), &env)?;

    let next_state = match current_state {
        ContractState::Active if current_state.precondition(&observation) => {
            ContractState::Complete
        }
        _ => current_state.clone(),
    };
    advance_state(deps.storage, &current_state, next_state.clone())?;

    if observation.balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_refund_unmatched", "nothing_to_refund"))
            .add_attribute("contract_state", next_state.as_str()));
    }

    let liquid_pooler = LIQUID_POOLER_ADDRESS.load(deps.storage)?;
    let denoms = DENOMS.load(deps.storage)?;
    let mut resp = Response::default()
        .add_attribute("method", "try_refund_unmatched")
        .add_attribute("contract_state", next_state.as_str());

    let pooler_leftovers =
        BankLedger::new(deps.querier).non_zero_balances(liquid_pooler.as_str(), &denoms)?;
    if !pooler_leftovers.is_empty() {
        resp = resp.add_message(generate_withdraw_msg(liquid_pooler.to_string())?);
    }

    Ok(resp.add_message(generate_refund_msg(env.contract.address.to_string())?))
}

fn observe(deps: Deps, env: &Env) -> StdResult<HolderObservation> {
    let pool_address = POOL_ADDRESS.load(deps.storage)?;
    let liquid_pooler = LIQUID_POOLER_ADDRESS.load(deps.storage)?;
    let denoms = DENOMS.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);

    let pair_info = query_pair_info(deps.querier, pool_address.as_str())?;
    let lp_token_balance = query_liquidity_token_balance(
        deps.querier,
        pair_info.liquidity_token.as_str(),
        env.contract.address.as_str(),
    )?;

    let mut balances = ledger.non_zero_balances(env.contract.address.as_str(), &denoms)?;
    balances.extend(ledger.non_zero_balances(liquid_pooler.as_str(), &denoms)?);

    Ok(HolderObservation {
        lockup_expired: LOCKUP_CONFIG.load(deps.storage)?.is_expired(&env.block),
        deposit_deadline_expired: deposit_deadline_expired(deps, env)?,
        lp_token_balance,
        balances,
    })
}

/// holders without a refund config never see the deadline pass
fn deposit_deadline_expired(deps: Deps, env: &Env) -> StdResult<bool> {
    Ok(REFUND_CONFIG
        .may_load(deps.storage)?
        .map(|config| config.deposit_deadline.is_expired(&env.block))
        .unwrap_or(false))
}

fn advance_state(
    storage: &mut dyn Storage,
    current: &ContractState,
    next: ContractState,
) -> StdResult<()> {
    if !current.can_advance_to(&next) {
        return Err(StdError::generic_err(format!(
            "invalid state transition: {} -> {}",
            current.as_str(),
            next.as_str()
        )));
    }
    CONTRACT_STATE.save(storage, &next)
}

/// unwinds the position after the lockup. the pool shares are burned in
/// exchange for the underlying assets, the liquid pooler is asked for any
/// leftovers, and a final callback forwards whatever landed here.
fn try_claim(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    if let Some(withdrawer) = WITHDRAWER.may_load(deps.storage)? {
        if withdrawer != info.sender {
            return Err(ContractError::Unauthorized {});
        }
    }

    let mut current_state = CONTRACT_STATE.load(deps.storage)?;
    if current_state.is_terminal() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_claim", "already_claimed"))
            .add_attribute("contract_state", current_state.as_str()));
    }

    if !LOCKUP_CONFIG.load(deps.storage)?.is_expired(&env.block) {
        return Err(ContractError::LockupNotExpired {});
    }
    let observation = observe(deps.as_ref(), &env)?;

    // claims do not wait for the clock to notice the expiration
    if current_state == ContractState::Active {
        advance_state(deps.storage, &current_state, ContractState::Expired)?;
        current_state = ContractState::Expired;
    }

    if !current_state.precondition(&observation) {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_claim", "nothing_to_claim"))
            .add_attribute("contract_state", current_state.as_str()));
    }

    let pool_address = POOL_ADDRESS.load(deps.storage)?;
    let liquid_pooler = LIQUID_POOLER_ADDRESS.load(deps.storage)?;
    let mut resp = Response::default()
        .add_attribute("method", "try_claim")
        .add_attribute("contract_state", current_state.as_str())
        .add_attribute("lp_token_amount", observation.lp_token_balance);

    if !observation.lp_token_balance.is_zero() {
        let pair_info = query_pair_info(deps.querier, pool_address.as_str())?;
        resp = resp.add_message(withdraw_liquidity_msg(
            pair_info.liquidity_token.as_str(),
            pool_address.as_str(),
            observation.lp_token_balance,
        )?);
    }

    let denoms = DENOMS.load(deps.storage)?;
    let pooler_leftovers =
        BankLedger::new(deps.querier).non_zero_balances(liquid_pooler.as_str(), &denoms)?;
    if !pooler_leftovers.is_empty() {
        resp = resp.add_message(generate_withdraw_msg(liquid_pooler.to_string())?);
    }

    // runs after the withdrawals above landed
    Ok(resp.add_message(generate_distribute_msg(env.contract.address.to_string())?))
}

/// early unwind by the emergency committee. the lockup is ignored and
/// every denom is handed back per party when routers are known.
fn try_emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let committee = EMERGENCY_COMMITTEE
        .may_load(deps.storage)?
        .ok_or(ContractError::EmergencyWithdrawDisabled {})?;
    if committee != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    if current_state.is_terminal() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_emergency_withdraw", "already_claimed"))
            .add_attribute("contract_state", current_state.as_str()));
    }

    let observation = observe(deps.as_ref(), &env)?;
    advance_state(deps.storage, &current_state, ContractState::Complete)?;

    let pool_address = POOL_ADDRESS.load(deps.storage)?;
    let liquid_pooler = LIQUID_POOLER_ADDRESS.load(deps.storage)?;
    let mut resp = Response::default()
        .add_attribute("method", "try_emergency_withdraw")
        .add_attribute("contract_state", ContractState::Complete.as_str())
        .add_attribute("lp_token_amount", observation.lp_token_balance);

    if !observation.lp_token_balance.is_zero() {
        let pair_info = query_pair_info(deps.querier, pool_address.as_str())?;
        resp = resp.add_message(withdraw_liquidity_msg(
            pair_info.liquidity_token.as_str(),
            pool_address.as_str(),
            observation.lp_token_balance,
        )?);
    }

    let denoms = DENOMS.load(deps.storage)?;
    let pooler_leftovers =
        BankLedger::new(deps.querier).non_zero_balances(liquid_pooler.as_str(), &denoms)?;
    if !pooler_leftovers.is_empty() {
        resp = resp.add_message(generate_withdraw_msg(liquid_pooler.to_string())?);
    }

    let payout = match REFUND_CONFIG.may_load(deps.storage)? {
        Some(_) => generate_refund_msg(env.contract.address.to_string())?,
        None => generate_distribute_msg(env.contract.address.to_string())?,
    };
    Ok(resp.add_message(payout))
}

/// forwards the current balances of the pool denoms to the next contract
fn try_distribute(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::Unauthorized {});
    }

    let next_contract = NEXT_CONTRACT.load(deps.storage)?;
    let denoms = DENOMS.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);
    let balances = ledger.non_zero_balances(env.contract.address.as_str(), &denoms)?;

    if balances.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_distribute", "nothing_to_distribute")));
    }

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    advance_state(deps.storage, &current_state, ContractState::Complete)?;

    let distributed: Vec<String> = balances.iter().map(|c| c.to_string()).collect();
    let total: Uint128 = balances.iter().map(|c| c.amount).sum();

    Ok(Response::default()
        .add_attribute("method", "try_distribute")
        .add_attribute("contract_state", ContractState::Complete.as_str())
        .add_attribute("next_contract", next_contract.to_string())
        .add_attribute("distributed", distributed.join(","))
        .add_attribute("total_amount", total)
        .add_message(ledger.transfer(
            env.contract.address.as_str(),
            next_contract.as_str(),
            balances,
        )?))
}

/// sends each contribution denom held here to the router of the party
/// that contributed it
fn try_refund(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::Unauthorized {});
    }

    let Some(refund_config) = REFUND_CONFIG.may_load(deps.storage)? else {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_refund", "no_refund_config")));
    };

    let ledger = BankLedger::new(deps.querier);
    let mut refunded: Vec<String> = vec![];
    let mut resp = Response::default().add_attribute("method", "try_refund");

    for (denom, router) in refund_config.routers.iter() {
        let balance = ledger.balance_of(env.contract.address.as_str(), denom)?;
        if balance.is_zero() {
            continue;
        }
        let refund = Coin {
            denom: denom.to_string(),
            amount: balance,
        };
        refunded.push(format!("{refund}:{router}"));
        resp = resp.add_message(ledger.transfer(
            env.contract.address.as_str(),
            router,
            vec![refund],
        )?);
    }

    if refunded.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_refund", "nothing_to_refund")));
    }

    Ok(resp.add_attribute("refunded", refunded.join(",")))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::ContractState {} => to_json_binary(&CONTRACT_STATE.load(deps.storage)?),
        QueryMsg::Withdrawer {} => to_json_binary(&WITHDRAWER.may_load(deps.storage)?),
        QueryMsg::PoolAddress {} => to_json_binary(&POOL_ADDRESS.load(deps.storage)?),
        QueryMsg::LiquidPoolerAddress {} => {
            to_json_binary(&LIQUID_POOLER_ADDRESS.load(deps.storage)?)
        }
        QueryMsg::NextContract {} => to_json_binary(&NEXT_CONTRACT.load(deps.storage)?),
        QueryMsg::LockupConfig {} => to_json_binary(&LOCKUP_CONFIG.load(deps.storage)?),
        QueryMsg::RefundConfig {} => to_json_binary(&REFUND_CONFIG.may_load(deps.storage)?),
        QueryMsg::EmergencyCommittee {} => {
            to_json_binary(&EMERGENCY_COMMITTEE.may_load(deps.storage)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    deps.api.debug("WASMDEBUG: migrate");

    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            withdrawer,
            next_contract,
            lockup_config,
            emergency_committee,
        } => {
            let mut response = Response::default().add_attribute("method", "update_config");

            if let Some(addr) = clock_addr {
                CLOCK_ADDRESS.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("clock_addr", addr);
            }

            if let Some(addr) = withdrawer {
                WITHDRAWER.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("withdrawer", addr);
            }

            if let Some(addr) = next_contract {
                NEXT_CONTRACT.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("next_contract", addr);
            }

            if let Some(expiration) = lockup_config {
                LOCKUP_CONFIG.save(deps.storage, &expiration)?;
                response = response.add_attribute("lockup_config", expiration.to_string());
            }

            if let Some(addr) = emergency_committee {
                EMERGENCY_COMMITTEE.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("emergency_committee", addr);
            }

            Ok(response)
        }
    }
}
