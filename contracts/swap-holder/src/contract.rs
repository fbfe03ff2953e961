#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage,
};
use covenant_utils::{
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    neutron::query_deposit_address,
    state_machine::{noop_attributes, StateMachine},
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    ContractState, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SwapObservation,
};
use crate::state::{CLOCK_ADDRESS, CONTRACT_STATE, LOCKUP_CONFIG, NEXT_CONTRACT, PARTIES_CONFIG};

const CONTRACT_NAME: &str = "crates.io:covenant-swap-holder";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    deps.api.debug("WASMDEBUG: swap holder instantiate");

    if msg.lockup_config.is_expired(&env.block) {
        return Err(ContractError::LockupAlreadyExpired {});
    }
    msg.parties_config.validate(deps.api)?;

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    let next_contract = deps.api.addr_validate(&msg.next_contract)?;

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    NEXT_CONTRACT.save(deps.storage, &next_contract)?;
    LOCKUP_CONFIG.save(deps.storage, &msg.lockup_config)?;
    PARTIES_CONFIG.save(deps.storage, &msg.parties_config)?;
    CONTRACT_STATE.save(deps.storage, &ContractState::Instantiated)?;

    Ok(Response::default()
        .add_attribute("method", "swap_holder_instantiate")
        .add_attribute("clock_address", clock_addr)
        .add_attribute("next_contract", next_contract)
        .add_attribute("lockup_config", msg.lockup_config.to_string())
        .add_attribute(
            "party_a_contribution",
            msg.parties_config.party_a.contribution.to_string(),
        )
        .add_attribute(
            "party_b_contribution",
            msg.parties_config.party_b.contribution.to_string(),
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
        ExecuteMsg::Tick {} => try_tick(deps, env, info),
    }
}

fn try_tick(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env)?;

    if !current_state.precondition(&observation) {
        let reason = match current_state {
            ContractState::Instantiated => "awaiting_deposits",
            ContractState::Expired | ContractState::Complete => "nothing_to_refund",
        };
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", reason))
            .add_attribute("contract_state", current_state.as_str()));
    }

    match current_state {
        // an expired lockup wins over a swap funded in the same block
        ContractState::Instantiated if observation.lockup_expired => {
            advance_state(deps.storage, &current_state, ContractState::Expired)?;
            Ok(Response::default()
                .add_attribute("method", "try_tick")
                .add_attribute("contract_state", ContractState::Expired.as_str()))
        }
        ContractState::Instantiated => try_forward(deps, env, current_state, observation),
        ContractState::Expired | ContractState::Complete => try_refund(deps, env, current_state),
    }
}

fn observe(deps: Deps, env: &Env) -> StdResult<SwapObservation> {
    let parties = PARTIES_CONFIG.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);

    let mut terms_met = true;
    let mut balances = vec![];
    for party in parties.parties() {
        let amount =
            ledger.balance_of(env.contract.address.as_str(), &party.contribution.denom)?;
        terms_met &= amount >= party.contribution.amount;
        if !amount.is_zero() {
            balances.push(Coin {
                denom: party.contribution.denom.to_string(),
                amount,
            });
        }
    }

    Ok(SwapObservation {
        lockup_expired: LOCKUP_CONFIG.load(deps.storage)?.is_expired(&env.block),
        terms_met,
        balances,
    })
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

/// both contributions are in: everything held here moves to the splitter
/// in a single send
fn try_forward(
    deps: DepsMut,
    env: Env,
    current_state: ContractState,
    observation: SwapObservation,
) -> Result<Response, ContractError> {
    let next_contract = NEXT_CONTRACT.load(deps.storage)?;
    let Some(deposit_address) = query_deposit_address(deps.querier, next_contract.as_str())?
    else {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_forward", "next_contract_not_ready"))
            .add_attribute("contract_state", current_state.as_str()));
    };

    advance_state(deps.storage, &current_state, ContractState::Complete)?;

    let forwarded: Vec<String> = observation.balances.iter().map(|c| c.to_string()).collect();
    let ledger = BankLedger::new(deps.querier);

    Ok(Response::default()
        .add_attribute("method", "try_forward")
        .add_attribute("contract_state", ContractState::Complete.as_str())
        .add_attribute("deposit_address", &deposit_address)
        .add_attribute("forwarded", forwarded.join(","))
        .add_message(ledger.transfer(
            env.contract.address.as_str(),
            &deposit_address,
            observation.balances,
        )?))
}

/// returns every party denom held here to the router of the party that
/// contributes it
fn try_refund(
    deps: DepsMut,
    env: Env,
    current_state: ContractState,
) -> Result<Response, ContractError> {
    let parties = PARTIES_CONFIG.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);

    let mut refunded: Vec<String> = vec![];
    let mut resp = Response::default()
        .add_attribute("method", "try_refund")
        .add_attribute("contract_state", current_state.as_str());

    for party in parties.parties() {
        let denom = &party.contribution.denom;
        let amount = ledger.balance_of(env.contract.address.as_str(), denom)?;
        if amount.is_zero() {
            continue;
        }
        let refund = Coin {
            denom: denom.to_string(),
            amount,
        };
        refunded.push(format!("{refund}:{}", party.router));
        resp = resp.add_message(ledger.transfer(
            env.contract.address.as_str(),
            &party.router,
            vec![refund],
        )?);
    }

    Ok(resp.add_attribute("refunded", refunded.join(",")))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::ContractState {} => to_json_binary(&CONTRACT_STATE.load(deps.storage)?),
        QueryMsg::NextContract {} => to_json_binary(&NEXT_CONTRACT.load(deps.storage)?),
        QueryMsg::LockupConfig {} => to_json_binary(&LOCKUP_CONFIG.load(deps.storage)?),
        QueryMsg::PartiesConfig {} => to_json_binary(&PARTIES_CONFIG.load(deps.storage)?),
        // parties deposit straight into the holder
        QueryMsg::DepositAddress {} => to_json_binary(&Some(env.contract.address)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    deps.api.debug("WASMDEBUG: migrate");

    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            next_contract,
            lockup_config,
            parties_config,
        } => {
            let mut response = Response::default().add_attribute("method", "update_config");

            if let Some(addr) = clock_addr {
                CLOCK_ADDRESS.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("clock_addr", addr);
            }

            if let Some(addr) = next_contract {
                NEXT_CONTRACT.save(deps.storage, &deps.api.addr_validate(&addr)?)?;
                response = response.add_attribute("next_contract", addr);
            }

            if let Some(expiration) = lockup_config {
                LOCKUP_CONFIG.save(deps.storage, &expiration)?;
                response = response.add_attribute("lockup_config", expiration.to_string());
            }

            if let Some(parties) = parties_config {
                parties.validate(deps.api)?;
                PARTIES_CONFIG.save(deps.storage, &parties)?;
                response = response.add_attribute("parties_config", "updated");
            }

            Ok(response)
        }
    }
}
