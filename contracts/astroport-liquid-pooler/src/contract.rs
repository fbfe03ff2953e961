#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_json_binary, Binary, Coin, CosmosMsg, Decimal, Deps, DepsMut, Env, MessageInfo,
    Reply, Response, StdError, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};
use covenant_utils::{
    astroport::{query_pair_info, query_pool_assets},
    clock::verify_clock,
    ledger::{BankLedger, Ledger},
    state_machine::{noop_attributes, StateMachine},
};
use cw2::set_contract_version;

use astroport::{asset::Asset, pair::ExecuteMsg::ProvideLiquidity};
use cw_utils::parse_reply_execute_data;

use crate::{
    error::ContractError,
    msg::{
        ContractState, ExecuteMsg, InstantiateMsg, LpConfig, MigrateMsg, PoolerObservation,
        ProvidedLiquidityInfo, QueryMsg,
    },
    state::{CLOCK_ADDRESS, CONTRACT_STATE, HOLDER_ADDRESS, LP_CONFIG, PROVIDED_LIQUIDITY_INFO},
};

const CONTRACT_NAME: &str = "crates.io:covenant-astroport-liquid-pooler";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DOUBLE_SIDED_REPLY_ID: u64 = 321u64;
const SINGLE_SIDED_REPLY_ID: u64 = 322u64;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // validate the contract addresses
    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    let pool_addr = deps.api.addr_validate(&msg.pool_address)?;
    let holder_addr = deps.api.addr_validate(&msg.holder_address)?;

    // validate that the pool did not migrate to a new pair type
    let pair_info = query_pair_info(deps.querier, pool_addr.as_str())?;
    ensure!(
        pair_info.pair_type == msg.pair_type,
        ContractError::PairTypeMismatch {}
    );

    let lp_config = LpConfig {
        pool_address: pool_addr,
        single_side_lp_limits: msg.single_side_lp_limits,
        slippage_tolerance: msg.slippage_tolerance,
        expected_pool_ratio_range: msg.pool_price_config.to_range()?,
        pair_type: msg.pair_type,
        asset_data: msg.assets,
        deposit_deadline: msg.deposit_deadline,
    };

    CONTRACT_STATE.save(deps.storage, &ContractState::AwaitingFunds)?;
    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    HOLDER_ADDRESS.save(deps.storage, &holder_addr)?;
    LP_CONFIG.save(deps.storage, &lp_config)?;
    // we begin with no liquidity provided
    PROVIDED_LIQUIDITY_INFO.save(deps.storage, &ProvidedLiquidityInfo::default())?;

    Ok(Response::default()
        .add_attribute("method", "lp_instantiate")
        .add_attribute("clock_addr", clock_addr)
        .add_attribute("holder_addr", holder_addr)
        .add_attributes(lp_config.to_response_attributes()))
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
        ExecuteMsg::Withdraw {} => try_withdraw(deps, env, info),
    }
}

/// attempts to advance the state machine. performs `info.sender` validation.
fn try_tick(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    if current_state.is_terminal() {
        return Ok(Response::default()
            .add_attribute("method", "try_tick")
            .add_attribute("contract_state", current_state.as_str()));
    }

    let lp_config = LP_CONFIG.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env, &lp_config)?;

    if observation.deadline_expired {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", "deposit_deadline_expired"))
            .add_attribute("contract_state", current_state.as_str()));
    }
    if !current_state.precondition(&observation) {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", "not_enough_funds"))
            .add_attribute("contract_state", current_state.as_str()));
    }

    try_lp(deps, current_state, observation, lp_config)
}

fn observe(deps: Deps, env: &Env, lp_config: &LpConfig) -> StdResult<PoolerObservation> {
    let ledger = BankLedger::new(deps.querier);
    let contract_address = env.contract.address.as_str();

    Ok(PoolerObservation {
        balance_a: ledger.balance_of(contract_address, &lp_config.asset_data.asset_a_denom)?,
        balance_b: ledger.balance_of(contract_address, &lp_config.asset_data.asset_b_denom)?,
        deadline_expired: lp_config.deposit_deadline.is_expired(&env.block),
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

/// method which attempts to provision liquidity to the pool.
/// if both asset balances are non-zero, double sided liquidity is
/// provided first. whatever is left over, or a lone denom that arrived
/// before its counterpart, is then provided single-sided as long as it
/// fits into the single side limits.
fn try_lp(
    deps: DepsMut,
    current_state: ContractState,
    observation: PoolerObservation,
    lp_config: LpConfig,
) -> Result<Response, ContractError> {
    let (pool_token_a_bal, pool_token_b_bal) = get_pool_asset_amounts(
        query_pool_assets(deps.querier, lp_config.pool_address.as_str())?,
        &lp_config.asset_data.asset_a_denom,
        &lp_config.asset_data.asset_b_denom,
    )?;

    // validate the current pool ratio against our expectations.
    // this fails the whole tick, leaving the state untouched.
    let a_to_b_ratio = Decimal::from_ratio(pool_token_a_bal, pool_token_b_bal);
    if !lp_config.expected_pool_ratio_range.contains(a_to_b_ratio) {
        return Err(ContractError::PriceRangeError {
            ratio: a_to_b_ratio.to_string(),
            min: lp_config.expected_pool_ratio_range.min.to_string(),
            max: lp_config.expected_pool_ratio_range.max.to_string(),
        });
    }

    let mut submsgs: Vec<SubMsg> = vec![];
    let mut provided = ProvidedLiquidityInfo::default();
    let (mut leftover_a, mut leftover_b) = (observation.balance_a, observation.balance_b);

    if !leftover_a.is_zero() && !leftover_b.is_zero() {
        let (amount_a, amount_b) = get_double_side_amounts(
            (leftover_a, leftover_b),
            (pool_token_a_bal, pool_token_b_bal),
        )?;
        if !amount_a.is_zero() && !amount_b.is_zero() {
            submsgs.push(provide_liquidity_submsg(
                deps.storage,
                &lp_config,
                (amount_a, amount_b),
                DOUBLE_SIDED_REPLY_ID,
            )?);
            provided.provided_amount_a = amount_a;
            provided.provided_amount_b = amount_b;
            leftover_a = leftover_a.checked_sub(amount_a)?;
            leftover_b = leftover_b.checked_sub(amount_b)?;
        }
    }

    // at most one of the denoms is left over after a double sided provision
    let single_side = match (leftover_a.is_zero(), leftover_b.is_zero()) {
        (false, true) if leftover_a <= lp_config.single_side_lp_limits.asset_a_limit => {
            Some((leftover_a, Uint128::zero()))
        }
        (true, false) if leftover_b <= lp_config.single_side_lp_limits.asset_b_limit => {
            Some((Uint128::zero(), leftover_b))
        }
        _ => None,
    };
    if let Some((amount_a, amount_b)) = single_side {
        submsgs.push(provide_liquidity_submsg(
            deps.storage,
            &lp_config,
            (amount_a, amount_b),
            SINGLE_SIDED_REPLY_ID,
        )?);
        provided.provided_amount_a = provided.provided_amount_a.checked_add(amount_a)?;
        provided.provided_amount_b = provided.provided_amount_b.checked_add(amount_b)?;
        leftover_a = leftover_a.checked_sub(amount_a)?;
        leftover_b = leftover_b.checked_sub(amount_b)?;
    }

    if submsgs.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_lp", "leftover_exceeds_single_side_limits"))
            .add_attribute("contract_state", current_state.as_str()));
    }

    // a lone single sided provision waits for the other denom
    let total_provided = PROVIDED_LIQUIDITY_INFO.load(deps.storage)?;
    let both_provided =
        !total_provided.provided_amount_a.is_zero() && !total_provided.provided_amount_b.is_zero();
    let next_state = if both_provided && leftover_a.is_zero() && leftover_b.is_zero() {
        ContractState::Complete
    } else {
        ContractState::Provided
    };
    advance_state(deps.storage, &current_state, next_state.clone())?;

    Ok(Response::default()
        .add_attribute("method", "try_lp")
        .add_attribute("contract_state", next_state.as_str())
        .add_attribute("provided_amount_a", provided.provided_amount_a)
        .add_attribute("provided_amount_b", provided.provided_amount_b)
        .add_attribute("leftover_a", leftover_a)
        .add_attribute("leftover_b", leftover_b)
        .add_submessages(submsgs))
}

/// amounts to provide double sided so that the existing pool ratio is kept.
/// the maximum possible liquidity is provided using all of one of the
/// assets and as much of the other one as the ratio requires.
fn get_double_side_amounts(
    (balance_a, balance_b): (Uint128, Uint128),
    (pool_token_a_bal, pool_token_b_bal): (Uint128, Uint128),
) -> Result<(Uint128, Uint128), ContractError> {
    // required token a amount to enter into the position using all available b tokens
    let required_token_a_amount =
        balance_b.checked_multiply_ratio(pool_token_a_bal, pool_token_b_bal)?;

    if balance_a >= required_token_a_amount {
        Ok((required_token_a_amount, balance_b))
    } else {
        // token a is insufficient to use all of b, so we provide all of a
        // and as many b tokens as the existing ratio requires
        let required_token_b_amount =
            balance_a.checked_multiply_ratio(pool_token_b_bal, pool_token_a_bal)?;
        Ok((balance_a, required_token_b_amount))
    }
}

/// builds the `ProvideLiquidity` submessage. pool shares are minted
/// directly to the holder.
fn provide_liquidity_submsg(
    storage: &mut dyn Storage,
    lp_config: &LpConfig,
    (amount_a, amount_b): (Uint128, Uint128),
    reply_id: u64,
) -> Result<SubMsg, ContractError> {
    let holder = HOLDER_ADDRESS.load(storage)?;

    let funds: Vec<Coin> = [
        (&lp_config.asset_data.asset_a_denom, amount_a),
        (&lp_config.asset_data.asset_b_denom, amount_b),
    ]
    .into_iter()
    .filter(|(_, amount)| !amount.is_zero())
    .map(|(denom, amount)| Coin {
        denom: denom.to_string(),
        amount,
    })
    .collect();

    let provide_liquidity_msg = ProvideLiquidity {
        assets: lp_config.asset_data.to_asset_vec(amount_a, amount_b),
        slippage_tolerance: lp_config.slippage_tolerance,
        auto_stake: Some(false),
        receiver: Some(holder.to_string()),
    };

    PROVIDED_LIQUIDITY_INFO.update(storage, |mut info| -> StdResult<_> {
        info.provided_amount_a = info.provided_amount_a.checked_add(amount_a)?;
        info.provided_amount_b = info.provided_amount_b.checked_add(amount_b)?;
        Ok(info)
    })?;

    Ok(SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: lp_config.pool_address.to_string(),
            msg: to_json_binary(&provide_liquidity_msg)?,
            funds,
        }),
        reply_id,
    ))
}

/// filters out irrelevant balances and returns a and b token amounts
fn get_pool_asset_amounts(
    assets: Vec<Asset>,
    a_denom: &str,
    b_denom: &str,
) -> Result<(Uint128, Uint128), ContractError> {
    let (mut a_bal, mut b_bal) = (Uint128::zero(), Uint128::zero());

    for asset in assets {
        let coin = asset.to_coin()?;
        if coin.denom == b_denom {
            b_bal = coin.amount;
        } else if coin.denom == a_denom {
            a_bal = coin.amount;
        }
    }

    ensure!(
        !a_bal.is_zero() && !b_bal.is_zero(),
        ContractError::IncompletePoolAssets {}
    );

    Ok((a_bal, b_bal))
}

/// the holder collects whatever never made it into the pool
fn try_withdraw(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let holder_addr = HOLDER_ADDRESS.load(deps.storage)?;
    ensure!(info.sender == holder_addr, ContractError::NotHolder {});

    let lp_config = LP_CONFIG.load(deps.storage)?;
    let ledger = BankLedger::new(deps.querier);
    let leftovers =
        ledger.non_zero_balances(env.contract.address.as_str(), &lp_config.asset_data.denoms())?;

    // nothing can be provided anymore once the holder is unwinding
    let current_state = CONTRACT_STATE.load(deps.storage)?;
    if !current_state.is_terminal() {
        advance_state(deps.storage, &current_state, ContractState::Complete)?;
    }

    if leftovers.is_empty() {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_withdraw", "nothing_to_withdraw")));
    }

    Ok(Response::default()
        .add_attribute("method", "try_withdraw")
        .add_attribute("contract_state", ContractState::Complete.as_str())
        .add_message(ledger.transfer(
            env.contract.address.as_str(),
            holder_addr.as_str(),
            leftovers,
        )?))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?),
        QueryMsg::ContractState {} => to_json_binary(&CONTRACT_STATE.load(deps.storage)?),
        QueryMsg::HolderAddress {} => to_json_binary(&HOLDER_ADDRESS.load(deps.storage)?),
        QueryMsg::LpConfig {} => to_json_binary(&LP_CONFIG.load(deps.storage)?),
        // the deposit address for LP module is the contract itself
        QueryMsg::DepositAddress {} => to_json_binary(&Some(env.contract.address.to_string())),
        QueryMsg::ProvidedLiquidityInfo {} => {
            to_json_binary(&PROVIDED_LIQUIDITY_INFO.load(deps.storage)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            holder_address,
            lp_config,
        } => {
            let mut response = Response::default().add_attribute("method", "update_config");

            if let Some(clock_addr) = clock_addr {
                CLOCK_ADDRESS.save(deps.storage, &deps.api.addr_validate(&clock_addr)?)?;
                response = response.add_attribute("clock_addr", clock_addr);
            }

            if let Some(holder_address) = holder_address {
                HOLDER_ADDRESS.save(deps.storage, &deps.api.addr_validate(&holder_address)?)?;
                response = response.add_attribute("holder_address", holder_address);
            }

            if let Some(config) = lp_config {
                // validate the address before storing it
                deps.api.addr_validate(config.pool_address.as_str())?;
                LP_CONFIG.save(deps.storage, &config)?;
                response = response.add_attributes(config.to_response_attributes());
            }

            Ok(response)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let method = match msg.id {
        DOUBLE_SIDED_REPLY_ID => "handle_double_sided_reply_id",
        SINGLE_SIDED_REPLY_ID => "handle_single_sided_reply_id",
        id => {
            return Err(ContractError::Std(StdError::generic_err(format!(
                "unsupported reply id: {id}"
            ))))
        }
    };

    match parse_reply_execute_data(msg) {
        Ok(response) => Ok(Response::default()
            .add_attribute("method", method)
            .add_attribute(
                "response",
                match response.data {
                    Some(val) => val.to_base64(),
                    None => "none".to_string(),
                },
            )),
        Err(err) => Ok(Response::default()
            .add_attribute("method", method)
            .add_attribute("error", err.to_string())),
    }
}
