#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, Storage,
};
use covenant_utils::{
    clock::verify_clock,
    ica::{
        handle_sudo, query_ica_address, register_ica_msg, registration_due, IcaStateHelper,
        IcaTxStatus,
    },
    icq::{
        query_remote_balance, register_balance_query_msg, registered_query_id,
        BALANCE_QUERY_REPLY_ID,
    },
    neutron::{
        get_proto_coin, query_deposit_address, query_next_memo, to_proto_msg_transfer,
        MsgTransfer, RemoteChainInfo,
    },
    state_machine::{noop_attributes, StateMachine},
};
use cw2::set_contract_version;
use neutron_sdk::{
    bindings::{msg::NeutronMsg, query::NeutronQuery},
    sudo::msg::SudoMsg,
    NeutronResult,
};

use crate::{
    error::ContractError,
    helpers::Autopilot,
    msg::{ContractState, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, StakerObservation},
    state::{
        BALANCE_QUERY_ID, CLOCK_ADDRESS, CONTRACT_STATE, ICA_REGISTRATION_FEE, ICA_REQUESTED_AT,
        ICA_TX_STATUS, NEXT_CONTRACT, REMOTE_CHAIN_INFO,
    },
};

const INTERCHAIN_ACCOUNT_ID: &str = "stride-ica";

const CONTRACT_NAME: &str = "crates.io:covenant-stride-liquid-staker";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

type QueryDeps<'a> = Deps<'a, NeutronQuery>;
type ExecuteDeps<'a> = DepsMut<'a, NeutronQuery>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: ExecuteDeps,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // validate the addresses
    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;
    let next_contract = deps.api.addr_validate(&msg.next_contract)?;

    let remote_chain_info = msg.to_remote_chain_info();
    remote_chain_info.validate()?;

    if msg.ica_registration_fee.is_empty() {
        return Err(ContractError::MissingRegistrationFee {}.into());
    }

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    NEXT_CONTRACT.save(deps.storage, &next_contract)?;
    REMOTE_CHAIN_INFO.save(deps.storage, &remote_chain_info)?;
    ICA_REGISTRATION_FEE.save(deps.storage, &msg.ica_registration_fee)?;
    ICA_TX_STATUS.save(deps.storage, &IcaTxStatus::default())?;
    CONTRACT_STATE.save(deps.storage, &ContractState::Instantiated)?;

    Ok(Response::default()
        .add_attribute("method", "ls_instantiate")
        .add_attribute("clock_address", clock_addr)
        .add_attribute("next_contract", next_contract)
        .add_attributes(remote_chain_info.get_response_attributes()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: ExecuteDeps,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    match msg {
        ExecuteMsg::Tick {} => try_tick(deps, env, info),
        ExecuteMsg::Transfer {} => try_execute_transfer(deps, env),
    }
}

/// attempts to advance the state machine. performs `info.sender` validation
fn try_tick(deps: ExecuteDeps, env: Env, info: MessageInfo) -> NeutronResult<Response<NeutronMsg>> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)
        .map_err(ContractError::from)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env, &remote_chain_info)?;

    // the ica is needed for as long as vouchers may arrive, so it is
    // re-registered after a channel timeout even once complete
    let Some(ica_address) = observation.ica_address.clone() else {
        return try_register_stride_ica(deps, env, remote_chain_info);
    };

    match current_state {
        ContractState::Instantiated if current_state.precondition(&observation) => {
            advance_state(deps.storage, &current_state, ContractState::IcaCreated)?;
            let query_msg = register_balance_query_msg(
                &remote_chain_info.connection_id,
                &ica_address,
                &remote_chain_info.denom,
            )?;
            Ok(Response::default()
                .add_attribute("method", "try_tick")
                .add_attribute("contract_state", ContractState::IcaCreated.as_str())
                .add_attribute("ica_address", ica_address)
                .add_submessage(query_msg))
        }
        // transfers are permissionless, the tick has nothing else to do
        _ => Ok(Response::default()
            .add_attribute("method", "try_tick")
            .add_attribute("contract_state", current_state.as_str())),
    }
}

fn observe(
    deps: QueryDeps,
    env: &Env,
    remote_chain_info: &RemoteChainInfo,
) -> StdResult<StakerObservation> {
    let ica_address = query_ica_address(
        deps.querier,
        &env.contract.address,
        INTERCHAIN_ACCOUNT_ID,
        &remote_chain_info.connection_id,
    );

    let tx_status = ICA_TX_STATUS.load(deps.storage)?;
    let ls_balance = match (&ica_address, BALANCE_QUERY_ID.may_load(deps.storage)?) {
        (Some(_), Some(query_id)) => {
            query_remote_balance(deps, env.clone(), query_id, &remote_chain_info.denom)
                .filter(|reading| tx_status.accepts_reading(reading.local_height))
                .map(|reading| reading.amount)
        }
        _ => None,
    };

    Ok(StakerObservation {
        ica_address,
        ls_balance,
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

/// registers an interchain account on stride with port_id associated with `INTERCHAIN_ACCOUNT_ID`
fn try_register_stride_ica(
    deps: ExecuteDeps,
    env: Env,
    remote_chain_info: RemoteChainInfo,
) -> NeutronResult<Response<NeutronMsg>> {
    let requested_at = ICA_REQUESTED_AT.may_load(deps.storage)?;
    if !registration_due(requested_at, env.block.height) {
        return Ok(Response::default().add_attributes(noop_attributes(
            "try_register_stride_ica",
            "awaiting_ica_confirmation",
        )));
    }

    let register_msg = register_ica_msg(
        &remote_chain_info.connection_id,
        INTERCHAIN_ACCOUNT_ID,
        ICA_REGISTRATION_FEE.load(deps.storage)?,
    );
    ICA_REQUESTED_AT.save(deps.storage, &env.block.height)?;

    Ok(Response::default()
        .add_attribute("method", "try_register_stride_ica")
        .add_attribute("retry", requested_at.is_some().to_string())
        .add_message(register_msg))
}

/// this is a permisionless transfer method. once liquid staked funds are in the
/// ICA, anyone can call this method to move whatever `ls_denom` balance is
/// currently observed there to the next contract.
fn try_execute_transfer(deps: ExecuteDeps, env: Env) -> NeutronResult<Response<NeutronMsg>> {
    let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env, &remote_chain_info)?;

    let Some(ica_address) = observation.ica_address else {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_execute_transfer", "ica_not_created")));
    };
    let amount = match observation.ls_balance {
        None => {
            return Ok(Response::default().add_attributes(noop_attributes(
                "try_execute_transfer",
                "awaiting_balance_reading",
            )))
        }
        Some(amount) if amount.is_zero() => {
            return Ok(Response::default()
                .add_attributes(noop_attributes("try_execute_transfer", "no_funds_to_transfer")))
        }
        Some(amount) => amount,
    };

    // first we verify whether the next contract is ready for receiving the funds
    let next_contract = NEXT_CONTRACT.load(deps.storage)?;
    let Some(deposit_address) = query_deposit_address(deps.querier, next_contract.as_str())?
    else {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_execute_transfer", "next_contract_not_ready")));
    };
    let memo = query_next_memo(deps.querier, next_contract.as_str())?;

    // inner MsgTransfer that will be sent from stride to neutron.
    // its delivery depends on the ica packet wrapping it.
    let transfer_msg = MsgTransfer {
        source_port: "transfer".to_string(),
        source_channel: remote_chain_info.channel_id.to_string(),
        token: Some(get_proto_coin(remote_chain_info.denom.to_string(), amount)),
        sender: ica_address,
        receiver: deposit_address.to_string(),
        timeout_height: None,
        timeout_timestamp: remote_chain_info.transfer_timeout_nanos(env.block.time),
        memo,
    };

    let submit_msg = NeutronMsg::submit_tx(
        remote_chain_info.connection_id.to_string(),
        INTERCHAIN_ACCOUNT_ID.to_string(),
        vec![to_proto_msg_transfer(transfer_msg)?],
        "".to_string(),
        remote_chain_info.ica_timeout.u64(),
        remote_chain_info.ibc_fee,
    );

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    if !current_state.is_terminal() {
        advance_state(deps.storage, &current_state, ContractState::Complete)?;
    }
    let tx_status = ICA_TX_STATUS.load(deps.storage)?;
    ICA_TX_STATUS.save(deps.storage, &tx_status.submitted())?;

    Ok(Response::default()
        .add_attribute("method", "try_execute_transfer")
        .add_attribute("contract_state", ContractState::Complete.as_str())
        .add_attribute("amount", amount)
        .add_attribute("receiver", deposit_address)
        .add_message(submit_msg))
}

fn query_autopilot_memo(deps: QueryDeps, env: &Env) -> StdResult<Option<String>> {
    let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
    match query_ica_address(
        deps.querier,
        &env.contract.address,
        INTERCHAIN_ACCOUNT_ID,
        &remote_chain_info.connection_id,
    ) {
        Some(ica) => Ok(Some(Autopilot::liquid_stake(&ica).to_memo()?)),
        None => Ok(None),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: QueryDeps, env: Env, msg: QueryMsg) -> NeutronResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => Ok(to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?)?),
        QueryMsg::NextContract {} => Ok(to_json_binary(&NEXT_CONTRACT.load(deps.storage)?)?),
        QueryMsg::ContractState {} => Ok(to_json_binary(&CONTRACT_STATE.load(deps.storage)?)?),
        QueryMsg::RemoteChainInfo {} => {
            Ok(to_json_binary(&REMOTE_CHAIN_INFO.load(deps.storage)?)?)
        }
        // upstream sends to the ica directly, the memo makes stride
        // liquid stake the funds on arrival
        QueryMsg::DepositAddress {} | QueryMsg::IcaAddress {} => {
            let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
            let ica = query_ica_address(
                deps.querier,
                &env.contract.address,
                INTERCHAIN_ACCOUNT_ID,
                &remote_chain_info.connection_id,
            );
            Ok(to_json_binary(&ica)?)
        }
        QueryMsg::NextMemo {} => match query_autopilot_memo(deps, &env)? {
            Some(memo) => Ok(to_json_binary(&memo)?),
            None => Err(StdError::not_found("stride ica").into()),
        },
    }
}

struct LiquidStakerIcaState;

impl IcaStateHelper for LiquidStakerIcaState {
    fn clear_registration(&self, storage: &mut dyn Storage) -> StdResult<()> {
        ICA_REQUESTED_AT.remove(storage);
        Ok(())
    }

    fn settle_tx(&self, storage: &mut dyn Storage, height: u64) -> StdResult<()> {
        ICA_TX_STATUS.save(storage, &IcaTxStatus::settled(height))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: ExecuteDeps, env: Env, msg: SudoMsg) -> StdResult<Response<NeutronMsg>> {
    handle_sudo(&LiquidStakerIcaState, deps, env, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: ExecuteDeps, _env: Env, msg: Reply) -> StdResult<Response<NeutronMsg>> {
    match msg.id {
        BALANCE_QUERY_REPLY_ID => {
            let query_id = registered_query_id(msg)?;
            BALANCE_QUERY_ID.save(deps.storage, &query_id)?;
            Ok(Response::default()
                .add_attribute("method", "reply_balance_query")
                .add_attribute("query_id", query_id.to_string()))
        }
        id => Err(StdError::generic_err(format!("unexpected reply id: {id}"))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: ExecuteDeps, _env: Env, msg: MigrateMsg) -> StdResult<Response<NeutronMsg>> {
    match msg {
        MigrateMsg::UpdateConfig {
            clock_addr,
            next_contract,
            remote_chain_info,
        } => {
            let mut resp = Response::default().add_attribute("method", "update_config");

            if let Some(addr) = clock_addr {
                let addr = deps.api.addr_validate(&addr)?;
                CLOCK_ADDRESS.save(deps.storage, &addr)?;
                resp = resp.add_attribute("clock_addr", addr.to_string());
            }

            if let Some(addr) = next_contract {
                let addr = deps.api.addr_validate(&addr)?;
                resp = resp.add_attribute("next_contract", addr.to_string());
                NEXT_CONTRACT.save(deps.storage, &addr)?;
            }

            if let Some(rci) = remote_chain_info {
                rci.validate()?;
                REMOTE_CHAIN_INFO.save(deps.storage, &rci)?;
                resp = resp.add_attributes(rci.get_response_attributes());
            }

            Ok(resp)
        }
    }
}
