#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, Storage, Uint128,
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
    msg::{ContractState, ExecuteMsg, ForwarderObservation, InstantiateMsg, MigrateMsg, QueryMsg},
    state::{
        BALANCE_QUERY_ID, CLOCK_ADDRESS, CONTRACT_STATE, ICA_REGISTRATION_FEE, ICA_REQUESTED_AT,
        ICA_TX_STATUS, NEXT_CONTRACT, REMOTE_CHAIN_INFO,
    },
};

const CONTRACT_NAME: &str = "crates.io:covenant-ibc-forwarder";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const INTERCHAIN_ACCOUNT_ID: &str = "ica";

type QueryDeps<'a> = Deps<'a, NeutronQuery>;
type ExecuteDeps<'a> = DepsMut<'a, NeutronQuery>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: ExecuteDeps,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    deps.api.debug("WASMDEBUG: ibc forwarder instantiate");
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let next_contract = deps.api.addr_validate(&msg.next_contract)?;
    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;

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
        .add_attribute("method", "ibc_forwarder_instantiate")
        .add_attribute("contract_state", ContractState::Instantiated.as_str())
        .add_attributes(msg.get_response_attributes()))
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
    }
}

/// attempts to advance the state machine. validates the caller to be the clock.
fn try_tick(deps: ExecuteDeps, env: Env, info: MessageInfo) -> NeutronResult<Response<NeutronMsg>> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)
        .map_err(ContractError::from)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env, &remote_chain_info)?;

    // no ICA to act through. either it was never confirmed or its channel
    // timed out and closed; in both cases a (re-)registration is due.
    let Some(ica_address) = observation.ica_address.clone() else {
        return try_register_ica(deps, env, remote_chain_info);
    };

    if !current_state.precondition(&observation) {
        let reason = match observation.ica_balance {
            None if current_state != ContractState::Instantiated => "awaiting_balance_reading",
            _ => "no_funds_to_forward",
        };
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", reason))
            .add_attribute("contract_state", current_state.as_str()));
    }

    match current_state {
        ContractState::Instantiated => {
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
        ContractState::Forwarding if !observation.has_funds() => {
            advance_state(deps.storage, &current_state, ContractState::Complete)?;
            Ok(Response::default()
                .add_attribute("method", "try_tick")
                .add_attribute("contract_state", ContractState::Complete.as_str()))
        }
        ContractState::IcaCreated | ContractState::Forwarding | ContractState::Complete => {
            try_forward_funds(
                deps,
                env,
                current_state,
                remote_chain_info,
                ica_address,
                observation.ica_balance.unwrap_or_default(),
            )
        }
    }
}

fn observe(
    deps: QueryDeps,
    env: &Env,
    remote_chain_info: &RemoteChainInfo,
) -> StdResult<ForwarderObservation> {
    let ica_address = query_ica_address(
        deps.querier,
        &env.contract.address,
        INTERCHAIN_ACCOUNT_ID,
        &remote_chain_info.connection_id,
    );

    let tx_status = ICA_TX_STATUS.load(deps.storage)?;
    let ica_balance = match (&ica_address, BALANCE_QUERY_ID.may_load(deps.storage)?) {
        (Some(_), Some(query_id)) => {
            query_remote_balance(deps, env.clone(), query_id, &remote_chain_info.denom)
                .filter(|reading| tx_status.accepts_reading(reading.local_height))
                .map(|reading| reading.amount)
        }
        _ => None,
    };

    Ok(ForwarderObservation {
        ica_address,
        ica_balance,
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

/// tries to register an ICA on the remote chain. a request that went
/// unanswered for too long is issued again.
fn try_register_ica(
    deps: ExecuteDeps,
    env: Env,
    remote_chain_info: RemoteChainInfo,
) -> NeutronResult<Response<NeutronMsg>> {
    let requested_at = ICA_REQUESTED_AT.may_load(deps.storage)?;
    if !registration_due(requested_at, env.block.height) {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_register_ica", "awaiting_ica_confirmation")));
    }

    let register_msg = register_ica_msg(
        &remote_chain_info.connection_id,
        INTERCHAIN_ACCOUNT_ID,
        ICA_REGISTRATION_FEE.load(deps.storage)?,
    );
    ICA_REQUESTED_AT.save(deps.storage, &env.block.height)?;

    Ok(Response::default()
        .add_attribute("method", "try_register_ica")
        .add_attribute("retry", requested_at.is_some().to_string())
        .add_message(register_msg))
}

/// Submits a transfer of the currently observed ICA balance to the next
/// stage. Amounts are always re-derived from the live balance, so a
/// retry after a failed or timed out transfer never double counts.
fn try_forward_funds(
    deps: ExecuteDeps,
    env: Env,
    current_state: ContractState,
    remote_chain_info: RemoteChainInfo,
    ica_address: String,
    amount: Uint128,
) -> NeutronResult<Response<NeutronMsg>> {
    let next_contract = NEXT_CONTRACT.load(deps.storage)?;

    let Some(deposit_address) = query_deposit_address(deps.querier, next_contract.as_str())?
    else {
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_forward_funds", "next_contract_not_ready")));
    };
    let memo = query_next_memo(deps.querier, next_contract.as_str())?;

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

    // a relayed refund keeps the stage complete
    let next_state = if current_state.is_terminal() {
        current_state.clone()
    } else {
        ContractState::Forwarding
    };
    advance_state(deps.storage, &current_state, next_state.clone())?;
    let tx_status = ICA_TX_STATUS.load(deps.storage)?;
    ICA_TX_STATUS.save(deps.storage, &tx_status.submitted())?;

    Ok(Response::default()
        .add_attribute("method", "try_forward_funds")
        .add_attribute("contract_state", next_state.as_str())
        .add_attribute("amount", amount)
        .add_attribute("receiver", deposit_address)
        .add_message(submit_msg))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: QueryDeps, env: Env, msg: QueryMsg) -> NeutronResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => Ok(to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?)?),
        QueryMsg::NextContract {} => Ok(to_json_binary(&NEXT_CONTRACT.load(deps.storage)?)?),
        QueryMsg::RemoteChainInfo {} => {
            Ok(to_json_binary(&REMOTE_CHAIN_INFO.load(deps.storage)?)?)
        }
        QueryMsg::ContractState {} => Ok(to_json_binary(&CONTRACT_STATE.load(deps.storage)?)?),
        // funds are expected in the ICA on the remote chain. until it is
        // confirmed this returns `None` and upstream waits.
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
    }
}

struct ForwarderIcaState;

impl IcaStateHelper for ForwarderIcaState {
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
    handle_sudo(&ForwarderIcaState, deps, env, msg)
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
                let clock_address = deps.api.addr_validate(&addr)?;
                CLOCK_ADDRESS.save(deps.storage, &clock_address)?;
                resp = resp.add_attribute("clock_addr", addr);
            }

            if let Some(addr) = next_contract {
                let next_contract_addr = deps.api.addr_validate(&addr)?;
                NEXT_CONTRACT.save(deps.storage, &next_contract_addr)?;
                resp = resp.add_attribute("next_contract", addr);
            }

            if let Some(rci) = *remote_chain_info {
                rci.validate()?;
                REMOTE_CHAIN_INFO.save(deps.storage, &rci)?;
                resp = resp.add_attributes(rci.get_response_attributes());
            }

            Ok(resp)
        }
    }
}
