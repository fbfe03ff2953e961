#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, Storage, Uint128,
};
use cosmos_sdk_proto::cosmos::bank::v1beta1::{Input, MsgMultiSend, Output};
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
    neutron::{get_proto_coin, query_deposit_address, to_proto_msg_multi_send, RemoteChainInfo},
    split::SplitConfig,
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
    msg::{ContractState, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SplitterObservation},
    state::{
        BALANCE_QUERY_ID, CLOCK_ADDRESS, CONTRACT_STATE, ICA_REGISTRATION_FEE, ICA_REQUESTED_AT,
        ICA_TX_STATUS, REMOTE_CHAIN_INFO, SPLIT_CONFIG,
    },
};

const CONTRACT_NAME: &str = "crates.io:covenant-remote-chain-splitter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const INTERCHAIN_ACCOUNT_ID: &str = "rc-ica";

type QueryDeps<'a> = Deps<'a, NeutronQuery>;
type ExecuteDeps<'a> = DepsMut<'a, NeutronQuery>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: ExecuteDeps,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> NeutronResult<Response<NeutronMsg>> {
    deps.api.debug("WASMDEBUG: remote chain splitter instantiate");
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let clock_addr = deps.api.addr_validate(&msg.clock_address)?;

    msg.split.validate_shares()?;
    for receiver in msg.split.receivers.keys() {
        deps.api
            .addr_validate(receiver)
            .map_err(|_| ContractError::InvalidSplitReceiver {})?;
    }

    let remote_chain_info = RemoteChainInfo {
        connection_id: msg.remote_chain_connection_id,
        channel_id: msg.remote_chain_channel_id,
        denom: msg.denom,
        ibc_transfer_timeout: msg.ibc_transfer_timeout,
        ica_timeout: msg.ica_timeout,
        ibc_fee: msg.ibc_fee.to_ibc_fee(),
    };
    remote_chain_info.validate()?;

    if msg.ica_registration_fee.is_empty() {
        return Err(ContractError::MissingRegistrationFee {}.into());
    }

    CLOCK_ADDRESS.save(deps.storage, &clock_addr)?;
    REMOTE_CHAIN_INFO.save(deps.storage, &remote_chain_info)?;
    SPLIT_CONFIG.save(deps.storage, &msg.split)?;
    ICA_REGISTRATION_FEE.save(deps.storage, &msg.ica_registration_fee)?;
    ICA_TX_STATUS.save(deps.storage, &IcaTxStatus::default())?;
    CONTRACT_STATE.save(deps.storage, &ContractState::Instantiated)?;

    Ok(Response::default()
        .add_attribute("method", "remote_chain_splitter_instantiate")
        .add_attribute("clock_address", clock_addr)
        .add_attribute("contract_state", ContractState::Instantiated.as_str())
        .add_attributes(vec![msg.split.get_response_attribute(remote_chain_info.denom.to_string())])
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
    }
}

fn try_tick(deps: ExecuteDeps, env: Env, info: MessageInfo) -> NeutronResult<Response<NeutronMsg>> {
    verify_clock(&info.sender, &CLOCK_ADDRESS.load(deps.storage)?)
        .map_err(ContractError::from)?;

    let current_state = CONTRACT_STATE.load(deps.storage)?;
    let remote_chain_info = REMOTE_CHAIN_INFO.load(deps.storage)?;
    let split = SPLIT_CONFIG.load(deps.storage)?;
    let observation = observe(deps.as_ref(), &env, &remote_chain_info, &split)?;

    let Some(ica_address) = observation.ica_address.clone() else {
        return try_register_ica(deps, env, remote_chain_info);
    };

    if !current_state.precondition(&observation) {
        let reason = match observation.ica_balance {
            None if current_state != ContractState::Instantiated => "awaiting_balance_reading",
            _ => "awaiting_funds_or_receivers",
        };
        return Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", reason))
            .add_attribute("contract_state", current_state.as_str()));
    }

    let has_funds = observation.has_funds();
    match (&current_state, observation.receiver_deposit_addresses) {
        (ContractState::Instantiated, _) => {
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
        (ContractState::Forwarding, _) if !has_funds => {
            advance_state(deps.storage, &current_state, ContractState::Complete)?;
            Ok(Response::default()
                .add_attribute("method", "try_tick")
                .add_attribute("contract_state", ContractState::Complete.as_str()))
        }
        (_, Some(receivers)) => try_split_funds(
            deps,
            current_state,
            remote_chain_info,
            split,
            ica_address,
            observation.ica_balance.unwrap_or_default(),
            receivers,
        ),
        _ => Ok(Response::default()
            .add_attributes(noop_attributes("try_tick", "awaiting_receivers"))),
    }
}

fn observe(
    deps: QueryDeps,
    env: &Env,
    remote_chain_info: &RemoteChainInfo,
    split: &SplitConfig,
) -> StdResult<SplitterObservation> {
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

    // receivers are all ready or we treat none of them as ready
    let mut receiver_deposit_addresses = Some(Vec::with_capacity(split.receivers.len()));
    for receiver in split.receivers.keys() {
        match query_deposit_address(deps.querier, receiver)? {
            Some(addr) => {
                if let Some(addresses) = receiver_deposit_addresses.as_mut() {
                    addresses.push(addr);
                }
            }
            None => {
                receiver_deposit_addresses = None;
                break;
            }
        }
    }

    Ok(SplitterObservation {
        ica_address,
        ica_balance,
        receiver_deposit_addresses,
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

/// Splits the observed ICA balance across the receivers in a single
/// multi-send executed by the ICA on the remote chain.
fn try_split_funds(
    deps: ExecuteDeps,
    current_state: ContractState,
    remote_chain_info: RemoteChainInfo,
    split: SplitConfig,
    ica_address: String,
    amount: Uint128,
    receiver_deposit_addresses: Vec<String>,
) -> NeutronResult<Response<NeutronMsg>> {
    // stored shares are checked again before any funds move
    split.validate_shares()?;
    let entitlements = split.split_amount(amount)?;

    let outputs: Vec<Output> = entitlements
        .iter()
        .zip(receiver_deposit_addresses)
        .filter(|((_, entitlement), _)| !entitlement.is_zero())
        .map(|((_, entitlement), address)| Output {
            address,
            coins: vec![get_proto_coin(remote_chain_info.denom.to_string(), *entitlement)],
        })
        .collect();

    let multi_send_msg = MsgMultiSend {
        inputs: vec![Input {
            address: ica_address,
            coins: vec![get_proto_coin(remote_chain_info.denom.to_string(), amount)],
        }],
        outputs,
    };

    let submit_msg = NeutronMsg::submit_tx(
        remote_chain_info.connection_id,
        INTERCHAIN_ACCOUNT_ID.to_string(),
        vec![to_proto_msg_multi_send(multi_send_msg)?],
        "".to_string(),
        remote_chain_info.ica_timeout.u64(),
        remote_chain_info.ibc_fee,
    );

    // late arrivals split after completion keep the stage complete
    let next_state = if current_state.is_terminal() {
        current_state.clone()
    } else {
        ContractState::Forwarding
    };
    advance_state(deps.storage, &current_state, next_state.clone())?;
    let tx_status = ICA_TX_STATUS.load(deps.storage)?;
    ICA_TX_STATUS.save(deps.storage, &tx_status.submitted())?;

    let split_attributes = entitlements
        .iter()
        .map(|(receiver, amount)| format!("{receiver}:{amount}"))
        .collect::<Vec<String>>()
        .join(",");

    Ok(Response::default()
        .add_attribute("method", "try_split_funds")
        .add_attribute("contract_state", next_state.as_str())
        .add_attribute("amount", amount)
        .add_attribute("splits", split_attributes)
        .add_message(submit_msg))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: QueryDeps, env: Env, msg: QueryMsg) -> NeutronResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => Ok(to_json_binary(&CLOCK_ADDRESS.load(deps.storage)?)?),
        QueryMsg::RemoteChainInfo {} => {
            Ok(to_json_binary(&REMOTE_CHAIN_INFO.load(deps.storage)?)?)
        }
        QueryMsg::ContractState {} => Ok(to_json_binary(&CONTRACT_STATE.load(deps.storage)?)?),
        QueryMsg::SplitConfig {} => Ok(to_json_binary(&SPLIT_CONFIG.load(deps.storage)?)?),
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

struct SplitterIcaState;

impl IcaStateHelper for SplitterIcaState {
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
    handle_sudo(&SplitterIcaState, deps, env, msg)
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
            remote_chain_info,
            split,
        } => {
            let mut resp = Response::default().add_attribute("method", "update_config");

            if let Some(addr) = clock_addr {
                let clock_address = deps.api.addr_validate(&addr)?;
                CLOCK_ADDRESS.save(deps.storage, &clock_address)?;
                resp = resp.add_attribute("clock_addr", addr);
            }

            if let Some(rci) = remote_chain_info {
                rci.validate()?;
                REMOTE_CHAIN_INFO.save(deps.storage, &rci)?;
                resp = resp.add_attributes(rci.get_response_attributes());
            }

            if let Some(split) = split {
                split.validate_shares()?;
                let denom = REMOTE_CHAIN_INFO.load(deps.storage)?.denom;
                resp = resp.add_attributes(vec![split.get_response_attribute(denom)]);
                SPLIT_CONFIG.save(deps.storage, &split)?;
            }

            Ok(resp)
        }
    }
}
