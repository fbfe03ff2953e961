use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Addr, Binary, Coin, DepsMut, Env, QuerierWrapper, Response, StdError, StdResult, Storage,
};
use neutron_sdk::{
    bindings::{
        msg::NeutronMsg,
        query::{NeutronQuery, QueryInterchainAccountAddressResponse},
    },
    sudo::msg::{RequestPacket, SudoMsg},
};

type ExecuteDeps<'a> = DepsMut<'a, NeutronQuery>;

#[cw_serde]
pub struct OpenAckVersion {
    pub version: String,
    pub controller_connection_id: String,
    pub host_connection_id: String,
    pub address: String,
    pub encoding: String,
    pub tx_type: String,
}

/// Blocks after which an unanswered ICA registration is issued again
pub const ICA_REGISTRATION_RETRY_BLOCKS: u64 = 50;

/// Whether a registration should go out, given the height at which the
/// previous one was requested.
pub fn registration_due(requested_at: Option<u64>, height: u64) -> bool {
    match requested_at {
        None => true,
        Some(requested) => height >= requested.saturating_add(ICA_REGISTRATION_RETRY_BLOCKS),
    }
}

/// Outcome of the last tx the stage submitted through its ICA. Remote
/// balance readings submitted before that tx settled are stale.
#[cw_serde]
#[derive(Default)]
pub struct IcaTxStatus {
    pub in_flight: bool,
    /// neutron height of the last ack, error or timeout
    pub settled_at: u64,
}

impl IcaTxStatus {
    pub fn submitted(&self) -> Self {
        Self {
            in_flight: true,
            settled_at: self.settled_at,
        }
    }

    pub fn settled(height: u64) -> Self {
        Self {
            in_flight: false,
            settled_at: height,
        }
    }

    pub fn accepts_reading(&self, reading_height: u64) -> bool {
        !self.in_flight && reading_height > self.settled_at
    }
}

/// Storage hooks the shared sudo handlers need from an ICA-owning stage.
pub trait IcaStateHelper {
    /// Marks the pending registration as gone so the next tick registers
    /// again. Must never move the stage's progress state backwards.
    fn clear_registration(&self, storage: &mut dyn Storage) -> StdResult<()>;

    /// Records that the last submitted tx got its ack, error or timeout
    fn settle_tx(&self, storage: &mut dyn Storage, height: u64) -> StdResult<()>;
}

/// Polls the interchain txs module for the account registered by `owner`.
/// The ICA is considered absent until the remote chain confirmed it, so
/// both a failed query and an empty address read as `None`.
pub fn query_ica_address(
    querier: QuerierWrapper<NeutronQuery>,
    owner: &Addr,
    interchain_account_id: &str,
    connection_id: &str,
) -> Option<String> {
    let query = NeutronQuery::InterchainAccountAddress {
        owner_address: owner.to_string(),
        interchain_account_id: interchain_account_id.to_string(),
        connection_id: connection_id.to_string(),
    };

    match querier.query::<QueryInterchainAccountAddressResponse>(&query.into()) {
        Ok(resp) if !resp.interchain_account_address.is_empty() => {
            Some(resp.interchain_account_address)
        }
        _ => None,
    }
}

pub fn register_ica_msg(
    connection_id: &str,
    interchain_account_id: &str,
    registration_fee: Vec<Coin>,
) -> NeutronMsg {
    NeutronMsg::register_interchain_account(
        connection_id.to_string(),
        interchain_account_id.to_string(),
        Some(registration_fee),
    )
}

/// Routes the sudo callbacks of an ICA-owning stage. Callbacks only settle
/// the pending tx and reset the registration; progress is always re-derived
/// by polling.
pub fn handle_sudo<H: IcaStateHelper>(
    state_helper: &H,
    deps: ExecuteDeps,
    env: Env,
    msg: SudoMsg,
) -> StdResult<Response<NeutronMsg>> {
    match msg {
        SudoMsg::Response { request, data } => {
            state_helper.settle_tx(deps.storage, env.block.height)?;
            sudo_response(deps, request, data)
        }
        SudoMsg::Error { request, details } => {
            state_helper.settle_tx(deps.storage, env.block.height)?;
            sudo_error(deps, request, details)
        }
        SudoMsg::Timeout { request } => {
            state_helper.settle_tx(deps.storage, env.block.height)?;
            sudo_timeout(state_helper, deps, request)
        }
        SudoMsg::OpenAck {
            port_id,
            counterparty_version,
            ..
        } => sudo_open_ack(deps, port_id, counterparty_version),
        _ => Ok(Response::default()),
    }
}

/// ICA channels are ordered, a timeout closes the channel. The account is
/// re-registered on a later tick.
pub fn sudo_timeout<H: IcaStateHelper>(
    state_helper: &H,
    deps: ExecuteDeps,
    request: RequestPacket,
) -> StdResult<Response<NeutronMsg>> {
    deps.api
        .debug(format!("WASMDEBUG: sudo timeout request: {request:?}").as_str());

    state_helper.clear_registration(deps.storage)?;

    Ok(Response::default()
        .add_attribute("method", "sudo_timeout")
        .add_attribute("sequence", request.sequence.unwrap_or_default().to_string()))
}

/// if request sequence or source channel are missing, this errors and
/// the channel gets closed.
pub fn sudo_response(
    deps: ExecuteDeps,
    request: RequestPacket,
    data: Binary,
) -> StdResult<Response<NeutronMsg>> {
    deps.api
        .debug(format!("WASMDEBUG: sudo_response: sudo received: {request:?} {data:?}").as_str());

    let sequence = request
        .sequence
        .ok_or_else(|| StdError::generic_err("sequence not found"))?;

    request
        .source_channel
        .ok_or_else(|| StdError::generic_err("channel_id not found"))?;

    Ok(Response::default()
        .add_attribute("method", "sudo_response")
        .add_attribute("sequence", sequence.to_string()))
}

pub fn sudo_error(
    deps: ExecuteDeps,
    request: RequestPacket,
    details: String,
) -> StdResult<Response<NeutronMsg>> {
    deps.api
        .debug(format!("WASMDEBUG: sudo error: {details}").as_str());
    deps.api
        .debug(format!("WASMDEBUG: request packet: {request:?}").as_str());

    let sequence = request
        .sequence
        .ok_or_else(|| StdError::generic_err("sequence not found"))?;

    request
        .source_channel
        .ok_or_else(|| StdError::generic_err("channel_id not found"))?;

    Ok(Response::default()
        .add_attribute("method", "sudo_error")
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("details", details))
}

pub fn sudo_open_ack(
    deps: ExecuteDeps,
    port_id: String,
    counterparty_version: String,
) -> StdResult<Response<NeutronMsg>> {
    // The version variable contains a JSON value with multiple fields,
    // including the generated account address.
    let parsed_version: OpenAckVersion =
        serde_json_wasm::from_str(counterparty_version.as_str())
            .map_err(|_| StdError::generic_err("Can't parse counterparty_version"))?;

    deps.api.debug(
        format!(
            "WASMDEBUG: sudo_open_ack: {port_id} -> {}",
            parsed_version.address
        )
        .as_str(),
    );

    Ok(Response::default()
        .add_attribute("method", "sudo_open_ack")
        .add_attribute("port_id", port_id)
        .add_attribute("ica_address", parsed_version.address))
}
