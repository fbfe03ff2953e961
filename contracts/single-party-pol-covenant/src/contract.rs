use std::collections::{BTreeMap, BTreeSet};

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    WasmMsg,
};
use covenant_astroport_liquid_pooler::msg::AssetData;
use covenant_holder::msg::RefundConfig;
use covenant_utils::{
    instantiate2_helper::{get_instantiate2_salt_and_address, Instantiate2},
    neutron::query_deposit_address,
    split::SplitConfig,
    CovenantPartyConfig, ReceiverConfig,
};
use cw2::set_contract_version;

use crate::{
    error::ContractError,
    msg::{InstantiateMsg, MigrateMsg, QueryMsg},
    state::{
        CONTRACT_CODES, COVENANT_CLOCK_ADDR, HOLDER_ADDR, LIQUID_POOLER_ADDR, LIQUID_STAKER_ADDR,
        LP_FORWARDER_ADDR, LS_FORWARDER_ADDR, REMOTE_SPLITTER_ADDR, ROUTER_ADDR,
    },
};

const CONTRACT_NAME: &str = "crates.io:covenant-single-party-pol";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const CLOCK_SALT: &[u8] = b"clock";
pub(crate) const HOLDER_SALT: &[u8] = b"pol_holder";
pub(crate) const REMOTE_SPLITTER_SALT: &[u8] = b"remote_chain_splitter";
pub(crate) const LS_FORWARDER_SALT: &[u8] = b"ls_forwarder";
pub(crate) const LP_FORWARDER_SALT: &[u8] = b"lp_forwarder";
pub(crate) const LIQUID_POOLER_SALT: &[u8] = b"liquid_pooler";
pub(crate) const LIQUID_STAKER_SALT: &[u8] = b"liquid_staker";
pub(crate) const ROUTER_SALT: &[u8] = b"router";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    deps.api.debug("WASMDEBUG: single party covenant instantiate");

    let party = msg.covenant_party_config;
    let party_config = CovenantPartyConfig::Interchain(party.clone());
    party_config.validate(deps.api)?;
    if party.native_denom == msg.ls_info.ls_denom_on_neutron {
        return Err(ContractError::DenomCollision {});
    }
    msg.pool_price_config.to_range()?;

    let creator_address = deps.api.addr_canonicalize(env.contract.address.as_str())?;
    let codes = &msg.contract_codes;
    let clock_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        CLOCK_SALT,
        &creator_address,
        codes.clock_code,
    )?;
    let splitter_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        REMOTE_SPLITTER_SALT,
        &creator_address,
        codes.remote_chain_splitter_code,
    )?;
    let ls_forwarder_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        LS_FORWARDER_SALT,
        &creator_address,
        codes.ibc_forwarder_code,
    )?;
    let lp_forwarder_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        LP_FORWARDER_SALT,
        &creator_address,
        codes.ibc_forwarder_code,
    )?;
    let liquid_staker_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        LIQUID_STAKER_SALT,
        &creator_address,
        codes.liquid_staker_code,
    )?;
    let liquid_pooler_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        LIQUID_POOLER_SALT,
        &creator_address,
        codes.liquid_pooler_code,
    )?;
    let holder_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        HOLDER_SALT,
        &creator_address,
        codes.holder_code,
    )?;
    let router_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        ROUTER_SALT,
        &creator_address,
        codes.interchain_router_code,
    )?;

    let clock_address = clock_instantiate2_config.addr.to_string();
    let splitter_address = splitter_instantiate2_config.addr.to_string();
    let ls_forwarder_address = ls_forwarder_instantiate2_config.addr.to_string();
    let lp_forwarder_address = lp_forwarder_instantiate2_config.addr.to_string();
    let liquid_staker_address = liquid_staker_instantiate2_config.addr.to_string();
    let liquid_pooler_address = liquid_pooler_instantiate2_config.addr.to_string();
    let holder_address = holder_instantiate2_config.addr.to_string();
    let router_address = router_instantiate2_config.addr.to_string();
    let admin = env.contract.address.to_string();

    let split = SplitConfig {
        receivers: BTreeMap::from([
            (
                ls_forwarder_address.to_string(),
                msg.remote_chain_splitter_config.ls_share,
            ),
            (
                lp_forwarder_address.to_string(),
                msg.remote_chain_splitter_config.native_share,
            ),
        ]),
    };
    split.validate_shares()?;

    let splitter_instantiate2_msg = covenant_remote_chain_splitter::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        remote_chain_connection_id: party.party_chain_connection_id.to_string(),
        remote_chain_channel_id: party.party_to_host_chain_channel_id.to_string(),
        denom: party.remote_chain_denom.to_string(),
        split,
        ibc_fee: msg.preset_ibc_fee.clone(),
        ica_timeout: msg.timeouts.ica_timeout,
        ibc_transfer_timeout: msg.timeouts.ibc_transfer_timeout,
        ica_registration_fee: msg.ica_registration_fee.clone(),
    }
    .to_instantiate2_msg(
        &splitter_instantiate2_config,
        admin.to_string(),
        format!("{}_remote_chain_splitter", msg.label),
    )?;

    // the liquid staking side travels to the staker's ICA, the rest
    // goes straight to the liquid pooler
    let ls_forwarder_instantiate2_msg = covenant_ibc_forwarder::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        next_contract: liquid_staker_address.to_string(),
        remote_chain_connection_id: party.party_chain_connection_id.to_string(),
        remote_chain_channel_id: msg.ls_info.party_chain_to_ls_chain_channel_id.to_string(),
        denom: party.remote_chain_denom.to_string(),
        ibc_transfer_timeout: msg.timeouts.ibc_transfer_timeout,
        ica_timeout: msg.timeouts.ica_timeout,
        ibc_fee: msg.preset_ibc_fee.clone(),
        ica_registration_fee: msg.ica_registration_fee.clone(),
    }
    .to_instantiate2_msg(
        &ls_forwarder_instantiate2_config,
        admin.to_string(),
        format!("{}_ls_ibc_forwarder", msg.label),
    )?;

    let lp_forwarder_instantiate2_msg = covenant_ibc_forwarder::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        next_contract: liquid_pooler_address.to_string(),
        remote_chain_connection_id: party.party_chain_connection_id.to_string(),
        remote_chain_channel_id: party.party_to_host_chain_channel_id.to_string(),
        denom: party.remote_chain_denom.to_string(),
        ibc_transfer_timeout: msg.timeouts.ibc_transfer_timeout,
        ica_timeout: msg.timeouts.ica_timeout,
        ibc_fee: msg.preset_ibc_fee.clone(),
        ica_registration_fee: msg.ica_registration_fee.clone(),
    }
    .to_instantiate2_msg(
        &lp_forwarder_instantiate2_config,
        admin.to_string(),
        format!("{}_lp_ibc_forwarder", msg.label),
    )?;

    let liquid_staker_instantiate2_msg = covenant_stride_liquid_staker::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        stride_neutron_ibc_transfer_channel_id: msg
            .ls_info
            .ls_chain_to_neutron_channel_id
            .to_string(),
        neutron_stride_ibc_connection_id: msg.ls_info.ls_neutron_connection_id.to_string(),
        next_contract: liquid_pooler_address.to_string(),
        ls_denom: msg.ls_info.ls_denom.to_string(),
        ica_timeout: msg.timeouts.ica_timeout,
        ibc_transfer_timeout: msg.timeouts.ibc_transfer_timeout,
        ibc_fee: msg.preset_ibc_fee.clone(),
        ica_registration_fee: msg.ica_registration_fee.clone(),
    }
    .to_instantiate2_msg(
        &liquid_staker_instantiate2_config,
        admin.to_string(),
        format!("{}_stride_liquid_staker", msg.label),
    )?;

    let liquid_pooler_instantiate2_msg = msg
        .liquid_pooler_config
        .to_instantiate_msg(
            clock_address.to_string(),
            holder_address.to_string(),
            AssetData {
                asset_a_denom: party.native_denom.to_string(),
                asset_b_denom: msg.ls_info.ls_denom_on_neutron.to_string(),
            },
            msg.pool_price_config.clone(),
            msg.deposit_deadline,
        )
        .to_instantiate2_msg(
            &liquid_pooler_instantiate2_config,
            admin.to_string(),
            format!("{}_liquid_pooler", msg.label),
        )?;

    let holder_instantiate2_msg = covenant_holder::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        withdrawer: Some(party.addr.to_string()),
        pool_address: msg.liquid_pooler_config.pool_address.to_string(),
        liquid_pooler_address: liquid_pooler_address.to_string(),
        next_contract: router_address.to_string(),
        lockup_config: msg.lockup_config,
        denoms: vec![
            party.native_denom.to_string(),
            msg.ls_info.ls_denom_on_neutron.to_string(),
        ],
        // both denoms belong to the single party
        refund_config: Some(RefundConfig {
            deposit_deadline: msg.deposit_deadline,
            routers: BTreeMap::from([
                (party.native_denom.to_string(), router_address.to_string()),
                (
                    msg.ls_info.ls_denom_on_neutron.to_string(),
                    router_address.to_string(),
                ),
            ]),
        }),
        emergency_committee: msg.emergency_committee.clone(),
    }
    .to_instantiate2_msg(
        &holder_instantiate2_config,
        admin.to_string(),
        format!("{}_holder", msg.label),
    )?;

    let ReceiverConfig::Ibc(destination_config) = party_config.to_receiver_config() else {
        return Err(StdError::generic_err("interchain party must be paid out over ibc").into());
    };
    let router_instantiate2_msg = covenant_interchain_router::msg::InstantiateMsg {
        clock_address: clock_address.to_string(),
        destination_config,
        denoms: BTreeSet::from([
            party.native_denom.to_string(),
            msg.ls_info.ls_denom_on_neutron.to_string(),
        ]),
        ibc_fee: msg.preset_ibc_fee.clone(),
    }
    .to_instantiate2_msg(
        &router_instantiate2_config,
        admin.to_string(),
        format!("{}_interchain_router", msg.label),
    )?;

    // tick order follows the direction funds travel in
    let clock_queue = vec![
        splitter_address.to_string(),
        ls_forwarder_address.to_string(),
        lp_forwarder_address.to_string(),
        liquid_staker_address.to_string(),
        liquid_pooler_address.to_string(),
        holder_address.to_string(),
        router_address.to_string(),
    ];
    let clock_instantiate2_msg = covenant_clock::msg::InstantiateMsg {
        tick_max_gas: msg.clock_tick_max_gas,
        whitelist: clock_queue.clone(),
        initial_queue: clock_queue,
    }
    .to_instantiate2_msg(
        &clock_instantiate2_config,
        admin.to_string(),
        format!("{}_clock", msg.label),
    )?;

    COVENANT_CLOCK_ADDR.save(deps.storage, &clock_instantiate2_config.addr)?;
    REMOTE_SPLITTER_ADDR.save(deps.storage, &splitter_instantiate2_config.addr)?;
    LS_FORWARDER_ADDR.save(deps.storage, &ls_forwarder_instantiate2_config.addr)?;
    LP_FORWARDER_ADDR.save(deps.storage, &lp_forwarder_instantiate2_config.addr)?;
    LIQUID_STAKER_ADDR.save(deps.storage, &liquid_staker_instantiate2_config.addr)?;
    LIQUID_POOLER_ADDR.save(deps.storage, &liquid_pooler_instantiate2_config.addr)?;
    HOLDER_ADDR.save(deps.storage, &holder_instantiate2_config.addr)?;
    ROUTER_ADDR.save(deps.storage, &router_instantiate2_config.addr)?;
    CONTRACT_CODES.save(deps.storage, &msg.contract_codes)?;

    Ok(Response::default()
        .add_attribute("method", "instantiate")
        .add_attribute("clock_addr", clock_address)
        .add_attribute("remote_splitter_addr", splitter_address)
        .add_attribute("ls_forwarder_addr", ls_forwarder_address)
        .add_attribute("lp_forwarder_addr", lp_forwarder_address)
        .add_attribute("liquid_staker_addr", liquid_staker_address)
        .add_attribute("liquid_pooler_addr", liquid_pooler_address)
        .add_attribute("holder_addr", holder_address)
        .add_attribute("router_addr", router_address)
        .add_attributes(party_config.get_response_attributes("party"))
        .add_messages(vec![
            clock_instantiate2_msg,
            splitter_instantiate2_msg,
            ls_forwarder_instantiate2_msg,
            lp_forwarder_instantiate2_msg,
            liquid_staker_instantiate2_msg,
            liquid_pooler_instantiate2_msg,
            holder_instantiate2_msg,
            router_instantiate2_msg,
        ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&COVENANT_CLOCK_ADDR.load(deps.storage)?),
        QueryMsg::HolderAddress {} => to_json_binary(&HOLDER_ADDR.load(deps.storage)?),
        QueryMsg::RemoteSplitterAddress {} => {
            to_json_binary(&REMOTE_SPLITTER_ADDR.load(deps.storage)?)
        }
        QueryMsg::IbcForwarderAddress { ty } => match ty.as_str() {
            "ls" => to_json_binary(&LS_FORWARDER_ADDR.load(deps.storage)?),
            "lp" => to_json_binary(&LP_FORWARDER_ADDR.load(deps.storage)?),
            _ => Err(StdError::generic_err(format!("unknown forwarder type: {ty}"))),
        },
        QueryMsg::LiquidStakerAddress {} => {
            to_json_binary(&LIQUID_STAKER_ADDR.load(deps.storage)?)
        }
        QueryMsg::LiquidPoolerAddress {} => {
            to_json_binary(&LIQUID_POOLER_ADDR.load(deps.storage)?)
        }
        QueryMsg::InterchainRouterAddress {} => to_json_binary(&ROUTER_ADDR.load(deps.storage)?),
        QueryMsg::PartyDepositAddress {} => {
            let splitter = REMOTE_SPLITTER_ADDR.load(deps.storage)?;
            to_json_binary(&query_deposit_address(deps.querier, splitter.as_str())?)
        }
        QueryMsg::ContractCodes {} => to_json_binary(&CONTRACT_CODES.load(deps.storage)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> StdResult<Response> {
    deps.api.debug("WASMDEBUG: migrate");

    match msg {
        MigrateMsg::MigrateContracts {
            clock,
            remote_chain_splitter,
            ls_forwarder,
            lp_forwarder,
            liquid_staker,
            liquid_pooler,
            holder,
            router,
        } => {
            let mut migrate_msgs = vec![];
            let mut resp = Response::default().add_attribute("method", "migrate_contracts");
            let contract_codes = CONTRACT_CODES.load(deps.storage)?;

            if let Some(clock) = clock {
                let msg = to_json_binary(&clock)?;
                resp = resp.add_attribute("clock_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: COVENANT_CLOCK_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.clock_code,
                    msg,
                });
            }

            if let Some(splitter) = remote_chain_splitter {
                let msg = to_json_binary(&splitter)?;
                resp = resp.add_attribute("remote_chain_splitter_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: REMOTE_SPLITTER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.remote_chain_splitter_code,
                    msg,
                });
            }

            if let Some(forwarder) = ls_forwarder {
                let msg = to_json_binary(&forwarder)?;
                resp = resp.add_attribute("ls_forwarder_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: LS_FORWARDER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.ibc_forwarder_code,
                    msg,
                });
            }

            if let Some(forwarder) = lp_forwarder {
                let msg = to_json_binary(&forwarder)?;
                resp = resp.add_attribute("lp_forwarder_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: LP_FORWARDER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.ibc_forwarder_code,
                    msg,
                });
            }

            if let Some(liquid_staker) = liquid_staker {
                let msg = to_json_binary(&liquid_staker)?;
                resp = resp.add_attribute("liquid_staker_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: LIQUID_STAKER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.liquid_staker_code,
                    msg,
                });
            }

            if let Some(liquid_pooler) = liquid_pooler {
                let msg = to_json_binary(&liquid_pooler)?;
                resp = resp.add_attribute("liquid_pooler_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: LIQUID_POOLER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.liquid_pooler_code,
                    msg,
                });
            }

            if let Some(holder) = holder {
                let msg = to_json_binary(&holder)?;
                resp = resp.add_attribute("holder_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: HOLDER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.holder_code,
                    msg,
                });
            }

            if let Some(router) = router {
                let msg = to_json_binary(&router)?;
                resp = resp.add_attribute("router_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: ROUTER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.interchain_router_code,
                    msg,
                });
            }

            Ok(resp.add_messages(migrate_msgs))
        }
    }
}
