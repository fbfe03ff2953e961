use std::collections::BTreeSet;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, WasmMsg,
};
use covenant_swap_holder::msg::{SwapPartiesConfig, SwapParty};
use covenant_utils::{
    instantiate2_helper::{
        get_instantiate2_salt_and_address, Instantiate2, Instantiate2HelperConfig,
    },
    neutron::query_deposit_address,
    split::remap_splits,
    CovenantPartyConfig, PresetIbcFee, ReceiverConfig,
};
use cw2::set_contract_version;
use cw_storage_plus::Item;

use crate::{
    error::ContractError,
    msg::{
        InstantiateMsg, MigrateMsg, QueryMsg, RouterMigrateMsg, SwapCovenantContractCodeIds,
        PARTY_A, PARTY_B,
    },
    state::{
        CONTRACT_CODES, COVENANT_CLOCK_ADDR, COVENANT_SWAP_HOLDER_ADDR, PARTY_A_IBC_FORWARDER_ADDR,
        PARTY_A_ROUTER_ADDR, PARTY_B_IBC_FORWARDER_ADDR, PARTY_B_ROUTER_ADDR, SPLITTER_ADDR,
    },
};

const CONTRACT_NAME: &str = "crates.io:covenant-swap";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const CLOCK_SALT: &[u8] = b"clock";
pub(crate) const HOLDER_SALT: &[u8] = b"swap_holder";
pub(crate) const PARTY_A_FORWARDER_SALT: &[u8] = b"party_a_ibc_forwarder";
pub(crate) const PARTY_B_FORWARDER_SALT: &[u8] = b"party_b_ibc_forwarder";
pub(crate) const PARTY_A_ROUTER_SALT: &[u8] = b"party_a_router";
pub(crate) const PARTY_B_ROUTER_SALT: &[u8] = b"party_b_router";
pub(crate) const NATIVE_SPLITTER_SALT: &[u8] = b"native_splitter";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    deps.api.debug("WASMDEBUG: swap covenant instantiate");

    msg.party_a_config.validate(deps.api)?;
    msg.party_b_config.validate(deps.api)?;

    let party_a_denom = msg.party_a_config.get_native_denom();
    let party_b_denom = msg.party_b_config.get_native_denom();
    if party_a_denom == party_b_denom {
        return Err(ContractError::PartyDenomCollision(party_a_denom));
    }
    for denom in [&party_a_denom, &party_b_denom] {
        msg.splits
            .get(denom)
            .ok_or_else(|| ContractError::MissingSplit(denom.to_string()))?
            .validate_shares()?;
    }

    let creator_address = deps.api.addr_canonicalize(env.contract.address.as_str())?;
    let codes = &msg.contract_codes;
    let clock_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        CLOCK_SALT,
        &creator_address,
        codes.clock_code,
    )?;
    let holder_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        HOLDER_SALT,
        &creator_address,
        codes.holder_code,
    )?;
    let splitter_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        NATIVE_SPLITTER_SALT,
        &creator_address,
        codes.splitter_code,
    )?;
    let party_a_router_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        PARTY_A_ROUTER_SALT,
        &creator_address,
        router_code(codes, &msg.party_a_config),
    )?;
    let party_b_router_instantiate2_config = get_instantiate2_salt_and_address(
        deps.as_ref(),
        PARTY_B_ROUTER_SALT,
        &creator_address,
        router_code(codes, &msg.party_b_config),
    )?;
    // native parties deposit straight into the swap holder
    let party_a_forwarder_instantiate2_config = match msg.party_a_config {
        CovenantPartyConfig::Interchain(_) => Some(get_instantiate2_salt_and_address(
            deps.as_ref(),
            PARTY_A_FORWARDER_SALT,
            &creator_address,
            codes.ibc_forwarder_code,
        )?),
        CovenantPartyConfig::Native(_) => None,
    };
    let party_b_forwarder_instantiate2_config = match msg.party_b_config {
        CovenantPartyConfig::Interchain(_) => Some(get_instantiate2_salt_and_address(
            deps.as_ref(),
            PARTY_B_FORWARDER_SALT,
            &creator_address,
            codes.ibc_forwarder_code,
        )?),
        CovenantPartyConfig::Native(_) => None,
    };

    let clock_address = clock_instantiate2_config.addr.to_string();
    let holder_address = holder_instantiate2_config.addr.to_string();
    let splitter_address = splitter_instantiate2_config.addr.to_string();
    let party_a_router_address = party_a_router_instantiate2_config.addr.to_string();
    let party_b_router_address = party_b_router_instantiate2_config.addr.to_string();
    let admin = env.contract.address.to_string();

    let mut clock_queue: Vec<String> = vec![];
    let mut messages: Vec<WasmMsg> = vec![];

    for (party, party_config, forwarder_config) in [
        (
            PARTY_A,
            &msg.party_a_config,
            &party_a_forwarder_instantiate2_config,
        ),
        (
            PARTY_B,
            &msg.party_b_config,
            &party_b_forwarder_instantiate2_config,
        ),
    ] {
        if let (CovenantPartyConfig::Interchain(config), Some(forwarder_config)) =
            (party_config, forwarder_config)
        {
            clock_queue.push(forwarder_config.addr.to_string());
            messages.push(
                covenant_ibc_forwarder::msg::InstantiateMsg {
                    clock_address: clock_address.to_string(),
                    next_contract: holder_address.to_string(),
                    remote_chain_connection_id: config.party_chain_connection_id.to_string(),
                    remote_chain_channel_id: config.party_to_host_chain_channel_id.to_string(),
                    denom: config.remote_chain_denom.to_string(),
                    ibc_transfer_timeout: msg.timeouts.ibc_transfer_timeout,
                    ica_timeout: msg.timeouts.ica_timeout,
                    ibc_fee: msg.preset_ibc_fee.clone(),
                    ica_registration_fee: msg.ica_registration_fee.clone(),
                }
                .to_instantiate2_msg(
                    forwarder_config,
                    admin.to_string(),
                    format!("{}_{party}_ibc_forwarder", msg.label),
                )?,
            );
        }
    }

    messages.push(
        covenant_swap_holder::msg::InstantiateMsg {
            clock_address: clock_address.to_string(),
            next_contract: splitter_address.to_string(),
            lockup_config: msg.lockup_config,
            parties_config: SwapPartiesConfig {
                party_a: SwapParty {
                    contribution: native_contribution(&msg.party_a_config),
                    router: party_a_router_address.to_string(),
                },
                party_b: SwapParty {
                    contribution: native_contribution(&msg.party_b_config),
                    router: party_b_router_address.to_string(),
                },
            },
        }
        .to_instantiate2_msg(
            &holder_instantiate2_config,
            admin.to_string(),
            format!("{}_swap_holder", msg.label),
        )?,
    );
    clock_queue.push(holder_address.to_string());

    let party_a_receiver = msg.party_a_config.get_final_receiver_address();
    let party_b_receiver = msg.party_b_config.get_final_receiver_address();
    let splits = remap_splits(
        msg.splits.clone(),
        (party_a_receiver.to_string(), party_a_router_address.to_string()),
        (party_b_receiver.to_string(), party_b_router_address.to_string()),
    )?;
    let fallback_split = match &msg.fallback_split {
        Some(split) => Some(split.remap_receivers_to_routers(
            &party_a_receiver,
            party_a_router_address.to_string(),
            &party_b_receiver,
            party_b_router_address.to_string(),
        )?),
        None => None,
    };
    messages.push(
        covenant_native_splitter::msg::InstantiateMsg {
            clock_address: clock_address.to_string(),
            splits,
            fallback_split,
        }
        .to_instantiate2_msg(
            &splitter_instantiate2_config,
            admin.to_string(),
            format!("{}_native_splitter", msg.label),
        )?,
    );
    clock_queue.push(splitter_address.to_string());

    let router_denoms = BTreeSet::from([party_a_denom.to_string(), party_b_denom.to_string()]);
    for (party, party_config, router_config) in [
        (
            PARTY_A,
            &msg.party_a_config,
            &party_a_router_instantiate2_config,
        ),
        (
            PARTY_B,
            &msg.party_b_config,
            &party_b_router_instantiate2_config,
        ),
    ] {
        messages.push(router_instantiate2_msg(
            party_config,
            router_config,
            RouterParams {
                admin: admin.to_string(),
                label: format!("{}_{party}_router", msg.label),
                clock_address: clock_address.to_string(),
                denoms: router_denoms.clone(),
                ibc_fee: &msg.preset_ibc_fee,
            },
        )?);
        clock_queue.push(router_config.addr.to_string());
    }

    messages.insert(
        0,
        covenant_clock::msg::InstantiateMsg {
            tick_max_gas: msg.clock_tick_max_gas,
            whitelist: clock_queue.clone(),
            initial_queue: clock_queue,
        }
        .to_instantiate2_msg(
            &clock_instantiate2_config,
            admin.to_string(),
            format!("{}_clock", msg.label),
        )?,
    );

    COVENANT_CLOCK_ADDR.save(deps.storage, &clock_instantiate2_config.addr)?;
    COVENANT_SWAP_HOLDER_ADDR.save(deps.storage, &holder_instantiate2_config.addr)?;
    SPLITTER_ADDR.save(deps.storage, &splitter_instantiate2_config.addr)?;
    PARTY_A_ROUTER_ADDR.save(deps.storage, &party_a_router_instantiate2_config.addr)?;
    PARTY_B_ROUTER_ADDR.save(deps.storage, &party_b_router_instantiate2_config.addr)?;
    CONTRACT_CODES.save(deps.storage, &msg.contract_codes)?;

    let mut resp = Response::default()
        .add_attribute("method", "instantiate")
        .add_attribute("clock_addr", clock_address)
        .add_attribute("holder_addr", holder_address)
        .add_attribute("splitter_addr", splitter_address)
        .add_attribute("party_a_router_addr", party_a_router_address)
        .add_attribute("party_b_router_addr", party_b_router_address)
        .add_attributes(msg.party_a_config.get_response_attributes(PARTY_A))
        .add_attributes(msg.party_b_config.get_response_attributes(PARTY_B));

    if let Some(config) = party_a_forwarder_instantiate2_config {
        PARTY_A_IBC_FORWARDER_ADDR.save(deps.storage, &config.addr)?;
        resp = resp.add_attribute("party_a_ibc_forwarder_addr", config.addr);
    }
    if let Some(config) = party_b_forwarder_instantiate2_config {
        PARTY_B_IBC_FORWARDER_ADDR.save(deps.storage, &config.addr)?;
        resp = resp.add_attribute("party_b_ibc_forwarder_addr", config.addr);
    }

    Ok(resp.add_messages(messages))
}

/// interchain contributions are denominated on the party chain, the
/// holder sees them under their neutron denom
fn native_contribution(party_config: &CovenantPartyConfig) -> Coin {
    Coin {
        denom: party_config.get_native_denom(),
        amount: party_config.get_contribution().amount,
    }
}

fn router_code(codes: &SwapCovenantContractCodeIds, party_config: &CovenantPartyConfig) -> u64 {
    match party_config {
        CovenantPartyConfig::Interchain(_) => codes.interchain_router_code,
        CovenantPartyConfig::Native(_) => codes.native_router_code,
    }
}

struct RouterParams<'a> {
    admin: String,
    label: String,
    clock_address: String,
    denoms: BTreeSet<String>,
    ibc_fee: &'a PresetIbcFee,
}

fn router_instantiate2_msg(
    party_config: &CovenantPartyConfig,
    instantiate2_config: &Instantiate2HelperConfig,
    params: RouterParams,
) -> StdResult<WasmMsg> {
    match party_config.to_receiver_config() {
        ReceiverConfig::Native(receiver_address) => covenant_native_router::msg::InstantiateMsg {
            clock_address: params.clock_address,
            receiver_address,
            denoms: params.denoms,
        }
        .to_instantiate2_msg(instantiate2_config, params.admin, params.label),
        ReceiverConfig::Ibc(destination_config) => {
            covenant_interchain_router::msg::InstantiateMsg {
                clock_address: params.clock_address,
                destination_config,
                denoms: params.denoms,
                ibc_fee: params.ibc_fee.clone(),
            }
            .to_instantiate2_msg(instantiate2_config, params.admin, params.label)
        }
    }
}

fn party_item<'a>(
    party: &str,
    party_a_item: Item<'a, Addr>,
    party_b_item: Item<'a, Addr>,
) -> StdResult<Item<'a, Addr>> {
    match party {
        PARTY_A => Ok(party_a_item),
        PARTY_B => Ok(party_b_item),
        _ => Err(StdError::generic_err(format!("unknown party: {party}"))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClockAddress {} => to_json_binary(&COVENANT_CLOCK_ADDR.load(deps.storage)?),
        QueryMsg::HolderAddress {} => {
            to_json_binary(&COVENANT_SWAP_HOLDER_ADDR.load(deps.storage)?)
        }
        QueryMsg::SplitterAddress {} => to_json_binary(&SPLITTER_ADDR.load(deps.storage)?),
        QueryMsg::IbcForwarderAddress { party } => {
            let item = party_item(&party, PARTY_A_IBC_FORWARDER_ADDR, PARTY_B_IBC_FORWARDER_ADDR)?;
            to_json_binary(&item.may_load(deps.storage)?)
        }
        QueryMsg::InterchainRouterAddress { party } => {
            let item = party_item(&party, PARTY_A_ROUTER_ADDR, PARTY_B_ROUTER_ADDR)?;
            to_json_binary(&item.load(deps.storage)?)
        }
        QueryMsg::PartyDepositAddress { party } => {
            let item = party_item(&party, PARTY_A_IBC_FORWARDER_ADDR, PARTY_B_IBC_FORWARDER_ADDR)?;
            let deposit_address = match item.may_load(deps.storage)? {
                Some(forwarder) => query_deposit_address(deps.querier, forwarder.as_str())?,
                None => Some(COVENANT_SWAP_HOLDER_ADDR.load(deps.storage)?.to_string()),
            };
            to_json_binary(&deposit_address)
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
            holder,
            splitter,
            party_a_router,
            party_b_router,
            party_a_forwarder,
            party_b_forwarder,
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

            if let Some(holder) = holder {
                let msg = to_json_binary(&holder)?;
                resp = resp.add_attribute("holder_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: COVENANT_SWAP_HOLDER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.holder_code,
                    msg,
                });
            }

            if let Some(splitter) = splitter {
                let msg = to_json_binary(&splitter)?;
                resp = resp.add_attribute("splitter_migrate", msg.to_base64());
                migrate_msgs.push(WasmMsg::Migrate {
                    contract_addr: SPLITTER_ADDR.load(deps.storage)?.to_string(),
                    new_code_id: contract_codes.splitter_code,
                    msg,
                });
            }

            for (party, router, router_addr) in [
                (PARTY_A, party_a_router, PARTY_A_ROUTER_ADDR),
                (PARTY_B, party_b_router, PARTY_B_ROUTER_ADDR),
            ] {
                if let Some(router) = router {
                    let (msg, new_code_id) = match router {
                        RouterMigrateMsg::Native(msg) => {
                            (to_json_binary(&msg)?, contract_codes.native_router_code)
                        }
                        RouterMigrateMsg::Interchain(msg) => {
                            (to_json_binary(&msg)?, contract_codes.interchain_router_code)
                        }
                    };
                    resp = resp.add_attribute(format!("{party}_router_migrate"), msg.to_base64());
                    migrate_msgs.push(WasmMsg::Migrate {
                        contract_addr: router_addr.load(deps.storage)?.to_string(),
                        new_code_id,
                        msg,
                    });
                }
            }

            for (party, forwarder, forwarder_addr) in [
                (PARTY_A, party_a_forwarder, PARTY_A_IBC_FORWARDER_ADDR),
                (PARTY_B, party_b_forwarder, PARTY_B_IBC_FORWARDER_ADDR),
            ] {
                if let Some(forwarder) = forwarder {
                    let msg = to_json_binary(&forwarder)?;
                    resp =
                        resp.add_attribute(format!("{party}_forwarder_migrate"), msg.to_base64());
                    migrate_msgs.push(WasmMsg::Migrate {
                        contract_addr: forwarder_addr.load(deps.storage)?.to_string(),
                        new_code_id: contract_codes.ibc_forwarder_code,
                        msg,
                    });
                }
            }

            Ok(resp.add_messages(migrate_msgs))
        }
    }
}
