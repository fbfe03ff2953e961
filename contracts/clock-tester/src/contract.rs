#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint64,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, Mode, QueryMsg};
use crate::state::{MODE, TICK_COUNT};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    MODE.save(deps.storage, &msg.mode)?;
    TICK_COUNT.save(deps.storage, &0)?;

    Ok(Response::default().add_attribute("method", "clock_tester_instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Tick {} => match MODE.load(deps.storage)? {
            Mode::Accept => {
                let count =
                    TICK_COUNT.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;
                Ok(Response::default()
                    .add_attribute("method", "tick")
                    .add_attribute("tick_count", count.to_string()))
            }
            Mode::Error => Err(ContractError::ErrorMode),
        },
        ExecuteMsg::SetMode { mode } => {
            MODE.save(deps.storage, &mode)?;
            Ok(Response::default().add_attribute("method", "set_mode"))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TickCount {} => to_json_binary(&Uint64::new(TICK_COUNT.load(deps.storage)?)),
    }
}
