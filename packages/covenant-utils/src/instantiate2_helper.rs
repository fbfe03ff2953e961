use cosmwasm_schema::{cw_serde, serde::Serialize};
use cosmwasm_std::{
    instantiate2_address, to_json_binary, Addr, Binary, CanonicalAddr, CodeInfoResponse,
    CustomQuery, Deps, StdError, StdResult, WasmMsg,
};
use sha2::{Digest, Sha256};

/// Instantiate messages of every pipeline stage implement this so the
/// covenant can deploy them at precomputed addresses.
pub trait Instantiate2: Serialize {
    fn to_instantiate2_msg(
        &self,
        instantiate2_helper: &Instantiate2HelperConfig,
        admin: String,
        label: String,
    ) -> StdResult<WasmMsg> {
        Ok(WasmMsg::Instantiate2 {
            admin: Some(admin),
            code_id: instantiate2_helper.code,
            label,
            msg: to_json_binary(self)?,
            funds: vec![],
            salt: instantiate2_helper.salt.clone(),
        })
    }
}

fn get_precomputed_address<C: CustomQuery>(
    deps: Deps<C>,
    code_id: u64,
    creator: &CanonicalAddr,
    salt: &[u8],
) -> StdResult<Addr> {
    let CodeInfoResponse { checksum, .. } = deps.querier.query_wasm_code_info(code_id)?;

    let addr = instantiate2_address(&checksum, creator, salt)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    deps.api.addr_humanize(&addr)
}

pub fn generate_contract_salt(salt_str: &[u8]) -> Binary {
    let mut hasher = Sha256::new();
    hasher.update(salt_str);
    hasher.finalize().to_vec().into()
}

pub fn get_instantiate2_salt_and_address<C: CustomQuery>(
    deps: Deps<C>,
    salt_bytes: &[u8],
    creator_address: &CanonicalAddr,
    code_id: u64,
) -> StdResult<Instantiate2HelperConfig> {
    let salt = generate_contract_salt(salt_bytes);
    let addr = get_precomputed_address(deps, code_id, creator_address, &salt)?;

    Ok(Instantiate2HelperConfig {
        addr,
        code: code_id,
        salt,
    })
}

#[cw_serde]
pub struct Instantiate2HelperConfig {
    pub addr: Addr,
    pub code: u64,
    pub salt: Binary,
}
