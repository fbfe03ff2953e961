use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_string, StdResult};

/// Memo understood by the stride autopilot middleware. Funds arriving
/// with it are liquid staked on behalf of `stride_address`.
#[cw_serde]
pub struct Autopilot {
    pub autopilot: AutopilotConfig,
}

#[cw_serde]
pub struct AutopilotConfig {
    pub receiver: String,
    pub stakeibc: Stakeibc,
}

#[cw_serde]
pub struct Stakeibc {
    pub action: String,
    pub stride_address: String,
}

impl Autopilot {
    /// liquid stake incoming funds and keep the vouchers in `ica`
    pub fn liquid_stake(ica: &str) -> Self {
        Autopilot {
            autopilot: AutopilotConfig {
                receiver: ica.to_string(),
                stakeibc: Stakeibc {
                    action: "LiquidStake".to_string(),
                    stride_address: ica.to_string(),
                },
            },
        }
    }

    pub fn to_memo(&self) -> StdResult<String> {
        to_json_string(self)
    }
}
