use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_string, Api, Attribute, Coin, CosmosMsg, Decimal, StdError, StdResult, Timestamp,
    Uint128, Uint64,
};
use neutron::flatten_ibc_fee_total_amount;
use neutron_sdk::{
    bindings::msg::{IbcFee, NeutronMsg},
    sudo::msg::RequestPacketTimeoutHeight,
};

pub mod astroport;
pub mod clock;
pub mod ica;
pub mod icq;
pub mod instantiate2_helper;
pub mod ledger;
pub mod neutron;
pub mod split;
pub mod state_machine;
pub mod withdraw_lp_helper;

/// denom all relayer fees are paid in
pub const FEE_DENOM: &str = "untrn";

/// five hours
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60 * 60 * 5;

#[cw_serde]
pub struct InterchainCovenantParty {
    /// address of the receiver on destination chain
    pub party_receiver_addr: String,
    /// connection id to the party chain
    pub party_chain_connection_id: String,
    /// timeout in seconds
    pub ibc_transfer_timeout: Uint64,
    /// channel id from party to host chain
    pub party_to_host_chain_channel_id: String,
    /// channel id from host chain to the party chain
    pub host_to_party_chain_channel_id: String,
    /// denom provided by the party on its native chain
    pub remote_chain_denom: String,
    /// authorized address of the party on neutron
    pub addr: String,
    /// denom provided by the party on neutron
    pub native_denom: String,
    /// coin provided by the party on its native chain
    pub contribution: Coin,
    /// configuration for unwinding the denoms via pfm
    pub denom_to_pfm_map: BTreeMap<String, PacketForwardMiddlewareConfig>,
}

#[cw_serde]
pub struct NativeCovenantParty {
    /// address of the receiver on neutron
    pub party_receiver_addr: String,
    /// denom provided by the party on neutron
    pub native_denom: String,
    /// authorized address of the party on neutron
    pub addr: String,
    /// coin provided by the party on neutron
    pub contribution: Coin,
}

/// How a party's contribution enters the pipeline. The enum makes
/// "exactly one of native or interchain" a type-level fact.
#[cw_serde]
pub enum CovenantPartyConfig {
    Interchain(InterchainCovenantParty),
    Native(NativeCovenantParty),
}

impl CovenantPartyConfig {
    pub fn get_final_receiver_address(&self) -> String {
        match self {
            CovenantPartyConfig::Interchain(config) => config.party_receiver_addr.to_string(),
            CovenantPartyConfig::Native(config) => config.party_receiver_addr.to_string(),
        }
    }

    pub fn get_native_denom(&self) -> String {
        match self {
            CovenantPartyConfig::Interchain(config) => config.native_denom.to_string(),
            CovenantPartyConfig::Native(config) => config.native_denom.to_string(),
        }
    }

    pub fn get_contribution(&self) -> Coin {
        match self {
            CovenantPartyConfig::Interchain(config) => config.contribution.clone(),
            CovenantPartyConfig::Native(config) => config.contribution.clone(),
        }
    }

    /// receiver config for the router that will deliver this party's proceeds
    pub fn to_receiver_config(&self) -> ReceiverConfig {
        match self {
            CovenantPartyConfig::Interchain(config) => ReceiverConfig::Ibc(DestinationConfig {
                local_to_destination_chain_channel_id: config
                    .host_to_party_chain_channel_id
                    .to_string(),
                destination_receiver_addr: config.party_receiver_addr.to_string(),
                ibc_transfer_timeout: config.ibc_transfer_timeout,
                denom_to_pfm_map: config.denom_to_pfm_map.clone(),
            }),
            CovenantPartyConfig::Native(config) => {
                ReceiverConfig::Native(config.party_receiver_addr.to_string())
            }
        }
    }

    pub fn validate(&self, api: &dyn Api) -> StdResult<()> {
        match self {
            CovenantPartyConfig::Interchain(config) => {
                if config.contribution.denom != config.remote_chain_denom {
                    return Err(StdError::generic_err(format!(
                        "contribution denom {} does not match remote chain denom {}",
                        config.contribution.denom, config.remote_chain_denom
                    )));
                }
                soft_validate_remote_chain_addr(api, &config.party_receiver_addr)
            }
            CovenantPartyConfig::Native(config) => {
                if config.contribution.denom != config.native_denom {
                    return Err(StdError::generic_err(format!(
                        "contribution denom {} does not match native denom {}",
                        config.contribution.denom, config.native_denom
                    )));
                }
                api.addr_validate(&config.party_receiver_addr)?;
                Ok(())
            }
        }
    }

    pub fn get_response_attributes(&self, party: &str) -> Vec<Attribute> {
        let contribution = self.get_contribution();
        vec![
            Attribute::new(format!("{party}_receiver"), self.get_final_receiver_address()),
            Attribute::new(format!("{party}_native_denom"), self.get_native_denom()),
            Attribute::new(format!("{party}_contribution"), contribution.to_string()),
        ]
    }
}

#[cw_serde]
pub enum ReceiverConfig {
    /// party expects to receive funds on the same chain
    Native(String),
    /// party expects to receive funds on a remote chain
    Ibc(DestinationConfig),
}

impl ReceiverConfig {
    pub fn get_response_attributes(&self) -> Vec<Attribute> {
        match self {
            ReceiverConfig::Native(addr) => {
                vec![Attribute::new("receiver_config_native_addr", addr)]
            }
            ReceiverConfig::Ibc(destination_config) => destination_config.get_response_attributes(),
        }
    }
}

#[cw_serde]
pub struct DestinationConfig {
    /// channel id of the destination chain
    pub local_to_destination_chain_channel_id: String,
    /// address of the receiver on destination chain
    pub destination_receiver_addr: String,
    /// timeout in seconds
    pub ibc_transfer_timeout: Uint64,
    /// pfm configurations for denoms
    pub denom_to_pfm_map: BTreeMap<String, PacketForwardMiddlewareConfig>,
}

#[cw_serde]
pub struct PacketForwardMiddlewareConfig {
    pub local_to_hop_chain_channel_id: String,
    pub hop_to_destination_chain_channel_id: String,
    pub hop_chain_receiver_address: String,
}

// https://github.com/strangelove-ventures/packet-forward-middleware/blob/main/router/types/forward.go
#[cw_serde]
pub struct PacketMetadata {
    pub forward: Option<ForwardMetadata>,
}

#[cw_serde]
pub struct ForwardMetadata {
    pub receiver: String,
    pub port: String,
    pub channel: String,
}

impl DestinationConfig {
    /// Builds one ibc transfer per coin. When distributing the fee denom
    /// itself, enough of it is held back to pay for every transfer.
    pub fn get_ibc_transfer_messages_for_coins(
        &self,
        coins: Vec<Coin>,
        current_timestamp: Timestamp,
        sender_address: String,
        ibc_fee: IbcFee,
    ) -> StdResult<Vec<CosmosMsg<NeutronMsg>>> {
        let transfer_count = Uint128::from(coins.len() as u128);
        let reserve_amount = flatten_ibc_fee_total_amount(&ibc_fee).checked_mul(transfer_count)?;
        let timeout_timestamp = current_timestamp
            .plus_seconds(self.ibc_transfer_timeout.u64())
            .nanos();

        let mut messages: Vec<CosmosMsg<NeutronMsg>> = vec![];
        for coin in coins {
            let token = if coin.denom == FEE_DENOM {
                match coin.amount.checked_sub(reserve_amount) {
                    Ok(amount) if !amount.is_zero() => Coin {
                        denom: coin.denom,
                        amount,
                    },
                    _ => continue,
                }
            } else {
                coin
            };

            let (source_channel, receiver, memo) = match self.denom_to_pfm_map.get(&token.denom) {
                Some(pfm_config) => (
                    pfm_config.local_to_hop_chain_channel_id.to_string(),
                    pfm_config.hop_chain_receiver_address.to_string(),
                    to_json_string(&PacketMetadata {
                        forward: Some(ForwardMetadata {
                            receiver: self.destination_receiver_addr.to_string(),
                            port: "transfer".to_string(),
                            channel: pfm_config.hop_to_destination_chain_channel_id.to_string(),
                        }),
                    })?,
                ),
                None => (
                    self.local_to_destination_chain_channel_id.to_string(),
                    self.destination_receiver_addr.to_string(),
                    format!("ibc_distribution: {}:{}", token.denom, token.amount),
                ),
            };

            messages.push(CosmosMsg::Custom(NeutronMsg::IbcTransfer {
                source_port: "transfer".to_string(),
                source_channel,
                token,
                sender: sender_address.to_string(),
                receiver,
                timeout_height: RequestPacketTimeoutHeight {
                    revision_number: None,
                    revision_height: None,
                },
                timeout_timestamp,
                memo,
                fee: ibc_fee.clone(),
            }));
        }

        Ok(messages)
    }

    pub fn get_response_attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new(
                "local_to_destination_chain_channel_id",
                self.local_to_destination_chain_channel_id.to_string(),
            ),
            Attribute::new(
                "destination_receiver_addr",
                self.destination_receiver_addr.to_string(),
            ),
            Attribute::new("ibc_transfer_timeout", self.ibc_transfer_timeout),
        ]
    }
}

/// Relayer fee schedule fixed at instantiation. Both fees are paid in
/// `untrn`; receive fees are not supported by neutron.
#[cw_serde]
pub struct PresetIbcFee {
    pub ack_fee: Uint128,
    pub timeout_fee: Uint128,
}

impl PresetIbcFee {
    pub fn to_ibc_fee(&self) -> IbcFee {
        IbcFee {
            // must be empty
            recv_fee: vec![],
            ack_fee: vec![Coin {
                denom: FEE_DENOM.to_string(),
                amount: self.ack_fee,
            }],
            timeout_fee: vec![Coin {
                denom: FEE_DENOM.to_string(),
                amount: self.timeout_fee,
            }],
        }
    }
}

#[cw_serde]
pub struct Timeouts {
    /// ica timeout in seconds
    pub ica_timeout: Uint64,
    /// ibc transfer timeout in seconds
    pub ibc_transfer_timeout: Uint64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            ica_timeout: Uint64::new(DEFAULT_TIMEOUT_SECONDS),
            ibc_transfer_timeout: Uint64::new(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

/// single side lp limits define the highest amount (in `Uint128`) that
/// we consider acceptable to provide single-sided.
/// if asset balance exceeds these limits, double-sided liquidity should be provided.
#[cw_serde]
pub struct SingleSideLpLimits {
    pub asset_a_limit: Uint128,
    pub asset_b_limit: Uint128,
}

/// config for the pool price expectations upon covenant instantiation
#[cw_serde]
pub struct PoolPriceConfig {
    pub expected_spot_price: Decimal,
    pub acceptable_price_spread: Decimal,
}

#[cw_serde]
pub struct DecimalRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl DecimalRange {
    /// `mid ± delta`, saturating at zero on the low end
    pub fn try_from(mid: Decimal, delta: Decimal) -> StdResult<DecimalRange> {
        Ok(DecimalRange {
            min: mid.saturating_sub(delta),
            max: mid.checked_add(delta)?,
        })
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

impl PoolPriceConfig {
    pub fn to_range(&self) -> StdResult<DecimalRange> {
        DecimalRange::try_from(self.expected_spot_price, self.acceptable_price_spread)
    }
}

/// soft validation for addresses on remote chains.
/// skips the bech32 prefix and variant checks.
pub fn soft_validate_remote_chain_addr(api: &dyn Api, addr: &str) -> StdResult<()> {
    let (_prefix, decoded, _variant) = bech32::decode(addr).map_err(|e| {
        StdError::generic_err(format!(
            "soft_addr_validation for address {addr:?} failed to bech32 decode: {e}"
        ))
    })?;
    let decoded_bytes = <Vec<u8> as bech32::FromBase32>::from_base32(&decoded).map_err(|e| {
        StdError::generic_err(format!(
            "soft_addr_validation for address {addr:?} failed to get bytes from base32: {e}"
        ))
    })?;

    api.addr_humanize(&decoded_bytes.into()).map_err(|e| {
        StdError::generic_err(format!(
            "soft_addr_validation for address {addr:?} failed to addr_humanize: {e}"
        ))
    })?;
    Ok(())
}
