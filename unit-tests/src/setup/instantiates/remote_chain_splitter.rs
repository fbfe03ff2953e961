use std::collections::BTreeMap;

use cosmwasm_std::{coins, Coin, Decimal, Uint64};
use covenant_utils::{split::SplitConfig, PresetIbcFee};

use crate::setup::{DENOM_ATOM, DENOM_NTRN, NTRN_HUB_CHANNEL};

use super::ibc_forwarder::default_ibc_fee;

pub struct RemoteChainSplitterInstantiate {
    pub msg: covenant_remote_chain_splitter::msg::InstantiateMsg,
}

impl From<RemoteChainSplitterInstantiate>
    for covenant_remote_chain_splitter::msg::InstantiateMsg
{
    fn from(value: RemoteChainSplitterInstantiate) -> Self {
        value.msg
    }
}

impl RemoteChainSplitterInstantiate {
    pub fn new(
        clock_address: String,
        remote_chain_connection_id: String,
        remote_chain_channel_id: String,
        denom: String,
        split: SplitConfig,
        ibc_fee: PresetIbcFee,
        ica_timeout: Uint64,
        ibc_transfer_timeout: Uint64,
        ica_registration_fee: Vec<Coin>,
    ) -> Self {
        Self {
            msg: covenant_remote_chain_splitter::msg::InstantiateMsg {
                clock_address,
                remote_chain_connection_id,
                remote_chain_channel_id,
                denom,
                split,
                ibc_fee,
                ica_timeout,
                ibc_transfer_timeout,
                ica_registration_fee,
            },
        }
    }

    pub fn with_clock_address(&mut self, addr: String) -> &mut Self {
        self.msg.clock_address = addr;
        self
    }

    pub fn with_split(&mut self, split: SplitConfig) -> &mut Self {
        self.msg.split = split;
        self
    }

    pub fn with_denom(&mut self, denom: String) -> &mut Self {
        self.msg.denom = denom;
        self
    }
}

impl RemoteChainSplitterInstantiate {
    /// Splits uatom on the hub evenly between two receivers
    pub fn default(clock_address: String, receiver_a: String, receiver_b: String) -> Self {
        Self::new(
            clock_address,
            "connection-0".to_string(),
            NTRN_HUB_CHANNEL.1.to_string(),
            DENOM_ATOM.to_string(),
            SplitConfig {
                receivers: BTreeMap::from([
                    (receiver_a, Decimal::percent(50)),
                    (receiver_b, Decimal::percent(50)),
                ]),
            },
            default_ibc_fee(),
            Uint64::new(100),
            Uint64::new(100),
            coins(1_000_000, DENOM_NTRN),
        )
    }
}
