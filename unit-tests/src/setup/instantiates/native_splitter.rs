use std::collections::BTreeMap;

use cosmwasm_std::Decimal;
use covenant_utils::split::SplitConfig;

pub struct NativeSplitterInstantiate {
    pub msg: covenant_native_splitter::msg::InstantiateMsg,
}

impl From<NativeSplitterInstantiate> for covenant_native_splitter::msg::InstantiateMsg {
    fn from(value: NativeSplitterInstantiate) -> Self {
        value.msg
    }
}

impl NativeSplitterInstantiate {
    pub fn new(
        clock_address: String,
        splits: BTreeMap<String, SplitConfig>,
        fallback_split: Option<SplitConfig>,
    ) -> Self {
        Self {
            msg: covenant_native_splitter::msg::InstantiateMsg {
                clock_address,
                splits,
                fallback_split,
            },
        }
    }

    pub fn with_clock_address(&mut self, addr: String) -> &mut Self {
        self.msg.clock_address = addr;
        self
    }

    pub fn with_splits(&mut self, splits: BTreeMap<String, SplitConfig>) -> &mut Self {
        self.msg.splits = splits;
        self
    }

    pub fn with_fallback_split(&mut self, fallback_split: Option<SplitConfig>) -> &mut Self {
        self.msg.fallback_split = fallback_split;
        self
    }
}

impl NativeSplitterInstantiate {
    /// every denom, fallback included, is split 50/50 between the receivers
    pub fn default(
        clock_address: String,
        denoms: &[&str],
        receiver_a: String,
        receiver_b: String,
    ) -> Self {
        let split = SplitConfig {
            receivers: BTreeMap::from([
                (receiver_a, Decimal::percent(50)),
                (receiver_b, Decimal::percent(50)),
            ]),
        };
        let splits = denoms
            .iter()
            .map(|d| (d.to_string(), split.clone()))
            .collect();

        Self::new(clock_address, splits, Some(split))
    }
}
