use covenant_holder::msg::RefundConfig;
use cw_utils::Expiration;

pub struct HolderInstantiate {
    pub msg: covenant_holder::msg::InstantiateMsg,
}

impl From<HolderInstantiate> for covenant_holder::msg::InstantiateMsg {
    fn from(value: HolderInstantiate) -> Self {
        value.msg
    }
}

impl HolderInstantiate {
    pub fn new(
        clock_address: String,
        withdrawer: Option<String>,
        pool_address: String,
        liquid_pooler_address: String,
        next_contract: String,
        lockup_config: Expiration,
        denoms: Vec<String>,
    ) -> Self {
        Self {
            msg: covenant_holder::msg::InstantiateMsg {
                clock_address,
                withdrawer,
                pool_address,
                liquid_pooler_address,
                next_contract,
                lockup_config,
                denoms,
                refund_config: None,
                emergency_committee: None,
            },
        }
    }

    pub fn with_withdrawer(&mut self, withdrawer: Option<String>) -> &mut Self {
        self.msg.withdrawer = withdrawer;
        self
    }

    pub fn with_lockup_config(&mut self, lockup_config: Expiration) -> &mut Self {
        self.msg.lockup_config = lockup_config;
        self
    }

    pub fn with_refund_config(&mut self, refund_config: Option<RefundConfig>) -> &mut Self {
        self.msg.refund_config = refund_config;
        self
    }

    pub fn with_emergency_committee(&mut self, committee: Option<String>) -> &mut Self {
        self.msg.emergency_committee = committee;
        self
    }

    pub fn with_denoms(&mut self, denoms: Vec<String>) -> &mut Self {
        self.msg.denoms = denoms;
        self
    }
}
