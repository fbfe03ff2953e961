use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    Attribute, Binary, CustomQuery, QuerierWrapper, StdError, StdResult, Timestamp, Uint128, Uint64,
};
use neutron_sdk::{
    bindings::{msg::IbcFee, types::ProtobufAny},
    NeutronResult,
};
use prost::Message;

pub const MSG_TRANSFER_TYPE_URL: &str = "/ibc.applications.transfer.v1.MsgTransfer";
pub const MSG_MULTI_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgMultiSend";

#[cw_serde]
pub struct RemoteChainInfo {
    /// connection id from neutron to the remote chain on which
    /// we wish to open an ICA
    pub connection_id: String,
    /// channel from the remote chain to neutron
    pub channel_id: String,
    pub denom: String,
    pub ibc_transfer_timeout: Uint64,
    pub ica_timeout: Uint64,
    pub ibc_fee: IbcFee,
}

impl RemoteChainInfo {
    pub fn validate(&self) -> StdResult<()> {
        if self.ibc_fee.recv_fee.iter().any(|c| !c.amount.is_zero()) {
            return Err(StdError::generic_err("recv_fee must be empty"));
        }
        if self.ibc_fee.ack_fee.is_empty() || self.ibc_fee.timeout_fee.is_empty() {
            return Err(StdError::generic_err(
                "ack_fee and timeout_fee must both be specified",
            ));
        }
        if self.ica_timeout.is_zero() || self.ibc_transfer_timeout.is_zero() {
            return Err(StdError::generic_err("timeouts must be non-zero"));
        }
        Ok(())
    }

    /// absolute timeout for a transfer submitted through the ICA. the inner
    /// transfer must outlive the ICA packet carrying it.
    pub fn transfer_timeout_nanos(&self, now: Timestamp) -> u64 {
        now.plus_seconds(self.ica_timeout.u64())
            .plus_seconds(self.ibc_transfer_timeout.u64())
            .nanos()
    }

    pub fn get_response_attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new("connection_id", &self.connection_id),
            Attribute::new("channel_id", &self.channel_id),
            Attribute::new("denom", &self.denom),
            Attribute::new(
                "ibc_transfer_timeout",
                self.ibc_transfer_timeout.to_string(),
            ),
            Attribute::new("ica_timeout", self.ica_timeout.to_string()),
        ]
    }
}

pub fn get_proto_coin(
    denom: String,
    amount: Uint128,
) -> cosmos_sdk_proto::cosmos::base::v1beta1::Coin {
    cosmos_sdk_proto::cosmos::base::v1beta1::Coin {
        denom,
        amount: amount.to_string(),
    }
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct IbcCounterpartyHeight {
    #[prost(uint64, optional, tag = "1")]
    pub revision_number: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub revision_height: Option<u64>,
}

/// ibc-go transfer message, encoded for submission through an ICA
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgTransfer {
    #[prost(string, tag = "1")]
    pub source_port: String,
    #[prost(string, tag = "2")]
    pub source_channel: String,
    #[prost(message, optional, tag = "3")]
    pub token: Option<cosmos_sdk_proto::cosmos::base::v1beta1::Coin>,
    #[prost(string, tag = "4")]
    pub sender: String,
    #[prost(string, tag = "5")]
    pub receiver: String,
    /// The timeout is disabled when set to 0.
    #[prost(message, optional, tag = "6")]
    pub timeout_height: Option<IbcCounterpartyHeight>,
    /// Timeout timestamp in absolute nanoseconds since unix epoch.
    #[prost(uint64, tag = "7")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "8")]
    pub memo: String,
}

fn to_protobuf_any(msg: impl Message, type_url: &str) -> NeutronResult<ProtobufAny> {
    let mut buf = Vec::with_capacity(msg.encoded_len());
    if let Err(e) = msg.encode(&mut buf) {
        return Err(StdError::generic_err(format!("Encode error: {e}")).into());
    }

    Ok(ProtobufAny {
        type_url: type_url.to_string(),
        value: Binary::from(buf),
    })
}

pub fn to_proto_msg_transfer(msg: MsgTransfer) -> NeutronResult<ProtobufAny> {
    to_protobuf_any(msg, MSG_TRANSFER_TYPE_URL)
}

pub fn to_proto_msg_multi_send(
    msg: cosmos_sdk_proto::cosmos::bank::v1beta1::MsgMultiSend,
) -> NeutronResult<ProtobufAny> {
    to_protobuf_any(msg, MSG_MULTI_SEND_TYPE_URL)
}

pub fn flatten_ibc_fee_total_amount(ibc_fee: &IbcFee) -> Uint128 {
    ibc_fee
        .recv_fee
        .iter()
        .chain(ibc_fee.ack_fee.iter())
        .chain(ibc_fee.timeout_fee.iter())
        .map(|c| c.amount)
        .sum()
}

/// The query every stage answers so that its upstream knows where to send.
#[cw_serde]
#[derive(QueryResponses)]
pub enum CovenantQueryMsg {
    #[returns(Option<String>)]
    DepositAddress {},
}

/// Deposit address advertised by `stage`. `None` while the stage is not
/// ready to receive funds.
pub fn query_deposit_address<C: CustomQuery>(
    querier: QuerierWrapper<C>,
    stage: &str,
) -> StdResult<Option<String>> {
    querier.query_wasm_smart(stage.to_string(), &CovenantQueryMsg::DepositAddress {})
}

/// Query next contract for the memo field.
/// Stages that do not need a memo do not implement `NextMemo`, so a failed
/// query means an empty memo. A stage that does implement it must never
/// answer with an empty string; that is treated as not ready.
pub fn query_next_memo<C: CustomQuery>(querier: QuerierWrapper<C>, stage: &str) -> StdResult<String> {
    #[cw_serde]
    enum Query {
        NextMemo {},
    }

    let Ok(memo) = querier.query_wasm_smart::<String>(stage.to_string(), &Query::NextMemo {})
    else {
        return Ok(String::new());
    };

    if memo.is_empty() {
        Err(StdError::generic_err("NextMemo query returned empty string"))
    } else {
        Ok(memo)
    }
}
