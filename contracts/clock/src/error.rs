use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("the contract is paused")]
    Paused,

    #[error("sender is already in the queue")]
    AlreadyEnqueued,

    #[error("sender is not in the queue")]
    NotEnqueued,

    #[error("{0} is not whitelisted")]
    NotWhitelisted(String),

    #[error("tick count overflow")]
    TickCountOverflow,

    #[error("received an unexpected reply ID ({0})")]
    UnexpectedReplyId(u64),
}
